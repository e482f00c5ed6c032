//! Session-rights query against the bastion's HTTP API.
//!
//! One reusable `reqwest::Client` per [`GatewayClient`]. The request is
//! `GET https://{bastion}/api/sessionrights?q={query}` with HTTP basic auth;
//! on failure the gateway returns a JSON body carrying a `reason` field.
//! Timeout and TLS policy live entirely in this layer — the core never
//! touches the network.

use std::time::Duration;

use brdp_core::{AuthorizationRecord, BrdpError, BrdpResult};
use serde::Deserialize;
use tracing::{debug, warn};

/// Request timeout for the session-rights call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body returned by the gateway API on a non-success status.
#[derive(Debug, Deserialize)]
struct GatewayFault {
    #[serde(default)]
    reason: String,
}

/// HTTP client bound to one bastion host.
pub struct GatewayClient {
    base_url: String,
    http: reqwest::Client,
}

impl GatewayClient {
    /// Create a client for `bastion` (host or host:port, no scheme).
    ///
    /// `accept_invalid_certs` disables TLS verification for gateways running
    /// self-signed certificates; verification is on by default.
    pub fn new(bastion: &str, accept_invalid_certs: bool) -> BrdpResult<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BrdpError::Transport(e.to_string()))?;
        Ok(Self {
            base_url: format!("https://{bastion}"),
            http,
        })
    }

    /// Fetch the session rights matching `query` for `user`.
    ///
    /// Returns the raw record list; disambiguation is the caller's job
    /// (see [`crate::select::select_right`]).
    pub async fn session_rights(
        &self,
        user: &str,
        password: &str,
        query: &str,
    ) -> BrdpResult<Vec<AuthorizationRecord>> {
        let url = format!("{}/api/sessionrights", self.base_url);
        debug!(url = %url, query = %query, "querying session rights");

        let response = self
            .http
            .get(&url)
            .query(&[("q", query)])
            .basic_auth(user, Some(password))
            .send()
            .await
            .map_err(|e| BrdpError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let rights = response
                .json::<Vec<AuthorizationRecord>>()
                .await
                .map_err(|e| BrdpError::Transport(format!("invalid session-rights payload: {e}")))?;
            debug!(count = rights.len(), "session rights received");
            Ok(rights)
        } else {
            let reason = response
                .json::<GatewayFault>()
                .await
                .map(|fault| fault.reason)
                .unwrap_or_default();
            warn!(status = %status, reason = %reason, "gateway rejected session-rights query");
            Err(BrdpError::Gateway {
                status: status.as_u16(),
                reason,
            })
        }
    }
}
