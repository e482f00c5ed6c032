//! Authorization records and canonical target resolution.
//!
//! An [`AuthorizationRecord`] is one grant returned by the bastion's
//! session-rights API: it describes how the authenticated user may reach a
//! device or published application. [`resolve_target`] turns the record into
//! the compound routing key the RDP client sends to the gateway's connection
//! broker to select a session.

use std::collections::HashSet;

use serde::Deserialize;

/// Wildcard tag granting every subprotocol.
pub const WILDCARD: &str = "*";
/// Drive redirection.
pub const RDP_DRIVE: &str = "RDP_DRIVE";
/// Printer redirection.
pub const RDP_PRINTER: &str = "RDP_PRINTER";
/// Clipboard, local-to-remote.
pub const RDP_CLIPBOARD_UP: &str = "RDP_CLIPBOARD_UP";
/// Clipboard, remote-to-local.
pub const RDP_CLIPBOARD_DOWN: &str = "RDP_CLIPBOARD_DOWN";
/// Clipboard file transfer.
pub const RDP_CLIPBOARD_FILE: &str = "RDP_CLIPBOARD_FILE";
/// COM port redirection.
pub const RDP_COM_PORT: &str = "RDP_COM_PORT";
/// Smart-card redirection.
pub const RDP_SMARTCARD: &str = "RDP_SMARTCARD";

/// The set of subprotocol tags permitted by an authorization record.
///
/// The wildcard `"*"` grants every capability; all membership questions go
/// through [`Subprotocols::allows_any`] so the wildcard semantics live in
/// exactly one place.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Subprotocols(HashSet<String>);

impl Subprotocols {
    /// Build a set from a list of tags.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    /// Whether any of `tags` is permitted. The wildcard short-circuits to
    /// `true` regardless of `tags`.
    pub fn allows_any(&self, tags: &[&str]) -> bool {
        if self.0.contains(WILDCARD) {
            return true;
        }
        tags.iter().any(|tag| self.0.contains(*tag))
    }
}

/// What kind of target a record grants access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// A full desktop session on a device.
    Device,
    /// A published single-application session.
    Application,
}

impl TargetType {
    /// Human-readable name, used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Device => "device",
            TargetType::Application => "application",
        }
    }
}

/// Published-application launch details carried by an application record.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteApp {
    /// Load-balancing hint forwarded to the broker.
    pub token: String,
    /// Application identifier appended to the program directive.
    pub program: String,
}

/// One grant from the bastion's session-rights API.
///
/// Produced by the gateway, consumed read-only. The caller is responsible
/// for narrowing the API response down to exactly one record before target
/// resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationRecord {
    /// Session logs in with the requesting user's own identity.
    pub account_mapping: bool,
    /// Session routes through the fixed interactive principal.
    pub interactive_login: bool,
    /// Explicit account to log in as (explicit-account records).
    #[serde(default)]
    pub account: String,
    /// Domain of the explicit account.
    #[serde(default)]
    pub domain: String,
    /// Target device (or application host) name.
    pub device: String,
    /// Service name on the target, e.g. `RDP`.
    pub service: String,
    /// Device or published application.
    #[serde(rename = "type")]
    pub target_type: TargetType,
    /// Permitted session subprotocols.
    #[serde(default)]
    pub subprotocols: Subprotocols,
    /// Launch details when the record is a published application.
    #[serde(rename = "remoteapp", default)]
    pub remote_app: Option<RemoteApp>,
}

/// How the session identity is derived from a record's flags.
///
/// The ordering below is the precedence rule: `account_mapping` wins over
/// `interactive_login`, and a record with neither flag is an explicit-account
/// grant. Records setting both flags are not rejected; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityMode {
    /// The user's own identity is mapped onto the target account.
    Mapped,
    /// The session logs in through the shared `Interactive` principal.
    Interactive,
    /// An explicit `account@domain` pair is used.
    Explicit,
}

impl IdentityMode {
    /// Derive the identity mode from a record's flags, first match wins.
    pub fn of(record: &AuthorizationRecord) -> Self {
        if record.account_mapping {
            IdentityMode::Mapped
        } else if record.interactive_login {
            IdentityMode::Interactive
        } else {
            IdentityMode::Explicit
        }
    }
}

/// Resolve the canonical target string for `user` and one matched record.
///
/// The result is the routing key the RDP client hands to the gateway:
///
/// | identity mode | shape |
/// |---|---|
/// | Mapped        | `user@device:service:user` |
/// | Interactive   | `Interactive@device:service:user` |
/// | Explicit      | `account@domain@device:service:user` |
///
/// Total over any well-formed record; no validation happens here.
pub fn resolve_target(user: &str, record: &AuthorizationRecord) -> String {
    match IdentityMode::of(record) {
        IdentityMode::Mapped => {
            format!("{user}@{}:{}:{user}", record.device, record.service)
        }
        IdentityMode::Interactive => {
            format!("Interactive@{}:{}:{user}", record.device, record.service)
        }
        IdentityMode::Explicit => {
            format!(
                "{}@{}@{}:{}:{user}",
                record.account, record.domain, record.device, record.service
            )
        }
    }
}
