//! brdp-client: Gateway client for the bastion RDP shortcut tool.
//!
//! Queries the bastion's session-rights API over HTTPS and narrows the
//! response down to the single authorization record the core layer needs.

pub mod gateway;
pub mod select;

pub use gateway::GatewayClient;
pub use select::{require_type, select_right};
