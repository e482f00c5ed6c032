//! brdp-core: Shared library for the bastion RDP shortcut tool.
//!
//! Provides the gateway authorization-record model, canonical target
//! resolution, RDP connection-profile emission, and the UTF-16LE
//! profile file writer.

pub mod error;
pub mod profile;
pub mod rights;
pub mod writer;

// Re-export commonly used items at crate root.
pub use error::{BrdpError, BrdpResult};
pub use profile::{emit_profile, ConnectionParameters, Directive, DirectiveValue, Resolution};
pub use rights::{
    resolve_target, AuthorizationRecord, IdentityMode, RemoteApp, Subprotocols, TargetType,
};
pub use writer::write_profile;
