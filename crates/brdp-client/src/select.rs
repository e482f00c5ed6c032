//! Record selection: narrow a session-rights response to exactly one grant.
//!
//! The core's target resolver assumes a single, already-validated record;
//! this module owns that validation. Filtering by account/domain mirrors
//! the gateway's own matching (exact string equality, absent filter matches
//! everything).

use brdp_core::{AuthorizationRecord, BrdpError, BrdpResult, TargetType};

/// Filter `rights` by optional account and domain; exactly one record must
/// remain.
///
/// # Errors
///
/// [`BrdpError::AmbiguousTarget`] with the surviving count when zero or more
/// than one record matches.
pub fn select_right(
    rights: Vec<AuthorizationRecord>,
    account: Option<&str>,
    domain: Option<&str>,
) -> BrdpResult<AuthorizationRecord> {
    let mut matches: Vec<AuthorizationRecord> = rights
        .into_iter()
        .filter(|right| account.is_none_or(|a| right.account == a))
        .filter(|right| domain.is_none_or(|d| right.domain == d))
        .collect();

    if matches.len() != 1 {
        return Err(BrdpError::AmbiguousTarget(matches.len()));
    }
    Ok(matches.remove(0))
}

/// Check that the selected record grants the kind of target the user asked
/// for — a device query must not resolve to an application right, and vice
/// versa.
pub fn require_type(right: &AuthorizationRecord, expected: TargetType) -> BrdpResult<()> {
    if right.target_type != expected {
        return Err(BrdpError::WrongTargetType(expected.as_str().to_string()));
    }
    Ok(())
}
