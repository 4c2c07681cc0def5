//! Landing-page resolution and the delegation-head predicate.

use crate::{Identity, PathPrefix, PermissionTable};

/// Generic landing path; resolved to a role dashboard by the portal.
pub const GENERIC_DASHBOARD: &str = "/dashboard";

/// Dashboard reserved for holders of delegation-head privileges.
pub const DELEGATION_HEAD_DASHBOARD: &str = "/hod/dashboard";

/// Login entry point.
pub const LOGIN_PATH: &str = "/login";

/// Subcommittee whose chair and vice chair hold delegation-head privileges.
const DELEGATION_HEAD_SUBCOMMITTEE: &str = "head of delegation";

/// Whether the identity holds delegation-head privileges.
///
/// Only the chair or vice chair of the Head of Delegation subcommittee
/// qualifies. The legacy `HOD` tag on its own does not.
pub fn has_delegation_head_privileges(identity: &Identity) -> bool {
    let chair_level = identity.known_role().is_some_and(|role| role.is_chair_level());
    if !chair_level {
        return false;
    }

    identity
        .subcommittee
        .as_ref()
        .is_some_and(|sc| sc.name.trim().eq_ignore_ascii_case(DELEGATION_HEAD_SUBCOMMITTEE))
}

/// Pick the concrete dashboard for the generic landing path.
///
/// Never fails: an unrecognised or missing role falls back to
/// [`GENERIC_DASHBOARD`] itself rather than recursing.
pub fn resolve_home_dashboard(identity: &Identity, table: &PermissionTable) -> PathPrefix {
    if has_delegation_head_privileges(identity) {
        return PathPrefix::from_static(DELEGATION_HEAD_DASHBOARD);
    }

    identity
        .role_tag()
        .and_then(|tag| table.lookup_tag(tag))
        .and_then(|entry| entry.default_dashboard())
        .cloned()
        .unwrap_or_else(|| PathPrefix::from_static(GENERIC_DASHBOARD))
}
