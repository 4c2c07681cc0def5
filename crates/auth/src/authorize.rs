use serde::Serialize;
use thiserror::Error;

use crate::{Identity, PathPrefix, PermissionTable, Role, resolve_home_dashboard};

/// Outcome of one route authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested page.
    Allow,
    /// Not authenticated: send to the login entry point.
    DenyToLogin,
    /// Authenticated but not authorized: send to the given home dashboard.
    DenyToHome(PathPrefix),
}

impl RouteDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RouteDecision::Allow)
    }
}

/// Why access was refused. Internal only; callers see a redirect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessDenial {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("identity has no role")]
    MissingRole,

    #[error("unrecognized role '{0}'")]
    UnrecognizedRole(String),

    #[error("role {role} lacks any of {required:?}")]
    MissingPrefix { role: Role, required: Vec<String> },
}

impl AccessDenial {
    /// Whether this denial should send the user to the login page.
    pub fn requires_login(&self) -> bool {
        matches!(self, AccessDenial::Unauthenticated | AccessDenial::MissingRole)
    }
}

/// A successful access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub role: Role,
    /// `(required, allowed)` pair that authorized the request; `None` for
    /// routes with no requirements.
    pub matched: Option<(PathPrefix, PathPrefix)>,
}

/// Check whether `identity` may view a route requiring any of `required`.
///
/// - No IO
/// - No panics
/// - Unknown roles have zero permissions
pub fn check_access(
    identity: Option<&Identity>,
    table: &PermissionTable,
    required: &[PathPrefix],
) -> Result<Grant, AccessDenial> {
    let identity = identity
        .filter(|i| i.has_identifier())
        .ok_or(AccessDenial::Unauthenticated)?;
    let tag = identity.role_tag().ok_or(AccessDenial::MissingRole)?;
    let entry = table
        .lookup_tag(tag)
        .ok_or_else(|| AccessDenial::UnrecognizedRole(tag.as_str().to_string()))?;

    if required.is_empty() {
        return Ok(Grant {
            role: entry.role(),
            matched: None,
        });
    }

    required
        .iter()
        .find_map(|req| entry.grant_for(req).map(|allowed| (req.clone(), allowed.clone())))
        .map(|matched| Grant {
            role: entry.role(),
            matched: Some(matched),
        })
        .ok_or_else(|| AccessDenial::MissingPrefix {
            role: entry.role(),
            required: required.iter().map(|p| p.as_str().to_string()).collect(),
        })
}

/// Route guard: decide where one navigation ends up.
///
/// Authentication failures go to login; authorization failures go to the
/// user's own dashboard, never to an error page.
pub fn authorize(
    identity: Option<&Identity>,
    table: &PermissionTable,
    required: &[PathPrefix],
) -> RouteDecision {
    match check_access(identity, table, required) {
        Ok(grant) => {
            tracing::debug!(role = %grant.role, ?required, "route allowed");
            RouteDecision::Allow
        }
        Err(denial) if denial.requires_login() => {
            tracing::debug!(%denial, "route denied; redirecting to login");
            RouteDecision::DenyToLogin
        }
        Err(denial) => {
            if let AccessDenial::UnrecognizedRole(tag) = &denial {
                tracing::warn!(role = %tag, "unrecognized role; treating as zero permissions");
            } else {
                tracing::debug!(%denial, "route denied; redirecting home");
            }
            // check_access only reaches this arm with an identity present.
            match identity {
                Some(identity) => RouteDecision::DenyToHome(resolve_home_dashboard(identity, table)),
                None => RouteDecision::DenyToLogin,
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Serializable account of one guard decision, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    pub required: Vec<String>,
    pub granted: bool,
    pub reason: String,
    pub role: Option<String>,
    pub allowed_prefixes: Vec<String>,
    pub matched_prefix: Option<String>,
    pub redirect_to: Option<String>,
}

/// Explain why [`authorize`] decides the way it does for this request.
pub fn explain_authorization(
    identity: Option<&Identity>,
    table: &PermissionTable,
    required: &[PathPrefix],
) -> AuthorizationExplanation {
    let role = identity
        .and_then(Identity::role_tag)
        .map(|tag| tag.as_str().to_string());
    let allowed_prefixes = identity
        .and_then(Identity::role_tag)
        .and_then(|tag| table.lookup_tag(tag))
        .map(|entry| entry.allowed_prefixes().iter().map(|p| p.as_str().to_string()).collect())
        .unwrap_or_default();
    let required_list: Vec<String> = required.iter().map(|p| p.as_str().to_string()).collect();

    let (granted, reason, matched_prefix) = match check_access(identity, table, required) {
        Ok(Grant { matched: None, role }) => (
            true,
            format!("route has no requirements; any {role} may view it"),
            None,
        ),
        Ok(Grant {
            matched: Some((req, allowed)),
            role,
        }) => (
            true,
            format!("role {role} is allowed '{allowed}', which covers required '{req}'"),
            Some(allowed.as_str().to_string()),
        ),
        Err(denial) => (false, denial.to_string(), None),
    };

    let redirect_to = match authorize(identity, table, required) {
        RouteDecision::Allow => None,
        RouteDecision::DenyToLogin => Some(crate::LOGIN_PATH.to_string()),
        RouteDecision::DenyToHome(home) => Some(home.as_str().to_string()),
    };

    AuthorizationExplanation {
        required: required_list,
        granted,
        reason,
        role,
        allowed_prefixes,
        matched_prefix,
        redirect_to,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(path: &'static str) -> PathPrefix {
        PathPrefix::from_static(path)
    }

    fn table() -> PermissionTable {
        PermissionTable::standard()
    }

    #[test]
    fn admin_may_open_admin_dashboard() {
        let admin = Identity::new(1, "ADMIN");
        assert_eq!(authorize(Some(&admin), &table(), &[p("/admin/dashboard")]), RouteDecision::Allow);
    }

    #[test]
    fn unrecognized_role_is_logged_at_warn() {
        let stranger = Identity::new(4, "UNKNOWN_ROLE");
        let (decision, logs) =
            eara_observability::capture(|| authorize(Some(&stranger), &table(), &[p("/committees")]));

        assert_eq!(decision, RouteDecision::DenyToHome(p("/dashboard")));
        assert!(!logs.lines_at("WARN", "UNKNOWN_ROLE").is_empty(), "{}", logs.contents());
    }

    #[test]
    fn known_roles_do_not_warn() {
        let member = Identity::new(2, "SUBCOMMITTEE_MEMBER");
        let (_, logs) = eara_observability::capture(|| authorize(Some(&member), &table(), &[p("/members")]));
        assert!(logs.lines_at("WARN", "").is_empty());
    }

    #[test]
    fn member_is_sent_home_from_admin_dashboard() {
        let member = Identity::new(2, "SUBCOMMITTEE_MEMBER");
        assert_eq!(
            authorize(Some(&member), &table(), &[p("/admin/dashboard")]),
            RouteDecision::DenyToHome(p("/member/dashboard"))
        );
    }

    #[test]
    fn no_identity_goes_to_login() {
        assert_eq!(authorize(None, &table(), &[p("/committees")]), RouteDecision::DenyToLogin);
        assert_eq!(authorize(None, &table(), &[]), RouteDecision::DenyToLogin);
    }

    #[test]
    fn identity_without_id_or_role_goes_to_login() {
        let no_id = Identity::new(0, "ADMIN");
        assert_eq!(authorize(Some(&no_id), &table(), &[]), RouteDecision::DenyToLogin);

        let mut no_role = Identity::new(7, "ADMIN");
        no_role.role = None;
        assert_eq!(authorize(Some(&no_role), &table(), &[p("/committees")]), RouteDecision::DenyToLogin);
    }

    #[test]
    fn unknown_role_fails_closed_to_generic_dashboard() {
        let unknown = Identity::new(4, "UNKNOWN_ROLE");
        assert_eq!(
            authorize(Some(&unknown), &table(), &[p("/committees")]),
            RouteDecision::DenyToHome(p("/dashboard"))
        );
        // Even public-within-app routes are closed to an unrecognized role.
        assert_eq!(
            authorize(Some(&unknown), &table(), &[]),
            RouteDecision::DenyToHome(p("/dashboard"))
        );
        assert_eq!(
            check_access(Some(&unknown), &table(), &[]),
            Err(AccessDenial::UnrecognizedRole("UNKNOWN_ROLE".into()))
        );
    }

    #[test]
    fn legacy_hod_tag_has_no_permissions() {
        let hod = Identity::new(8, "HOD");
        assert_eq!(
            authorize(Some(&hod), &table(), &[p("/hod/dashboard")]),
            RouteDecision::DenyToHome(p("/dashboard"))
        );
    }

    #[test]
    fn empty_requirements_allow_any_known_role() {
        for role in Role::ACTIVE {
            let identity = Identity::new(1, role);
            assert!(authorize(Some(&identity), &table(), &[]).is_allowed());
        }
    }

    #[test]
    fn any_one_required_prefix_is_enough() {
        let member = Identity::new(2, "COMMITTEE_MEMBER");
        let decision = authorize(Some(&member), &table(), &[p("/minutes"), p("/meetings")]);
        assert_eq!(decision, RouteDecision::Allow);
    }

    #[test]
    fn delegation_head_denied_elsewhere_returns_to_hod_dashboard() {
        let chair = Identity::new(3, "CHAIR").with_subcommittee(1, "Head Of Delegation");
        assert_eq!(
            authorize(Some(&chair), &table(), &[p("/minutes")]),
            RouteDecision::DenyToHome(p("/hod/dashboard"))
        );
    }

    /// (role, required, allowed?) covering the prefix direction edge cases.
    #[test]
    fn prefix_matching_table() {
        let cases: &[(&str, &'static str, bool)] = &[
            // exact matches
            ("SECRETARY", "/minutes", true),
            ("SECRETARY", "/meetings/archive", true),
            ("COMMITTEE_MEMBER", "/minutes", false),
            // required is a strict prefix of an allowed entry
            ("CHAIR", "/hod", true),
            ("ADMIN", "/admin", true),
            ("SUBCOMMITTEE_MEMBER", "/member", true),
            ("SUBCOMMITTEE_MEMBER", "/", true),
            // allowed is a strict prefix of required: not enough
            ("ADMIN", "/committees/new", false),
            ("COMMISSIONER_GENERAL", "/meetings/archive", false),
            ("CHAIR", "/hod/performance", false),
            // string prefix, not segment prefix
            ("COMMITTEE_MEMBER", "/member", true),
            ("COMMITTEE_MEMBER", "/members", false),
            ("COMMITTEE_SECRETARY", "/members", true),
            ("ADMIN", "/sub-committee", true),
        ];

        let table = table();
        for (role, required, expected) in cases {
            let identity = Identity::new(1, *role);
            let decision = authorize(Some(&identity), &table, &[p(*required)]);
            assert_eq!(decision.is_allowed(), *expected, "{role} requesting {required}");
        }
    }

    #[test]
    fn explanation_names_the_matching_entry() {
        let chair = Identity::new(3, "CHAIR");
        let explanation = explain_authorization(Some(&chair), &table(), &[p("/hod")]);
        assert!(explanation.granted);
        assert_eq!(explanation.matched_prefix.as_deref(), Some("/hod/dashboard"));
        assert_eq!(explanation.redirect_to, None);
        assert_eq!(explanation.role.as_deref(), Some("CHAIR"));
    }

    #[test]
    fn explanation_reports_redirect_on_denial() {
        let member = Identity::new(2, "SUBCOMMITTEE_MEMBER");
        let explanation = explain_authorization(Some(&member), &table(), &[p("/admin/dashboard")]);
        assert!(!explanation.granted);
        assert_eq!(explanation.redirect_to.as_deref(), Some("/member/dashboard"));
        assert!(explanation.reason.contains("SUBCOMMITTEE_MEMBER"));

        let json = serde_json::to_value(&explanation).unwrap();
        assert_eq!(json["granted"], false);

        let anonymous = explain_authorization(None, &table(), &[p("/committees")]);
        assert_eq!(anonymous.redirect_to.as_deref(), Some("/login"));
        assert!(anonymous.allowed_prefixes.is_empty());
    }

    fn active_role() -> impl Strategy<Value = Role> {
        prop::sample::select(Role::ACTIVE.to_vec())
    }

    proptest! {
        #[test]
        fn every_allowed_prefix_is_allowed(role in active_role(), index in any::<prop::sample::Index>()) {
            let table = table();
            let entry = table.lookup(role).unwrap();
            let required = index.get(entry.allowed_prefixes()).clone();
            let identity = Identity::new(1, role);
            prop_assert_eq!(authorize(Some(&identity), &table, &[required]), RouteDecision::Allow);
        }

        #[test]
        fn foreign_paths_redirect_to_role_home(role in active_role(), tail in "[a-z]{1,12}(/[a-z]{1,8})?") {
            let table = table();
            let entry = table.lookup(role).unwrap();
            let path = format!("/zz-{tail}");
            let required = PathPrefix::new(path);
            prop_assume!(entry.allowed_prefixes().iter().all(|a| !required.is_satisfied_by(a)));

            let identity = Identity::new(1, role);
            let home = entry.default_dashboard().unwrap().clone();
            prop_assert_eq!(
                authorize(Some(&identity), &table, &[required]),
                RouteDecision::DenyToHome(home)
            );
        }

        #[test]
        fn other_roles_dashboards_redirect_home(role in active_role(), other in active_role()) {
            let table = table();
            let entry = table.lookup(role).unwrap();
            let target = table.lookup(other).unwrap().default_dashboard().unwrap().clone();
            prop_assume!(entry.grant_for(&target).is_none());

            let identity = Identity::new(1, role);
            prop_assert_eq!(
                authorize(Some(&identity), &table, &[target]),
                RouteDecision::DenyToHome(entry.default_dashboard().unwrap().clone())
            );
        }
    }
}
