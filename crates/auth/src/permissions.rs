//! Static role → permission table.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Role, RoleTag};

/// Application route segment used for coarse-grained authorization
/// (e.g. `"/committees"`). Not a glob or a regex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathPrefix(Cow<'static, str>);

impl PathPrefix {
    pub fn new(path: impl Into<Cow<'static, str>>) -> Self {
        Self(path.into())
    }

    pub const fn from_static(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether an allowed entry authorizes this required prefix.
    ///
    /// Matching is one-directional: the *allowed* entry must equal the
    /// required prefix or extend it as a plain string prefix. A required
    /// `"/hod"` is satisfied by an allowed `"/hod/dashboard"`; a required
    /// `"/admin/dashboard"` is not satisfied by an allowed `"/admin"`.
    pub fn is_satisfied_by(&self, allowed: &PathPrefix) -> bool {
        allowed.as_str().starts_with(self.as_str())
    }
}

impl core::fmt::Display for PathPrefix {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for PathPrefix {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for PathPrefix {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Allowed surface of one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionEntry {
    role: Role,
    allowed: Vec<PathPrefix>,
    dashboards: Vec<PathPrefix>,
}

impl PermissionEntry {
    pub fn new(role: Role, allowed: Vec<PathPrefix>, dashboards: Vec<PathPrefix>) -> Self {
        Self {
            role,
            allowed,
            dashboards,
        }
    }

    fn from_static(role: Role, dashboards: &[&'static str], allowed: &[&'static str]) -> Self {
        Self {
            role,
            allowed: allowed.iter().copied().map(PathPrefix::from_static).collect(),
            dashboards: dashboards.iter().copied().map(PathPrefix::from_static).collect(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn allowed_prefixes(&self) -> &[PathPrefix] {
        &self.allowed
    }

    pub fn home_candidates(&self) -> &[PathPrefix] {
        &self.dashboards
    }

    /// First home candidate (the role's landing dashboard).
    pub fn default_dashboard(&self) -> Option<&PathPrefix> {
        self.dashboards.first()
    }

    /// The allowed entry that satisfies `required`, if any.
    pub fn grant_for(&self, required: &PathPrefix) -> Option<&PathPrefix> {
        self.allowed.iter().find(|allowed| required.is_satisfied_by(allowed))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("duplicate permission entry for role {0}")]
    DuplicateRole(Role),

    #[error("permission entry for role {0} has no home dashboard")]
    NoDashboard(Role),
}

/// Read-only mapping from role to its [`PermissionEntry`].
///
/// There is no mutation API; build a table once and share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTable {
    entries: BTreeMap<Role, PermissionEntry>,
}

const ADMIN_ROUTES: &[&str] = &[
    "/dashboard",
    "/admin/dashboard",
    "/committees",
    "/countries",
    "/members",
    "/sub-committee-members",
    "/meetings",
    "/invitations",
    "/notifications",
    "/resolutions",
    "/reports",
];

const SECRETARY_ROUTES: &[&str] = &[
    "/dashboard",
    "/secretary/dashboard",
    "/committees",
    "/countries",
    "/members",
    "/sub-committee-members",
    "/meetings",
    "/minutes",
    "/resolutions",
    "/invitations",
    "/notifications",
    "/meetings/archive",
];

// Chair and vice chair share one page set; the HOD pages are listed because a
// chair of the Head of Delegation subcommittee lands there.
const CHAIR_ROUTES: &[&str] = &[
    "/dashboard",
    "/chair/dashboard",
    "/hod/dashboard",
    "/committees",
    "/members",
    "/sub-committee-members",
    "/meetings",
    "/invitations",
    "/notifications",
    "/reports",
    "/resolutions",
    "/hod/reports",
    "/hod/profile",
    "/hod/notifications",
    "/countries",
];

const COMMISSIONER_ROUTES: &[&str] = &[
    "/dashboard",
    "/commissioner/dashboard",
    "/committees",
    "/countries",
    "/members",
    "/sub-committee-members",
    "/meetings",
    "/invitations",
    "/notifications",
    "/reports",
    "/resolutions",
];

const MEMBER_ROUTES: &[&str] = &[
    "/dashboard",
    "/member/dashboard",
    "/committees",
    "/notifications",
    "/reports",
    "/meetings",
    "/countries",
];

const MEMBER_SECRETARY_ROUTES: &[&str] = &[
    "/dashboard",
    "/member/dashboard",
    "/committees",
    "/members",
    "/sub-committee-members",
    "/meetings",
    "/invitations",
    "/notifications",
    "/reports",
    "/countries",
];

impl PermissionTable {
    /// The portal's role table. Legacy [`Role::Hod`] has no entry.
    pub fn standard() -> Self {
        let entries = [
            PermissionEntry::from_static(Role::Admin, &["/admin/dashboard"], ADMIN_ROUTES),
            PermissionEntry::from_static(Role::Secretary, &["/secretary/dashboard"], SECRETARY_ROUTES),
            PermissionEntry::from_static(Role::Chair, &["/chair/dashboard", "/hod/dashboard"], CHAIR_ROUTES),
            PermissionEntry::from_static(Role::ViceChair, &["/chair/dashboard", "/hod/dashboard"], CHAIR_ROUTES),
            PermissionEntry::from_static(
                Role::CommissionerGeneral,
                &["/commissioner/dashboard"],
                COMMISSIONER_ROUTES,
            ),
            PermissionEntry::from_static(Role::SubcommitteeMember, &["/member/dashboard"], MEMBER_ROUTES),
            PermissionEntry::from_static(Role::CommitteeMember, &["/member/dashboard"], MEMBER_ROUTES),
            PermissionEntry::from_static(
                Role::CommitteeSecretary,
                &["/member/dashboard"],
                MEMBER_SECRETARY_ROUTES,
            ),
            PermissionEntry::from_static(
                Role::DelegationSecretary,
                &["/member/dashboard"],
                MEMBER_SECRETARY_ROUTES,
            ),
        ];

        Self {
            entries: entries.into_iter().map(|e| (e.role, e)).collect(),
        }
    }

    /// Process-wide instance of [`PermissionTable::standard`].
    pub fn global() -> &'static PermissionTable {
        static TABLE: OnceLock<PermissionTable> = OnceLock::new();
        TABLE.get_or_init(PermissionTable::standard)
    }

    /// Build a custom table, rejecting duplicate roles and entries without a
    /// home dashboard.
    pub fn from_entries(entries: impl IntoIterator<Item = PermissionEntry>) -> Result<Self, TableError> {
        let mut map = BTreeMap::new();
        for entry in entries {
            if entry.dashboards.is_empty() {
                return Err(TableError::NoDashboard(entry.role));
            }
            let role = entry.role;
            if map.insert(role, entry).is_some() {
                return Err(TableError::DuplicateRole(role));
            }
        }
        Ok(Self { entries: map })
    }

    pub fn lookup(&self, role: Role) -> Option<&PermissionEntry> {
        self.entries.get(&role)
    }

    /// Look up by wire tag; unknown tags have no entry.
    pub fn lookup_tag(&self, tag: &RoleTag) -> Option<&PermissionEntry> {
        tag.role().and_then(|role| self.lookup(role))
    }

    pub fn entries(&self) -> impl Iterator<Item = &PermissionEntry> {
        self.entries.values()
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.entries.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_covers_every_active_role_exactly_once() {
        let table = PermissionTable::standard();
        let roles: Vec<Role> = table.roles().collect();
        assert_eq!(roles.len(), Role::ACTIVE.len());
        for role in Role::ACTIVE {
            let entry = table.lookup(role).expect("active role must have an entry");
            assert_eq!(entry.role(), role);
            assert!(entry.default_dashboard().is_some());
        }
    }

    #[test]
    fn legacy_and_unknown_tags_have_no_entry() {
        let table = PermissionTable::standard();
        assert!(table.lookup(Role::Hod).is_none());
        assert!(table.lookup_tag(&RoleTag::from("HOD")).is_none());
        assert!(table.lookup_tag(&RoleTag::from("UNKNOWN_ROLE")).is_none());
    }

    #[test]
    fn aliased_roles_share_identical_lists() {
        let table = PermissionTable::standard();
        let pairs = [
            (Role::Chair, Role::ViceChair),
            (Role::SubcommitteeMember, Role::CommitteeMember),
            (Role::CommitteeSecretary, Role::DelegationSecretary),
        ];
        for (a, b) in pairs {
            let (a, b) = (table.lookup(a).unwrap(), table.lookup(b).unwrap());
            assert_eq!(a.allowed_prefixes(), b.allowed_prefixes());
            assert_eq!(a.home_candidates(), b.home_candidates());
        }
    }

    #[test]
    fn default_dashboards_match_role_landing_pages() {
        let table = PermissionTable::standard();
        let expected = [
            (Role::Admin, "/admin/dashboard"),
            (Role::Secretary, "/secretary/dashboard"),
            (Role::Chair, "/chair/dashboard"),
            (Role::ViceChair, "/chair/dashboard"),
            (Role::CommissionerGeneral, "/commissioner/dashboard"),
            (Role::SubcommitteeMember, "/member/dashboard"),
            (Role::CommitteeMember, "/member/dashboard"),
            (Role::CommitteeSecretary, "/member/dashboard"),
            (Role::DelegationSecretary, "/member/dashboard"),
        ];
        for (role, path) in expected {
            assert_eq!(table.lookup(role).unwrap().default_dashboard().unwrap(), &path);
        }
    }

    #[test]
    fn prefix_direction_is_allowed_extends_required() {
        let allowed = PathPrefix::from_static("/hod/dashboard");
        assert!(PathPrefix::from_static("/hod").is_satisfied_by(&allowed));
        assert!(PathPrefix::from_static("/hod/dashboard").is_satisfied_by(&allowed));
        assert!(!PathPrefix::from_static("/hod/dashboard/x").is_satisfied_by(&allowed));

        let admin = PathPrefix::from_static("/admin");
        assert!(!PathPrefix::from_static("/admin/dashboard").is_satisfied_by(&admin));
    }

    #[test]
    fn grant_for_returns_the_matching_entry() {
        let table = PermissionTable::standard();
        let secretary = table.lookup(Role::Secretary).unwrap();
        let granted = secretary.grant_for(&PathPrefix::from_static("/minutes")).unwrap();
        assert_eq!(granted, &"/minutes");
        assert!(secretary.grant_for(&PathPrefix::from_static("/admin/dashboard")).is_none());
    }

    #[test]
    fn from_entries_rejects_duplicates_and_missing_dashboards() {
        let entry = || {
            PermissionEntry::new(
                Role::Admin,
                vec![PathPrefix::from_static("/x")],
                vec![PathPrefix::from_static("/x")],
            )
        };
        assert_eq!(
            PermissionTable::from_entries([entry(), entry()]).unwrap_err(),
            TableError::DuplicateRole(Role::Admin)
        );

        let no_home = PermissionEntry::new(Role::Secretary, vec![], vec![]);
        assert_eq!(
            PermissionTable::from_entries([no_home]).unwrap_err(),
            TableError::NoDashboard(Role::Secretary)
        );
    }

    #[test]
    fn global_table_is_the_standard_table() {
        assert_eq!(PermissionTable::global(), &PermissionTable::standard());
    }
}
