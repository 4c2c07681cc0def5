use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role tag exactly as the backend sends it (e.g. `"SECRETARY"`).
///
/// Tags are opaque strings at the wire level; an unknown tag is carried along
/// untouched so the guard can fail closed on it instead of the identity
/// failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleTag(Cow<'static, str>);

impl RoleTag {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The known role this tag names, if any.
    pub fn role(&self) -> Option<Role> {
        Role::from_tag(self.as_str())
    }
}

impl core::fmt::Display for RoleTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Role> for RoleTag {
    fn from(role: Role) -> Self {
        Self(Cow::Borrowed(role.as_str()))
    }
}

impl From<&str> for RoleTag {
    fn from(value: &str) -> Self {
        Self(Cow::Owned(value.to_owned()))
    }
}

impl From<String> for RoleTag {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

/// Canonical role catalogue.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Secretary,
    Chair,
    ViceChair,
    CommissionerGeneral,
    SubcommitteeMember,
    CommitteeMember,
    CommitteeSecretary,
    DelegationSecretary,
    /// Legacy head-of-delegation tag. Superseded by the delegation-head
    /// predicate and deliberately absent from the permission table.
    Hod,
}

impl Role {
    /// Every role in current use (legacy [`Role::Hod`] excluded).
    pub const ACTIVE: [Role; 9] = [
        Role::Admin,
        Role::Secretary,
        Role::Chair,
        Role::ViceChair,
        Role::CommissionerGeneral,
        Role::SubcommitteeMember,
        Role::CommitteeMember,
        Role::CommitteeSecretary,
        Role::DelegationSecretary,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Secretary => "SECRETARY",
            Role::Chair => "CHAIR",
            Role::ViceChair => "VICE_CHAIR",
            Role::CommissionerGeneral => "COMMISSIONER_GENERAL",
            Role::SubcommitteeMember => "SUBCOMMITTEE_MEMBER",
            Role::CommitteeMember => "COMMITTEE_MEMBER",
            Role::CommitteeSecretary => "COMMITTEE_SECRETARY",
            Role::DelegationSecretary => "DELEGATION_SECRETARY",
            Role::Hod => "HOD",
        }
    }

    /// Parse a wire tag. Unknown tags yield `None`; matching is exact.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ACTIVE
            .into_iter()
            .chain(core::iter::once(Role::Hod))
            .find(|role| role.as_str() == tag)
    }

    pub const fn is_legacy(&self) -> bool {
        matches!(self, Role::Hod)
    }

    /// Whether this role can hold delegation-head privileges at all.
    pub const fn is_chair_level(&self) -> bool {
        matches!(self, Role::Chair | Role::ViceChair)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_round_trips_through_its_tag() {
        for role in Role::ACTIVE.into_iter().chain([Role::Hod]) {
            assert_eq!(Role::from_tag(role.as_str()), Some(role));
            assert_eq!(RoleTag::from(role).role(), Some(role));
        }
    }

    #[test]
    fn unknown_and_lowercase_tags_are_not_roles() {
        assert_eq!(Role::from_tag("UNKNOWN_ROLE"), None);
        assert_eq!(Role::from_tag("admin"), None);
        assert_eq!(Role::from_tag(""), None);
    }

    #[test]
    fn serde_uses_wire_tags() {
        let json = serde_json::to_string(&Role::CommissionerGeneral).unwrap();
        assert_eq!(json, "\"COMMISSIONER_GENERAL\"");
        let tag: RoleTag = serde_json::from_str("\"WHATEVER\"").unwrap();
        assert_eq!(tag.as_str(), "WHATEVER");
        assert_eq!(tag.role(), None);
    }

    #[test]
    fn legacy_hod_is_not_active() {
        assert!(Role::Hod.is_legacy());
        assert!(!Role::ACTIVE.contains(&Role::Hod));
    }
}
