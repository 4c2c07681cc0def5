//! The signed-in actor, as returned by the login exchange.

use serde::{Deserialize, Deserializer, Serialize};

use eara_core::{CountryId, SubcommitteeId, UserId};

use crate::{Role, RoleTag};

/// Nullable backend columns arrive as `null`; read them as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Reference to the member country a user represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRef {
    pub id: CountryId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// Reference to the subcommittee a user sits on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcommitteeRef {
    pub id: SubcommitteeId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// Identity of the signed-in user.
///
/// Replaced wholesale on every login and never mutated in place. Extra fields
/// the backend sends are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default)]
    pub role: Option<RoleTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<CountryRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcommittee: Option<SubcommitteeRef>,
}

impl Identity {
    pub fn new(id: i64, role: impl Into<RoleTag>) -> Self {
        Self {
            id: UserId::new(id),
            name: String::new(),
            email: String::new(),
            role: Some(role.into()),
            country: None,
            subcommittee: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_country(mut self, id: i64, name: impl Into<String>) -> Self {
        self.country = Some(CountryRef {
            id: CountryId::new(id),
            name: name.into(),
        });
        self
    }

    pub fn with_subcommittee(mut self, id: i64, name: impl Into<String>) -> Self {
        self.subcommittee = Some(SubcommitteeRef {
            id: SubcommitteeId::new(id),
            name: name.into(),
        });
        self
    }

    /// The role tag, treating an empty/blank tag as missing.
    pub fn role_tag(&self) -> Option<&RoleTag> {
        self.role.as_ref().filter(|tag| !tag.is_empty())
    }

    /// The known role, if the tag names one.
    pub fn known_role(&self) -> Option<Role> {
        self.role_tag().and_then(RoleTag::role)
    }

    /// Whether the identity carries a backend-issued identifier.
    pub fn has_identifier(&self) -> bool {
        self.id.is_assigned()
    }
}
