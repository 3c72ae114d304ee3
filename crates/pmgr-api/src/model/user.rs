use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::model::EntityId;

/// A single role flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
    Root,
}

/// Ordered set of role flags, serialized as the comma-separated string
/// the wire uses (`"USER"`, `"ADMIN,USER"`). An empty string is an
/// empty set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roles(Vec<Role>);

impl Roles {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        Self(roles.into_iter().collect())
    }

    /// The plain-user default for freshly created accounts.
    pub fn user() -> Self {
        Self(vec![Role::User])
    }

    pub fn has(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for Roles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, role) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{role}")?;
        }
        Ok(())
    }
}

impl FromStr for Roles {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::default());
        }
        s.split(',')
            .map(|flag| {
                Role::from_str(flag.trim()).map_err(|_| Error::InvalidRole {
                    flag: flag.trim().to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl Serialize for Roles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Roles {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A user account.
///
/// `password` is only ever present on objects the client builds for
/// `adduser`/`setuser` -- records fetched from the server omit it.
/// `groups`, `requests`, and `ratings` hold back-references by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Roles,
    #[serde(default)]
    pub groups: Vec<EntityId>,
    #[serde(default)]
    pub requests: Vec<EntityId>,
    #[serde(default)]
    pub ratings: Vec<EntityId>,
}

impl User {
    /// A new, not-yet-persisted account (no id until the server assigns
    /// one).
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Roles) -> Self {
        Self {
            id: None,
            username: username.into(),
            password: Some(password.into()),
            role,
            groups: Vec::new(),
            requests: Vec::new(),
            ratings: Vec::new(),
        }
    }
}
