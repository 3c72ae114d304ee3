use serde::{Deserialize, Serialize};

use crate::model::EntityId;

/// A group of users.
///
/// `members` excludes the owner; `requests` holds the ids of pending
/// join requests and invitations against this group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    pub owner: EntityId,
    #[serde(default)]
    pub members: Vec<EntityId>,
    #[serde(default)]
    pub requests: Vec<EntityId>,
}

impl Group {
    /// A new, not-yet-persisted group with no members.
    pub fn new(name: impl Into<String>, owner: EntityId) -> Self {
        Self {
            id: None,
            name: name.into(),
            owner,
            members: Vec::new(),
            requests: Vec::new(),
        }
    }
}
