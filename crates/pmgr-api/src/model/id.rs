// ── Core identity types ──
//
// Every cross-entity link in the protocol is an integer id, not an
// owned object. The authoritative copy of an entity lives only in the
// snapshot's flat lists; an id is a weak reference resolved through
// the state store.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier for any Pmgr entity.
///
/// Ids are positive integers drawn from a single id space shared by all
/// five entity kinds. An entity that has not been persisted yet has no
/// id at all (`Option<EntityId>` is `None`) -- the client never
/// fabricates one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for EntityId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// The five entity kinds, used to build `add…`/`set…`/`rm…` endpoint
/// paths. The server expects lowercase fragments (`adduser`, `rmmovie`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    User,
    Group,
    Movie,
    Rating,
    Request,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_roundtrips_through_display() {
        let id = EntityId::from(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<EntityId>().ok(), Some(id));
    }

    #[test]
    fn entity_kind_path_fragments_are_lowercase() {
        assert_eq!(EntityKind::User.to_string(), "user");
        assert_eq!(EntityKind::Rating.to_string(), "rating");
    }
}
