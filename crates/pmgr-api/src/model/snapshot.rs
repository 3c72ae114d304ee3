use serde::{Deserialize, Serialize};

use crate::model::{Group, Movie, Rating, Request, User};

/// The complete session state as the server sees it.
///
/// This is the sole unit of synchronization in the protocol: every
/// mutating call answers with a full replacement snapshot, never a
/// delta. Lists the server omits default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(default)]
    pub requests: Vec<Request>,
}

impl Snapshot {
    /// Total number of entities across the five lists.
    pub fn entity_count(&self) -> usize {
        self.users.len()
            + self.groups.len()
            + self.movies.len()
            + self.ratings.len()
            + self.requests.len()
    }
}
