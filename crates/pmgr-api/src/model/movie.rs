use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::EntityId;

/// A movie.
///
/// `imdb` is the external catalog key (`"tt"` + 7 digits); `ratings`
/// holds back-references to [`Rating`](crate::model::Rating) ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub imdb: String,
    pub name: String,
    pub director: String,
    pub actors: String,
    pub year: u16,
    pub minutes: u32,
    #[serde(default)]
    pub ratings: Vec<EntityId>,
}

impl Movie {
    /// A new, not-yet-persisted movie. Fails if `imdb` is not of the
    /// form `tt` + 7 digits. Records coming back from the server are
    /// taken verbatim and not re-validated.
    pub fn new(
        imdb: impl Into<String>,
        name: impl Into<String>,
        director: impl Into<String>,
        actors: impl Into<String>,
        year: u16,
        minutes: u32,
    ) -> Result<Self, Error> {
        let imdb = imdb.into();
        if !is_valid_imdb_key(&imdb) {
            return Err(Error::InvalidImdbKey { key: imdb });
        }
        Ok(Self {
            id: None,
            imdb,
            name: name.into(),
            director: director.into(),
            actors: actors.into(),
            year,
            minutes,
            ratings: Vec::new(),
        })
    }
}

fn is_valid_imdb_key(key: &str) -> bool {
    key.len() == 9 && key.starts_with("tt") && key[2..].bytes().all(|b| b.is_ascii_digit())
}
