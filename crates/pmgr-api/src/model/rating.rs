use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::model::EntityId;

/// A rating value: either "no opinion" (wire `-1`) or 0 to 5 stars.
///
/// Any other integer on the wire fails deserialization, so a stored
/// `Score` is always well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Score {
    #[default]
    NoOpinion,
    Stars(u8),
}

impl Score {
    pub fn new(value: i64) -> Result<Self, Error> {
        match value {
            -1 => Ok(Self::NoOpinion),
            0..=5 => Ok(Self::Stars(u8::try_from(value).unwrap_or(0))),
            other => Err(Error::InvalidScore { value: other }),
        }
    }

    /// The wire integer: `-1` for no opinion, the star count otherwise.
    pub fn as_i8(self) -> i8 {
        match self {
            Self::NoOpinion => -1,
            Self::Stars(n) => i8::try_from(n).unwrap_or(5),
        }
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.as_i8())
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// One user's rating and/or labels for one movie.
///
/// By convention at most one `Rating` exists per (user, movie) pair;
/// this is not enforced here -- the server's lists are authoritative.
/// `labels` is comma-separated free text; empty means no labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub user: EntityId,
    pub movie: EntityId,
    pub rating: Score,
    #[serde(default)]
    pub labels: String,
}

impl Rating {
    /// A new, not-yet-persisted rating.
    pub fn new(user: EntityId, movie: EntityId, rating: Score, labels: impl Into<String>) -> Self {
        Self {
            id: None,
            user,
            movie,
            rating,
            labels: labels.into(),
        }
    }

    /// The labels as individual tags, skipping empty segments.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_accepts_sentinel_and_star_range() {
        assert_eq!(Score::new(-1).expect("sentinel"), Score::NoOpinion);
        assert_eq!(Score::new(0).expect("zero"), Score::Stars(0));
        assert_eq!(Score::new(5).expect("five"), Score::Stars(5));
    }

    #[test]
    fn score_rejects_out_of_range() {
        assert!(Score::new(6).is_err());
        assert!(Score::new(-2).is_err());
    }

    #[test]
    fn score_wire_form_is_a_bare_integer() {
        let rating = Rating::new(1.into(), 2.into(), Score::Stars(4), "");
        let json = serde_json::to_value(&rating).expect("serializable");
        assert_eq!(json["rating"], 4);

        let back: Rating =
            serde_json::from_str(r#"{"id":9,"user":1,"movie":2,"rating":-1,"labels":""}"#)
                .expect("valid rating");
        assert_eq!(back.rating, Score::NoOpinion);
    }

    #[test]
    fn labels_iterator_skips_empty_segments() {
        let rating = Rating::new(1.into(), 2.into(), Score::NoOpinion, "classic, slow,,");
        let tags: Vec<_> = rating.labels().collect();
        assert_eq!(tags, ["classic", "slow"]);
    }
}
