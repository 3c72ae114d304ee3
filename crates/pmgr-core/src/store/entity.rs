use std::sync::Arc;

use pmgr_api::model::{EntityId, EntityKind, Group, Movie, Rating, Request, User};

/// A resolved cache entry: any of the five entity kinds, shared with
/// the snapshot it came from.
///
/// The id space is global across kinds, so `resolve` cannot know what
/// it will find; callers match on the variant (or use the `as_*`
/// accessors) for the kind they expect.
#[derive(Debug, Clone)]
pub enum Entity {
    User(Arc<User>),
    Group(Arc<Group>),
    Movie(Arc<Movie>),
    Rating(Arc<Rating>),
    Request(Arc<Request>),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::User,
            Self::Group(_) => EntityKind::Group,
            Self::Movie(_) => EntityKind::Movie,
            Self::Rating(_) => EntityKind::Rating,
            Self::Request(_) => EntityKind::Request,
        }
    }

    pub fn id(&self) -> Option<EntityId> {
        match self {
            Self::User(u) => u.id,
            Self::Group(g) => g.id,
            Self::Movie(m) => m.id,
            Self::Rating(r) => r.id,
            Self::Request(r) => r.id,
        }
    }

    pub fn as_user(&self) -> Option<&User> {
        match self {
            Self::User(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_movie(&self) -> Option<&Movie> {
        match self {
            Self::Movie(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_rating(&self) -> Option<&Rating> {
        match self {
            Self::Rating(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_request(&self) -> Option<&Request> {
        match self {
            Self::Request(r) => Some(r),
            _ => None,
        }
    }
}
