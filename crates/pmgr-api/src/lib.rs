// pmgr-api: Async Rust client for the Pmgr movie-group REST API

pub mod client;
pub mod error;
pub mod model;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use model::{
    EntityId, EntityKind, Group, Movie, Rating, Request, RequestStatus, Role, Roles, Score,
    Snapshot, User,
};
pub use transport::TransportConfig;
