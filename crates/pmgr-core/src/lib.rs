// pmgr-core: State layer between pmgr-api and consumers (CLI, UI glue).

pub mod config;
pub mod error;
pub mod populate;
pub mod session;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::SessionConfig;
pub use error::CoreError;
pub use populate::PopulateOptions;
pub use session::Session;
pub use store::{Entity, StateStore};

// Re-export the wire model at the crate root: the protocol's entities
// are the domain model, so consumers should not need pmgr-api directly.
pub use pmgr_api::model::{
    EntityId, EntityKind, Group, Movie, Rating, Request, RequestStatus, Role, Roles, Score,
    Snapshot, User,
};
