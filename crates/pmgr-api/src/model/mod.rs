// ── Wire model ──
//
// The Pmgr protocol's entities are flat records whose cross-references
// are integer ids, and the JSON the server exchanges is exactly this
// shape. There is no separate domain model: these types are both the
// wire format and the canonical representation consumers depend on.

pub mod group;
pub mod id;
pub mod movie;
pub mod rating;
pub mod request;
pub mod snapshot;
pub mod user;

pub use group::Group;
pub use id::{EntityId, EntityKind};
pub use movie::Movie;
pub use rating::{Rating, Score};
pub use request::{Request, RequestStatus};
pub use snapshot::Snapshot;
pub use user::{Role, Roles, User};
