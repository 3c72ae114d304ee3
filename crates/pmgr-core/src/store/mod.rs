// ── Client state store ──
//
// One current snapshot, one derived id cache, replaced wholesale on
// every server response.

mod entity;
mod state_store;

pub use entity::Entity;
pub use state_store::StateStore;
