// ── Snapshot store and id cache ──
//
// The cache is derived, never authoritative: it is discarded and
// rebuilt from every incoming snapshot. A replacement index is built
// completely off to the side, so a failed rebuild leaves the previous
// state untouched.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};

use pmgr_api::model::{EntityId, Snapshot};

use super::Entity;
use crate::error::CoreError;

/// One snapshot plus its id index, swapped in atomically.
struct Indexed {
    snapshot: Arc<Snapshot>,
    by_id: HashMap<EntityId, Entity>,
}

impl Indexed {
    fn empty() -> Self {
        Self {
            snapshot: Arc::new(Snapshot::default()),
            by_id: HashMap::new(),
        }
    }

    /// Index every entity across the five lists by id.
    ///
    /// The id space is shared by all kinds, so a duplicate anywhere in
    /// the snapshot is a server data-integrity failure.
    fn build(snapshot: Snapshot) -> Result<Self, CoreError> {
        let snapshot = Arc::new(snapshot);
        let mut by_id = HashMap::with_capacity(snapshot.entity_count());

        let mut insert = |id: Option<EntityId>, entity: Entity| -> Result<(), CoreError> {
            let Some(id) = id else {
                // Server snapshots always carry ids; an id-less record
                // can never be resolved, so it is indexed nowhere.
                warn!(kind = %entity.kind(), "snapshot entity without id, not indexed");
                return Ok(());
            };
            if by_id.insert(id, entity).is_some() {
                return Err(CoreError::DuplicateId { id });
            }
            Ok(())
        };

        for user in &snapshot.users {
            insert(user.id, Entity::User(Arc::new(user.clone())))?;
        }
        for group in &snapshot.groups {
            insert(group.id, Entity::Group(Arc::new(group.clone())))?;
        }
        for movie in &snapshot.movies {
            insert(movie.id, Entity::Movie(Arc::new(movie.clone())))?;
        }
        for rating in &snapshot.ratings {
            insert(rating.id, Entity::Rating(Arc::new(rating.clone())))?;
        }
        for request in &snapshot.requests {
            insert(request.id, Entity::Request(Arc::new(request.clone())))?;
        }

        Ok(Self { snapshot, by_id })
    }
}

/// Holds exactly one current snapshot and its id→entity cache.
///
/// Empty at startup, fully replaced on every successful call that
/// returns a snapshot, never partially mutated. Reads are wait-free
/// (`ArcSwap`); concurrent replacements are last-write-wins at snapshot
/// granularity, matching the protocol's no-merge model. Subscribers get
/// each new snapshot through a `watch` channel.
pub struct StateStore {
    current: ArcSwap<Indexed>,
    changed: watch::Sender<Arc<Snapshot>>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl StateStore {
    pub fn new() -> Self {
        let empty = Indexed::empty();
        let (changed, _) = watch::channel(Arc::clone(&empty.snapshot));
        let (last_refresh, _) = watch::channel(None);
        Self {
            current: ArcSwap::from_pointee(empty),
            changed,
            last_refresh,
        }
    }

    /// Install `snapshot` as the new current state.
    ///
    /// Discards the old cache entirely and re-indexes every entity.
    /// Fails with [`CoreError::DuplicateId`] if the same id appears
    /// twice, in which case the previous snapshot and cache remain in
    /// place untouched.
    pub fn replace(&self, snapshot: Snapshot) -> Result<Arc<Snapshot>, CoreError> {
        let indexed = Indexed::build(snapshot)?;
        let snap = Arc::clone(&indexed.snapshot);

        self.current.store(Arc::new(indexed));
        // `send_replace` updates even with zero receivers.
        self.changed.send_replace(Arc::clone(&snap));
        self.last_refresh.send_replace(Some(Utc::now()));

        debug!(entities = snap.entity_count(), name = %snap.name, "snapshot replaced");
        Ok(snap)
    }

    /// Look up the entity with this id, or `None` if the current
    /// snapshot does not know it (e.g. a stale reference after a
    /// deletion). Never an error: absence is a normal answer.
    pub fn resolve(&self, id: EntityId) -> Option<Entity> {
        self.current.load().by_id.get(&id).cloned()
    }

    /// The current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.load().snapshot)
    }

    /// Subscribe to snapshot replacements.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.changed.subscribe()
    }

    /// When the last successful replacement happened, or `None` if the
    /// store has never been populated.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pmgr_api::model::{EntityKind, Group, Movie, Rating, RequestStatus, Roles, Score, User};

    fn user(id: u64, username: &str) -> User {
        User {
            id: Some(id.into()),
            username: username.into(),
            password: None,
            role: Roles::user(),
            groups: Vec::new(),
            requests: Vec::new(),
            ratings: vec![],
        }
    }

    fn movie(id: u64, imdb: &str) -> Movie {
        Movie {
            id: Some(id.into()),
            imdb: imdb.into(),
            name: "M".into(),
            director: "D".into(),
            actors: "A".into(),
            year: 2000,
            minutes: 90,
            ratings: vec![],
        }
    }

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            name: "s".into(),
            users: vec![user(1, "alice"), user(2, "bob")],
            groups: vec![Group {
                id: Some(3.into()),
                name: "club".into(),
                owner: 1.into(),
                members: vec![2.into()],
                requests: vec![],
            }],
            movies: vec![movie(4, "tt0000001")],
            ratings: vec![Rating {
                id: Some(5.into()),
                user: 1.into(),
                movie: 4.into(),
                rating: Score::Stars(4),
                labels: String::new(),
            }],
            requests: vec![pmgr_api::model::Request {
                id: Some(6.into()),
                user: 2.into(),
                group: 3.into(),
                status: RequestStatus::Accepted,
            }],
        }
    }

    #[test]
    fn starts_empty() {
        let store = StateStore::new();
        assert_eq!(store.snapshot().entity_count(), 0);
        assert!(store.resolve(1.into()).is_none());
        assert!(store.last_refresh().is_none());
    }

    #[test]
    fn every_id_in_the_snapshot_resolves_and_no_others() {
        let store = StateStore::new();
        store.replace(sample_snapshot()).unwrap();

        for id in 1..=6u64 {
            let entity = store.resolve(id.into()).expect("id must resolve");
            assert_eq!(entity.id(), Some(id.into()));
        }
        assert!(store.resolve(7.into()).is_none());
        assert!(store.resolve(0.into()).is_none());
    }

    #[test]
    fn resolve_returns_the_right_kind() {
        let store = StateStore::new();
        store.replace(sample_snapshot()).unwrap();

        assert_eq!(store.resolve(1.into()).unwrap().kind(), EntityKind::User);
        assert_eq!(store.resolve(3.into()).unwrap().kind(), EntityKind::Group);
        assert_eq!(store.resolve(4.into()).unwrap().kind(), EntityKind::Movie);
        assert_eq!(
            store.resolve(1.into()).unwrap().as_user().unwrap().username,
            "alice"
        );
    }

    #[test]
    fn duplicate_id_across_lists_fails_and_keeps_prior_state() {
        let store = StateStore::new();
        store.replace(sample_snapshot()).unwrap();

        // id 1 is taken by a user; reusing it for a movie is an
        // integrity failure.
        let mut bad = sample_snapshot();
        bad.movies.push(movie(1, "tt9999999"));

        let err = store.replace(bad).expect_err("duplicate must fail");
        assert!(matches!(err, CoreError::DuplicateId { id } if id == 1.into()));

        // Prior snapshot still fully resolvable.
        assert_eq!(store.snapshot().movies.len(), 1);
        assert_eq!(
            store.resolve(1.into()).unwrap().as_user().unwrap().username,
            "alice"
        );
    }

    #[test]
    fn replacement_discards_old_ids() {
        let store = StateStore::new();
        store.replace(sample_snapshot()).unwrap();

        let smaller = Snapshot {
            name: "s".into(),
            users: vec![user(1, "alice")],
            ..Snapshot::default()
        };
        store.replace(smaller).unwrap();

        assert!(store.resolve(1.into()).is_some());
        assert!(store.resolve(4.into()).is_none(), "deleted movie resolves");
    }

    #[test]
    fn subscribers_see_each_replacement() {
        let store = StateStore::new();
        let rx = store.subscribe();
        assert_eq!(rx.borrow().entity_count(), 0);

        store.replace(sample_snapshot()).unwrap();
        assert_eq!(rx.borrow().entity_count(), 6);
        assert!(store.last_refresh().is_some());
    }
}
