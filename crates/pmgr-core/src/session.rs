// ── Session ──
//
// Composes one API gateway with one state store. Every call that the
// server answers with a snapshot feeds that snapshot through the
// store, so consumers always read post-call state. The store is owned
// here and handed to consumers by reference -- no ambient globals.

use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info, warn};

use pmgr_api::model::{EntityId, EntityKind, Group, Movie, Rating, Request, Snapshot, User};
use pmgr_api::{ApiClient, TransportConfig};

use crate::config::SessionConfig;
use crate::error::CoreError;
use crate::store::StateStore;

/// A connection to one Pmgr service.
///
/// Cheaply cloneable; clones share the gateway, token, and store.
/// Mutating calls follow the protocol's refetch-everything contract:
/// they return the full replacement snapshot (already installed in the
/// store) rather than the created or changed entity.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    api: ApiClient,
    store: StateStore,
    username: RwLock<Option<String>>,
}

impl Session {
    /// Record the service root and start an unauthenticated session
    /// with an empty store. No network traffic happens here.
    pub fn connect(config: &SessionConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            ..TransportConfig::default()
        };
        let api = ApiClient::new(&config.url, &transport)?;
        debug!(url = %config.url, "session created");

        Ok(Self {
            inner: Arc::new(SessionInner {
                api,
                store: StateStore::new(),
                username: RwLock::new(None),
            }),
        })
    }

    /// The state store backing this session.
    pub fn store(&self) -> &StateStore {
        &self.inner.store
    }

    /// The username of the logged-in identity, if any.
    pub fn username(&self) -> Option<String> {
        self.inner
            .username
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// The logged-in identity's own record from the current snapshot.
    pub fn current_user(&self) -> Option<User> {
        let username = self.username()?;
        self.inner
            .store
            .snapshot()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    // ── Authentication ───────────────────────────────────────────────

    /// Log in and immediately refresh, so the snapshot reflects the
    /// authenticated view. Logging in again as someone else simply
    /// overwrites the token.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Arc<Snapshot>, CoreError> {
        self.inner
            .api
            .login(username, password.expose_secret())
            .await?;
        *self
            .inner
            .username
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(username.to_owned());
        info!(username, "logged in");

        self.list().await
    }

    /// Invalidate the session token server-side. The last snapshot
    /// stays readable in the store.
    pub async fn logout(&self) -> Result<(), CoreError> {
        self.inner.api.logout().await?;
        *self
            .inner
            .username
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
        info!("logged out");
        Ok(())
    }

    // ── Synchronization ──────────────────────────────────────────────

    /// Refetch the full snapshot without changing anything.
    pub async fn list(&self) -> Result<Arc<Snapshot>, CoreError> {
        let snapshot = self.inner.api.list().await?;
        self.inner.store.replace(snapshot)
    }

    // ── Create ───────────────────────────────────────────────────────

    pub async fn add_user(&self, user: &User) -> Result<Arc<Snapshot>, CoreError> {
        self.add_entity(EntityKind::User, user, user.id).await
    }

    pub async fn add_group(&self, group: &Group) -> Result<Arc<Snapshot>, CoreError> {
        self.add_entity(EntityKind::Group, group, group.id).await
    }

    pub async fn add_movie(&self, movie: &Movie) -> Result<Arc<Snapshot>, CoreError> {
        self.add_entity(EntityKind::Movie, movie, movie.id).await
    }

    pub async fn add_rating(&self, rating: &Rating) -> Result<Arc<Snapshot>, CoreError> {
        self.add_entity(EntityKind::Rating, rating, rating.id).await
    }

    pub async fn add_request(&self, request: &Request) -> Result<Arc<Snapshot>, CoreError> {
        self.add_entity(EntityKind::Request, request, request.id)
            .await
    }

    // ── Update ───────────────────────────────────────────────────────

    pub async fn set_user(&self, user: &User) -> Result<Arc<Snapshot>, CoreError> {
        self.set_entity(EntityKind::User, user, user.id).await
    }

    pub async fn set_group(&self, group: &Group) -> Result<Arc<Snapshot>, CoreError> {
        self.set_entity(EntityKind::Group, group, group.id).await
    }

    pub async fn set_movie(&self, movie: &Movie) -> Result<Arc<Snapshot>, CoreError> {
        self.set_entity(EntityKind::Movie, movie, movie.id).await
    }

    pub async fn set_rating(&self, rating: &Rating) -> Result<Arc<Snapshot>, CoreError> {
        self.set_entity(EntityKind::Rating, rating, rating.id).await
    }

    pub async fn set_request(&self, request: &Request) -> Result<Arc<Snapshot>, CoreError> {
        self.set_entity(EntityKind::Request, request, request.id)
            .await
    }

    // ── Delete ───────────────────────────────────────────────────────

    pub async fn remove_user(&self, id: EntityId) -> Result<Arc<Snapshot>, CoreError> {
        self.remove_entity(EntityKind::User, id).await
    }

    pub async fn remove_group(&self, id: EntityId) -> Result<Arc<Snapshot>, CoreError> {
        self.remove_entity(EntityKind::Group, id).await
    }

    pub async fn remove_movie(&self, id: EntityId) -> Result<Arc<Snapshot>, CoreError> {
        self.remove_entity(EntityKind::Movie, id).await
    }

    pub async fn remove_rating(&self, id: EntityId) -> Result<Arc<Snapshot>, CoreError> {
        self.remove_entity(EntityKind::Rating, id).await
    }

    pub async fn remove_request(&self, id: EntityId) -> Result<Arc<Snapshot>, CoreError> {
        self.remove_entity(EntityKind::Request, id).await
    }

    // ── Shared plumbing ──────────────────────────────────────────────

    async fn add_entity(
        &self,
        kind: EntityKind,
        entity: &(impl Serialize + Sync),
        id: Option<EntityId>,
    ) -> Result<Arc<Snapshot>, CoreError> {
        if let Some(id) = id {
            warn!(%kind, %id, "add: the server will ignore this id");
        }
        let snapshot = self.inner.api.add(kind, entity).await?;
        self.inner.store.replace(snapshot)
    }

    async fn set_entity(
        &self,
        kind: EntityKind,
        entity: &(impl Serialize + Sync),
        id: Option<EntityId>,
    ) -> Result<Arc<Snapshot>, CoreError> {
        let id = id.ok_or(CoreError::MissingId { kind })?;
        self.require_resolvable(kind, id)?;

        let snapshot = self.inner.api.set(kind, entity).await?;
        self.inner.store.replace(snapshot)
    }

    async fn remove_entity(
        &self,
        kind: EntityKind,
        id: EntityId,
    ) -> Result<Arc<Snapshot>, CoreError> {
        self.require_resolvable(kind, id)?;

        let snapshot = self.inner.api.remove(kind, id).await?;
        self.inner.store.replace(snapshot)
    }

    /// Precondition for `set`/`remove`: the id must resolve in the
    /// current cache. Anything else is stale UI state, rejected locally
    /// before any request goes out.
    fn require_resolvable(&self, kind: EntityKind, id: EntityId) -> Result<(), CoreError> {
        if self.inner.store.resolve(id).is_none() {
            return Err(CoreError::NotFound { kind, id });
        }
        Ok(())
    }
}
