// ── Core error types ──
//
// User-facing errors from pmgr-core. Consumers never see raw reqwest
// failures; the `From<pmgr_api::Error>` impl translates wire-layer
// errors into domain-appropriate variants.

use thiserror::Error;

use pmgr_api::model::{EntityId, EntityKind};

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection / authentication ──────────────────────────────────
    #[error("Cannot reach server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Not logged in -- call login first")]
    NotAuthenticated,

    // ── Preconditions (detected locally, no request issued) ──────────
    /// `set`/`remove` against an id the current snapshot does not know.
    /// Defends against stale UI state referencing deleted entities.
    #[error("No such {kind}: id {id} does not resolve in the current snapshot")]
    NotFound { kind: EntityKind, id: EntityId },

    /// `set` against an object that was never persisted (no id).
    #[error("Cannot update {kind}: the object has no id")]
    MissingId { kind: EntityKind },

    /// Invalid constructor input (enum value, score range, catalog key).
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Integrity ────────────────────────────────────────────────────
    /// The same id appeared twice while rebuilding the cache from a
    /// snapshot. The refresh is abandoned; the prior snapshot stays.
    #[error("Duplicate id {id} in snapshot -- server data is inconsistent")]
    DuplicateId { id: EntityId },

    // ── Server-side failures (wrapped, not raw) ──────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code, when the server answered at all.
        status: Option<u16>,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal ─────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from wire-layer errors ────────────────────────────────

impl From<pmgr_api::Error> for CoreError {
    fn from(err: pmgr_api::Error) -> Self {
        use pmgr_api::Error as ApiError;

        match err {
            ApiError::BaseUrlNoSlash { url } => CoreError::Config {
                message: format!("base URL must end in '/': {url}"),
            },
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            ApiError::NotAuthenticated => CoreError::NotAuthenticated,
            ApiError::Transport(ref e) if e.is_connect() || e.is_timeout() => {
                CoreError::ConnectionFailed {
                    url: e.url().map(|u| u.to_string()).unwrap_or_default(),
                    reason: e.to_string(),
                }
            }
            ApiError::Transport(e) => CoreError::Api {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },
            ApiError::Http {
                status: status @ (401 | 403),
                text,
                ..
            } => CoreError::AuthenticationFailed {
                message: if text.is_empty() {
                    format!("HTTP {status}")
                } else {
                    text
                },
            },
            ApiError::Http { status, text, url, .. } => CoreError::Api {
                message: if text.is_empty() { url } else { text },
                status: Some(status),
            },
            ApiError::Serialization { message } | ApiError::Deserialization { message, .. } => {
                CoreError::Internal(message)
            }
            e @ (ApiError::InvalidRole { .. }
            | ApiError::InvalidScore { .. }
            | ApiError::InvalidImdbKey { .. }
            | ApiError::InvalidStatus { .. }) => CoreError::Validation {
                message: e.to_string(),
            },
        }
    }
}
