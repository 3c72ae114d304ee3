use thiserror::Error;

/// Top-level error type for the `pmgr-api` crate.
///
/// Covers every failure mode of the wire layer: configuration,
/// authentication, transport, and the server's HTTP error responses.
/// `pmgr-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// Base URL does not end in `/`. Every endpoint path is appended
    /// directly to the base, so the trailing slash is mandatory.
    #[error("Base URL must end in '/': {url}")]
    BaseUrlNoSlash { url: String },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Authentication ──────────────────────────────────────────────
    /// A token-scoped endpoint was called before a successful login.
    #[error("Not authenticated -- call login first")]
    NotAuthenticated,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status from the service. Carries everything the
    /// caller needs to diagnose the rejected call: the request URL, the
    /// serialized request body, the status code, and the response text.
    #[error("Server rejected {url} (HTTP {status}): {text}")]
    Http {
        url: String,
        body: String,
        status: u16,
        text: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON serialization of a request body failed.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Model validation ────────────────────────────────────────────
    /// Unknown role flag in a comma-separated role string.
    #[error("Invalid role flag {flag:?}: expected USER, ADMIN, or ROOT")]
    InvalidRole { flag: String },

    /// Rating value outside -1 (no opinion) and 0..=5.
    #[error("Invalid score {value}: expected -1 or an integer from 0 to 5")]
    InvalidScore { value: i64 },

    /// Catalog key not of the form `tt` + 7 digits.
    #[error("Invalid imdb key {key:?}: expected \"tt\" followed by 7 digits")]
    InvalidImdbKey { key: String },

    /// Request status outside the four enumerated values.
    #[error(
        "Invalid request status {value:?}: expected one of \
         awaiting_group, awaiting_user, accepted, rejected"
    )]
    InvalidStatus { value: String },
}

impl Error {
    /// Returns the HTTP status code, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the server rejected the credentials or token.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated | Self::Http { status: 401 | 403, .. }
        )
    }
}
