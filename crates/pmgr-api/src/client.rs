// Pmgr API HTTP client
//
// Wraps `reqwest::Client` with the service's URL scheme and the shared
// request primitive. Every endpoint is a POST; mutating endpoints and
// `list` answer with a full replacement `Snapshot`.

use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::model::{EntityId, EntityKind, Snapshot};
use crate::transport::TransportConfig;

/// Response of the `login` endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Raw HTTP client for the Pmgr REST API.
///
/// Holds the service root and the session token. All endpoints except
/// `login` are token-scoped: `<base><token>/<operation>`. The token is
/// interior state so one client can be shared across tasks; re-invoking
/// [`login`](Self::login) as a different identity simply overwrites it.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a client for the service rooted at `base_url`.
    ///
    /// The URL must end in `/` -- endpoint paths are appended directly
    /// to it. Construction starts unauthenticated.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        if !base_url.ends_with('/') {
            return Err(Error::BaseUrlNoSlash {
                url: base_url.to_owned(),
            });
        }
        let base_url = Url::parse(base_url)?;
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            token: RwLock::new(None),
        })
    }

    /// The service root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The current session token, if logged in.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    fn set_token(&self, token: Option<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = token;
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `<base><token>/<path>`, failing fast when not logged in.
    fn token_url(&self, path: &str) -> Result<Url, Error> {
        let token = self.token().ok_or(Error::NotAuthenticated)?;
        self.base_url
            .join(&format!("{token}/{path}"))
            .map_err(Error::InvalidUrl)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Authenticate and store the returned session token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, Error> {
        self.login_inner(username, password, false).await
    }

    /// Authenticate, forcing the server to issue a fresh token even if
    /// the account already had one.
    pub async fn login_renew(&self, username: &str, password: &str) -> Result<String, Error> {
        self.login_inner(username, password, true).await
    }

    async fn login_inner(
        &self,
        username: &str,
        password: &str,
        renew: bool,
    ) -> Result<String, Error> {
        let url = self.base_url.join("login").map_err(Error::InvalidUrl)?;
        let body = if renew {
            json!({ "username": username, "password": password, "renew": "true" })
        } else {
            json!({ "username": username, "password": password })
        };

        let resp: TokenResponse = self.post_json(url, Some(&body)).await?;
        self.set_token(Some(resp.token.clone()));
        Ok(resp.token)
    }

    /// Invalidate the session server-side. The local token is cleared
    /// even when the call fails.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.token_url("logout")?;
        let result = self.post_unit(url).await;
        self.set_token(None);
        result
    }

    /// Fetch the full snapshot without changing anything.
    pub async fn list(&self) -> Result<Snapshot, Error> {
        let url = self.token_url("list")?;
        self.post_json(url, None::<&()>).await
    }

    /// Create an entity. The server ignores any id on the object and
    /// assigns its own.
    pub async fn add(
        &self,
        kind: EntityKind,
        entity: &(impl Serialize + Sync),
    ) -> Result<Snapshot, Error> {
        let url = self.token_url(&format!("add{kind}"))?;
        self.post_json(url, Some(entity)).await
    }

    /// Replace an existing entity. The object must carry the id of the
    /// record to overwrite.
    pub async fn set(
        &self,
        kind: EntityKind,
        entity: &(impl Serialize + Sync),
    ) -> Result<Snapshot, Error> {
        let url = self.token_url(&format!("set{kind}"))?;
        self.post_json(url, Some(entity)).await
    }

    /// Delete an entity by id.
    pub async fn remove(&self, kind: EntityKind, id: EntityId) -> Result<Snapshot, Error> {
        let url = self.token_url(&format!("rm{kind}"))?;
        self.post_json(url, Some(&json!({ "id": id }))).await
    }

    // ── Request primitive ────────────────────────────────────────────

    /// POST `body` as JSON (or nothing at all for body-less calls) and
    /// parse the JSON response.
    ///
    /// A non-success status rejects with [`Error::Http`] carrying the
    /// request URL, the serialized request body, the status code, and
    /// the response text.
    async fn post_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<T, Error> {
        let (status, body_text, text) = self.send(url.clone(), body).await?;

        if !status.is_success() {
            return Err(Error::Http {
                url: url.to_string(),
                body: body_text,
                status: status.as_u16(),
                text,
            });
        }

        serde_json::from_str(&text).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: text,
        })
    }

    /// POST with no body and no meaningful response payload.
    async fn post_unit(&self, url: Url) -> Result<(), Error> {
        let (status, body_text, text) = self.send(url.clone(), None::<&()>).await?;

        if !status.is_success() {
            return Err(Error::Http {
                url: url.to_string(),
                body: body_text,
                status: status.as_u16(),
                text,
            });
        }
        Ok(())
    }

    /// Issue the POST and collect status + response text.
    async fn send(
        &self,
        url: Url,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<(reqwest::StatusCode, String, String), Error> {
        let mut request = self.http.post(url.clone());
        let body_text = match body {
            Some(value) => {
                let serialized =
                    serde_json::to_string(value).map_err(|e| Error::Serialization {
                        message: e.to_string(),
                    })?;
                request = request
                    .header(
                        reqwest::header::CONTENT_TYPE,
                        "application/json; charset=utf-8",
                    )
                    .body(serialized.clone());
                serialized
            }
            None => String::new(),
        };

        debug!(%url, bytes = body_text.len(), "POST");

        let resp = request.send().await.map_err(Error::Transport)?;
        let status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;
        Ok((status, body_text, text))
    }
}
