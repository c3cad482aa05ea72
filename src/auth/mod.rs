//! Session state for the Rocket.Chat client.
//!
//! Every client owns exactly one [`Session`]. It carries the `X-User-Id` /
//! `X-Auth-Token` pair attached to every request and the pagination keys
//! queued for the next request only.

use crate::client::Query;
use crate::errors::{ConfigurationError, RocketChatError, RocketChatResult};
use crate::observability::redact_token;
use http::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use parking_lot::{Mutex, RwLock};
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

/// Header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the session token
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Session token pair returned by the login endpoints
#[derive(Clone)]
pub struct UserAuthToken {
    /// Authenticated user id
    pub user_id: String,
    /// Session token
    pub token: SecretString,
}

impl UserAuthToken {
    /// Create a new token pair
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: SecretString::new(token.into()),
        }
    }

    /// Expose the token for use in requests
    pub fn expose_token(&self) -> &str {
        self.token.expose_secret()
    }
}

impl std::fmt::Debug for UserAuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAuthToken")
            .field("user_id", &self.user_id)
            .field("token", &redact_token(self.expose_token()))
            .finish()
    }
}

impl PartialEq for UserAuthToken {
    fn eq(&self, other: &Self) -> bool {
        self.user_id == other.user_id && self.expose_token() == other.expose_token()
    }
}

/// Per-client session: auth headers plus the one-shot pagination query
pub struct Session {
    default_headers: HeaderMap,
    auth: RwLock<Option<UserAuthToken>>,
    pending: Mutex<Query>,
}

impl Session {
    /// Create an unauthenticated session
    pub fn new(default_headers: HeaderMap) -> Self {
        Self {
            default_headers,
            auth: RwLock::new(None),
            pending: Mutex::new(Query::new()),
        }
    }

    /// Replace the auth header pair wholesale
    pub fn set_auth(&self, user_id: impl Into<String>, token: impl Into<String>) {
        let token = UserAuthToken::new(user_id, token);
        info!(user_id = %token.user_id, "Session authenticated");
        *self.auth.write() = Some(token);
    }

    /// Adopt a token pair returned by a login call
    pub fn set_token(&self, token: UserAuthToken) {
        info!(user_id = %token.user_id, "Session authenticated");
        *self.auth.write() = Some(token);
    }

    /// Drop the auth header pair
    pub fn clear_auth(&self) {
        if self.auth.write().take().is_some() {
            info!("Session cleared");
        }
    }

    /// Current auth header pair
    pub fn auth(&self) -> Option<UserAuthToken> {
        self.auth.read().clone()
    }

    /// Whether an auth header pair is set
    pub fn is_authenticated(&self) -> bool {
        self.auth.read().is_some()
    }

    /// Queue a pagination key for the next request, replacing an earlier value
    pub fn set_pending(&self, key: &str, value: impl Into<String>) {
        self.pending.lock().set(key, value);
    }

    /// Snapshot of the queued pagination keys
    pub fn pending(&self) -> Query {
        self.pending.lock().clone()
    }

    /// Take the queued pagination keys, leaving nothing behind
    pub fn take_pending(&self) -> Query {
        std::mem::take(&mut *self.pending.lock())
    }

    /// Headers for an outgoing request
    pub fn headers(&self) -> RocketChatResult<HeaderMap> {
        let mut headers = self.default_headers.clone();

        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if !headers.contains_key(ACCEPT) {
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }

        if let Some(auth) = self.auth.read().as_ref() {
            insert_header(&mut headers, USER_ID_HEADER, &auth.user_id, false)?;
            insert_header(&mut headers, AUTH_TOKEN_HEADER, auth.expose_token(), true)?;
        }

        Ok(headers)
    }
}

fn insert_header(
    headers: &mut HeaderMap,
    name: &'static str,
    value: &str,
    sensitive: bool,
) -> RocketChatResult<()> {
    let mut header_value = HeaderValue::from_str(value).map_err(|_| {
        RocketChatError::Configuration(ConfigurationError::InvalidHeader {
            name: name.to_string(),
        })
    })?;
    header_value.set_sensitive(sensitive);
    headers.insert(HeaderName::from_static(name), header_value);
    Ok(())
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field(
                "user_id",
                &self.auth.read().as_ref().map(|a| a.user_id.clone()),
            )
            .field("pending", &*self.pending.lock())
            .finish()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(HeaderMap::new())
    }
}
