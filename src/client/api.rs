//! Shared request plumbing used by every service.

use super::query::{Query, Sort};
use super::response::{handle_response, FieldPath};
use crate::auth::{Session, UserAuthToken};
use crate::config::{join_url, RocketChatConfig};
use crate::errors::{Resource, ResponseError, RocketChatError, RocketChatResult};
use crate::observability::redact_url;
use crate::transport::{ApiRequest, HttpTransport};
use http::Method;
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument};

const LOGIN_PATH: &str = "login";

/// Request builder and response interpreter bound to one session
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<RocketChatConfig>,
    session: Arc<Session>,
    transport: Arc<dyn HttpTransport>,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(
        config: Arc<RocketChatConfig>,
        session: Arc<Session>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let base_url = config.base_url();
        Self {
            config,
            session,
            transport,
            base_url,
        }
    }

    /// Client configuration
    pub fn config(&self) -> &RocketChatConfig {
        &self.config
    }

    /// Session shared by every service of this client
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Instance URL joined with the API root
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the URL for `path`, folding in and clearing the pending query
    pub fn build_url(&self, path: &str, query: Query) -> String {
        let query = query.merge(self.session.take_pending());
        let url = join_url(&self.base_url, path);
        if query.is_empty() {
            url
        } else {
            format!("{}?{}", url, query.encode())
        }
    }

    /// Skip `offset` results on the next request
    pub fn skip(&self, offset: u64) {
        self.session.set_pending("offset", offset.to_string());
    }

    /// Return at most `count` results on the next request
    pub fn take(&self, count: u64) {
        self.session.set_pending("count", count.to_string());
    }

    /// Sort the results of the next request
    pub fn sort(&self, sort: impl Into<Sort>) {
        self.session.set_pending("sort", sort.into().to_query_value());
    }

    /// Send a GET request
    pub async fn get(
        &self,
        path: &str,
        query: Query,
        resource: Resource,
        field: FieldPath,
    ) -> RocketChatResult<Value> {
        self.execute(Method::GET, path, query, None, resource, field)
            .await
    }

    /// Send a POST request with a JSON body
    pub async fn post(
        &self,
        path: &str,
        body: Value,
        resource: Resource,
        field: FieldPath,
    ) -> RocketChatResult<Value> {
        self.execute(Method::POST, path, Query::new(), Some(body), resource, field)
            .await
    }

    /// Send a PUT request with a JSON body
    pub async fn put(
        &self,
        path: &str,
        body: Value,
        resource: Resource,
        field: FieldPath,
    ) -> RocketChatResult<Value> {
        self.execute(Method::PUT, path, Query::new(), Some(body), resource, field)
            .await
    }

    /// Send a DELETE request
    pub async fn delete(
        &self,
        path: &str,
        resource: Resource,
        field: FieldPath,
    ) -> RocketChatResult<Value> {
        self.execute(Method::DELETE, path, Query::new(), None, resource, field)
            .await
    }

    /// Build, send and interpret one request under the API root
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Query,
        body: Option<Value>,
        resource: Resource,
        field: FieldPath,
    ) -> RocketChatResult<Value> {
        // Pending keys are consumed here even when the request fails afterwards
        let url = self.build_url(path, query);
        self.send_to(method, url, body, resource, field).await
    }

    /// Send a request to an absolute URL and interpret the envelope
    pub async fn send_to(
        &self,
        method: Method,
        url: String,
        body: Option<Value>,
        resource: Resource,
        field: FieldPath,
    ) -> RocketChatResult<Value> {
        let headers = self.session.headers()?;
        debug!(method = %method, url = %redact_url(&url), "Sending request");

        let mut request = ApiRequest::new(method, url, headers);
        if let Some(body) = body {
            request = request.with_body(body);
        }

        let response = self.transport.send(request).await?;
        handle_response(response.status, response.body, resource, field)
    }

    /// Exchange a username and password for a session token pair.
    ///
    /// Leaves the current session untouched.
    #[instrument(skip_all, fields(username = %username))]
    pub async fn auth_token(&self, username: &str, password: &str) -> RocketChatResult<UserAuthToken> {
        if username.is_empty() || password.is_empty() {
            return Err(RocketChatError::InvalidCredentials);
        }

        let data = self
            .post(
                LOGIN_PATH,
                json!({ "user": username, "password": password }),
                Resource::User,
                FieldPath::One("data"),
            )
            .await?;

        token_from_login(&data)
    }

    /// Adopt the configured admin session, logging in when no token is cached
    #[instrument(skip(self))]
    pub async fn admin_login(&self) -> RocketChatResult<()> {
        if let Some(admin) = self.config.admin_token() {
            if !admin.user_id.is_empty() && !admin.token.expose_secret().is_empty() {
                info!(user_id = %admin.user_id, "Using cached admin session");
                self.session.set_token(UserAuthToken {
                    user_id: admin.user_id.clone(),
                    token: admin.token.clone(),
                });
                return Ok(());
            }
        }

        let credentials = self.config.admin_credentials();
        let password = credentials
            .password
            .as_ref()
            .map(|p| p.expose_secret().as_str())
            .unwrap_or_default();

        let token = self.auth_token(&credentials.username, password).await?;
        self.session.set_token(token);
        Ok(())
    }

    /// Replace the session's auth headers
    pub fn set_auth(&self, user_id: impl Into<String>, token: impl Into<String>) {
        self.session.set_auth(user_id, token);
    }
}

/// Read `userId` / `authToken` out of a login payload
fn token_from_login(data: &Value) -> RocketChatResult<UserAuthToken> {
    let user_id = data
        .get("userId")
        .and_then(Value::as_str)
        .ok_or(RocketChatError::Response(ResponseError::MissingField {
            resource: Resource::User,
            field: "userId",
        }))?;
    let token = data
        .get("authToken")
        .and_then(Value::as_str)
        .ok_or(RocketChatError::Response(ResponseError::MissingField {
            resource: Resource::User,
            field: "authToken",
        }))?;

    Ok(UserAuthToken::new(user_id, token))
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish()
    }
}
