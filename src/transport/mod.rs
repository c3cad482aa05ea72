//! HTTP transport layer for the Rocket.Chat client.
//!
//! The transport moves a JSON request to the server and hands back the
//! status and JSON body untouched. Interpreting the envelope is left to
//! [`crate::client::response`].

use crate::errors::{NetworkError, RocketChatError, RocketChatResult};
use crate::observability::{redact_body, redact_url};
use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// HTTP transport trait for making API requests
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request and return the raw status and JSON body
    async fn send(&self, request: ApiRequest) -> RocketChatResult<ApiResponse>;
}

/// Outgoing request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL including the query string
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// JSON body
    pub body: Option<Value>,
    /// Per-request timeout override
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    /// Create a request without a body
    pub fn new(method: Method, url: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            method,
            url: url.into(),
            headers,
            body: None,
            timeout: None,
        }
    }

    /// Attach a JSON body
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Raw response as seen on the wire
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Decoded JSON body, `Null` when the body was empty or not JSON
    pub body: Value,
}

impl ApiResponse {
    /// Create a response
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }
}

/// Default HTTP transport implementation using reqwest
pub struct ReqwestTransport {
    client: Client,
    default_timeout: Duration,
}

impl ReqwestTransport {
    /// Create a new transport with the given timeouts
    pub fn new(timeout: Duration, connect_timeout: Duration) -> RocketChatResult<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| RocketChatError::Network(NetworkError::Http(e.to_string())))?;

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }
}

/// Decode a body leniently; anything that is not JSON becomes `Null`
pub(crate) fn decode_body(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or(Value::Null)
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %redact_url(&request.url)))]
    async fn send(&self, request: ApiRequest) -> RocketChatResult<ApiResponse> {
        let timeout = request.timeout.unwrap_or(self.default_timeout);

        let mut req_builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers)
            .timeout(timeout);

        if let Some(body) = &request.body {
            debug!(request_body = %redact_body(body), "Request body");
            req_builder = req_builder.json(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| RocketChatError::Network(NetworkError::from(e)))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| RocketChatError::Network(NetworkError::from(e)))?;
        let body = decode_body(&raw);

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Non-200 response");
        }
        debug!(status = status.as_u16(), response_body = %redact_body(&body), "Received response");

        Ok(ApiResponse::new(status, body))
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}
