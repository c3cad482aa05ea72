//! Mock implementations for testing.
//!
//! [`MockHttpTransport`] records every request it receives and answers from
//! a queue of canned responses, so tests can assert on exact URLs, headers
//! and bodies, or on no request being sent at all.

use crate::errors::{NetworkError, RocketChatResult};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport};
use async_trait::async_trait;
use http::StatusCode;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Arc;

/// Mock response configuration
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Value,
    /// Transport failure to return instead
    pub error: Option<NetworkError>,
}

impl MockResponse {
    /// 200 response with the given body
    pub fn json(body: Value) -> Self {
        Self::with_status(200, body)
    }

    /// Response with an arbitrary status
    pub fn with_status(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            error: None,
        }
    }

    /// `{"success": true, ...fields}` at 200
    pub fn success(fields: Value) -> Self {
        let mut body = json!({ "success": true });
        if let (Some(target), Value::Object(extra)) = (body.as_object_mut(), fields) {
            target.extend(extra);
        }
        Self::json(body)
    }

    /// `{"success": false, "error": message}` at 200
    pub fn failure(message: &str) -> Self {
        Self::json(json!({ "success": false, "error": message }))
    }

    /// `{"status": "error", "message": message}` at the given status
    pub fn status_error(status: u16, message: &str) -> Self {
        Self::with_status(status, json!({ "status": "error", "message": message }))
    }

    /// Transport failure; the server is never reached
    pub fn network(error: NetworkError) -> Self {
        Self {
            status: 0,
            body: Value::Null,
            error: Some(error),
        }
    }
}

/// Recorded request for verification
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request method
    pub method: String,
    /// Request URL including the query string
    pub url: String,
    /// JSON body
    pub body: Option<Value>,
    /// Request headers, names lowercase
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of a header, if sent
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// URL without the query string
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or_default()
    }

    /// Value of a query parameter, percent-decoded
    pub fn query_param(&self, key: &str) -> Option<String> {
        let (_, query) = self.url.split_once('?')?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

/// Mock HTTP transport for testing
#[derive(Default)]
pub struct MockHttpTransport {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    default_response: Option<MockResponse>,
}

impl MockHttpTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response to the queue
    pub fn add_response(self, response: MockResponse) -> Self {
        self.responses.lock().push_back(response);
        self
    }

    /// Add multiple responses
    pub fn add_responses(self, responses: impl IntoIterator<Item = MockResponse>) -> Self {
        self.responses.lock().extend(responses);
        self
    }

    /// Set default response when queue is empty
    pub fn with_default_response(mut self, response: MockResponse) -> Self {
        self.default_response = Some(response);
        self
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Get the last recorded request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }

    /// Number of requests sent through this transport
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Clear recorded requests
    pub fn clear_requests(&self) {
        self.requests.lock().clear();
    }

    /// Get remaining response count
    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().len()
    }

    fn record_request(&self, request: &ApiRequest) {
        let headers = request
            .headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();

        self.requests.lock().push(RecordedRequest {
            method: request.method.to_string(),
            url: request.url.clone(),
            body: request.body.clone(),
            headers,
        });
    }

    fn next_response(&self) -> Option<MockResponse> {
        self.responses
            .lock()
            .pop_front()
            .or_else(|| self.default_response.clone())
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: ApiRequest) -> RocketChatResult<ApiResponse> {
        self.record_request(&request);

        let response = self.next_response().ok_or_else(|| NetworkError::ConnectionFailed {
            message: format!("no mock response queued for {}", request.url),
        })?;

        if let Some(error) = response.error {
            return Err(error.into());
        }

        let status =
            StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Ok(ApiResponse::new(status, response.body))
    }
}

impl std::fmt::Debug for MockHttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockHttpTransport")
            .field("queued", &self.remaining_responses())
            .field("recorded", &self.call_count())
            .finish()
    }
}
