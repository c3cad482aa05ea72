//! Response envelope interpretation and payload extraction.
//!
//! Rocket.Chat signals outcomes two ways: `{"success": bool, "error": ..}`
//! on most endpoints and `{"status": "success"|"error", "message": ..}` on
//! the login family. Both are recognised here.

use crate::errors::{Resource, RocketChatError, RocketChatResult, GENERIC_FAILURE_MESSAGE};
use http::StatusCode;
use serde_json::Value;

const STATUS_SUCCESS: &str = "success";
const STATUS_ERROR: &str = "error";

/// Where the payload lives inside a successful envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    /// The whole envelope
    Root,
    /// One level down
    One(&'static str),
    /// Two levels down
    Two(&'static str, &'static str),
    /// Three levels down
    Three(&'static str, &'static str, &'static str),
}

impl FieldPath {
    /// Keys to descend through, outermost first
    pub fn keys(&self) -> Vec<&'static str> {
        match *self {
            FieldPath::Root => Vec::new(),
            FieldPath::One(a) => vec![a],
            FieldPath::Two(a, b) => vec![a, b],
            FieldPath::Three(a, b, c) => vec![a, b, c],
        }
    }
}

/// Unwrap a payload along `path`.
///
/// Each step descends only when the key exists with a non-null value;
/// otherwise the current container is kept. Never fails.
pub fn extract(body: Value, path: FieldPath) -> Value {
    path.keys().into_iter().fold(body, descend)
}

fn descend(current: Value, key: &str) -> Value {
    match current {
        Value::Object(mut map) => {
            if map.get(key).map_or(false, |v| !v.is_null()) {
                map.remove(key).unwrap_or(Value::Null)
            } else {
                Value::Object(map)
            }
        }
        other => other,
    }
}

/// Interpret a response envelope, returning the payload at `path` on success
pub fn handle_response(
    status: StatusCode,
    body: Value,
    resource: Resource,
    path: FieldPath,
) -> RocketChatResult<Value> {
    if status == StatusCode::OK && is_success(&body) {
        return Ok(extract(body, path));
    }

    Err(RocketChatError::action(resource, failure_message(&body)))
}

fn is_success(body: &Value) -> bool {
    if body.get("success").map_or(false, truthy) {
        return true;
    }
    body.get("status").and_then(Value::as_str) == Some(STATUS_SUCCESS)
}

/// Message for a failed envelope, falling back to the generic text
pub fn failure_message(body: &Value) -> String {
    let message = if body.get("status").and_then(Value::as_str) == Some(STATUS_ERROR) {
        body.get("message")
    } else if body.get("success").map_or(false, is_false) {
        body.get("error")
    } else {
        None
    };

    message
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(GENERIC_FAILURE_MESSAGE)
        .to_string()
}

/// Loose truthiness: `false`, `0`, `""`, `"0"`, `null` and empty arrays are false
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

// A present `success` that compares loosely equal to false; null counts as absent
fn is_false(value: &Value) -> bool {
    !value.is_null() && !truthy(value)
}
