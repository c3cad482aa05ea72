//! Logging utilities with sensitive data redaction.

use serde_json::Value;
use std::fmt;

const REDACTED: &str = "[REDACTED]";

/// Keys whose values never reach the logs, in query strings or JSON bodies
const SENSITIVE_KEYS: &[&str] = &[
    "authToken",
    "x-auth-token",
    "token",
    "password",
    "pass",
    "newPassword",
    "secret",
];

/// Wrapper for sensitive data that redacts on display
#[derive(Clone)]
pub struct Redacted<T>(T);

impl<T> Redacted<T> {
    /// Create a new redacted value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Get the inner value
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T> fmt::Debug for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

fn is_sensitive(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|s| key.eq_ignore_ascii_case(s))
}

/// Redact a token, keeping a short prefix to tell sessions apart
pub fn redact_token(token: &str) -> String {
    match token.char_indices().nth(4) {
        Some((cut, _)) if token.len() > 12 => format!("{}...{}", &token[..cut], REDACTED),
        _ => REDACTED.to_string(),
    }
}

/// Redact a URL, hiding credentials in query parameters
pub fn redact_url(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let pairs: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if is_sensitive(key) => format!("{}={}", key, REDACTED),
            _ => pair.to_string(),
        })
        .collect();

    format!("{}?{}", base, pairs.join("&"))
}

/// Render a JSON body for logging with credential values masked at any depth
pub fn redact_body(body: &Value) -> String {
    redact_value(body).to_string()
}

fn redact_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, v)| {
                    let v = if is_sensitive(key) && !v.is_null() {
                        Value::String(REDACTED.to_string())
                    } else {
                        redact_value(v)
                    };
                    (key.clone(), v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_value).collect()),
        other => other.clone(),
    }
}
