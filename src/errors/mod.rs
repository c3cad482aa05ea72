//! Error types for the Rocket.Chat client.
//!
//! Four kinds reach callers: invalid credentials and bad parameters are
//! raised locally before any I/O, resource action failures come from the
//! response envelope, and network errors come from the transport.

use std::fmt;
use thiserror::Error;

/// Result type for Rocket.Chat operations
pub type RocketChatResult<T> = Result<T, RocketChatError>;

/// Generic message used when a failure body carries nothing usable
pub const GENERIC_FAILURE_MESSAGE: &str = "something went wrong";

/// Resource group an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Server-level calls (login, server info)
    RocketChat,
    /// Public channels
    Channel,
    /// Private groups
    Group,
    /// Direct messages
    Im,
    /// Chat messages
    Chat,
    /// Teams
    Team,
    /// Users
    User,
    /// Integrations (webhooks)
    Integration,
    /// Livechat / omnichannel
    Livechat,
    /// Server settings
    Setting,
}

impl Resource {
    /// Short lowercase name of the resource group
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RocketChat => "rocketchat",
            Self::Channel => "channel",
            Self::Group => "group",
            Self::Im => "im",
            Self::Chat => "chat",
            Self::Team => "team",
            Self::User => "user",
            Self::Integration => "integration",
            Self::Livechat => "livechat",
            Self::Setting => "setting",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root error type for the Rocket.Chat client
#[derive(Error, Debug)]
pub enum RocketChatError {
    /// Username or password missing before a login attempt
    #[error("Invalid credentials: username and password are required")]
    InvalidCredentials,

    /// Caller-supplied argument rejected before any request was sent
    #[error("{resource} bad parameter: {message}")]
    BadParameter {
        /// Resource group of the rejected call
        resource: Resource,
        /// Description of the rejected argument
        message: String,
    },

    /// Server reported a failure in the response envelope
    #[error("{resource} action failed: {message}")]
    Action {
        /// Resource group of the failed call
        resource: Resource,
        /// Message extracted from the response body
        message: String,
    },

    /// Transport-level failure, the server was not reached or did not answer
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Successful payload that could not be shaped into a typed model
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),
}

impl RocketChatError {
    /// Create a bad parameter error for a resource
    pub fn bad_parameter(resource: Resource, message: impl Into<String>) -> Self {
        Self::BadParameter {
            resource,
            message: message.into(),
        }
    }

    /// Create a resource action error
    pub fn action(resource: Resource, message: impl Into<String>) -> Self {
        Self::Action {
            resource,
            message: message.into(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "RC_INVALID_CREDENTIALS",
            Self::BadParameter { .. } => "RC_BAD_PARAMETER",
            Self::Action { .. } => "RC_ACTION",
            Self::Network(_) => "RC_NETWORK",
            Self::Configuration(_) => "RC_CONFIG",
            Self::Response(_) => "RC_RESPONSE",
        }
    }

    /// Resource group the error belongs to, if any
    pub fn resource(&self) -> Option<Resource> {
        match self {
            Self::BadParameter { resource, .. } | Self::Action { resource, .. } => Some(*resource),
            _ => None,
        }
    }

    /// Bare message for parameter and action errors
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::BadParameter { message, .. } | Self::Action { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Whether the server could not be reached, as opposed to the server saying no
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Instance URL could not be parsed
    #[error("Invalid instance URL: {0}")]
    InvalidUrl(String),

    /// Admin bootstrap requested without usable credentials
    #[error("Admin login requires RC_ADMIN_ID/RC_ADMIN_TOKEN or an admin password")]
    MissingAdminCredentials,

    /// Header name or value rejected by the HTTP layer
    #[error("Invalid header {name}")]
    InvalidHeader {
        /// Header name
        name: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(String),
}

/// Network errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Connection failed
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Error message
        message: String,
    },

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// DNS resolution failed
    #[error("DNS resolution failed: {message}")]
    DnsResolutionFailed {
        /// Error message
        message: String,
    },

    /// TLS error
    #[error("TLS error: {message}")]
    TlsError {
        /// Error message
        message: String,
    },

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            NetworkError::Timeout
        } else if err.is_connect() {
            let lowered = format!("{:?}", err).to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                NetworkError::DnsResolutionFailed { message }
            } else if lowered.contains("tls") || lowered.contains("certificate") {
                NetworkError::TlsError { message }
            } else {
                NetworkError::ConnectionFailed { message }
            }
        } else {
            NetworkError::Http(message)
        }
    }
}

impl From<reqwest::Error> for RocketChatError {
    fn from(err: reqwest::Error) -> Self {
        RocketChatError::Network(NetworkError::from(err))
    }
}

/// Response shaping errors
#[derive(Error, Debug)]
pub enum ResponseError {
    /// JSON deserialization error
    #[error("Deserialization error: {message}")]
    DeserializationError {
        /// Error message
        message: String,
    },

    /// Payload lacks a field the typed model needs
    #[error("Missing field '{field}' in {resource} response")]
    MissingField {
        /// Resource group
        resource: Resource,
        /// Field name
        field: &'static str,
    },
}

impl From<serde_json::Error> for ResponseError {
    fn from(err: serde_json::Error) -> Self {
        ResponseError::DeserializationError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(RocketChatError::InvalidCredentials.error_code(), "RC_INVALID_CREDENTIALS");
        assert_eq!(
            RocketChatError::bad_parameter(Resource::Channel, "Room ID not specified.").error_code(),
            "RC_BAD_PARAMETER"
        );
        assert_eq!(
            RocketChatError::Network(NetworkError::Timeout).error_code(),
            "RC_NETWORK"
        );
    }

    #[test]
    fn test_action_error_display_and_accessors() {
        let err = RocketChatError::action(Resource::Group, "not allowed");
        assert_eq!(err.to_string(), "group action failed: not allowed");
        assert_eq!(err.message(), Some("not allowed"));
        assert_eq!(err.resource(), Some(Resource::Group));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_network_error_is_transport() {
        let err: RocketChatError = NetworkError::ConnectionFailed {
            message: "refused".to_string(),
        }
        .into();
        assert!(err.is_transport());
        assert_eq!(err.resource(), None);
        assert_eq!(err.message(), None);
    }
}
