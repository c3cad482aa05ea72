//! Configuration management for the Rocket.Chat client.
//!
//! Supports configuration via:
//! - Explicit values
//! - Environment variables (`RC_*`)
//! - Builder pattern

use crate::errors::{ConfigurationError, RocketChatError, RocketChatResult};
use crate::observability::Redacted;
use http::HeaderMap;
use secrecy::SecretString;
use std::time::Duration;
use url::Url;

/// Pre-provisioned admin session (user id + personal access token)
#[derive(Clone)]
pub struct AdminToken {
    /// Admin user id, sent as `X-User-Id`
    pub user_id: String,
    /// Admin auth token, sent as `X-Auth-Token`
    pub token: SecretString,
}

/// Admin credentials used when no token is configured
#[derive(Clone)]
pub struct AdminCredentials {
    /// Admin username
    pub username: String,
    /// Admin password
    pub password: Option<SecretString>,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: crate::DEFAULT_ADMIN_USERNAME.to_string(),
            password: None,
        }
    }
}

/// Configuration for the Rocket.Chat client
#[derive(Clone)]
pub struct RocketChatConfig {
    /// Instance root URL
    pub instance: Url,
    /// REST API root appended to the instance URL
    pub api_root: String,
    /// Cached admin session, adopted without a network call
    pub(crate) admin_token: Option<AdminToken>,
    /// Admin username/password fallback
    pub(crate) admin_credentials: AdminCredentials,
    /// Log in as admin when the client is connected
    pub admin_login: bool,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Headers added to every request
    pub default_headers: HeaderMap,
}

impl std::fmt::Debug for RocketChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RocketChatConfig")
            .field("instance", &self.instance.as_str())
            .field("api_root", &self.api_root)
            .field(
                "admin_user_id",
                &self.admin_token.as_ref().map(|t| t.user_id.as_str()),
            )
            .field("admin_username", &self.admin_credentials.username)
            .field(
                "admin_password",
                &self.admin_credentials.password.as_ref().map(Redacted::new),
            )
            .field("admin_login", &self.admin_login)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl Default for RocketChatConfig {
    fn default() -> Self {
        Self {
            instance: Url::parse(crate::DEFAULT_INSTANCE).expect("default instance URL is valid"),
            api_root: crate::DEFAULT_API_ROOT.to_string(),
            admin_token: None,
            admin_credentials: AdminCredentials::default(),
            admin_login: true,
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(crate::DEFAULT_CONNECT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
        }
    }
}

impl RocketChatConfig {
    /// Create a new configuration builder
    pub fn builder() -> RocketChatConfigBuilder {
        RocketChatConfigBuilder::new()
    }

    /// Create configuration from environment variables
    pub fn from_env() -> RocketChatResult<Self> {
        let mut builder = RocketChatConfigBuilder::new();

        if let Ok(instance) = std::env::var("RC_INSTANCE") {
            builder = builder.instance(&instance)?;
        }

        if let Ok(root) = std::env::var("RC_API_ROOT") {
            builder = builder.api_root(&root);
        }

        // An id without a token (or the reverse) is ignored, like an unset pair
        let admin_id = std::env::var("RC_ADMIN_ID").unwrap_or_default();
        let admin_token = std::env::var("RC_ADMIN_TOKEN").unwrap_or_default();
        if !admin_id.is_empty() && !admin_token.is_empty() {
            builder = builder.admin_token(&admin_id, &admin_token);
        }

        if let Ok(username) = std::env::var("RC_ADMIN_USERNAME") {
            builder = builder.admin_username(&username);
        }

        if let Ok(password) = std::env::var("RC_ADMIN_PASS") {
            if !password.is_empty() {
                builder = builder.admin_password(&password);
            }
        }

        if let Ok(flag) = std::env::var("RC_ADMIN_LOGIN") {
            let enabled = parse_flag(&flag).ok_or_else(|| {
                ConfigurationError::EnvVar(format!("RC_ADMIN_LOGIN: expected a boolean, got '{}'", flag))
            })?;
            builder = builder.admin_login(enabled);
        }

        if let Ok(timeout) = std::env::var("RC_TIMEOUT") {
            builder = builder.timeout(parse_secs("RC_TIMEOUT", &timeout)?);
        }

        if let Ok(timeout) = std::env::var("RC_CONNECT_TIMEOUT") {
            builder = builder.connect_timeout(parse_secs("RC_CONNECT_TIMEOUT", &timeout)?);
        }

        builder.build()
    }

    /// Cached admin session, if configured
    pub fn admin_token(&self) -> Option<&AdminToken> {
        self.admin_token.as_ref()
    }

    /// Admin username/password fallback
    pub fn admin_credentials(&self) -> &AdminCredentials {
        &self.admin_credentials
    }

    /// Instance URL joined with the API root, without a trailing slash
    pub fn base_url(&self) -> String {
        let instance = self.instance.as_str().trim_end_matches('/');
        let root = self.api_root.trim_matches('/');
        if root.is_empty() {
            instance.to_string()
        } else {
            format!("{}/{}", instance, root)
        }
    }

    /// Build the full URL for an endpoint under the API root
    pub fn build_url(&self, endpoint: &str) -> String {
        join_url(&self.base_url(), endpoint)
    }

    /// Build a URL relative to the bare instance, outside the API root
    pub fn instance_url(&self, path: &str) -> String {
        join_url(self.instance.as_str(), path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> RocketChatResult<()> {
        if !matches!(self.instance.scheme(), "http" | "https") {
            return Err(RocketChatError::Configuration(ConfigurationError::InvalidUrl(
                format!("unsupported scheme '{}'", self.instance.scheme()),
            )));
        }

        if self.admin_login
            && self.admin_token.is_none()
            && self.admin_credentials.password.is_none()
        {
            return Err(RocketChatError::Configuration(
                ConfigurationError::MissingAdminCredentials,
            ));
        }

        Ok(())
    }
}

/// Join two URL fragments with exactly one slash
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn parse_secs(var: &str, value: &str) -> Result<Duration, ConfigurationError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| {
            ConfigurationError::EnvVar(format!("{}: expected whole seconds, got '{}'", var, value))
        })
}

/// Builder for RocketChatConfig
#[derive(Default)]
pub struct RocketChatConfigBuilder {
    config: RocketChatConfig,
}

impl RocketChatConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: RocketChatConfig::default(),
        }
    }

    /// Set the instance URL
    pub fn instance(mut self, url: &str) -> Result<Self, ConfigurationError> {
        self.config.instance =
            Url::parse(url).map_err(|e| ConfigurationError::InvalidUrl(format!("{}: {}", url, e)))?;
        Ok(self)
    }

    /// Set the REST API root
    pub fn api_root(mut self, root: &str) -> Self {
        self.config.api_root = root.to_string();
        self
    }

    /// Use a pre-provisioned admin session
    pub fn admin_token(mut self, user_id: &str, token: &str) -> Self {
        self.config.admin_token = Some(AdminToken {
            user_id: user_id.to_string(),
            token: SecretString::new(token.to_string()),
        });
        self
    }

    /// Set the admin username
    pub fn admin_username(mut self, username: &str) -> Self {
        self.config.admin_credentials.username = username.to_string();
        self
    }

    /// Set the admin password
    pub fn admin_password(mut self, password: &str) -> Self {
        self.config.admin_credentials.password = Some(SecretString::new(password.to_string()));
        self
    }

    /// Enable or disable the admin bootstrap on connect
    pub fn admin_login(mut self, enabled: bool) -> Self {
        self.config.admin_login = enabled;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Add a default header
    pub fn default_header(mut self, name: &str, value: &str) -> Self {
        if let Ok(header_name) = name.parse::<http::header::HeaderName>() {
            if let Ok(header_value) = value.parse::<http::header::HeaderValue>() {
                self.config.default_headers.insert(header_name, header_value);
            }
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> RocketChatResult<RocketChatConfig> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Build the configuration without validation (for testing)
    pub fn build_unchecked(self) -> RocketChatConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("https://chat.example.com", "/api/v1/", "https://chat.example.com/api/v1" ; "plain")]
    #[test_case("https://chat.example.com/", "api/v1", "https://chat.example.com/api/v1" ; "slashes trimmed")]
    #[test_case("https://chat.example.com/rc/", "//api/v1//", "https://chat.example.com/rc/api/v1" ; "sub path")]
    #[test_case("https://chat.example.com", "", "https://chat.example.com" ; "empty root")]
    fn test_base_url(instance: &str, root: &str, expected: &str) {
        let config = RocketChatConfigBuilder::new()
            .instance(instance)
            .unwrap()
            .api_root(root)
            .build_unchecked();

        assert_eq!(config.base_url(), expected);
    }

    #[test]
    fn test_build_url_single_slash() {
        let config = RocketChatConfigBuilder::new()
            .instance("https://chat.example.com")
            .unwrap()
            .build_unchecked();

        assert_eq!(
            config.build_url("/channels.list"),
            "https://chat.example.com/api/v1/channels.list"
        );
        assert_eq!(
            config.build_url("users.info"),
            "https://chat.example.com/api/v1/users.info"
        );
        assert_eq!(config.instance_url("/api/info"), "https://chat.example.com/api/info");
    }

    #[test]
    fn test_validation_requires_admin_credentials() {
        let result = RocketChatConfigBuilder::new().build();
        assert!(matches!(
            result,
            Err(RocketChatError::Configuration(ConfigurationError::MissingAdminCredentials))
        ));

        assert!(RocketChatConfigBuilder::new().admin_login(false).build().is_ok());
        assert!(RocketChatConfigBuilder::new().admin_password("secret").build().is_ok());
        assert!(RocketChatConfigBuilder::new()
            .admin_token("admin-id", "admin-token")
            .build()
            .is_ok());
    }

    #[test]
    fn test_validation_rejects_non_http_scheme() {
        let result = RocketChatConfigBuilder::new()
            .instance("ftp://chat.example.com")
            .unwrap()
            .admin_login(false)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = RocketChatConfigBuilder::new()
            .admin_token("admin-id", "very-secret-token")
            .admin_password("hunter2")
            .build_unchecked();

        let rendered = format!("{:?}", config);
        assert!(rendered.contains("admin-id"));
        assert!(!rendered.contains("very-secret-token"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_parse_secs() {
        assert_eq!(parse_secs("RC_TIMEOUT", " 45 ").unwrap(), Duration::from_secs(45));

        let err = parse_secs("RC_CONNECT_TIMEOUT", "10s").unwrap_err();
        assert!(matches!(
            &err,
            ConfigurationError::EnvVar(message) if message.starts_with("RC_CONNECT_TIMEOUT")
        ));
        assert!(parse_secs("RC_TIMEOUT", "").is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
