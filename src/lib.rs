//! Rocket.Chat API Client
//!
//! Typed client for the Rocket.Chat REST API with:
//! - One service per resource group (channels, groups, IMs, chat, teams,
//!   users, integrations, livechat, settings)
//! - Admin session bootstrap from a cached token or username/password
//! - Lenient response envelope handling across both Rocket.Chat conventions
//! - Structured tracing with secret redaction
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rocketchat_client::{Paginate, RocketChatClient, RocketChatConfig, RoomsServiceTrait};
//! use rocketchat_client::models::Room;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads RC_INSTANCE, RC_ADMIN_ID/RC_ADMIN_TOKEN or RC_ADMIN_USERNAME/RC_ADMIN_PASS
//!     let client = RocketChatClient::connect(RocketChatConfig::from_env()?).await?;
//!
//!     let room = client
//!         .channels()
//!         .create(&Room::new().with_name("general-updates"))
//!         .await?;
//!
//!     let history = client.channels().take(20).history(room.id().unwrap_or_default(), Default::default()).await?;
//!     println!("{history}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod transport;

// Services
pub mod services;

// Observability
pub mod observability;

// Testing utilities
pub mod fixtures;
pub mod mocks;

// Tests
#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use auth::{Session, UserAuthToken};
pub use client::{ApiClient, RocketChatApi, RocketChatClient};
pub use config::{RocketChatConfig, RocketChatConfigBuilder};
pub use errors::{Resource, RocketChatError, RocketChatResult};
pub use services::{
    ChatServiceTrait, ImServiceTrait, IntegrationsServiceTrait, LivechatServiceTrait, Paginate,
    RoomsServiceTrait, ServerServiceTrait, SettingsServiceTrait, TeamsServiceTrait,
    UsersServiceTrait,
};

/// Default Rocket.Chat instance URL
pub const DEFAULT_INSTANCE: &str = "http://localhost:3000";

/// Default REST API root, appended to the instance URL
pub const DEFAULT_API_ROOT: &str = "/api/v1/";

/// Default admin username used for password bootstrap
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Create a Rocket.Chat client with the given configuration, without logging in
pub fn create_client(config: RocketChatConfig) -> RocketChatResult<RocketChatClient> {
    RocketChatClient::new(config)
}

/// Create a Rocket.Chat client from environment variables and run the admin bootstrap
///
/// Reads:
/// - `RC_INSTANCE` - Instance URL (e.g. `https://chat.example.com`)
/// - `RC_API_ROOT` - REST API root (default `/api/v1/`)
/// - `RC_ADMIN_ID` / `RC_ADMIN_TOKEN` - Pre-provisioned admin session
/// - `RC_ADMIN_USERNAME` / `RC_ADMIN_PASS` - Admin credentials used when no token is set
/// - `RC_ADMIN_LOGIN` - Set to `false` to skip the admin bootstrap
/// - `RC_TIMEOUT` / `RC_CONNECT_TIMEOUT` - Transport timeouts in seconds
pub async fn create_client_from_env() -> RocketChatResult<RocketChatClient> {
    let config = RocketChatConfig::from_env()?;
    RocketChatClient::connect(config).await
}
