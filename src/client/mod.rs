//! Rocket.Chat client implementation.
//!
//! Provides the main entry point for interacting with the Rocket.Chat REST API.

mod api;
mod query;
pub mod response;

pub use api::ApiClient;
pub use query::{Query, Sort};
pub use response::{extract, handle_response, FieldPath};

use crate::auth::{Session, UserAuthToken};
use crate::config::RocketChatConfig;
use crate::errors::RocketChatResult;
use crate::services::{
    ChatService, ChatServiceTrait, ImService, ImServiceTrait, IntegrationsService,
    IntegrationsServiceTrait, LivechatService, LivechatServiceTrait, Paginate, RoomKind,
    RoomsService, RoomsServiceTrait, ServerService, ServerServiceTrait, SettingsService,
    SettingsServiceTrait, TeamsService, TeamsServiceTrait, UsersService, UsersServiceTrait,
};
use crate::transport::{HttpTransport, ReqwestTransport};
use std::sync::Arc;

/// Trait defining the Rocket.Chat client interface
pub trait RocketChatApi: Send + Sync {
    /// Get the configuration
    fn config(&self) -> &RocketChatConfig;

    /// Get the session
    fn session(&self) -> &Session;

    /// Get the channels service
    fn channels(&self) -> &dyn RoomsServiceTrait;

    /// Get the private groups service
    fn groups(&self) -> &dyn RoomsServiceTrait;

    /// Get the direct messages service
    fn im(&self) -> &dyn ImServiceTrait;

    /// Get the chat service
    fn chat(&self) -> &dyn ChatServiceTrait;

    /// Get the teams service
    fn teams(&self) -> &dyn TeamsServiceTrait;

    /// Get the users service
    fn users(&self) -> &dyn UsersServiceTrait;

    /// Get the integrations service
    fn integrations(&self) -> &dyn IntegrationsServiceTrait;

    /// Get the livechat service
    fn livechat(&self) -> &dyn LivechatServiceTrait;

    /// Get the settings service
    fn settings(&self) -> &dyn SettingsServiceTrait;

    /// Get the server info service
    fn server(&self) -> &dyn ServerServiceTrait;
}

/// Main Rocket.Chat client
pub struct RocketChatClient {
    config: Arc<RocketChatConfig>,
    api: Arc<ApiClient>,
    // Service instances
    channels_service: RoomsService,
    groups_service: RoomsService,
    im_service: ImService,
    chat_service: ChatService,
    teams_service: TeamsService,
    users_service: UsersService,
    integrations_service: IntegrationsService,
    livechat_service: LivechatService,
    settings_service: SettingsService,
    server_service: ServerService,
}

impl RocketChatClient {
    /// Create a new client without logging in
    pub fn new(config: RocketChatConfig) -> RocketChatResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(config.timeout, config.connect_timeout)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client with a custom transport (for testing)
    pub fn with_transport(config: RocketChatConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let config = Arc::new(config);
        let session = Arc::new(Session::new(config.default_headers.clone()));
        let api = Arc::new(ApiClient::new(config.clone(), session, transport));

        Self {
            channels_service: RoomsService::new(api.clone(), RoomKind::Channel),
            groups_service: RoomsService::new(api.clone(), RoomKind::Group),
            im_service: ImService::new(api.clone()),
            chat_service: ChatService::new(api.clone()),
            teams_service: TeamsService::new(api.clone()),
            users_service: UsersService::new(api.clone()),
            integrations_service: IntegrationsService::new(api.clone()),
            livechat_service: LivechatService::new(api.clone()),
            settings_service: SettingsService::new(api.clone()),
            server_service: ServerService::new(api.clone()),
            config,
            api,
        }
    }

    /// Create a client and run the admin bootstrap when `admin_login` is set
    pub async fn connect(config: RocketChatConfig) -> RocketChatResult<Self> {
        let client = Self::new(config)?;
        client.bootstrap().await?;
        Ok(client)
    }

    /// Like [`RocketChatClient::connect`] with a custom transport
    pub async fn connect_with_transport(
        config: RocketChatConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> RocketChatResult<Self> {
        let client = Self::with_transport(config, transport);
        client.bootstrap().await?;
        Ok(client)
    }

    async fn bootstrap(&self) -> RocketChatResult<()> {
        if self.config.admin_login {
            self.api.admin_login().await?;
        }
        Ok(())
    }

    /// Adopt the configured admin session
    pub async fn admin_login(&self) -> RocketChatResult<()> {
        self.api.admin_login().await
    }

    /// Exchange credentials for a token pair without touching the session
    pub async fn auth_token(&self, username: &str, password: &str) -> RocketChatResult<UserAuthToken> {
        self.api.auth_token(username, password).await
    }

    /// Replace the auth headers used for subsequent requests
    pub fn set_auth(&self, user_id: impl Into<String>, token: impl Into<String>) {
        self.api.set_auth(user_id, token);
    }

    /// Drop the auth headers
    pub fn clear_auth(&self) {
        self.api.session().clear_auth();
    }

    /// Current auth header pair
    pub fn auth(&self) -> Option<UserAuthToken> {
        self.api.session().auth()
    }

    /// Get the configuration
    pub fn config(&self) -> &RocketChatConfig {
        &self.config
    }

    /// Get the session
    pub fn session(&self) -> &Session {
        self.api.session()
    }

    /// Get the channels service
    pub fn channels(&self) -> &RoomsService {
        &self.channels_service
    }

    /// Get the private groups service
    pub fn groups(&self) -> &RoomsService {
        &self.groups_service
    }

    /// Get the direct messages service
    pub fn im(&self) -> &ImService {
        &self.im_service
    }

    /// Get the chat service
    pub fn chat(&self) -> &ChatService {
        &self.chat_service
    }

    /// Get the teams service
    pub fn teams(&self) -> &TeamsService {
        &self.teams_service
    }

    /// Get the users service
    pub fn users(&self) -> &UsersService {
        &self.users_service
    }

    /// Get the integrations service
    pub fn integrations(&self) -> &IntegrationsService {
        &self.integrations_service
    }

    /// Get the livechat service
    pub fn livechat(&self) -> &LivechatService {
        &self.livechat_service
    }

    /// Get the settings service
    pub fn settings(&self) -> &SettingsService {
        &self.settings_service
    }

    /// Get the server info service
    pub fn server(&self) -> &ServerService {
        &self.server_service
    }
}

impl RocketChatApi for RocketChatClient {
    fn config(&self) -> &RocketChatConfig {
        &self.config
    }

    fn session(&self) -> &Session {
        self.api.session()
    }

    fn channels(&self) -> &dyn RoomsServiceTrait {
        &self.channels_service
    }

    fn groups(&self) -> &dyn RoomsServiceTrait {
        &self.groups_service
    }

    fn im(&self) -> &dyn ImServiceTrait {
        &self.im_service
    }

    fn chat(&self) -> &dyn ChatServiceTrait {
        &self.chat_service
    }

    fn teams(&self) -> &dyn TeamsServiceTrait {
        &self.teams_service
    }

    fn users(&self) -> &dyn UsersServiceTrait {
        &self.users_service
    }

    fn integrations(&self) -> &dyn IntegrationsServiceTrait {
        &self.integrations_service
    }

    fn livechat(&self) -> &dyn LivechatServiceTrait {
        &self.livechat_service
    }

    fn settings(&self) -> &dyn SettingsServiceTrait {
        &self.settings_service
    }

    fn server(&self) -> &dyn ServerServiceTrait {
        &self.server_service
    }
}

impl Paginate for RocketChatClient {
    fn api(&self) -> &ApiClient {
        &self.api
    }
}

impl std::fmt::Debug for RocketChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RocketChatClient")
            .field("config", &self.config)
            .field("authenticated", &self.api.session().is_authenticated())
            .finish()
    }
}
