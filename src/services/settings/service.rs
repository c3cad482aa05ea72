//! Settings service implementation.

use crate::client::{ApiClient, FieldPath, Query};
use crate::errors::{Resource, RocketChatResult};
use crate::models::Setting;
use crate::services::require;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

/// Trait for settings service operations
#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    /// Read a setting
    async fn get(&self, id: &str) -> RocketChatResult<Setting>;

    /// Write a setting's value; an unset value is sent as `null`
    async fn update(&self, setting: &Setting) -> RocketChatResult<Value>;
}

/// Settings service implementation
#[derive(Clone)]
pub struct SettingsService {
    pub(crate) api: Arc<ApiClient>,
}

impl SettingsService {
    /// Create a new settings service
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> RocketChatResult<Setting> {
        require(Resource::Setting, id, "setting ID not specified")?;
        let data = self
            .api
            .get(&format!("settings/{}", id), Query::new(), Resource::Setting, FieldPath::Root)
            .await?;
        Setting::from_api(data)
    }

    #[instrument(skip(self, setting), fields(id = %setting.id()))]
    async fn update(&self, setting: &Setting) -> RocketChatResult<Value> {
        require(Resource::Setting, setting.id(), "setting ID is not specified")?;
        let value = setting.value.clone().unwrap_or(Value::Null);
        self.api
            .post(
                &format!("settings/{}", setting.id()),
                json!({ "value": value }),
                Resource::Setting,
                FieldPath::Root,
            )
            .await
    }
}

impl std::fmt::Debug for SettingsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsService").finish_non_exhaustive()
    }
}
