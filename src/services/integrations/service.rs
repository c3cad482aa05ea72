//! Integrations service implementation.

use crate::client::{ApiClient, FieldPath, Query};
use crate::errors::{Resource, RocketChatError, RocketChatResult};
use crate::models::{Entity, Integration};
use crate::services::require;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

/// Fields `integrations.create` refuses to work without
const REQUIRED_FIELDS: &[&str] = &["type", "name", "enabled", "username", "urls", "scriptEnabled"];

/// Trait for integrations service operations
#[async_trait]
pub trait IntegrationsServiceTrait: Send + Sync {
    /// Create a webhook integration
    async fn create(&self, integration: &Integration) -> RocketChatResult<Integration>;

    /// Remove an integration; returns the removed record
    async fn remove(&self, integration_id: &str, integration_type: &str) -> RocketChatResult<Integration>;

    /// All integrations, with the paging envelope
    async fn list(&self) -> RocketChatResult<Value>;
}

/// Integrations service implementation
#[derive(Clone)]
pub struct IntegrationsService {
    pub(crate) api: Arc<ApiClient>,
}

impl IntegrationsService {
    /// Create a new integrations service
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl IntegrationsServiceTrait for IntegrationsService {
    #[instrument(skip(self, integration), fields(name = ?integration.name))]
    async fn create(&self, integration: &Integration) -> RocketChatResult<Integration> {
        let body = integration.fillable_data();
        if REQUIRED_FIELDS.iter().any(|field| !body.contains_key(*field)) {
            return Err(RocketChatError::bad_parameter(
                Resource::Integration,
                "Missing required parameter.",
            ));
        }

        let data = self
            .api
            .post(
                "integrations.create",
                Value::Object(body),
                Resource::Integration,
                FieldPath::One("integration"),
            )
            .await?;
        Integration::from_api(data)
    }

    #[instrument(skip(self))]
    async fn remove(&self, integration_id: &str, integration_type: &str) -> RocketChatResult<Integration> {
        require(Resource::Integration, integration_id, "Integration ID not specified.")?;
        require(Resource::Integration, integration_type, "Integration type not specified.")?;

        let data = self
            .api
            .post(
                "integrations.remove",
                json!({ "integrationId": integration_id, "type": integration_type }),
                Resource::Integration,
                FieldPath::One("integration"),
            )
            .await?;
        Integration::from_api(data)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RocketChatResult<Value> {
        self.api
            .get("integrations.list", Query::new(), Resource::Integration, FieldPath::Root)
            .await
    }
}

impl std::fmt::Debug for IntegrationsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntegrationsService").finish_non_exhaustive()
    }
}
