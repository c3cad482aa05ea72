//! Server service implementation.

use super::*;
use crate::client::{ApiClient, FieldPath};
use crate::errors::{Resource, RocketChatResult};
use crate::models::decode;
use async_trait::async_trait;
use http::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

const INFO_PATH: &str = "/api/info";

/// Trait for server service operations
#[async_trait]
pub trait ServerServiceTrait: Send + Sync {
    /// Server information.
    ///
    /// Authenticated callers get an `info` object with build details,
    /// anonymous ones only the top-level `version`; both shapes are accepted.
    async fn info(&self) -> RocketChatResult<ServerInfo>;

    /// Release version reported by the server
    async fn version(&self) -> RocketChatResult<Option<String>>;
}

/// Server service implementation
#[derive(Clone)]
pub struct ServerService {
    api: Arc<ApiClient>,
}

impl ServerService {
    /// Create a new server service
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ServerServiceTrait for ServerService {
    #[instrument(skip(self))]
    async fn info(&self) -> RocketChatResult<ServerInfo> {
        let url = self.api.config().instance_url(INFO_PATH);
        let mut body = self
            .api
            .send_to(Method::GET, url, None, Resource::RocketChat, FieldPath::Root)
            .await?;

        let nested = body.get("info").map_or(false, Value::is_object);
        let info = if nested {
            body["info"].take()
        } else {
            if let Some(map) = body.as_object_mut() {
                map.remove("success");
            }
            body
        };
        decode(info)
    }

    async fn version(&self) -> RocketChatResult<Option<String>> {
        Ok(self.info().await?.version)
    }
}

impl std::fmt::Debug for ServerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerService").finish_non_exhaustive()
    }
}
