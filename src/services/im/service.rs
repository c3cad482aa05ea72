//! Direct message service implementation.

use crate::client::{ApiClient, FieldPath, Query};
use crate::errors::{Resource, RocketChatResult};
use crate::services::require;
use crate::services::rooms::HistoryQuery;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

const MISSING_IM_ID: &str = "Im ID not specified.";

/// Trait for direct message service operations
#[async_trait]
pub trait ImServiceTrait: Send + Sync {
    /// Hide the conversation from the caller's list
    async fn close(&self, room_id: &str) -> RocketChatResult<Value>;

    /// Message history
    async fn history(&self, room_id: &str, filter: HistoryQuery) -> RocketChatResult<Value>;

    /// Conversations of the session user
    async fn list(&self) -> RocketChatResult<Value>;

    /// Every conversation on the server; needs `view-room-administration`
    async fn list_everyone(&self) -> RocketChatResult<Value>;

    /// Messages of any conversation; needs `view-room-administration`
    async fn others_messages(&self, room_id: &str) -> RocketChatResult<Value>;

    /// Show the conversation in the caller's list again
    async fn open(&self, room_id: &str) -> RocketChatResult<Value>;

    /// Set the conversation topic
    async fn set_topic(&self, room_id: &str, topic: &str) -> RocketChatResult<Value>;
}

/// Direct message service implementation
#[derive(Clone)]
pub struct ImService {
    pub(crate) api: Arc<ApiClient>,
}

impl ImService {
    /// Create a new direct message service
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ImServiceTrait for ImService {
    #[instrument(skip(self))]
    async fn close(&self, room_id: &str) -> RocketChatResult<Value> {
        require(Resource::Im, room_id, MISSING_IM_ID)?;
        self.api
            .post("im.close", json!({ "roomId": room_id }), Resource::Im, FieldPath::Root)
            .await
    }

    #[instrument(skip(self, filter))]
    async fn history(&self, room_id: &str, filter: HistoryQuery) -> RocketChatResult<Value> {
        require(Resource::Im, room_id, MISSING_IM_ID)?;
        self.api
            .get(
                "im.history",
                filter.into_query(room_id),
                Resource::Im,
                FieldPath::One("messages"),
            )
            .await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RocketChatResult<Value> {
        self.api
            .get("im.list", Query::new(), Resource::Im, FieldPath::One("ims"))
            .await
    }

    #[instrument(skip(self))]
    async fn list_everyone(&self) -> RocketChatResult<Value> {
        self.api
            .get("im.list.everyone", Query::new(), Resource::Im, FieldPath::One("ims"))
            .await
    }

    #[instrument(skip(self))]
    async fn others_messages(&self, room_id: &str) -> RocketChatResult<Value> {
        require(Resource::Im, room_id, MISSING_IM_ID)?;
        self.api
            .get(
                "im.messages.others",
                Query::new().with("roomId", room_id),
                Resource::Im,
                FieldPath::One("messages"),
            )
            .await
    }

    #[instrument(skip(self))]
    async fn open(&self, room_id: &str) -> RocketChatResult<Value> {
        require(Resource::Im, room_id, MISSING_IM_ID)?;
        self.api
            .post("im.open", json!({ "roomId": room_id }), Resource::Im, FieldPath::Root)
            .await
    }

    #[instrument(skip(self))]
    async fn set_topic(&self, room_id: &str, topic: &str) -> RocketChatResult<Value> {
        require(Resource::Im, room_id, MISSING_IM_ID)?;
        self.api
            .post(
                "im.setTopic",
                json!({ "roomId": room_id, "topic": topic }),
                Resource::Im,
                FieldPath::One("topic"),
            )
            .await
    }
}

impl std::fmt::Debug for ImService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImService").finish_non_exhaustive()
    }
}
