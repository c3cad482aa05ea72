//! Chat service implementation.

use super::*;
use crate::client::{ApiClient, FieldPath};
use crate::errors::{Resource, RocketChatResult};
use crate::services::require;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::instrument;

const MISSING_ROOM_ID: &str = "Room ID not specified.";
const MISSING_MESSAGE_ID: &str = "Message ID not specified.";

/// Trait for chat service operations
#[async_trait]
pub trait ChatServiceTrait: Send + Sync {
    /// Post a message.
    ///
    /// `params` carries the message fields (`text`, `alias`, `emoji`,
    /// `avatar`, `attachments`); the destination key always overrides them.
    async fn post_message(
        &self,
        destination: &str,
        target: MessageTarget,
        params: Map<String, Value>,
    ) -> RocketChatResult<Value>;

    /// Replace a message's text
    async fn update(&self, room_id: &str, msg_id: &str, text: &str) -> RocketChatResult<Value>;

    /// Delete a message
    async fn delete(&self, room_id: &str, msg_id: &str, as_user: bool) -> RocketChatResult<Value>;
}

/// Chat service implementation
#[derive(Clone)]
pub struct ChatService {
    pub(crate) api: Arc<ApiClient>,
}

impl ChatService {
    /// Create a new chat service
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ChatServiceTrait for ChatService {
    #[instrument(skip(self, params), fields(target = target.as_str()))]
    async fn post_message(
        &self,
        destination: &str,
        target: MessageTarget,
        params: Map<String, Value>,
    ) -> RocketChatResult<Value> {
        require(Resource::Chat, destination, "Message destination not specified.")?;

        let mut body = params;
        body.insert(target.as_str().to_string(), Value::String(destination.to_string()));

        self.api
            .post("chat.postMessage", Value::Object(body), Resource::Chat, FieldPath::Root)
            .await
    }

    #[instrument(skip(self, text))]
    async fn update(&self, room_id: &str, msg_id: &str, text: &str) -> RocketChatResult<Value> {
        require(Resource::Chat, room_id, MISSING_ROOM_ID)?;
        require(Resource::Chat, msg_id, MISSING_MESSAGE_ID)?;
        self.api
            .post(
                "chat.update",
                json!({ "roomId": room_id, "msgId": msg_id, "text": text }),
                Resource::Chat,
                FieldPath::One("message"),
            )
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, room_id: &str, msg_id: &str, as_user: bool) -> RocketChatResult<Value> {
        require(Resource::Chat, room_id, MISSING_ROOM_ID)?;
        require(Resource::Chat, msg_id, MISSING_MESSAGE_ID)?;
        self.api
            .post(
                "chat.delete",
                json!({ "roomId": room_id, "msgId": msg_id, "asUser": as_user }),
                Resource::Chat,
                FieldPath::Root,
            )
            .await
    }
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService").finish_non_exhaustive()
    }
}
