//! Rooms service implementation.

use super::*;
use crate::client::{ApiClient, FieldPath, Query};
use crate::errors::{Resource, RocketChatError, RocketChatResult};
use crate::models::{Entity, Room, RoomCounters, RoomType};
use crate::services::require;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

const MISSING_ROOM_ID: &str = "Room ID not specified.";
const MISSING_ROOM_ID_OR_NAME: &str = "Room ID or RoomName not specified.";
const MISSING_USER_ID: &str = "User ID not specified.";
const BAD_PARAMETER: &str = "Bad method parameter value.";

/// Room family served by a [`RoomsService`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomKind {
    /// Public channels
    Channel,
    /// Private groups
    Group,
}

impl RoomKind {
    /// Endpoint prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Channel => "channels",
            Self::Group => "groups",
        }
    }

    /// Payload key holding a single room
    pub fn singular_key(&self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Group => "group",
        }
    }

    /// Payload key holding a room list
    pub fn plural_key(&self) -> &'static str {
        self.prefix()
    }

    /// Error resource for this family
    pub fn resource(&self) -> Resource {
        match self {
            Self::Channel => Resource::Channel,
            Self::Group => Resource::Group,
        }
    }
}

impl std::fmt::Display for RoomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Trait for rooms service operations
#[async_trait]
pub trait RoomsServiceTrait: Send + Sync {
    /// Create a room from the room's fillable fields
    async fn create(&self, room: &Room) -> RocketChatResult<Room>;

    /// Add every user of the server to the room
    async fn add_all(&self, room_id: &str, active_users_only: bool) -> RocketChatResult<Value>;

    /// Grant the moderator role in the room
    async fn add_moderator(&self, room_id: &str, user_id: &str) -> RocketChatResult<Value>;

    /// Grant the owner role in the room
    async fn add_owner(&self, room_id: &str, user_id: &str) -> RocketChatResult<Value>;

    /// Revoke the moderator role in the room
    async fn remove_moderator(&self, room_id: &str, user_id: &str) -> RocketChatResult<Value>;

    /// Revoke the owner role in the room
    async fn remove_owner(&self, room_id: &str, user_id: &str) -> RocketChatResult<Value>;

    /// Archive the room
    async fn archive(&self, room_id: &str) -> RocketChatResult<Value>;

    /// Unarchive the room
    async fn unarchive(&self, room_id: &str) -> RocketChatResult<Value>;

    /// Hide the room from the caller's room list
    async fn close(&self, room_id: &str) -> RocketChatResult<Value>;

    /// Show the room in the caller's room list again
    async fn open(&self, room_id: &str) -> RocketChatResult<Value>;

    /// Delete the room
    async fn delete(&self, room_id: &str) -> RocketChatResult<Value>;

    /// Message and member counters; needs a room id or a room name
    async fn counters(
        &self,
        room_id: &str,
        room_name: &str,
        user_id: &str,
    ) -> RocketChatResult<RoomCounters>;

    /// Integrations attached to the room
    async fn get_integrations(&self, room_id: &str) -> RocketChatResult<Value>;

    /// Message history
    async fn history(&self, room_id: &str, filter: HistoryQuery) -> RocketChatResult<Value>;

    /// Room details by id or name
    async fn info(&self, room: &str, lookup: RoomLookup) -> RocketChatResult<Room>;

    /// Add a user to the room
    async fn invite(&self, room_id: &str, user_id: &str) -> RocketChatResult<Room>;

    /// Remove a user from the room
    async fn kick(&self, room_id: &str, user_id: &str) -> RocketChatResult<Room>;

    /// Leave the room as the session user
    async fn leave(&self, room_id: &str) -> RocketChatResult<Room>;

    /// Rooms visible to the session user
    async fn list_all(&self) -> RocketChatResult<Value>;

    /// Rename the room
    async fn rename(&self, room_id: &str, name: &str) -> RocketChatResult<Room>;

    /// Set the description
    async fn set_description(&self, room_id: &str, description: &str) -> RocketChatResult<Value>;

    /// Set the join code
    async fn set_join_code(&self, room_id: &str, join_code: &str) -> RocketChatResult<Room>;

    /// Set the purpose
    async fn set_purpose(&self, room_id: &str, purpose: &str) -> RocketChatResult<Value>;

    /// Toggle read-only mode
    async fn set_read_only(&self, room_id: &str, read_only: bool) -> RocketChatResult<Room>;

    /// Set the topic
    async fn set_topic(&self, room_id: &str, topic: &str) -> RocketChatResult<Value>;

    /// Switch between public channel and private group
    async fn set_type(&self, room_id: &str, room_type: RoomType) -> RocketChatResult<Room>;
}

/// Rooms service implementation
#[derive(Clone)]
pub struct RoomsService {
    pub(crate) api: Arc<ApiClient>,
    kind: RoomKind,
}

impl RoomsService {
    /// Create a new rooms service for one room family
    pub fn new(api: Arc<ApiClient>, kind: RoomKind) -> Self {
        Self { api, kind }
    }

    /// Room family served
    pub fn kind(&self) -> RoomKind {
        self.kind
    }

    fn path(&self, operation: &str) -> String {
        format!("{}.{}", self.kind.prefix(), operation)
    }

    fn resource(&self) -> Resource {
        self.kind.resource()
    }

    fn single(&self) -> FieldPath {
        FieldPath::One(self.kind.singular_key())
    }

    async fn send_post(&self, operation: &str, body: Value, field: FieldPath) -> RocketChatResult<Value> {
        self.api
            .post(&self.path(operation), body, self.resource(), field)
            .await
    }

    async fn send_get(&self, operation: &str, query: Query, field: FieldPath) -> RocketChatResult<Value> {
        self.api
            .get(&self.path(operation), query, self.resource(), field)
            .await
    }

    async fn post_room(&self, operation: &str, body: Value) -> RocketChatResult<Room> {
        let data = self.send_post(operation, body, self.single()).await?;
        Room::from_api(data)
    }

    async fn member_action(
        &self,
        operation: &str,
        room_id: &str,
        user_id: &str,
        field: FieldPath,
    ) -> RocketChatResult<Value> {
        require(self.resource(), room_id, MISSING_ROOM_ID)?;
        require(self.resource(), user_id, MISSING_USER_ID)?;
        self.send_post(operation, json!({ "roomId": room_id, "userId": user_id }), field)
            .await
    }

    async fn room_action(&self, operation: &str, room_id: &str) -> RocketChatResult<Value> {
        require(self.resource(), room_id, MISSING_ROOM_ID)?;
        self.send_post(operation, json!({ "roomId": room_id }), FieldPath::Root)
            .await
    }
}

#[async_trait]
impl RoomsServiceTrait for RoomsService {
    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn create(&self, room: &Room) -> RocketChatResult<Room> {
        self.post_room("create", Value::Object(room.fillable_data()))
            .await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn add_all(&self, room_id: &str, active_users_only: bool) -> RocketChatResult<Value> {
        require(self.resource(), room_id, MISSING_ROOM_ID)?;
        let field = match self.kind {
            RoomKind::Channel => self.single(),
            RoomKind::Group => FieldPath::Root,
        };
        self.send_post(
            "addAll",
            json!({ "roomId": room_id, "activeUsersOnly": active_users_only }),
            field,
        )
        .await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn add_moderator(&self, room_id: &str, user_id: &str) -> RocketChatResult<Value> {
        self.member_action("addModerator", room_id, user_id, FieldPath::Root)
            .await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn add_owner(&self, room_id: &str, user_id: &str) -> RocketChatResult<Value> {
        self.member_action("addOwner", room_id, user_id, FieldPath::Root)
            .await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn remove_moderator(&self, room_id: &str, user_id: &str) -> RocketChatResult<Value> {
        self.member_action("removeModerator", room_id, user_id, FieldPath::Root)
            .await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn remove_owner(&self, room_id: &str, user_id: &str) -> RocketChatResult<Value> {
        self.member_action("removeOwner", room_id, user_id, FieldPath::Root)
            .await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn archive(&self, room_id: &str) -> RocketChatResult<Value> {
        self.room_action("archive", room_id).await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn unarchive(&self, room_id: &str) -> RocketChatResult<Value> {
        self.room_action("unarchive", room_id).await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn close(&self, room_id: &str) -> RocketChatResult<Value> {
        self.room_action("close", room_id).await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn open(&self, room_id: &str) -> RocketChatResult<Value> {
        self.room_action("open", room_id).await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn delete(&self, room_id: &str) -> RocketChatResult<Value> {
        self.room_action("delete", room_id).await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn counters(
        &self,
        room_id: &str,
        room_name: &str,
        user_id: &str,
    ) -> RocketChatResult<RoomCounters> {
        if room_id.is_empty() && room_name.is_empty() {
            return Err(RocketChatError::bad_parameter(
                self.resource(),
                MISSING_ROOM_ID_OR_NAME,
            ));
        }

        let query = Query::new()
            .with_opt("roomId", non_empty(room_id))
            .with_opt("roomName", non_empty(room_name))
            .with_opt("userId", non_empty(user_id));

        let data = self.send_get("counters", query, FieldPath::Root).await?;
        RoomCounters::from_api(data)
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn get_integrations(&self, room_id: &str) -> RocketChatResult<Value> {
        require(self.resource(), room_id, MISSING_ROOM_ID)?;
        self.send_get(
            "getIntegrations",
            Query::new().with("roomId", room_id),
            FieldPath::One("integrations"),
        )
        .await
    }

    #[instrument(skip(self, filter), fields(kind = %self.kind))]
    async fn history(&self, room_id: &str, filter: HistoryQuery) -> RocketChatResult<Value> {
        require(self.resource(), room_id, MISSING_ROOM_ID)?;
        self.send_get("history", filter.into_query(room_id), FieldPath::One("messages"))
            .await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn info(&self, room: &str, lookup: RoomLookup) -> RocketChatResult<Room> {
        require(self.resource(), room, MISSING_ROOM_ID)?;
        let data = self
            .send_get("info", Query::new().with(lookup.as_str(), room), self.single())
            .await?;
        Room::from_api(data)
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn invite(&self, room_id: &str, user_id: &str) -> RocketChatResult<Room> {
        let data = self
            .member_action("invite", room_id, user_id, self.single())
            .await?;
        Room::from_api(data)
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn kick(&self, room_id: &str, user_id: &str) -> RocketChatResult<Room> {
        let data = self
            .member_action("kick", room_id, user_id, self.single())
            .await?;
        Room::from_api(data)
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn leave(&self, room_id: &str) -> RocketChatResult<Room> {
        require(self.resource(), room_id, MISSING_ROOM_ID)?;
        self.post_room("leave", json!({ "roomId": room_id })).await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn list_all(&self) -> RocketChatResult<Value> {
        self.send_get("list", Query::new(), FieldPath::One(self.kind.plural_key()))
            .await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn rename(&self, room_id: &str, name: &str) -> RocketChatResult<Room> {
        require(self.resource(), room_id, MISSING_ROOM_ID)?;
        self.post_room("rename", json!({ "roomId": room_id, "name": name }))
            .await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn set_description(&self, room_id: &str, description: &str) -> RocketChatResult<Value> {
        require(self.resource(), room_id, MISSING_ROOM_ID)?;
        self.send_post(
            "setDescription",
            json!({ "roomId": room_id, "description": description }),
            FieldPath::One("description"),
        )
        .await
    }

    #[instrument(skip(self, join_code), fields(kind = %self.kind))]
    async fn set_join_code(&self, room_id: &str, join_code: &str) -> RocketChatResult<Room> {
        require(self.resource(), room_id, MISSING_ROOM_ID)?;
        self.post_room("setJoinCode", json!({ "roomId": room_id, "joinCode": join_code }))
            .await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn set_purpose(&self, room_id: &str, purpose: &str) -> RocketChatResult<Value> {
        require(self.resource(), room_id, MISSING_ROOM_ID)?;
        self.send_post(
            "setPurpose",
            json!({ "roomId": room_id, "purpose": purpose }),
            FieldPath::One("purpose"),
        )
        .await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn set_read_only(&self, room_id: &str, read_only: bool) -> RocketChatResult<Room> {
        require(self.resource(), room_id, MISSING_ROOM_ID)?;
        self.post_room("setReadOnly", json!({ "roomId": room_id, "readOnly": read_only }))
            .await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn set_topic(&self, room_id: &str, topic: &str) -> RocketChatResult<Value> {
        require(self.resource(), room_id, MISSING_ROOM_ID)?;
        self.send_post(
            "setTopic",
            json!({ "roomId": room_id, "topic": topic }),
            FieldPath::One("topic"),
        )
        .await
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn set_type(&self, room_id: &str, room_type: RoomType) -> RocketChatResult<Room> {
        require(self.resource(), room_id, MISSING_ROOM_ID)?;
        if !matches!(room_type, RoomType::Channel | RoomType::Private) {
            return Err(RocketChatError::bad_parameter(self.resource(), BAD_PARAMETER));
        }
        self.post_room("setType", json!({ "roomId": room_id, "type": room_type.as_str() }))
            .await
    }
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}

impl std::fmt::Debug for RoomsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomsService").field("kind", &self.kind).finish()
    }
}
