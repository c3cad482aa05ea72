//! Rooms: public channels, private groups, direct messages and livechat rooms.

use super::{assign, decode, lenient, value_of, Entity};
use crate::errors::RocketChatResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Room type code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// Direct chat (`d`)
    #[serde(rename = "d")]
    Direct,
    /// Public channel (`c`)
    #[serde(rename = "c")]
    Channel,
    /// Private group (`p`)
    #[serde(rename = "p")]
    Private,
    /// Livechat room (`l`)
    #[serde(rename = "l")]
    Livechat,
}

impl RoomType {
    /// Wire code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "d",
            Self::Channel => "c",
            Self::Private => "p",
            Self::Livechat => "l",
        }
    }

    /// Parse a wire code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "d" => Some(Self::Direct),
            "c" => Some(Self::Channel),
            "p" => Some(Self::Private),
            "l" => Some(Self::Livechat),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chat room
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Room {
    /// Room id
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<String>,
    /// Room name
    #[serde(default)]
    pub name: Option<String>,
    /// Member usernames
    #[serde(default, rename = "usernames", alias = "members", deserialize_with = "lenient")]
    pub members: Option<Vec<String>>,
    /// Read-only flag
    #[serde(default, rename = "ro", alias = "readOnly", deserialize_with = "lenient")]
    pub read_only: Option<bool>,
    /// Room type
    #[serde(default, rename = "t", alias = "type", deserialize_with = "lenient")]
    pub room_type: Option<RoomType>,
}

impl Room {
    /// Create an empty room
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the member usernames
    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members = Some(members.into_iter().map(Into::into).collect());
        self
    }

    /// Set the read-only flag
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = Some(read_only);
        self
    }

    /// Set the room type
    pub fn with_type(mut self, room_type: RoomType) -> Self {
        self.room_type = Some(room_type);
        self
    }

    /// Room id, if known
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Room name, if known
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Member usernames, empty when unknown
    pub fn members(&self) -> &[String] {
        self.members.as_deref().unwrap_or_default()
    }

    /// Rebuild a room from an API payload
    pub fn from_api(value: Value) -> RocketChatResult<Self> {
        decode(value)
    }
}

impl Entity for Room {
    const FILLABLE: &'static [&'static str] = &["name", "members", "readOnly", "type"];

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => value_of(&self.id),
            "name" => value_of(&self.name),
            "members" => value_of(&self.members),
            "readOnly" => value_of(&self.read_only),
            "type" => value_of(&self.room_type),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) {
        match name {
            "id" => assign(&mut self.id, value),
            "name" => assign(&mut self.name, value),
            "members" => assign(&mut self.members, value),
            "readOnly" => assign(&mut self.read_only, value),
            "type" => assign(&mut self.room_type, value),
            _ => {}
        }
    }
}

/// Counters returned by `channels.counters` / `groups.counters`.
///
/// The server reports the numeric counters as `null` when the caller has not
/// joined the room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCounters {
    /// Whether the caller has joined the room
    #[serde(default)]
    pub joined: bool,
    /// Member count
    #[serde(default)]
    pub members: Option<u64>,
    /// Unread message count
    #[serde(default)]
    pub unreads: Option<u64>,
    /// Timestamp unreads are counted from
    #[serde(default)]
    pub unreads_from: Option<String>,
    /// Total message count
    #[serde(default)]
    pub msgs: Option<u64>,
    /// Timestamp of the latest message
    #[serde(default)]
    pub latest: Option<String>,
    /// Mentions of the caller
    #[serde(default)]
    pub user_mentions: Option<u64>,
    /// Envelope success flag
    #[serde(default)]
    pub success: bool,
}

impl RoomCounters {
    /// Rebuild counters from an API payload
    pub fn from_api(value: Value) -> RocketChatResult<Self> {
        decode(value)
    }
}
