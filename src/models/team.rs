//! Teams.

use super::{assign, decode, lenient, value_of, Entity};
use crate::errors::RocketChatResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Team type code: public
pub const TEAM_TYPE_PUBLIC: u8 = 0;

/// Team type code: private
pub const TEAM_TYPE_PRIVATE: u8 = 1;

/// Team
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Team {
    /// Team id
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<String>,
    /// Team name
    #[serde(default)]
    pub name: Option<String>,
    /// Initial member user ids
    #[serde(default, deserialize_with = "lenient")]
    pub members: Option<Vec<String>>,
    /// Extra room settings used on creation, e.g. `{"readOnly": true}`
    #[serde(default)]
    pub room: Option<Value>,
    /// Team type, see [`TEAM_TYPE_PUBLIC`] and [`TEAM_TYPE_PRIVATE`]
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    pub team_type: Option<u8>,
}

impl Team {
    /// Create an empty team
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the initial members
    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members = Some(members.into_iter().map(Into::into).collect());
        self
    }

    /// Set the main room settings
    pub fn with_room(mut self, room: Value) -> Self {
        self.room = Some(room);
        self
    }

    /// Set the team type
    pub fn with_type(mut self, team_type: u8) -> Self {
        self.team_type = Some(team_type);
        self
    }

    /// Team id, if known
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Rebuild a team from an API payload
    pub fn from_api(value: Value) -> RocketChatResult<Self> {
        decode(value)
    }
}

impl Entity for Team {
    const FILLABLE: &'static [&'static str] = &["id", "name", "members", "room", "type"];

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => value_of(&self.id),
            "name" => value_of(&self.name),
            "members" => value_of(&self.members),
            "room" => self.room.clone(),
            "type" => value_of(&self.team_type),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) {
        match name {
            "id" => assign(&mut self.id, value),
            "name" => assign(&mut self.name, value),
            "members" => assign(&mut self.members, value),
            "room" => self.room = Some(value).filter(|v| !v.is_null()),
            "type" => assign(&mut self.team_type, value),
            _ => {}
        }
    }
}

/// Member entry for `teams.addMembers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// User id
    pub user_id: String,
    /// Team roles, e.g. `member`, `owner`
    #[serde(default)]
    pub roles: Vec<String>,
}

impl TeamMember {
    /// Create a member with the given roles
    pub fn new<I, S>(user_id: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_id: user_id.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}
