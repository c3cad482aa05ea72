//! Typed Rocket.Chat entities.
//!
//! Entities double as request payload sources. Each declares the ordered
//! list of fields it may send ([`Entity::FILLABLE`]); building a payload
//! copies every fillable field that is set. Unset fields and empty strings
//! are omitted, while `false`, `0` and empty lists are sent as given.

use crate::errors::{ResponseError, RocketChatError, RocketChatResult};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod integration;
pub mod room;
pub mod setting;
pub mod team;
pub mod user;

pub use crate::auth::UserAuthToken;
pub use integration::Integration;
pub use room::{Room, RoomCounters, RoomType};
pub use setting::Setting;
pub use team::{Team, TeamMember};
pub use user::{User, UserEmail, UserInfoRoom, UserInfoRooms};

/// Projection of an entity onto its outbound request fields
pub trait Entity {
    /// Fields eligible for outbound payloads, in send order
    const FILLABLE: &'static [&'static str];

    /// Current value of a named field, `None` when unset or unknown
    fn field(&self, name: &str) -> Option<Value>;

    /// Assign a named field; a value of the wrong shape unsets it
    fn set_field(&mut self, name: &str, value: Value);

    /// Payload built from every fillable field that is set
    fn fillable_data(&self) -> Map<String, Value> {
        self.fillable_data_with(Self::FILLABLE)
    }

    /// Payload built from an explicit field list, narrowing or extending the default
    fn fillable_data_with(&self, fields: &[&str]) -> Map<String, Value> {
        let mut data = Map::new();
        for name in fields {
            if let Some(value) = self.field(name).filter(is_present) {
                data.insert((*name).to_string(), value);
            }
        }
        data
    }

    /// Copy the fillable members of `params` into the entity
    fn fill(&mut self, params: &Map<String, Value>) -> &mut Self
    where
        Self: Sized,
    {
        for (name, value) in params {
            if Self::FILLABLE.contains(&name.as_str()) {
                self.set_field(name, value.clone());
            }
        }
        self
    }
}

/// Whether a field value counts as set
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Serialize an optional field for [`Entity::field`]
pub(crate) fn value_of<T: Serialize>(slot: &Option<T>) -> Option<Value> {
    slot.as_ref().and_then(|v| serde_json::to_value(v).ok())
}

/// Assign a field from JSON for [`Entity::set_field`]
pub(crate) fn assign<T: DeserializeOwned>(slot: &mut Option<T>, value: Value) {
    *slot = serde_json::from_value::<Option<T>>(value).ok().flatten();
}

/// Decode an API payload into a model
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> RocketChatResult<T> {
    serde_json::from_value(value)
        .map_err(|e| RocketChatError::Response(ResponseError::from(e)))
}

/// Deserialize a field, treating a value of the wrong shape as absent
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
