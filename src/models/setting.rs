//! Server settings.

use super::{assign, decode, value_of, Entity};
use crate::errors::RocketChatResult;
use serde::Deserialize;
use serde_json::Value;

/// Server setting
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Setting {
    /// Setting id, e.g. `Site_Name`
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<String>,
    /// Setting value, any JSON type
    #[serde(default)]
    pub value: Option<Value>,
}

impl Setting {
    /// Create a setting with an id and value
    pub fn new(id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            id: Some(id.into()),
            value: Some(value.into()),
        }
    }

    /// Setting id, empty when unknown
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// Rebuild a setting from an API payload
    pub fn from_api(value: Value) -> RocketChatResult<Self> {
        decode(value)
    }
}

impl Entity for Setting {
    const FILLABLE: &'static [&'static str] = &["id", "value"];

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => value_of(&self.id),
            "value" => self.value.clone(),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) {
        match name {
            "id" => assign(&mut self.id, value),
            "value" => self.value = Some(value).filter(|v| !v.is_null()),
            _ => {}
        }
    }
}
