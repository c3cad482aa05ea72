//! Incoming and outgoing webhook integrations.

use super::{assign, decode, lenient, value_of, Entity};
use crate::errors::RocketChatResult;
use serde::Deserialize;
use serde_json::Value;

/// Webhook integration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    /// Integration id
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<String>,
    /// `webhook-incoming` or `webhook-outgoing`
    #[serde(default, rename = "type")]
    pub integration_type: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the integration is active
    #[serde(default, deserialize_with = "lenient")]
    pub enabled: Option<bool>,
    /// User the integration posts as
    #[serde(default)]
    pub username: Option<String>,
    /// Outgoing trigger event, e.g. `sendMessage`
    #[serde(default)]
    pub event: Option<String>,
    /// Target URLs
    #[serde(default, deserialize_with = "lenient")]
    pub urls: Option<Vec<String>>,
    /// Whether the script runs
    #[serde(default, deserialize_with = "lenient")]
    pub script_enabled: Option<bool>,
    /// Owner user id
    #[serde(default)]
    pub user_id: Option<String>,
    /// Channel(s), e.g. `#general`
    #[serde(default, deserialize_with = "lenient")]
    pub channel: Option<Value>,
}

impl Integration {
    /// Create an empty integration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the integration type
    pub fn with_type(mut self, integration_type: impl Into<String>) -> Self {
        self.integration_type = Some(integration_type.into());
        self
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the enabled flag
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Set the posting user
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the target URLs
    pub fn with_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.urls = Some(urls.into_iter().map(Into::into).collect());
        self
    }

    /// Set the script flag
    pub fn with_script_enabled(mut self, script_enabled: bool) -> Self {
        self.script_enabled = Some(script_enabled);
        self
    }

    /// Set the channel
    pub fn with_channel(mut self, channel: impl Into<Value>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Integration id, if known
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Rebuild an integration from an API payload
    pub fn from_api(value: Value) -> RocketChatResult<Self> {
        decode(value)
    }
}

impl Entity for Integration {
    const FILLABLE: &'static [&'static str] = &[
        "type",
        "name",
        "enabled",
        "username",
        "event",
        "urls",
        "scriptEnabled",
        "userId",
        "channel",
    ];

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => value_of(&self.id),
            "type" => value_of(&self.integration_type),
            "name" => value_of(&self.name),
            "enabled" => value_of(&self.enabled),
            "username" => value_of(&self.username),
            "event" => value_of(&self.event),
            "urls" => value_of(&self.urls),
            "scriptEnabled" => value_of(&self.script_enabled),
            "userId" => value_of(&self.user_id),
            "channel" => self.channel.clone(),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) {
        match name {
            "id" => assign(&mut self.id, value),
            "type" => assign(&mut self.integration_type, value),
            "name" => assign(&mut self.name, value),
            "enabled" => assign(&mut self.enabled, value),
            "username" => assign(&mut self.username, value),
            "event" => assign(&mut self.event, value),
            "urls" => assign(&mut self.urls, value),
            "scriptEnabled" => assign(&mut self.script_enabled, value),
            "userId" => assign(&mut self.user_id, value),
            "channel" => self.channel = Some(value).filter(|v| !v.is_null()),
            _ => {}
        }
    }
}
