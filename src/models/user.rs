//! Users and their room memberships.

use super::{assign, decode, lenient, value_of, Entity};
use crate::errors::RocketChatResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Email address entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEmail {
    /// Address
    #[serde(default)]
    pub address: String,
    /// Whether the address is verified
    #[serde(default)]
    pub verified: bool,
}

/// Room membership listed by `users.info?userRooms=1`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfoRoom {
    /// Subscription id
    #[serde(default, rename = "_id")]
    pub id: String,
    /// Room id
    #[serde(default)]
    pub rid: String,
    /// Room name
    #[serde(default)]
    pub name: String,
    /// Room type code
    #[serde(default)]
    pub t: String,
    /// Unread message count
    #[serde(default)]
    pub unread: u64,
    /// Roles held in the room
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Room memberships in response order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserInfoRooms(pub Vec<UserInfoRoom>);

impl UserInfoRooms {
    /// Membership with the given subscription id
    pub fn get(&self, id: &str) -> Option<&UserInfoRoom> {
        self.0.iter().find(|room| room.id == id)
    }

    /// All memberships
    pub fn rooms(&self) -> &[UserInfoRoom] {
        &self.0
    }

    /// Add or replace a membership
    pub fn set(&mut self, room: UserInfoRoom) {
        match self.0.iter_mut().find(|existing| existing.id == room.id) {
            Some(existing) => *existing = room,
            None => self.0.push(room),
        }
    }

    /// Number of memberships
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no memberships
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Rocket.Chat user
#[derive(Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User id
    #[serde(default, rename = "_id", alias = "id", alias = "userId")]
    pub id: Option<String>,
    /// Login name
    #[serde(default)]
    pub username: Option<String>,
    /// Password, only ever sent
    #[serde(skip)]
    pub password: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Primary email, the first entry of `emails` on responses
    #[serde(default)]
    pub email: Option<String>,
    /// All email entries
    #[serde(default, deserialize_with = "lenient")]
    pub emails: Option<Vec<UserEmail>>,
    /// Global roles
    #[serde(default, deserialize_with = "lenient")]
    pub roles: Option<Vec<String>>,
    /// Whether the account is active
    #[serde(default, deserialize_with = "lenient")]
    pub active: Option<bool>,
    /// Presence status, e.g. `online`
    #[serde(default)]
    pub status: Option<String>,
    /// Account type, e.g. `user` or `bot`
    #[serde(default, rename = "type")]
    pub user_type: Option<String>,
    /// Join the default channels on creation
    #[serde(default, deserialize_with = "lenient")]
    pub join_default_channels: Option<bool>,
    /// Force a password change on next login
    #[serde(default, deserialize_with = "lenient")]
    pub require_password_change: Option<bool>,
    /// Send the welcome email on creation
    #[serde(default, deserialize_with = "lenient")]
    pub send_welcome_email: Option<bool>,
    /// Mark the email as verified on creation
    #[serde(default, deserialize_with = "lenient")]
    pub verified: Option<bool>,
    /// Session or personal access token
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// User preferences
    #[serde(default)]
    pub settings: Option<Value>,
    /// Custom profile fields
    #[serde(default)]
    pub custom_fields: Option<Value>,
    /// Room memberships
    #[serde(default, deserialize_with = "lenient")]
    pub rooms: Option<UserInfoRooms>,
}

impl User {
    /// Create an empty user
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the username
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the primary email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the global roles
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    /// Set the active flag
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// User id, if known
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Auth token, if the user came from a login or token call
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Rebuild a user from an API payload
    pub fn from_api(value: Value) -> RocketChatResult<Self> {
        let mut user: User = decode(value)?;
        if user.email.is_none() {
            user.email = user
                .emails
                .as_ref()
                .and_then(|emails| emails.first())
                .map(|e| e.address.clone());
        }
        Ok(user)
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("roles", &self.roles)
            .field("active", &self.active)
            .field("status", &self.status)
            .field("has_password", &self.password.is_some())
            .field("has_auth_token", &self.auth_token.is_some())
            .finish()
    }
}

impl Entity for User {
    const FILLABLE: &'static [&'static str] = &[
        "id",
        "username",
        "password",
        "name",
        "email",
        "roles",
        "active",
        "joinDefaultChannels",
        "requirePasswordChange",
        "sendWelcomeEmail",
        "verified",
        "customFields",
    ];

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => value_of(&self.id),
            "username" => value_of(&self.username),
            "password" => value_of(&self.password),
            "name" => value_of(&self.name),
            "email" => value_of(&self.email),
            "emails" => value_of(&self.emails),
            "roles" => value_of(&self.roles),
            "active" => value_of(&self.active),
            "status" => value_of(&self.status),
            "type" => value_of(&self.user_type),
            "joinDefaultChannels" => value_of(&self.join_default_channels),
            "requirePasswordChange" => value_of(&self.require_password_change),
            "sendWelcomeEmail" => value_of(&self.send_welcome_email),
            "verified" => value_of(&self.verified),
            "avatarUrl" => value_of(&self.avatar_url),
            "customFields" => self.custom_fields.clone(),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) {
        match name {
            "id" => assign(&mut self.id, value),
            "username" => assign(&mut self.username, value),
            "password" => assign(&mut self.password, value),
            "name" => assign(&mut self.name, value),
            "email" => assign(&mut self.email, value),
            "emails" => assign(&mut self.emails, value),
            "roles" => assign(&mut self.roles, value),
            "active" => assign(&mut self.active, value),
            "status" => assign(&mut self.status, value),
            "type" => assign(&mut self.user_type, value),
            "joinDefaultChannels" => assign(&mut self.join_default_channels, value),
            "requirePasswordChange" => assign(&mut self.require_password_change, value),
            "sendWelcomeEmail" => assign(&mut self.send_welcome_email, value),
            "verified" => assign(&mut self.verified, value),
            "avatarUrl" => assign(&mut self.avatar_url, value),
            "customFields" => self.custom_fields = Some(value).filter(|v| !v.is_null()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_projection_sends_explicit_false() {
        let user = User::new()
            .with_username("jdoe")
            .with_password("s3cret")
            .with_email("jdoe@example.com")
            .with_active(false);

        assert_eq!(
            Value::Object(user.fillable_data()),
            json!({
                "username": "jdoe",
                "password": "s3cret",
                "email": "jdoe@example.com",
                "active": false
            })
        );
    }

    #[test]
    fn test_from_api_takes_first_email() {
        let user = User::from_api(json!({
            "_id": "u1",
            "username": "jdoe",
            "emails": [{"address": "jdoe@example.com", "verified": true}, {"address": "alt@example.com"}],
            "type": "user",
            "roles": ["user", "admin"],
            "active": true,
            "status": "online"
        }))
        .unwrap();

        assert_eq!(user.id(), Some("u1"));
        assert_eq!(user.email.as_deref(), Some("jdoe@example.com"));
        assert_eq!(user.user_type.as_deref(), Some("user"));
        assert_eq!(user.roles.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_from_api_with_rooms() {
        let user = User::from_api(json!({
            "_id": "u1",
            "rooms": [
                {"_id": "s1", "rid": "GENERAL", "name": "general", "t": "c", "unread": 3, "roles": ["owner"]},
                {"_id": "s2", "rid": "r2", "t": "p"}
            ]
        }))
        .unwrap();

        let rooms = user.rooms.unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms.get("s1").unwrap().unread, 3);
        assert_eq!(rooms.get("s2").unwrap().name, "");
    }

    #[test]
    fn test_from_api_login_payload() {
        let user = User::from_api(json!({"userId": "u9", "authToken": "tok"})).unwrap();
        assert_eq!(user.id(), Some("u9"));
        assert_eq!(user.auth_token(), Some("tok"));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let mut user = User::new().with_password("hunter2");
        user.auth_token = Some("tok-123".to_string());
        let rendered = format!("{:?}", user);
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("tok-123"));
    }
}
