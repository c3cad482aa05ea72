//! Test fixtures for Rocket.Chat API responses.
//!
//! Payloads mirror what a Rocket.Chat 6.x server returns, trimmed to the
//! fields the client reads.

use crate::client::RocketChatClient;
use crate::config::{RocketChatConfig, RocketChatConfigBuilder};
use crate::mocks::MockHttpTransport;
use serde_json::{json, Value};
use std::sync::Arc;

/// Base URL every fixture client sends to
pub const BASE_URL: &str = "http://localhost:3000/api/v1";

/// Admin user id used by [`admin_config`]
pub const ADMIN_USER_ID: &str = "rbAXPnMktTFbNpwtJ";

/// Admin token used by [`admin_config`]
pub const ADMIN_TOKEN: &str = "9HqLlyZOugoStsXCUfD_0YdwnNnunAJF8V47U3QHXSq";

/// Configuration against the default local instance, no admin bootstrap
pub fn test_config() -> RocketChatConfig {
    RocketChatConfigBuilder::new()
        .admin_login(false)
        .build_unchecked()
}

/// Configuration with a cached admin session
pub fn admin_config() -> RocketChatConfig {
    RocketChatConfigBuilder::new()
        .admin_token(ADMIN_USER_ID, ADMIN_TOKEN)
        .build_unchecked()
}

/// Configuration that bootstraps the admin session with a password login
pub fn password_config() -> RocketChatConfig {
    RocketChatConfigBuilder::new()
        .admin_username("admin")
        .admin_password("admin-pass")
        .build_unchecked()
}

/// Client over a mock transport with [`test_config`]
pub fn test_client(transport: Arc<MockHttpTransport>) -> RocketChatClient {
    RocketChatClient::with_transport(test_config(), transport)
}

/// Public channel payload
pub fn channel_json() -> Value {
    json!({
        "_id": "ByehQjC44FwMeiLbX",
        "name": "general-updates",
        "fname": "general-updates",
        "t": "c",
        "msgs": 0,
        "usersCount": 2,
        "u": {"_id": ADMIN_USER_ID, "username": "admin"},
        "usernames": ["admin", "jdoe"],
        "ro": false,
        "default": false,
        "sysMes": true,
        "_updatedAt": "2024-03-05T10:15:00.000Z"
    })
}

/// Private group payload
pub fn group_json() -> Value {
    json!({
        "_id": "NtR6RQ7NvzA9ejecX",
        "name": "ops-private",
        "t": "p",
        "usernames": ["admin"],
        "ro": true,
        "msgs": 12
    })
}

/// User payload as returned by `users.info` and `users.create`
pub fn user_json() -> Value {
    json!({
        "_id": "BsNr28znDkG8aeo7W",
        "createdAt": "2024-02-01T09:00:00.000Z",
        "username": "jdoe",
        "emails": [{"address": "jdoe@example.com", "verified": false}],
        "type": "user",
        "status": "offline",
        "active": true,
        "roles": ["user"],
        "name": "John Doe",
        "settings": {"preferences": {}}
    })
}

/// `login` response body
pub fn login_response(user_id: &str, token: &str) -> Value {
    json!({
        "status": "success",
        "data": {
            "userId": user_id,
            "authToken": token,
            "me": {"_id": user_id, "username": "admin", "roles": ["admin"]}
        }
    })
}

/// Team payload as returned by `teams.create` and `teams.info`
pub fn team_json() -> Value {
    json!({
        "_id": "6c8c3cfb0bf95d4c4fd2a3a3",
        "name": "platform",
        "type": 0,
        "roomId": "QbszmCYjmZafTb5rr",
        "createdAt": "2024-03-01T12:00:00.000Z",
        "createdBy": {"_id": ADMIN_USER_ID, "username": "admin"}
    })
}

/// Integration payload
pub fn integration_json() -> Value {
    json!({
        "_id": "WMQDChpnYTRmFre9h",
        "type": "webhook-outgoing",
        "name": "ci-notify",
        "enabled": true,
        "username": "rocket.cat",
        "event": "sendMessage",
        "urls": ["https://ci.example.com/hook"],
        "scriptEnabled": false,
        "userId": ADMIN_USER_ID,
        "channel": ["#builds"],
        "_createdAt": "2024-03-02T08:00:00.000Z"
    })
}

/// `channels.counters` response body
pub fn counters_json() -> Value {
    json!({
        "joined": true,
        "members": 78,
        "unreads": 2,
        "unreadsFrom": "2024-03-05T09:00:00.000Z",
        "msgs": 2134,
        "latest": "2024-03-05T10:15:00.000Z",
        "userMentions": 0,
        "success": true
    })
}

/// Message payload
pub fn message_json() -> Value {
    json!({
        "_id": "7aDSXtjMA3KPLxLjt",
        "rid": "ByehQjC44FwMeiLbX",
        "msg": "Deploy finished",
        "ts": "2024-03-05T10:15:00.000Z",
        "u": {"_id": ADMIN_USER_ID, "username": "admin"}
    })
}
