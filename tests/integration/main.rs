//! Integration tests using WireMock
//!
//! These run the real reqwest transport against a local mock server and
//! check what actually goes over the wire: paths, query strings, headers
//! and bodies, plus how envelopes and connection failures come back.

mod auth;
mod rooms;
mod services;
mod transport;

use rocketchat_client::{RocketChatClient, RocketChatConfig, RocketChatConfigBuilder};
use serde_json::Value;
use wiremock::{MockServer, ResponseTemplate};

/// Start a fresh mock server
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Builder pointed at the mock server
pub fn config_builder(server: &MockServer) -> RocketChatConfigBuilder {
    RocketChatConfigBuilder::new()
        .instance(&server.uri())
        .expect("mock server URI is valid")
}

/// Configuration without admin bootstrap
pub fn config(server: &MockServer) -> RocketChatConfig {
    config_builder(server).admin_login(false).build_unchecked()
}

/// Client without admin bootstrap
pub fn client(server: &MockServer) -> RocketChatClient {
    RocketChatClient::new(config(server)).expect("client builds")
}

/// `{"success": true, ...}` at 200
pub fn success_response(mut body: Value) -> ResponseTemplate {
    if let Some(map) = body.as_object_mut() {
        map.insert("success".to_string(), Value::Bool(true));
    }
    ResponseTemplate::new(200).set_body_json(body)
}

/// Arbitrary status with a JSON body
pub fn error_response(status: u16, body: Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(body)
}
