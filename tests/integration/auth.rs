//! Admin bootstrap and session headers on the wire

use super::*;
use rocketchat_client::errors::RocketChatError;
use rocketchat_client::{RoomsServiceTrait, UsersServiceTrait};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::Mock;

#[tokio::test]
async fn test_cached_admin_token_skips_login() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/me"))
        .and(header("x-user-id", "admin-id"))
        .and(header("x-auth-token", "admin-token"))
        .respond_with(success_response(json!({
            "_id": "admin-id",
            "username": "admin",
            "emails": [{"address": "admin@example.com", "verified": true}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_builder(&server)
        .admin_token("admin-id", "admin-token")
        .build()
        .unwrap();
    let client = RocketChatClient::connect(config).await.unwrap();

    let me = client.users().me().await.unwrap();
    assert_eq!(me.username.as_deref(), Some("admin"));
    assert_eq!(me.email.as_deref(), Some("admin@example.com"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_password_bootstrap_then_authenticated_call() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .and(body_json(json!({ "user": "admin", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": { "userId": "u-admin", "authToken": "tok-admin" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/channels.archive"))
        .and(header("x-user-id", "u-admin"))
        .and(header("x-auth-token", "tok-admin"))
        .and(header("content-type", "application/json"))
        .respond_with(success_response(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_builder(&server).admin_password("s3cret").build().unwrap();
    let client = RocketChatClient::connect(config).await.unwrap();

    client.channels().archive("room-1").await.unwrap();
}

#[tokio::test]
async fn test_login_failure_is_action_error() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(error_response(
            401,
            json!({ "status": "error", "message": "Unauthorized" }),
        ))
        .mount(&server)
        .await;

    let result = client(&server).auth_token("admin", "wrong").await;

    match result {
        Err(RocketChatError::Action { message, .. }) => assert_eq!(message, "Unauthorized"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_config_without_admin_credentials_is_rejected() {
    let server = setup_mock_server().await;

    let result = config_builder(&server).build();

    assert!(matches!(result, Err(RocketChatError::Configuration(_))));
}
