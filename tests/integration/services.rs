//! Endpoints outside the dotted method style

use super::*;
use rocketchat_client::services::LivechatUserType;
use rocketchat_client::{LivechatServiceTrait, ServerServiceTrait, SettingsServiceTrait};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::Mock;

#[tokio::test]
async fn test_server_info_is_outside_api_root() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": "6.5.0",
            "success": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = client(&server).server().info().await.unwrap();

    assert_eq!(info.version.as_deref(), Some("6.5.0"));
    assert!(info.extra.is_empty());
}

#[tokio::test]
async fn test_livechat_add_and_remove_agent() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/livechat/users/agent"))
        .and(body_json(json!({ "username": "jdoe" })))
        .respond_with(success_response(json!({
            "user": { "_id": "u1", "username": "jdoe" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/livechat/users/agent/u1"))
        .respond_with(success_response(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let user = client
        .livechat()
        .add_user(LivechatUserType::Agent, json!({ "username": "jdoe" }))
        .await
        .unwrap();
    assert_eq!(user["_id"], json!("u1"));

    let removed = client
        .livechat()
        .remove_user("u1", LivechatUserType::Agent)
        .await
        .unwrap();
    assert_eq!(removed, json!(true));
}

#[tokio::test]
async fn test_settings_update_posts_value() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/settings/Accounts_AllowDeleteOwnAccount"))
        .and(body_json(json!({ "value": false })))
        .respond_with(success_response(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .settings()
        .update(&rocketchat_client::models::Setting::new(
            "Accounts_AllowDeleteOwnAccount",
            false,
        ))
        .await
        .unwrap();
}
