//! Transport failures stay distinct from server-reported ones

use super::*;
use rocketchat_client::errors::{NetworkError, RocketChatError};
use rocketchat_client::ImServiceTrait;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::Mock;

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let server = setup_mock_server().await;
    let config = config(&server);
    drop(server);

    let client = RocketChatClient::new(config).unwrap();
    let err = client.im().list().await.unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err, RocketChatError::Network(_)));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/im.list"))
        .respond_with(success_response(json!({ "ims": [] })).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let config = config_builder(&server)
        .admin_login(false)
        .timeout(Duration::from_millis(200))
        .build_unchecked();
    let client = RocketChatClient::new(config).unwrap();

    let err = client.im().list().await.unwrap_err();

    assert!(matches!(err, RocketChatError::Network(NetworkError::Timeout)));
}
