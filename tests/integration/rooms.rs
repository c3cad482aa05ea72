//! Rooms over the wire: query strings, pagination and envelopes

use super::*;
use rocketchat_client::errors::{Resource, RocketChatError};
use rocketchat_client::models::Room;
use rocketchat_client::services::{HistoryQuery, RoomLookup};
use rocketchat_client::{Paginate, RoomsServiceTrait};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::Mock;

#[tokio::test]
async fn test_history_with_one_shot_count() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/channels.history"))
        .and(query_param("roomId", "abc"))
        .and(query_param("count", "20"))
        .respond_with(success_response(json!({ "messages": [{ "_id": "m1", "msg": "hi" }] })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/channels.history"))
        .and(query_param("roomId", "abc"))
        .respond_with(success_response(json!({ "messages": [] })))
        .mount(&server)
        .await;

    let client = client(&server);
    let first = client
        .channels()
        .take(20)
        .history("abc", HistoryQuery::new())
        .await
        .unwrap();
    assert_eq!(first.as_array().map(Vec::len), Some(1));

    client.channels().history("abc", HistoryQuery::new()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].url.query(), Some("roomId=abc"));
}

#[tokio::test]
async fn test_list_without_query_has_no_question_mark() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups.list"))
        .respond_with(success_response(json!({ "groups": [] })))
        .mount(&server)
        .await;

    client(&server).groups().list_all().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_create_sends_projection() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/groups.create"))
        .and(body_json(json!({ "name": "ops", "readOnly": false })))
        .respond_with(success_response(json!({
            "group": { "_id": "g1", "name": "ops", "t": "p", "ro": false }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let room = client(&server)
        .groups()
        .create(&Room::new().with_name("ops").with_read_only(false))
        .await
        .unwrap();

    assert_eq!(room.id(), Some("g1"));
}

#[tokio::test]
async fn test_success_false_at_200() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/channels.info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "not allowed"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .channels()
        .info("abc", RoomLookup::Id)
        .await
        .unwrap_err();

    match err {
        RocketChatError::Action { resource, message } => {
            assert_eq!(resource, Resource::Channel);
            assert_eq!(message, "not allowed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_html_error_page_uses_generic_message() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/channels.delete"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client(&server).channels().delete("abc").await.unwrap_err();

    assert_eq!(err.message(), Some("something went wrong"));
    assert!(!err.is_transport());
}
