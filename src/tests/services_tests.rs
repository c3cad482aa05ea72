//! Service tests: endpoint paths, request bodies and response shaping.

use crate::client::Query;
use crate::errors::{Resource, RocketChatError};
use crate::fixtures::{self, BASE_URL};
use crate::mocks::{MockHttpTransport, MockResponse, RecordedRequest};
use crate::models::{Integration, Room, RoomType, Setting, Team, TeamMember, User};
use crate::services::{
    ChatServiceTrait, ImServiceTrait, IntegrationsServiceTrait, LivechatServiceTrait,
    LivechatUserType, MessageTarget, RoomLookup, RoomsServiceTrait, ServerServiceTrait,
    SettingsServiceTrait, TeamLookup, TeamsServiceTrait, UserLookup, UsersServiceTrait,
};
use crate::RocketChatClient;
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use test_case::test_case;

fn setup(responses: Vec<MockResponse>) -> (Arc<MockHttpTransport>, RocketChatClient) {
    let transport = Arc::new(MockHttpTransport::new().add_responses(responses));
    let client = fixtures::test_client(transport.clone());
    (transport, client)
}

fn ok() -> MockResponse {
    MockResponse::success(json!({}))
}

fn last(transport: &MockHttpTransport) -> RecordedRequest {
    transport.last_request().expect("a request was sent")
}

fn url(path: &str) -> String {
    format!("{}/{}", BASE_URL, path)
}

fn assert_bad_parameter(err: RocketChatError, resource: Resource, message: &str) {
    match err {
        RocketChatError::BadParameter {
            resource: actual,
            message: actual_message,
        } => {
            assert_eq!(actual, resource);
            assert_eq!(actual_message, message);
        }
        other => panic!("expected bad parameter, got {other:?}"),
    }
}

// Rooms

#[tokio::test]
async fn test_archive_empty_id_sends_nothing() {
    let (transport, client) = setup(vec![]);

    let err = client.channels().archive("").await.unwrap_err();

    assert_bad_parameter(err, Resource::Channel, "Room ID not specified.");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_channel_create_sends_fillable_fields() {
    let (transport, client) = setup(vec![MockResponse::success(json!({
        "channel": fixtures::channel_json()
    }))]);

    let room = client
        .channels()
        .create(&Room::new().with_name("general-updates").with_members(["jdoe"]))
        .await
        .unwrap();

    let request = last(&transport);
    assert_eq!(request.url, url("channels.create"));
    assert_eq!(
        request.body,
        Some(json!({ "name": "general-updates", "members": ["jdoe"] }))
    );
    assert_eq!(room.id(), Some("ByehQjC44FwMeiLbX"));
    assert_eq!(room.room_type, Some(RoomType::Channel));
    assert_eq!(room.members(), ["admin".to_string(), "jdoe".to_string()]);
    assert_eq!(room.read_only, Some(false));
}

#[tokio::test]
async fn test_group_paths_and_payload_keys() {
    let (transport, client) = setup(vec![MockResponse::success(json!({
        "group": fixtures::group_json()
    }))]);

    let room = client.groups().info("ops-private", RoomLookup::Name).await.unwrap();

    let request = last(&transport);
    assert_eq!(request.url, url("groups.info?roomName=ops-private"));
    assert_eq!(request.method, "GET");
    assert_eq!(room.room_type, Some(RoomType::Private));
    assert_eq!(room.read_only, Some(true));
}

#[test_case(RoomType::Direct ; "direct")]
#[test_case(RoomType::Livechat ; "livechat")]
#[tokio::test]
async fn test_set_type_rejects_non_room_types(room_type: RoomType) {
    let (transport, client) = setup(vec![]);

    let err = client.channels().set_type("abc", room_type).await.unwrap_err();

    assert_bad_parameter(err, Resource::Channel, "Bad method parameter value.");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_set_type_sends_code() {
    let (transport, client) = setup(vec![MockResponse::success(json!({
        "channel": fixtures::group_json()
    }))]);

    client.channels().set_type("abc", RoomType::Private).await.unwrap();

    assert_eq!(
        last(&transport).body,
        Some(json!({ "roomId": "abc", "type": "p" }))
    );
}

#[tokio::test]
async fn test_counters_requires_id_or_name() {
    let (transport, client) = setup(vec![MockResponse::json(fixtures::counters_json())]);

    let err = client.channels().counters("", "", "u1").await.unwrap_err();
    assert_bad_parameter(err, Resource::Channel, "Room ID or RoomName not specified.");
    assert_eq!(transport.call_count(), 0);

    let counters = client.channels().counters("", "general", "").await.unwrap();
    assert_eq!(last(&transport).url, url("channels.counters?roomName=general"));
    assert_eq!(counters.members, Some(78));
    assert_eq!(counters.msgs, Some(2134));
    assert!(counters.joined);
}

#[tokio::test]
async fn test_counters_not_joined_reports_nulls() {
    let (transport, client) = setup(vec![MockResponse::json(json!({
        "joined": false,
        "members": null,
        "unreads": null,
        "unreadsFrom": null,
        "msgs": null,
        "latest": null,
        "userMentions": null,
        "success": true
    }))]);

    let counters = client.groups().counters("r1", "", "").await.unwrap();

    assert_eq!(last(&transport).url, url("groups.counters?roomId=r1"));
    assert!(!counters.joined);
    assert_eq!(counters.members, None);
    assert_eq!(counters.unreads, None);
    assert_eq!(counters.msgs, None);
    assert_eq!(counters.user_mentions, None);
    assert_eq!(counters.latest, None);
    assert!(counters.success);
}

#[tokio::test]
async fn test_invite_requires_user_id() {
    let (transport, client) = setup(vec![]);

    let err = client.groups().invite("abc", "").await.unwrap_err();

    assert_bad_parameter(err, Resource::Group, "User ID not specified.");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_kick_returns_room() {
    let (transport, client) = setup(vec![MockResponse::success(json!({
        "channel": fixtures::channel_json()
    }))]);

    let room = client.channels().kick("ByehQjC44FwMeiLbX", "u9").await.unwrap();

    assert_eq!(
        last(&transport).body,
        Some(json!({ "roomId": "ByehQjC44FwMeiLbX", "userId": "u9" }))
    );
    assert_eq!(room.name(), Some("general-updates"));
}

#[tokio::test]
async fn test_set_topic_extracts_topic() {
    let (_, client) = setup(vec![MockResponse::success(json!({ "topic": "Releases" }))]);

    let topic = client.groups().set_topic("abc", "Releases").await.unwrap();

    assert_eq!(topic, json!("Releases"));
}

#[tokio::test]
async fn test_list_all_extracts_plural_key() {
    let (_, client) = setup(vec![MockResponse::success(json!({
        "channels": [fixtures::channel_json()],
        "count": 1,
        "offset": 0,
        "total": 1
    }))]);

    let channels = client.channels().list_all().await.unwrap();

    assert_eq!(channels.as_array().map(Vec::len), Some(1));
}

// Im

#[tokio::test]
async fn test_im_set_topic_uses_im_endpoint() {
    let (transport, client) = setup(vec![MockResponse::success(json!({ "topic": "hi" }))]);

    client.im().set_topic("dm1", "hi").await.unwrap();

    assert_eq!(last(&transport).url, url("im.setTopic"));
}

#[tokio::test]
async fn test_im_empty_id() {
    let (transport, client) = setup(vec![]);

    let err = client.im().open("").await.unwrap_err();

    assert_bad_parameter(err, Resource::Im, "Im ID not specified.");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_im_others_messages_query() {
    let (transport, client) = setup(vec![MockResponse::success(json!({ "messages": [] }))]);

    client.im().others_messages("dm1").await.unwrap();

    assert_eq!(last(&transport).url, url("im.messages.others?roomId=dm1"));
}

// Chat

#[tokio::test]
async fn test_post_message_target_overrides_params() {
    let (transport, client) = setup(vec![MockResponse::success(json!({
        "ts": 1709633700000u64,
        "channel": "general",
        "message": fixtures::message_json()
    }))]);

    let mut params = Map::new();
    params.insert("text".to_string(), json!("Deploy finished"));
    params.insert("channel".to_string(), json!("#elsewhere"));

    let result = client
        .chat()
        .post_message("#general", MessageTarget::Channel, params)
        .await
        .unwrap();

    assert_eq!(
        last(&transport).body,
        Some(json!({ "text": "Deploy finished", "channel": "#general" }))
    );
    assert_eq!(result["success"], json!(true));
}

#[tokio::test]
async fn test_chat_update_extracts_message() {
    let (transport, client) = setup(vec![MockResponse::success(json!({
        "message": fixtures::message_json()
    }))]);

    let message = client.chat().update("r1", "m1", "edited").await.unwrap();

    assert_eq!(
        last(&transport).body,
        Some(json!({ "roomId": "r1", "msgId": "m1", "text": "edited" }))
    );
    assert_eq!(message["_id"], json!("7aDSXtjMA3KPLxLjt"));
}

#[tokio::test]
async fn test_chat_delete_requires_message_id() {
    let (transport, client) = setup(vec![]);

    let err = client.chat().delete("r1", "", true).await.unwrap_err();

    assert_bad_parameter(err, Resource::Chat, "Message ID not specified.");
    assert_eq!(transport.call_count(), 0);
}

// Teams

#[tokio::test]
async fn test_team_create_and_info() {
    let (transport, client) = setup(vec![
        MockResponse::success(json!({ "team": fixtures::team_json() })),
        MockResponse::success(json!({ "teamInfo": fixtures::team_json() })),
    ]);

    let team = client
        .teams()
        .create(&Team::new().with_name("platform").with_type(0).with_members(["u1"]))
        .await
        .unwrap();
    assert_eq!(
        last(&transport).body,
        Some(json!({ "name": "platform", "members": ["u1"], "type": 0 }))
    );
    assert_eq!(team.id(), Some("6c8c3cfb0bf95d4c4fd2a3a3"));

    let info = client.teams().info("platform", TeamLookup::Name).await.unwrap();
    assert_eq!(last(&transport).url, url("teams.info?teamName=platform"));
    assert_eq!(info.team_type, Some(0));
}

#[tokio::test]
async fn test_team_remove_room_and_members() {
    let (transport, client) = setup(vec![ok(), ok(), ok()]);

    client.teams().remove_room("t1", "r1").await.unwrap();
    assert_eq!(last(&transport).url, url("teams.removeRoom"));
    assert_eq!(last(&transport).body, Some(json!({ "teamId": "t1", "roomId": "r1" })));

    client.teams().list_members("t1").await.unwrap();
    assert_eq!(last(&transport).url, url("teams.members?teamId=t1"));

    client
        .teams()
        .add_members("t1", &[TeamMember::new("u1", ["member"])])
        .await
        .unwrap();
    assert_eq!(
        last(&transport).body,
        Some(json!({ "teamId": "t1", "members": [{ "userId": "u1", "roles": ["member"] }] }))
    );
}

#[test_case(Value::Null ; "null")]
#[test_case(json!({}) ; "empty object")]
#[test_case(json!([]) ; "empty list")]
#[test_case(json!("") ; "empty string")]
#[test_case(json!(false) ; "false")]
#[test_case(json!(0) ; "zero")]
#[tokio::test]
async fn test_team_update_rejects_empty_data(data: Value) {
    let (transport, client) = setup(vec![]);

    let err = client.teams().update("t1", data).await.unwrap_err();

    assert_bad_parameter(err, Resource::Team, "Data not specified.");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_team_remove_member_requires_user() {
    let (transport, client) = setup(vec![]);

    let err = client.teams().remove_member("t1", "", &[]).await.unwrap_err();
    assert_bad_parameter(err, Resource::Team, "Member ID not specified.");

    assert_eq!(transport.call_count(), 0);
}

// Users

#[tokio::test]
async fn test_user_info_with_rooms() {
    let mut user = fixtures::user_json();
    user["rooms"] = json!([{ "_id": "s1", "rid": "GENERAL", "name": "general", "t": "c" }]);
    let (transport, client) = setup(vec![MockResponse::success(json!({ "user": user }))]);

    let user = client.users().info("jdoe", UserLookup::Username, true).await.unwrap();

    let request = last(&transport);
    assert_eq!(request.query_param("username").as_deref(), Some("jdoe"));
    assert_eq!(request.query_param("userRooms").as_deref(), Some("1"));
    assert_eq!(user.email.as_deref(), Some("jdoe@example.com"));
    assert_eq!(user.rooms.map(|rooms| rooms.len()), Some(1));
}

#[tokio::test]
async fn test_user_update_requires_id() {
    let (transport, client) = setup(vec![]);

    let err = client
        .users()
        .update(&User::new().with_name("John"))
        .await
        .unwrap_err();

    assert_bad_parameter(err, Resource::User, "user ID is required for user update");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_user_update_wraps_data() {
    let (transport, client) = setup(vec![MockResponse::success(json!({
        "user": fixtures::user_json()
    }))]);

    client
        .users()
        .update(&User::new().with_id("BsNr28znDkG8aeo7W").with_active(false))
        .await
        .unwrap();

    assert_eq!(
        last(&transport).body,
        Some(json!({ "userId": "BsNr28znDkG8aeo7W", "data": { "active": false } }))
    );
}

#[tokio::test]
async fn test_register_sends_pass() {
    let (transport, client) = setup(vec![MockResponse::success(json!({
        "user": fixtures::user_json()
    }))]);

    client
        .users()
        .register(
            &User::new()
                .with_username("jdoe")
                .with_email("jdoe@example.com")
                .with_password("pw")
                .with_name("John Doe"),
        )
        .await
        .unwrap();

    let body = last(&transport).body.unwrap();
    assert_eq!(body["pass"], json!("pw"));
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_create_token_returns_token_user() {
    let (transport, client) = setup(vec![MockResponse::success(json!({
        "data": { "userId": "u1", "authToken": "pat" }
    }))]);

    let user = client.users().create_token("u1", UserLookup::Id).await.unwrap();

    assert_eq!(last(&transport).body, Some(json!({ "userId": "u1" })));
    assert_eq!(user.auth_token(), Some("pat"));
}

#[test_case(true, json!([]) ; "only users")]
#[test_case(false, json!({ "users": [], "count": 0, "offset": 0, "total": 0, "success": true }) ; "whole envelope")]
#[tokio::test]
async fn test_user_list_extraction(only_users: bool, expected: Value) {
    let (_, client) = setup(vec![MockResponse::success(json!({
        "users": [], "count": 0, "offset": 0, "total": 0
    }))]);

    let result = client.users().list(Query::new(), only_users).await.unwrap();

    assert_eq!(result, expected);
}

#[tokio::test]
async fn test_set_avatar_lookup_key() {
    let (transport, client) = setup(vec![ok()]);

    client
        .users()
        .set_avatar("https://example.com/a.png", "jdoe", UserLookup::Username)
        .await
        .unwrap();

    assert_eq!(
        last(&transport).body,
        Some(json!({ "avatarUrl": "https://example.com/a.png", "username": "jdoe" }))
    );
}

// Integrations

#[tokio::test]
async fn test_integration_create_requires_fields() {
    let (transport, client) = setup(vec![]);

    let err = client
        .integrations()
        .create(&Integration::new().with_type("webhook-outgoing").with_name("ci"))
        .await
        .unwrap_err();

    assert_bad_parameter(err, Resource::Integration, "Missing required parameter.");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_integration_create() {
    let (transport, client) = setup(vec![MockResponse::success(json!({
        "integration": fixtures::integration_json()
    }))]);

    let integration = client
        .integrations()
        .create(
            &Integration::new()
                .with_type("webhook-outgoing")
                .with_name("ci-notify")
                .with_enabled(true)
                .with_username("rocket.cat")
                .with_urls(["https://ci.example.com/hook"])
                .with_script_enabled(false)
                .with_channel("#builds"),
        )
        .await
        .unwrap();

    assert_eq!(last(&transport).url, url("integrations.create"));
    assert_eq!(integration.id(), Some("WMQDChpnYTRmFre9h"));
    assert_eq!(integration.event.as_deref(), Some("sendMessage"));
}

#[tokio::test]
async fn test_integration_remove() {
    let (transport, client) = setup(vec![MockResponse::success(json!({
        "integration": fixtures::integration_json()
    }))]);

    client
        .integrations()
        .remove("WMQDChpnYTRmFre9h", "webhook-outgoing")
        .await
        .unwrap();

    assert_eq!(
        last(&transport).body,
        Some(json!({ "integrationId": "WMQDChpnYTRmFre9h", "type": "webhook-outgoing" }))
    );
}

// Livechat

#[tokio::test]
async fn test_livechat_department_methods() {
    let (transport, client) = setup(vec![
        MockResponse::success(json!({ "departments": [] })),
        MockResponse::success(json!({ "department": { "_id": "d1" } })),
        ok(),
    ]);

    client.livechat().departments().await.unwrap();
    assert_eq!(last(&transport).url, url("livechat/department"));

    client
        .livechat()
        .update_department("d1", json!({ "department": { "name": "Sales" } }))
        .await
        .unwrap();
    assert_eq!(last(&transport).method, "PUT");
    assert_eq!(last(&transport).url, url("livechat/department/d1"));

    let removed = client.livechat().remove_department("d1").await.unwrap();
    assert_eq!(last(&transport).method, "DELETE");
    assert_eq!(removed, json!(true));
}

#[tokio::test]
async fn test_livechat_remove_user_under_api_root() {
    let (transport, client) = setup(vec![ok()]);

    client
        .livechat()
        .remove_user("u1", LivechatUserType::Manager)
        .await
        .unwrap();

    let request = last(&transport);
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.url, url("livechat/users/manager/u1"));
}

// Settings

#[tokio::test]
async fn test_settings_get_and_update() {
    let (transport, client) = setup(vec![
        MockResponse::success(json!({ "_id": "Site_Name", "value": "Rocket.Chat" })),
        ok(),
    ]);

    let setting = client.settings().get("Site_Name").await.unwrap();
    assert_eq!(last(&transport).url, url("settings/Site_Name"));
    assert_eq!(setting.value, Some(json!("Rocket.Chat")));

    client
        .settings()
        .update(&Setting::new("Site_Name", "Acme Chat"))
        .await
        .unwrap();
    assert_eq!(last(&transport).body, Some(json!({ "value": "Acme Chat" })));
}

#[tokio::test]
async fn test_settings_update_requires_id() {
    let (transport, client) = setup(vec![]);

    let err = client.settings().update(&Setting::default()).await.unwrap_err();

    assert_bad_parameter(err, Resource::Setting, "setting ID is not specified");
    assert_eq!(transport.call_count(), 0);
}

// Server

#[test_case(json!({ "version": "6.5.0", "success": true }) ; "anonymous")]
#[test_case(json!({ "info": { "version": "6.5.0", "build": { "nodeVersion": "v14" } }, "success": true }) ; "authenticated")]
#[tokio::test]
async fn test_server_info_outside_api_root(body: Value) {
    let (transport, client) = setup(vec![MockResponse::json(body)]);

    let version = client.server().version().await.unwrap();

    assert_eq!(last(&transport).url, "http://localhost:3000/api/info");
    assert_eq!(version.as_deref(), Some("6.5.0"));
}
