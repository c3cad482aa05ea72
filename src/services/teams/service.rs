//! Teams service implementation.

use super::*;
use crate::client::response::truthy;
use crate::client::{ApiClient, FieldPath, Query};
use crate::errors::{Resource, RocketChatError, RocketChatResult};
use crate::models::{Entity, Team, TeamMember};
use crate::services::require;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

const MISSING_TEAM_ID: &str = "Team ID not specified.";
const MISSING_ROOM_ID: &str = "Room ID not specified.";
const MISSING_MEMBER_ID: &str = "Member ID not specified.";
const MISSING_DATA: &str = "Data not specified.";

/// Trait for teams service operations
#[async_trait]
pub trait TeamsServiceTrait: Send + Sync {
    /// Create a team from the team's fillable fields
    async fn create(&self, team: &Team) -> RocketChatResult<Team>;

    /// Attach existing rooms to the team
    async fn add_rooms(&self, team_id: &str, rooms: &[&str]) -> RocketChatResult<Value>;

    /// Detach a room from the team
    async fn remove_room(&self, team_id: &str, room_id: &str) -> RocketChatResult<Value>;

    /// Mark a team room as auto-joined (or not) for new members
    async fn update_room(&self, room_id: &str, is_default: bool) -> RocketChatResult<Value>;

    /// Rooms of the team
    async fn list_rooms(&self, team_id: &str) -> RocketChatResult<Value>;

    /// Members of the team
    async fn list_members(&self, team_id: &str) -> RocketChatResult<Value>;

    /// Add members with their team roles
    async fn add_members(&self, team_id: &str, members: &[TeamMember]) -> RocketChatResult<Value>;

    /// Remove a member, optionally also from the listed team rooms
    async fn remove_member(
        &self,
        team_id: &str,
        user_id: &str,
        rooms: &[&str],
    ) -> RocketChatResult<Value>;

    /// Team details by id or name
    async fn info(&self, team: &str, lookup: TeamLookup) -> RocketChatResult<Team>;

    /// Delete the team, also deleting the listed team rooms
    async fn delete(&self, team_id: &str, rooms_to_remove: &[&str]) -> RocketChatResult<Value>;

    /// Update team properties such as `name` or `type`.
    ///
    /// Empty data (`null`, `false`, `0`, `""`, `[]` or `{}`) is rejected.
    async fn update(&self, team_id: &str, data: Value) -> RocketChatResult<Value>;
}

/// Teams service implementation
#[derive(Clone)]
pub struct TeamsService {
    pub(crate) api: Arc<ApiClient>,
}

impl TeamsService {
    /// Create a new teams service
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    async fn send_post(&self, path: &str, body: Value) -> RocketChatResult<Value> {
        self.api
            .post(path, body, Resource::Team, FieldPath::Root)
            .await
    }
}

#[async_trait]
impl TeamsServiceTrait for TeamsService {
    #[instrument(skip(self))]
    async fn create(&self, team: &Team) -> RocketChatResult<Team> {
        let data = self
            .api
            .post(
                "teams.create",
                Value::Object(team.fillable_data()),
                Resource::Team,
                FieldPath::One("team"),
            )
            .await?;
        Team::from_api(data)
    }

    #[instrument(skip(self))]
    async fn add_rooms(&self, team_id: &str, rooms: &[&str]) -> RocketChatResult<Value> {
        require(Resource::Team, team_id, MISSING_TEAM_ID)?;
        self.send_post("teams.addRooms", json!({ "teamId": team_id, "rooms": rooms }))
            .await
    }

    #[instrument(skip(self))]
    async fn remove_room(&self, team_id: &str, room_id: &str) -> RocketChatResult<Value> {
        require(Resource::Team, team_id, MISSING_TEAM_ID)?;
        require(Resource::Team, room_id, MISSING_ROOM_ID)?;
        self.send_post("teams.removeRoom", json!({ "teamId": team_id, "roomId": room_id }))
            .await
    }

    #[instrument(skip(self))]
    async fn update_room(&self, room_id: &str, is_default: bool) -> RocketChatResult<Value> {
        require(Resource::Team, room_id, MISSING_ROOM_ID)?;
        self.send_post("teams.updateRoom", json!({ "roomId": room_id, "isDefault": is_default }))
            .await
    }

    #[instrument(skip(self))]
    async fn list_rooms(&self, team_id: &str) -> RocketChatResult<Value> {
        require(Resource::Team, team_id, MISSING_TEAM_ID)?;
        self.api
            .get(
                "teams.listRooms",
                Query::new().with("teamId", team_id),
                Resource::Team,
                FieldPath::Root,
            )
            .await
    }

    #[instrument(skip(self))]
    async fn list_members(&self, team_id: &str) -> RocketChatResult<Value> {
        require(Resource::Team, team_id, MISSING_TEAM_ID)?;
        self.api
            .get(
                "teams.members",
                Query::new().with("teamId", team_id),
                Resource::Team,
                FieldPath::Root,
            )
            .await
    }

    #[instrument(skip(self, members), fields(member_count = members.len()))]
    async fn add_members(&self, team_id: &str, members: &[TeamMember]) -> RocketChatResult<Value> {
        require(Resource::Team, team_id, MISSING_TEAM_ID)?;
        self.send_post("teams.addMembers", json!({ "teamId": team_id, "members": members }))
            .await
    }

    #[instrument(skip(self))]
    async fn remove_member(
        &self,
        team_id: &str,
        user_id: &str,
        rooms: &[&str],
    ) -> RocketChatResult<Value> {
        require(Resource::Team, team_id, MISSING_TEAM_ID)?;
        require(Resource::Team, user_id, MISSING_MEMBER_ID)?;
        self.send_post(
            "teams.removeMember",
            json!({ "teamId": team_id, "userId": user_id, "rooms": rooms }),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn info(&self, team: &str, lookup: TeamLookup) -> RocketChatResult<Team> {
        require(Resource::Team, team, MISSING_TEAM_ID)?;
        let data = self
            .api
            .get(
                "teams.info",
                Query::new().with(lookup.as_str(), team),
                Resource::Team,
                FieldPath::One("teamInfo"),
            )
            .await?;
        Team::from_api(data)
    }

    #[instrument(skip(self))]
    async fn delete(&self, team_id: &str, rooms_to_remove: &[&str]) -> RocketChatResult<Value> {
        require(Resource::Team, team_id, MISSING_TEAM_ID)?;
        self.send_post(
            "teams.delete",
            json!({ "teamId": team_id, "roomsToRemove": rooms_to_remove }),
        )
        .await
    }

    #[instrument(skip(self, data))]
    async fn update(&self, team_id: &str, data: Value) -> RocketChatResult<Value> {
        require(Resource::Team, team_id, MISSING_TEAM_ID)?;
        let empty = match &data {
            Value::Object(map) => map.is_empty(),
            other => !truthy(other),
        };
        if empty {
            return Err(RocketChatError::bad_parameter(Resource::Team, MISSING_DATA));
        }
        self.send_post("teams.update", json!({ "teamId": team_id, "data": data }))
            .await
    }
}

impl std::fmt::Debug for TeamsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamsService").finish_non_exhaustive()
    }
}
