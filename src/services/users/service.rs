//! Users service implementation.

use super::*;
use crate::client::{ApiClient, FieldPath, Query};
use crate::errors::{Resource, RocketChatResult};
use crate::models::{Entity, User};
use crate::services::require;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, instrument};

const MISSING_USER_ID: &str = "user ID not specified";
const MISSING_UPDATE_ID: &str = "user ID is required for user update";

/// Trait for users service operations
#[async_trait]
pub trait UsersServiceTrait: Send + Sync {
    /// Log in with a username and password.
    ///
    /// The returned user carries only `id` and `auth_token`. With
    /// `use_as_client_auth` the pair also becomes this client's session.
    async fn login(
        &self,
        username: &str,
        password: &str,
        use_as_client_auth: bool,
    ) -> RocketChatResult<User>;

    /// End the current session on the server
    async fn logout(&self) -> RocketChatResult<Value>;

    /// The authenticated user
    async fn me(&self) -> RocketChatResult<User>;

    /// Create a user from its fillable fields
    async fn create(&self, user: &User) -> RocketChatResult<User>;

    /// Update an existing user; the id selects the user, the other fillable fields are sent
    async fn update(&self, user: &User) -> RocketChatResult<User>;

    /// User details; `with_rooms` also lists the user's room memberships
    async fn info(&self, user: &str, lookup: UserLookup, with_rooms: bool) -> RocketChatResult<User>;

    /// Delete a user by id
    async fn delete(&self, user_id: &str) -> RocketChatResult<Value>;

    /// List users.
    ///
    /// `params` is passed through as query keys (`query`, `fields`, ...).
    /// With `only_users` the `users` array is returned, otherwise the whole
    /// envelope including `count`, `offset` and `total`.
    async fn list(&self, params: Query, only_users: bool) -> RocketChatResult<Value>;

    /// Create a personal token for a user; the result carries `id` and `auth_token`
    async fn create_token(&self, user: &str, lookup: UserLookup) -> RocketChatResult<User>;

    /// Avatar of a user
    async fn get_avatar(&self, user: &str, lookup: UserLookup) -> RocketChatResult<Value>;

    /// Presence of a user, e.g. `online` or `away`
    async fn get_presence(&self, user: &str, lookup: UserLookup) -> RocketChatResult<Value>;

    /// Self-register a user; the password travels as `pass`
    async fn register(&self, user: &User) -> RocketChatResult<User>;

    /// Reset a user's avatar to the default
    async fn reset_avatar(&self, user: &str, lookup: UserLookup) -> RocketChatResult<Value>;

    /// Point a user's avatar at a URL
    async fn set_avatar(
        &self,
        avatar_url: &str,
        user: &str,
        lookup: UserLookup,
    ) -> RocketChatResult<Value>;
}

/// Users service implementation
#[derive(Clone)]
pub struct UsersService {
    pub(crate) api: Arc<ApiClient>,
}

impl UsersService {
    /// Create a new users service
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UsersServiceTrait for UsersService {
    #[instrument(skip_all, fields(username = %username, promote = use_as_client_auth))]
    async fn login(
        &self,
        username: &str,
        password: &str,
        use_as_client_auth: bool,
    ) -> RocketChatResult<User> {
        let token = self.api.auth_token(username, password).await?;

        let mut user = User::new().with_id(token.user_id.clone());
        user.auth_token = Some(token.expose_token().to_string());

        if use_as_client_auth {
            info!(user_id = %token.user_id, "Promoting login to client session");
            self.api.session().set_token(token);
        }

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> RocketChatResult<Value> {
        self.api
            .get("logout", Query::new(), Resource::User, FieldPath::Two("data", "message"))
            .await
    }

    #[instrument(skip(self))]
    async fn me(&self) -> RocketChatResult<User> {
        let data = self
            .api
            .get("me", Query::new(), Resource::User, FieldPath::Root)
            .await?;
        User::from_api(data)
    }

    #[instrument(skip(self, user), fields(username = ?user.username))]
    async fn create(&self, user: &User) -> RocketChatResult<User> {
        let data = self
            .api
            .post(
                "users.create",
                Value::Object(user.fillable_data()),
                Resource::User,
                FieldPath::One("user"),
            )
            .await?;
        User::from_api(data)
    }

    #[instrument(skip(self, user), fields(user_id = ?user.id))]
    async fn update(&self, user: &User) -> RocketChatResult<User> {
        let user_id = user.id().unwrap_or_default();
        require(Resource::User, user_id, MISSING_UPDATE_ID)?;

        let mut data = user.fillable_data();
        data.remove("id");

        let body = json!({ "userId": user_id, "data": data });
        let data = self
            .api
            .post("users.update", body, Resource::User, FieldPath::One("user"))
            .await?;
        User::from_api(data)
    }

    #[instrument(skip(self))]
    async fn info(&self, user: &str, lookup: UserLookup, with_rooms: bool) -> RocketChatResult<User> {
        require(Resource::User, user, MISSING_USER_ID)?;
        let mut query = Query::new().with(lookup.as_str(), user);
        if with_rooms {
            query.set("userRooms", "1");
        }

        let data = self
            .api
            .get("users.info", query, Resource::User, FieldPath::One("user"))
            .await?;
        User::from_api(data)
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: &str) -> RocketChatResult<Value> {
        require(Resource::User, user_id, MISSING_USER_ID)?;
        self.api
            .post("users.delete", json!({ "userId": user_id }), Resource::User, FieldPath::Root)
            .await
    }

    #[instrument(skip(self, params))]
    async fn list(&self, params: Query, only_users: bool) -> RocketChatResult<Value> {
        let field = if only_users {
            FieldPath::One("users")
        } else {
            FieldPath::Root
        };
        self.api.get("users.list", params, Resource::User, field).await
    }

    #[instrument(skip(self))]
    async fn create_token(&self, user: &str, lookup: UserLookup) -> RocketChatResult<User> {
        require(Resource::User, user, MISSING_USER_ID)?;
        let data = self
            .api
            .post(
                "users.createToken",
                json!({ lookup.as_str(): user }),
                Resource::User,
                FieldPath::One("data"),
            )
            .await?;
        User::from_api(data)
    }

    #[instrument(skip(self))]
    async fn get_avatar(&self, user: &str, lookup: UserLookup) -> RocketChatResult<Value> {
        require(Resource::User, user, MISSING_USER_ID)?;
        self.api
            .get(
                "users.getAvatar",
                Query::new().with(lookup.as_str(), user),
                Resource::User,
                FieldPath::Root,
            )
            .await
    }

    #[instrument(skip(self))]
    async fn get_presence(&self, user: &str, lookup: UserLookup) -> RocketChatResult<Value> {
        require(Resource::User, user, MISSING_USER_ID)?;
        self.api
            .get(
                "users.getPresence",
                Query::new().with(lookup.as_str(), user),
                Resource::User,
                FieldPath::One("presence"),
            )
            .await
    }

    #[instrument(skip(self, user), fields(username = ?user.username))]
    async fn register(&self, user: &User) -> RocketChatResult<User> {
        let mut body = user.fillable_data();
        if let Some(password) = body.remove("password") {
            body.insert("pass".to_string(), password);
        }

        let data = self
            .api
            .post(
                "users.register",
                Value::Object(body),
                Resource::User,
                FieldPath::One("user"),
            )
            .await?;
        User::from_api(data)
    }

    #[instrument(skip(self))]
    async fn reset_avatar(&self, user: &str, lookup: UserLookup) -> RocketChatResult<Value> {
        require(Resource::User, user, MISSING_USER_ID)?;
        self.api
            .post(
                "users.resetAvatar",
                json!({ lookup.as_str(): user }),
                Resource::User,
                FieldPath::Root,
            )
            .await
    }

    #[instrument(skip(self))]
    async fn set_avatar(
        &self,
        avatar_url: &str,
        user: &str,
        lookup: UserLookup,
    ) -> RocketChatResult<Value> {
        require(Resource::User, user, "User ID not specified.")?;
        self.api
            .post(
                "users.setAvatar",
                json!({ "avatarUrl": avatar_url, lookup.as_str(): user }),
                Resource::User,
                FieldPath::Root,
            )
            .await
    }
}

impl std::fmt::Debug for UsersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsersService").finish_non_exhaustive()
    }
}
