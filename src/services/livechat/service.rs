//! Livechat service implementation.

use super::*;
use crate::client::{ApiClient, FieldPath, Query};
use crate::errors::{Resource, RocketChatResult};
use crate::services::require;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

const DEPARTMENT_PATH: &str = "livechat/department";
const MISSING_DEPARTMENT_ID: &str = "Department ID not specified.";
const MISSING_USER_ID: &str = "User ID not specified.";

fn department_path(id: &str) -> String {
    format!("{}/{}", DEPARTMENT_PATH, id)
}

fn users_path(user_type: LivechatUserType) -> String {
    format!("livechat/users/{}", user_type)
}

fn user_path(user_type: LivechatUserType, id: &str) -> String {
    format!("livechat/users/{}/{}", user_type, id)
}

/// Trait for livechat service operations
#[async_trait]
pub trait LivechatServiceTrait: Send + Sync {
    /// All departments
    async fn departments(&self) -> RocketChatResult<Value>;

    /// Create a department; `department` is sent as-is
    async fn add_department(&self, department: Value) -> RocketChatResult<Value>;

    /// One department with its agents
    async fn department(&self, id: &str) -> RocketChatResult<Value>;

    /// Replace a department's data
    async fn update_department(&self, id: &str, department: Value) -> RocketChatResult<Value>;

    /// Delete a department
    async fn remove_department(&self, id: &str) -> RocketChatResult<Value>;

    /// Forward an incoming SMS from a provider such as `twilio`
    async fn sms_incoming(&self, service: &str, payload: Value) -> RocketChatResult<Value>;

    /// Staff of one role
    async fn users(&self, user_type: LivechatUserType) -> RocketChatResult<Value>;

    /// Grant a role; `payload` is usually `{"username": ...}`
    async fn add_user(&self, user_type: LivechatUserType, payload: Value) -> RocketChatResult<Value>;

    /// One staff member of a role
    async fn user(&self, id: &str, user_type: LivechatUserType) -> RocketChatResult<Value>;

    /// Revoke a role
    async fn remove_user(&self, id: &str, user_type: LivechatUserType) -> RocketChatResult<Value>;
}

/// Livechat service implementation
#[derive(Clone)]
pub struct LivechatService {
    pub(crate) api: Arc<ApiClient>,
}

impl LivechatService {
    /// Create a new livechat service
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl LivechatServiceTrait for LivechatService {
    #[instrument(skip(self))]
    async fn departments(&self) -> RocketChatResult<Value> {
        self.api
            .get(DEPARTMENT_PATH, Query::new(), Resource::Livechat, FieldPath::One("departments"))
            .await
    }

    #[instrument(skip(self, department))]
    async fn add_department(&self, department: Value) -> RocketChatResult<Value> {
        self.api
            .post(DEPARTMENT_PATH, department, Resource::Livechat, FieldPath::Root)
            .await
    }

    #[instrument(skip(self))]
    async fn department(&self, id: &str) -> RocketChatResult<Value> {
        require(Resource::Livechat, id, MISSING_DEPARTMENT_ID)?;
        self.api
            .get(&department_path(id), Query::new(), Resource::Livechat, FieldPath::Root)
            .await
    }

    #[instrument(skip(self, department))]
    async fn update_department(&self, id: &str, department: Value) -> RocketChatResult<Value> {
        require(Resource::Livechat, id, MISSING_DEPARTMENT_ID)?;
        self.api
            .put(&department_path(id), department, Resource::Livechat, FieldPath::Root)
            .await
    }

    #[instrument(skip(self))]
    async fn remove_department(&self, id: &str) -> RocketChatResult<Value> {
        require(Resource::Livechat, id, MISSING_DEPARTMENT_ID)?;
        self.api
            .delete(&department_path(id), Resource::Livechat, FieldPath::One("success"))
            .await
    }

    #[instrument(skip(self, payload))]
    async fn sms_incoming(&self, service: &str, payload: Value) -> RocketChatResult<Value> {
        require(Resource::Livechat, service, "SMS service not specified.")?;
        self.api
            .post(
                &format!("livechat/sms-incoming/{}", service),
                payload,
                Resource::Livechat,
                FieldPath::Root,
            )
            .await
    }

    #[instrument(skip(self))]
    async fn users(&self, user_type: LivechatUserType) -> RocketChatResult<Value> {
        self.api
            .get(&users_path(user_type), Query::new(), Resource::Livechat, FieldPath::One("users"))
            .await
    }

    #[instrument(skip(self, payload))]
    async fn add_user(&self, user_type: LivechatUserType, payload: Value) -> RocketChatResult<Value> {
        self.api
            .post(&users_path(user_type), payload, Resource::Livechat, FieldPath::One("user"))
            .await
    }

    #[instrument(skip(self))]
    async fn user(&self, id: &str, user_type: LivechatUserType) -> RocketChatResult<Value> {
        require(Resource::Livechat, id, MISSING_USER_ID)?;
        self.api
            .get(&user_path(user_type, id), Query::new(), Resource::Livechat, FieldPath::One("user"))
            .await
    }

    #[instrument(skip(self))]
    async fn remove_user(&self, id: &str, user_type: LivechatUserType) -> RocketChatResult<Value> {
        require(Resource::Livechat, id, MISSING_USER_ID)?;
        self.api
            .delete(&user_path(user_type, id), Resource::Livechat, FieldPath::One("success"))
            .await
    }
}

impl std::fmt::Debug for LivechatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LivechatService").finish_non_exhaustive()
    }
}
