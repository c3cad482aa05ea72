//! Service implementations for Rocket.Chat API endpoints.
//!
//! Each service module provides methods for interacting with a specific
//! resource group of the REST API.

pub mod chat;
pub mod im;
pub mod integrations;
pub mod livechat;
pub mod rooms;
pub mod server;
pub mod settings;
pub mod teams;
pub mod users;

pub use chat::{ChatService, ChatServiceTrait, MessageTarget};
pub use im::{ImService, ImServiceTrait};
pub use integrations::{IntegrationsService, IntegrationsServiceTrait};
pub use livechat::{LivechatService, LivechatServiceTrait, LivechatUserType};
pub use rooms::{HistoryQuery, RoomKind, RoomLookup, RoomsService, RoomsServiceTrait};
pub use server::{ServerInfo, ServerService, ServerServiceTrait};
pub use settings::{SettingsService, SettingsServiceTrait};
pub use teams::{TeamLookup, TeamsService, TeamsServiceTrait};
pub use users::{UserLookup, UsersService, UsersServiceTrait};

use crate::client::{ApiClient, Sort};
use crate::errors::{Resource, RocketChatError, RocketChatResult};

/// One-shot pagination for the next request made through this handle.
///
/// The keys apply to exactly one request and are cleared as soon as that
/// request's URL is built, whether or not it succeeds.
pub trait Paginate {
    /// Request plumbing behind this handle
    fn api(&self) -> &ApiClient;

    /// Skip `offset` results (`offset` query key)
    fn skip(&self, offset: u64) -> &Self {
        self.api().skip(offset);
        self
    }

    /// Limit to `count` results (`count` query key)
    fn take(&self, count: u64) -> &Self {
        self.api().take(count);
        self
    }

    /// Sort results (`sort` query key)
    fn sort(&self, sort: impl Into<Sort>) -> &Self
    where
        Self: Sized,
    {
        self.api().sort(sort);
        self
    }
}

/// Reject an empty identifier before any request is built
pub(crate) fn require(resource: Resource, value: &str, message: &str) -> RocketChatResult<()> {
    if value.is_empty() {
        return Err(RocketChatError::bad_parameter(resource, message));
    }
    Ok(())
}

macro_rules! impl_paginate {
    ($($service:ty),+ $(,)?) => {
        $(
            impl Paginate for $service {
                fn api(&self) -> &ApiClient {
                    &self.api
                }
            }
        )+
    };
}

impl_paginate!(
    ChatService,
    ImService,
    IntegrationsService,
    LivechatService,
    RoomsService,
    SettingsService,
    TeamsService,
    UsersService,
);
