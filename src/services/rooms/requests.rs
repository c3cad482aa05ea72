//! Request types for the rooms service.

use crate::client::Query;
use chrono::{DateTime, SecondsFormat, Utc};

/// How `info` identifies a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomLookup {
    /// By room id (`roomId`)
    #[default]
    Id,
    /// By room name (`roomName`)
    Name,
}

impl RoomLookup {
    /// Query key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "roomId",
            Self::Name => "roomName",
        }
    }
}

/// Filters for `history`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryQuery {
    /// End of the time range
    pub latest: Option<DateTime<Utc>>,
    /// Start of the time range
    pub oldest: Option<DateTime<Utc>>,
    /// Include messages exactly at the range bounds
    pub inclusive: Option<bool>,
    /// Results to skip
    pub offset: Option<u64>,
    /// Results to return
    pub count: Option<u64>,
    /// Include the unread count
    pub unreads: Option<bool>,
    /// Additional raw query parameters
    pub extra: Query,
}

impl HistoryQuery {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Only messages after `oldest`
    pub fn since(mut self, oldest: DateTime<Utc>) -> Self {
        self.oldest = Some(oldest);
        self
    }

    /// Only messages before `latest`
    pub fn until(mut self, latest: DateTime<Utc>) -> Self {
        self.latest = Some(latest);
        self
    }

    /// Include the range bounds
    pub fn inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = Some(inclusive);
        self
    }

    /// Query for `room_id`; the room id always overrides `extra`
    pub(crate) fn into_query(self, room_id: &str) -> Query {
        let mut query = Query::new()
            .with_opt("latest", self.latest.map(format_timestamp))
            .with_opt("oldest", self.oldest.map(format_timestamp))
            .with_opt("inclusive", self.inclusive.map(|b| b.to_string()))
            .with_opt("offset", self.offset.map(|n| n.to_string()))
            .with_opt("count", self.count.map(|n| n.to_string()))
            .with_opt("unreads", self.unreads.map(|b| b.to_string()));
        for (key, value) in self.extra.iter() {
            query.set(key, value);
        }
        query.set("roomId", room_id);
        query
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
