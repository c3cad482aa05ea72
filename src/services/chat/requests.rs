//! Request types for the chat service.

/// How `post_message` addresses its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageTarget {
    /// Room id (`roomId`)
    #[default]
    RoomId,
    /// Channel name or `@username` (`channel`)
    Channel,
}

impl MessageTarget {
    /// Body key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoomId => "roomId",
            Self::Channel => "channel",
        }
    }
}
