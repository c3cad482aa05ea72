//! Request types for the livechat service.

use std::fmt;

/// Livechat staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LivechatUserType {
    /// Handles conversations
    #[default]
    Agent,
    /// Manages departments and agents
    Manager,
}

impl LivechatUserType {
    /// Path segment
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Manager => "manager",
        }
    }
}

impl fmt::Display for LivechatUserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
