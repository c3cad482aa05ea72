//! Request types for the users service.

/// How a user is identified in `users.*` lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserLookup {
    /// By user id (`userId`)
    #[default]
    Id,
    /// By login name (`username`)
    Username,
}

impl UserLookup {
    /// Query or body key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "userId",
            Self::Username => "username",
        }
    }
}
