//! Request types for the teams service.

/// How `info` identifies a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeamLookup {
    /// By team id (`teamId`)
    #[default]
    Id,
    /// By team name (`teamName`)
    Name,
}

impl TeamLookup {
    /// Query key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "teamId",
            Self::Name => "teamName",
        }
    }
}
