//! Response types for the server service.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Server build information
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServerInfo {
    /// Release version, e.g. `6.5.0`
    #[serde(default)]
    pub version: Option<String>,
    /// Everything else the server reports (build, commit, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
