//! External fetch tool configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the external fetch tool is invoked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Program name or path, looked up on `PATH` when relative
    #[serde(default = "default_fetch_tool")]
    pub tool: String,
    /// Extra arguments placed before the URL
    #[serde(default)]
    pub args: Vec<String>,
    /// Hard limit on tool runtime, in seconds
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            tool: default_fetch_tool(),
            args: Vec::new(),
            timeout_secs: default_fetch_timeout(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
