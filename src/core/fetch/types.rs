//! Fetch result and error types

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Captured output of one external tool run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOutput {
    /// Process exit code (negative signal number if killed by a signal)
    pub returncode: i32,
    /// Standard output, decoded lossily as UTF-8
    pub stdout: String,
    /// Standard error, decoded lossily as UTF-8
    pub stderr: String,
}

impl FetchOutput {
    /// Whether the tool exited with status 0
    pub fn success(&self) -> bool {
        self.returncode == 0
    }
}

/// Failure to obtain a [`FetchOutput`]
#[derive(Error, Debug)]
pub enum FetchError {
    /// The tool did not finish in time and was killed
    #[error("fetch timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// The tool could not be started
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the tool or reading its output failed
    #[error("I/O error while running fetch tool: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout(_))
    }
}
