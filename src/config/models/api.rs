//! HTTP API profile

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How fetch results are rendered to the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// `{"returncode", "stdout", "stderr"}` envelopes
    #[default]
    Json,
    /// Raw tool stdout as `text/html`, plain-text errors
    Html,
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseFormat::Json => f.write_str("json"),
            ResponseFormat::Html => f.write_str("html"),
        }
    }
}

impl FromStr for ResponseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ResponseFormat::Json),
            "html" => Ok(ResponseFormat::Html),
            other => Err(format!(
                "Unknown response format '{}', expected json or html",
                other
            )),
        }
    }
}

/// API behaviour configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Response profile for both `POST /` and `GET /`
    #[serde(default)]
    pub response_format: ResponseFormat,
    /// In the json profile, answer 502 instead of 200 when the tool exits nonzero
    #[serde(default)]
    pub json_status_from_exit_code: bool,
}
