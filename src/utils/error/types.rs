//! Error types for the Gateway

use crate::core::fetch::FetchError;
use crate::core::ssrf::ValidationError;
use thiserror::Error;

/// Result type alias for the Gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the Gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request could not be understood (bad body, missing parameter)
    #[error("{0}")]
    BadRequest(String),

    /// URL refused by the SSRF validator
    #[error("Invalid or disallowed URL: {0}")]
    Validation(#[from] ValidationError),

    /// External fetch tool failed or timed out
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP server errors (bind, runtime)
    #[error("Server error: {0}")]
    Server(String),
}
