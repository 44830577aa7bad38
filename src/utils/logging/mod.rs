//! Logging setup
//!
//! Installs the global `tracing` subscriber used by the gateway binary.

use crate::config::{LogFormat, LoggingConfig};
use crate::utils::error::{GatewayError, Result};
use tracing_subscriber::EnvFilter;

/// Build the level filter: `RUST_LOG` wins over the configured level
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    filter_with_override(config, std::env::var(EnvFilter::DEFAULT_ENV).ok())
}

fn filter_with_override(config: &LoggingConfig, rust_log: Option<String>) -> Result<EnvFilter> {
    let filter = match rust_log {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives),
        _ => EnvFilter::try_new(&config.level),
    };
    filter.map_err(|e| GatewayError::Config(format!("Invalid log filter: {}", e)))
}

/// Initialize the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
    };

    installed.map_err(|e| GatewayError::Config(format!("Failed to initialize logging: {}", e)))
}
