//! Main gateway configuration

#![allow(missing_docs)]

use super::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// External fetch tool
    #[serde(default)]
    pub fetch: FetchConfig,
    /// API profile
    #[serde(default)]
    pub api: ApiConfig,
    /// Response security headers
    #[serde(default)]
    pub security_headers: SecurityHeadersConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Build from defaults plus process environment
    pub fn from_env() -> crate::utils::error::Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override fields from environment-style variables.
    ///
    /// `lookup` returns the value of a variable if it is set. Recognized keys:
    /// `HOST`, `PORT`, `FETCH_TOOL`, `FETCH_TIMEOUT_SECS`, `RESPONSE_FORMAT`,
    /// `LOG_LEVEL`, `LOG_FORMAT`.
    pub fn apply_env<F>(&mut self, lookup: F) -> crate::utils::error::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        use crate::utils::error::GatewayError;

        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid PORT '{}': {}", port, e)))?;
        }
        if let Some(tool) = get("FETCH_TOOL") {
            self.fetch.tool = tool;
        }
        if let Some(timeout) = get("FETCH_TIMEOUT_SECS") {
            self.fetch.timeout_secs = timeout.trim().parse().map_err(|e| {
                GatewayError::Config(format!("Invalid FETCH_TIMEOUT_SECS '{}': {}", timeout, e))
            })?;
        }
        if let Some(format) = get("RESPONSE_FORMAT") {
            self.api.response_format = format.parse().map_err(GatewayError::Config)?;
        }
        if let Some(level) = get("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = get("LOG_FORMAT") {
            self.logging.format = format.parse().map_err(GatewayError::Config)?;
        }

        debug!("Applied environment overrides");
        Ok(())
    }
}
