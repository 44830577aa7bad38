//! Application state shared across HTTP handlers
//!
//! This module provides the AppState struct and its implementations.

use crate::config::Config;
use crate::core::fetch::{FetchDispatcher, FetchTool};
use crate::core::ssrf::{HostResolver, SystemResolver, UrlValidator};
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Everything here is fixed at startup and only read afterwards, so requests
/// share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// SSRF validator
    pub validator: UrlValidator,
    /// External fetch tool
    pub fetcher: Arc<dyn FetchTool>,
}

impl AppState {
    /// Create a new AppState from explicit collaborators
    pub fn new(
        config: Config,
        resolver: Arc<dyn HostResolver>,
        fetcher: Arc<dyn FetchTool>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            validator: UrlValidator::new(resolver),
            fetcher,
        }
    }

    /// Create the production state: system DNS and the configured fetch tool
    pub fn from_config(config: Config) -> Self {
        let fetcher = Arc::new(FetchDispatcher::from_config(config.fetch()));
        Self::new(config, Arc::new(SystemResolver), fetcher)
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
