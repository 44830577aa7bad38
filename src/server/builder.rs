//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function used by the gateway binary.

use crate::config::Config;
use crate::core::fetch::{FetchDispatcher, FetchTool};
use crate::core::ssrf::{HostResolver, SystemResolver};
use crate::server::server::HttpServer;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    resolver: Option<Arc<dyn HostResolver>>,
    fetcher: Option<Arc<dyn FetchTool>>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the system DNS resolver
    pub fn with_resolver(mut self, resolver: Arc<dyn HostResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Replace the process-backed fetch tool
    pub fn with_fetch_tool(mut self, fetcher: Arc<dyn FetchTool>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Build the application state without binding a socket
    pub fn build_state(self) -> Result<AppState> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;
        config.validate()?;

        let resolver = self.resolver.unwrap_or_else(|| Arc::new(SystemResolver));
        let fetcher = self
            .fetcher
            .unwrap_or_else(|| Arc::new(FetchDispatcher::from_config(config.fetch())));

        Ok(AppState::new(config, resolver, fetcher))
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        Ok(HttpServer::with_state(self.build_state()?))
    }
}

/// Run the server with an already-loaded configuration
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting fetch gateway");

    let server = ServerBuilder::new().with_config(config.clone()).build()?;
    info!(
        "Server starting at: http://{}",
        config.server().address()
    );
    info!(
        tool = %config.fetch().tool,
        timeout_secs = config.fetch().timeout_secs,
        response_format = %config.api().response_format,
        "Fetch tool configured"
    );
    info!("API Endpoints:");
    info!("   POST / - Fetch a URL given as {{\"url\": \"...\"}}");
    info!("   GET  /?url=... - Fetch a URL given as a query parameter");

    server.start().await
}
