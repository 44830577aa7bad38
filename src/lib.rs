//! # fetch-gateway
//!
//! An HTTP gateway that fetches caller-supplied URLs through an external tool,
//! after checking them for server-side request forgery (SSRF).
//!
//! ## Features
//!
//! - **SSRF validation**: only `http`/`https`, and every resolved address must be public
//! - **External fetch tool**: the validated URL is passed as a single argument, never through a shell
//! - **Bounded execution**: tools that overrun the timeout are killed before the 504 is sent
//! - **Two response profiles**: JSON envelopes or raw HTML passthrough
//!
//! ## Validating a URL
//!
//! ```rust,no_run
//! use fetch_gateway::core::ssrf::UrlValidator;
//!
//! #[tokio::main]
//! async fn main() {
//!     let validator = UrlValidator::default();
//!     match validator.validate("http://169.254.169.254/").await {
//!         Ok(url) => println!("accepted {}", url.as_str()),
//!         Err(reason) => println!("rejected: {}", reason),
//!     }
//! }
//! ```
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use fetch_gateway::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config)?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use crate::core::fetch::{FetchDispatcher, FetchError, FetchOutput, FetchTool};
pub use crate::core::ssrf::{HostResolver, UrlValidator, ValidatedUrl, ValidationError};
pub use utils::error::{GatewayError, Result};

use tracing::info;

/// A fetch gateway bound to one configuration
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config)?;

        Ok(Self { config, server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting fetch gateway");
        info!("Configuration: {:#?}", self.config);

        self.server.start().await?;

        Ok(())
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
