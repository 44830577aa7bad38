//! Core configuration validators
//!
//! Validation implementations for each section of the gateway configuration.

use super::trait_def::Validate;
use crate::config::models::*;
use actix_web::http::header::HeaderValue;
use tracing::debug;

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating gateway configuration");

        self.server.validate()?;
        self.fetch.validate()?;
        self.security_headers.validate()?;
        self.logging.validate()?;

        debug!("Gateway configuration validation completed");
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating server configuration");

        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if self.workers == Some(0) {
            return Err("Worker count must be at least 1".to_string());
        }

        if self.max_body_size == 0 {
            return Err("Max body size cannot be 0".to_string());
        }

        Ok(())
    }
}

impl Validate for FetchConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating fetch configuration");

        if self.tool.trim().is_empty() {
            return Err("Fetch tool cannot be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Fetch timeout must be at least 1 second".to_string());
        }

        Ok(())
    }
}

impl Validate for SecurityHeadersConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, value) in self.headers() {
            HeaderValue::from_str(value)
                .map_err(|_| format!("Invalid value for security header {}: {:?}", name, value))?;
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        tracing_subscriber::EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| format!("Invalid log level '{}': {}", self.level, e))
    }
}
