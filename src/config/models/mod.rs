//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

#![allow(missing_docs)]

pub mod api;
pub mod fetch;
pub mod gateway;
pub mod logging;
pub mod security;
pub mod server;

// Re-export all configuration types
pub use api::*;
pub use fetch::*;
pub use gateway::*;
pub use logging::*;
pub use security::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    64 * 1024 // 64KB, the body only carries a URL
}

/// Default external fetch tool
pub fn default_fetch_tool() -> String {
    "curl_chrome110".to_string()
}

/// Default fetch timeout in seconds
pub fn default_fetch_timeout() -> u64 {
    60
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
