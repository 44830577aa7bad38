//! Common test utilities for fetch-gateway
//!
//! - Fixed-table DNS resolvers
//! - Fetch tool doubles
//! - App factories

pub mod fixtures;

pub use fixtures::{RecordingFetchTool, StaticResolver, shell_dispatcher, test_app_state};
