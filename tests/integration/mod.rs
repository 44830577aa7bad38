//! Integration tests for fetch-gateway
//!
//! These tests drive the public API and the full actix application.

pub mod config_tests;
pub mod fetch_endpoint_tests;
