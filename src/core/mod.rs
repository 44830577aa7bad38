//! Core gateway functionality
//!
//! URL validation and fetch dispatch, independent of the HTTP layer.

pub mod fetch;
pub mod ssrf;
