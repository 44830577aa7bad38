//! HTTP middleware implementations
//!
//! Request logging comes from `tracing_actix_web::TracingLogger`; this module
//! holds the gateway's own middleware:
//! - Security headers

mod security;


pub use security::{SecurityHeadersMiddleware, SecurityHeadersMiddlewareService};
