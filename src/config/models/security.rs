//! Response security headers

use super::*;
use serde::{Deserialize, Serialize};

/// Headers added to every response unless a handler already set them.
/// An empty value disables that header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityHeadersConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_csp")]
    pub content_security_policy: String,
    #[serde(default = "default_hsts")]
    pub strict_transport_security: String,
    #[serde(default = "default_nosniff")]
    pub x_content_type_options: String,
    #[serde(default = "default_frame_options")]
    pub x_frame_options: String,
    #[serde(default = "default_referrer_policy")]
    pub referrer_policy: String,
    #[serde(default = "default_permissions_policy")]
    pub permissions_policy: String,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            content_security_policy: default_csp(),
            strict_transport_security: default_hsts(),
            x_content_type_options: default_nosniff(),
            x_frame_options: default_frame_options(),
            referrer_policy: default_referrer_policy(),
            permissions_policy: default_permissions_policy(),
        }
    }
}

impl SecurityHeadersConfig {
    /// Configured `(header name, value)` pairs, skipping disabled ones
    pub fn headers(&self) -> Vec<(&'static str, &str)> {
        if !self.enabled {
            return Vec::new();
        }

        [
            ("content-security-policy", self.content_security_policy.as_str()),
            (
                "strict-transport-security",
                self.strict_transport_security.as_str(),
            ),
            ("x-content-type-options", self.x_content_type_options.as_str()),
            ("x-frame-options", self.x_frame_options.as_str()),
            ("referrer-policy", self.referrer_policy.as_str()),
            ("permissions-policy", self.permissions_policy.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

fn default_csp() -> String {
    [
        "default-src 'none'",
        "script-src 'none'",
        "style-src 'self'",
        "img-src 'self' data:",
        "connect-src 'none'",
        "frame-ancestors 'none'",
        "object-src 'none'",
        "base-uri 'none'",
        "form-action 'none'",
    ]
    .join("; ")
}

fn default_hsts() -> String {
    "max-age=63072000; includeSubDomains".to_string() // 2 years
}

fn default_nosniff() -> String {
    "nosniff".to_string()
}

fn default_frame_options() -> String {
    "DENY".to_string()
}

fn default_referrer_policy() -> String {
    "no-referrer".to_string()
}

fn default_permissions_policy() -> String {
    "geolocation=(), microphone=()".to_string()
}
