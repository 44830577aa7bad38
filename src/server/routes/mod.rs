//! HTTP route modules

pub mod fetch;

/// Body of `POST /`
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct FetchRequest {
    /// Target URL
    #[serde(default)]
    pub url: Option<String>,
}

/// Query string of `GET /`
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct FetchQuery {
    /// Target URL
    #[serde(default)]
    pub url: Option<String>,
}
