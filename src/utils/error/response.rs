//! HTTP response handling for errors

use super::types::GatewayError;
use crate::core::fetch::FetchError;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

impl GatewayError {
    /// Caller-facing body for this error
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            GatewayError::BadRequest(message) => ErrorResponse::new(message.clone()),
            GatewayError::Validation(e) => {
                ErrorResponse::new("Invalid or disallowed URL").with_reason(e.to_string())
            }
            GatewayError::Fetch(FetchError::Timeout(_)) => {
                ErrorResponse::new("Timeout fetching URL")
            }
            GatewayError::Fetch(e) => ErrorResponse::new("Internal error").with_detail(e.to_string()),
            GatewayError::Config(_)
            | GatewayError::Yaml(_)
            | GatewayError::Io(_)
            | GatewayError::Server(_) => {
                ErrorResponse::new("Internal error").with_detail(self.to_string())
            }
        }
    }

    /// Plain-text rendering used by the html response profile
    pub fn plain_text_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(self.to_error_response().to_plain_text())
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) | GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Fetch(FetchError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Fetch(_)
            | GatewayError::Config(_)
            | GatewayError::Yaml(_)
            | GatewayError::Io(_)
            | GatewayError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_error_response())
    }
}

/// Standard error response format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new<S: Into<String>>(error: S) -> Self {
        Self {
            error: error.into(),
            reason: None,
            detail: None,
        }
    }

    pub fn with_reason<S: Into<String>>(mut self, reason: S) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_detail<S: Into<String>>(mut self, detail: S) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// `error`, followed by `: reason` or `: detail` when present
    pub fn to_plain_text(&self) -> String {
        match self.reason.as_ref().or(self.detail.as_ref()) {
            Some(extra) => format!("{}: {}", self.error, extra),
            None => self.error.clone(),
        }
    }
}
