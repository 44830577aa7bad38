//! Fetch endpoint
//!
//! `POST /` takes `{"url": "..."}`, `GET /` takes `?url=...`. Both run the
//! same pipeline: validate the URL, run the fetch tool, render the result in
//! the configured response format. Validation always completes before any
//! process is started.

use super::{FetchQuery, FetchRequest};
use crate::config::ResponseFormat;
use crate::core::fetch::FetchOutput;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use tracing::{debug, error, warn};

pub(crate) const NOT_JSON_MESSAGE: &str = r#"Request body must be JSON with {"url": "https://..."}"#;
pub(crate) const MISSING_URL_MESSAGE: &str = "Missing 'url' parameter";

/// Configure fetch routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::post().to(fetch_from_body))
            .route(web::get().to(fetch_from_query)),
    );
}

/// `POST /` with a JSON body
pub async fn fetch_from_body(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    let result = match parse_body(&req, &body) {
        Ok(request) => process(&state, request.url).await,
        Err(e) => Err(e),
    };
    render(&state, result)
}

/// `GET /?url=...`
pub async fn fetch_from_query(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let result = match web::Query::<FetchQuery>::from_query(req.query_string()) {
        Ok(query) => process(&state, query.into_inner().url).await,
        Err(e) => {
            debug!(error = %e, "Unparseable query string");
            Err(GatewayError::bad_request(MISSING_URL_MESSAGE))
        }
    };
    render(&state, result)
}

fn parse_body(req: &HttpRequest, body: &[u8]) -> Result<FetchRequest> {
    if !is_json_request(req) {
        return Err(GatewayError::bad_request(NOT_JSON_MESSAGE));
    }

    serde_json::from_slice::<FetchRequest>(body).map_err(|e| {
        debug!(error = %e, "Rejecting malformed JSON body");
        GatewayError::bad_request(NOT_JSON_MESSAGE)
    })
}

/// `application/json` or any `application/*+json` media type
fn is_json_request(req: &HttpRequest) -> bool {
    let Some(content_type) = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

async fn process(state: &AppState, url: Option<String>) -> Result<FetchOutput> {
    let url = url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| GatewayError::bad_request(MISSING_URL_MESSAGE))?;

    let validated = state.validator.validate(&url).await?;
    let output = state.fetcher.fetch(&validated).await?;
    Ok(output)
}

fn render(state: &AppState, result: Result<FetchOutput>) -> HttpResponse {
    if let Err(e) = &result {
        match e {
            GatewayError::BadRequest(_) | GatewayError::Validation(_) => {}
            e if e.is_timeout() => warn!(error = %e, "Fetch timed out"),
            e => error!(error = %e, "Fetch failed"),
        }
    }

    let api = state.config.api();
    match api.response_format {
        ResponseFormat::Json => match result {
            Ok(output) => {
                let status = if api.json_status_from_exit_code && !output.success() {
                    StatusCode::BAD_GATEWAY
                } else {
                    StatusCode::OK
                };
                HttpResponse::build(status).json(output)
            }
            Err(e) => e.error_response(),
        },
        ResponseFormat::Html => match result {
            Ok(output) if output.success() => HttpResponse::Ok()
                .content_type(ContentType::html())
                .body(output.stdout),
            Ok(output) => HttpResponse::InternalServerError()
                .content_type(ContentType::plaintext())
                .body(output.stderr),
            Err(e) => e.plain_text_response(),
        },
    }
}
