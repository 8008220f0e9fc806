// Route exports
pub mod chat;
pub mod schemes;

use actix_web::{error, web, HttpRequest, HttpResponse};
use std::sync::Arc;
use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::models::ErrorResponse;
use crate::services::{Assistant, SchemeCatalog};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<SchemeCatalog>,
    pub matcher: Matcher,
    pub assistant: Arc<dyn Assistant>,
    pub matching: MatchingSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(schemes::configure)
            .configure(chat::configure),
    );
}

fn bad_request(err: impl std::fmt::Display, kind: &str, message: String) -> error::Error {
    let body = ErrorResponse {
        error: kind.to_string(),
        message,
        status_code: 400,
    };
    error::InternalError::from_response(err.to_string(), HttpResponse::BadRequest().json(body)).into()
}

/// Map malformed JSON bodies to a JSON 400
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> error::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let message = format!("Invalid JSON: {}", err);
    bad_request(err, "invalid_json", message)
}

/// Map malformed query strings to a JSON 400
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> error::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    let message = format!("Invalid query: {}", err);
    bad_request(err, "invalid_query", message)
}
