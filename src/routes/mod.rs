//! Router assembly and API error mapping.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API under `/api` and serves the static
//! frontend bundle for every other path. Errors cross the HTTP boundary as
//! `{"detail": "..."}` bodies with the status carrying the classification.

pub mod chat;
pub mod history;
pub mod summarize;
pub mod upload;
pub mod visitor;

use std::path::PathBuf;

use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{delete, get, post};
use serde_json::json;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::extract::ExtractError;
use crate::services::chat::ChatError;
use crate::services::history::HistoryError;
use crate::services::summarize::SummarizeError;
use crate::state::AppState;

pub const VISITOR_ID_HEADER: &str = "x-visitor-id";

// =============================================================================
// API ERROR
// =============================================================================

/// Error envelope for every API failure: status plus a `detail` message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, detail: detail.into() }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, detail: detail.into() }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, detail: detail.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

impl From<SummarizeError> for ApiError {
    fn from(err: SummarizeError) -> Self {
        match &err {
            SummarizeError::EmptyText | SummarizeError::UnsupportedProvider(_) => {
                Self::bad_request(err.to_string())
            }
            SummarizeError::Protocol(_) | SummarizeError::Failed(_) => {
                Self::internal(err.to_string())
            }
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<HistoryError> for ApiError {
    fn from(err: HistoryError) -> Self {
        match &err {
            HistoryError::NotFound => Self::not_found(err.to_string()),
            HistoryError::Database(_) => Self::internal(err.to_string()),
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        match &err {
            ExtractError::UnsupportedType => Self::bad_request(err.to_string()),
            ExtractError::Extraction(_) => Self::internal(err.to_string()),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::internal(format!("database error: {err}"))
    }
}

/// Pull the required `X-Visitor-ID` header out of the request.
///
/// # Errors
///
/// `400` when the header is missing or not valid UTF-8.
pub fn require_visitor_id(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(VISITOR_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .ok_or_else(|| ApiError::bad_request("Missing X-Visitor-ID header"))
}

// =============================================================================
// ROUTER
// =============================================================================

/// Resolve the path to the static frontend bundle.
fn static_dir() -> PathBuf {
    std::env::var("STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./frontend"))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "Ok" }))
}

/// Full application router: JSON API + static frontend fallback.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let serve_frontend = ServeDir::new(static_dir()).append_index_html_on_directories(true);

    Router::new()
        .route("/api/summarize", post(summarize::summarize))
        .route("/api/chat", post(chat::chat))
        .route("/api/upload", post(upload::upload))
        .route("/api/history", get(history::list_history))
        .route("/api/summaries/delete-all", delete(history::delete_all_summaries))
        .route("/api/summaries/delete-by-visitor", delete(history::delete_summaries_by_visitor))
        .route("/api/visitor/visit", post(visitor::visit))
        .route("/api/visitor/count", get(visitor::count))
        .route("/api/health", get(health))
        .fallback_service(serve_frontend)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
