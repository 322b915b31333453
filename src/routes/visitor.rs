//! Visitor routes — visit registration and the global visitor count.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Json;
use serde_json::json;

use crate::routes::{ApiError, require_visitor_id};
use crate::services::visitor;
use crate::state::AppState;

/// `POST /api/visitor/visit` — register a visit for the `X-Visitor-ID` header.
pub async fn visit(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let visitor_id = require_visitor_id(&headers)?;
    let status = visitor::register_visit(&state.pool, &visitor_id).await?;
    Ok(Json(json!({ "message": status.message() })))
}

/// `GET /api/visitor/count` — distinct visitors ever seen.
pub async fn count(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let total = visitor::visit_count(&state.pool).await?;
    Ok(Json(json!({ "count": total })))
}
