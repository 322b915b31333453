//! Summary history routes — listing and bulk deletion.

use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::json;

use crate::routes::ApiError;
use crate::services::history;
use crate::state::AppState;

fn default_limit() -> i64 {
    10
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub visitor_id: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// `GET /api/history` — most recent summaries, optionally per visitor.
pub async fn list_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let rows = history::list_history(&state.pool, query.visitor_id.as_deref(), query.limit).await?;
    Ok(Json(json!({ "history": rows })))
}

/// `DELETE /api/summaries/delete-all` — wipe every stored summary.
pub async fn delete_all_summaries(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = history::delete_all(&state.pool).await?;
    Ok(Json(json!({ "deleted_count": deleted })))
}

#[derive(Deserialize)]
pub struct DeleteByVisitorQuery {
    pub visitor_id: String,
}

/// `DELETE /api/summaries/delete-by-visitor` — wipe one visitor's summaries.
/// `404` when that visitor has none.
pub async fn delete_summaries_by_visitor(
    State(state): State<AppState>,
    Query(query): Query<DeleteByVisitorQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = history::delete_by_visitor(&state.pool, &query.visitor_id).await?;
    Ok(Json(json!({ "deleted_count": deleted })))
}
