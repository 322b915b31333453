//! `POST /api/summarize` — summarize text and persist the result.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Json;
use serde::Deserialize;
use serde_json::json;

use crate::llm::config::ProviderRequest;
use crate::routes::{ApiError, require_visitor_id};
use crate::services::{history, summarize as summarize_svc};
use crate::state::AppState;

fn default_temperature() -> f32 {
    0.5
}

fn default_provider() -> String {
    "gemini".to_string()
}

#[derive(Deserialize)]
pub struct SummarizeBody {
    pub text: String,
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    pub prompt: Option<String>,
    #[serde(default = "default_provider")]
    pub provider: String,
    pub api_version: Option<String>,
}

/// Requires the `X-Visitor-ID` header. Returns `{"summary": "..."}`.
pub async fn summarize(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<SummarizeBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let visitor_id = require_visitor_id(&headers)?;

    let request = ProviderRequest {
        provider: body.provider.clone(),
        model: body.model.clone(),
        api_key: body.api_key,
        api_url: Some(body.api_url),
        api_version: body.api_version,
        temperature: body.temperature,
    };

    let summary = summarize_svc::summarize(&request, &body.text, body.prompt.as_deref()).await?;

    // The stored record keeps the text exactly as submitted; trimming is a
    // summarization input concern only.
    history::insert_summary(
        &state.pool,
        &visitor_id,
        &body.text,
        &summary,
        &body.model,
        &body.provider,
    )
    .await?;

    Ok(Json(json!({ "summary": summary })))
}
