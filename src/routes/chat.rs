//! `POST /api/chat` — one follow-up turn against the visitor's history.

use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;
use serde_json::json;

use crate::llm::config::ProviderRequest;
use crate::routes::ApiError;
use crate::services::chat as chat_svc;
use crate::state::AppState;

fn default_temperature() -> f32 {
    0.7
}

fn default_provider() -> String {
    "gemini".to_string()
}

#[derive(Deserialize)]
pub struct ChatBody {
    pub message: String,
    pub api_key: String,
    pub model: String,
    pub api_url: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_provider")]
    pub provider: String,
    pub api_version: Option<String>,
    #[serde(default)]
    pub visitor_id: String,
}

/// Returns `{"answer": "..."}`. The visitor id rides in the body here; an
/// absent id falls back to the empty-string history.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let request = ProviderRequest {
        provider: body.provider,
        model: body.model,
        api_key: body.api_key,
        api_url: body.api_url,
        api_version: body.api_version,
        temperature: body.temperature,
    };

    let answer = chat_svc::chat(&state.memory, &request, &body.visitor_id, &body.message).await?;

    Ok(Json(json!({ "answer": answer })))
}
