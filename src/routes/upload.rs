//! `POST /api/upload` — multipart file upload, returns the extracted text.

use axum::extract::Multipart;
use axum::response::Json;
use serde_json::json;

use crate::extract;
use crate::routes::ApiError;

/// Reads the `file` part of the multipart body and returns `{"text": "..."}`.
/// Only txt and pdf content types are accepted.
pub async fn upload(mut multipart: Multipart) -> Result<Json<serde_json::Value>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or("").to_owned();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;

        let text = extract::extract_text(&content_type, bytes.to_vec()).await?;
        return Ok(Json(json!({ "text": text })));
    }

    Err(ApiError::bad_request("Missing file field"))
}
