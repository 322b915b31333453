use super::*;
use crate::llm::LlmError;
use crate::state::test_helpers;
use axum::http::HeaderValue;

// =============================================================================
// require_visitor_id
// =============================================================================

#[test]
fn visitor_id_header_is_extracted() {
    let mut headers = HeaderMap::new();
    headers.insert(VISITOR_ID_HEADER, HeaderValue::from_static("abc-123"));
    assert_eq!(require_visitor_id(&headers).unwrap(), "abc-123");
}

#[test]
fn header_lookup_is_case_insensitive() {
    let mut headers = HeaderMap::new();
    headers.insert("X-Visitor-ID", HeaderValue::from_static("abc"));
    assert_eq!(require_visitor_id(&headers).unwrap(), "abc");
}

#[test]
fn missing_visitor_id_is_bad_request() {
    let err = require_visitor_id(&HeaderMap::new()).unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.detail, "Missing X-Visitor-ID header");
}

// =============================================================================
// error mapping
// =============================================================================

#[test]
fn empty_text_maps_to_bad_request() {
    let err = ApiError::from(SummarizeError::EmptyText);
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.detail, "Text is empty.");
}

#[test]
fn unsupported_provider_maps_to_bad_request_with_casing() {
    let err = ApiError::from(SummarizeError::from(LlmError::UnsupportedProvider(
        "Cohere".to_string(),
    )));
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert!(err.detail.contains("Cohere"));
}

#[test]
fn protocol_and_remote_failures_map_to_internal() {
    let protocol = ApiError::from(SummarizeError::Protocol("missing field".to_string()));
    assert_eq!(protocol.status, StatusCode::INTERNAL_SERVER_ERROR);

    let failed = ApiError::from(SummarizeError::Failed("timeout".to_string()));
    assert_eq!(failed.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn chat_failure_maps_to_internal_with_prefix() {
    let err = ApiError::from(ChatError::Failed("boom".to_string()));
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.detail, "Failed to get response from AI: boom");
}

#[test]
fn history_not_found_maps_to_404() {
    let err = ApiError::from(HistoryError::NotFound);
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.detail, "No summaries found for the given visitor ID.");
}

#[test]
fn unsupported_upload_type_maps_to_bad_request() {
    let err = ApiError::from(ExtractError::UnsupportedType);
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.detail, "Only txt and pdf files are supported.");
}

#[test]
fn error_response_carries_detail_body() {
    let response = ApiError::not_found("gone").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// request body defaults
// =============================================================================

#[test]
fn summarize_body_defaults() {
    let body: summarize::SummarizeBody = serde_json::from_value(serde_json::json!({
        "text": "t",
        "api_url": "https://example.test",
        "api_key": "k",
        "model": "m"
    }))
    .unwrap();
    assert_eq!(body.provider, "gemini");
    assert!((body.temperature - 0.5).abs() < f32::EPSILON);
    assert!(body.prompt.is_none());
    assert!(body.api_version.is_none());
}

#[test]
fn chat_body_defaults() {
    let body: chat::ChatBody = serde_json::from_value(serde_json::json!({
        "message": "hi",
        "api_key": "k",
        "model": "m"
    }))
    .unwrap();
    assert_eq!(body.provider, "gemini");
    assert!((body.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(body.visitor_id, "");
    assert!(body.api_url.is_none());
}

// =============================================================================
// router assembly
// =============================================================================

// connect_lazy spawns pool maintenance tasks, so this needs a runtime.
#[tokio::test]
async fn app_router_builds_with_test_state() {
    let state = test_helpers::test_app_state();
    let _router = app(state);
}
