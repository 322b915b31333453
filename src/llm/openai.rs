//! OpenAI chat-completions client.
//!
//! Thin HTTP wrapper for `/v1/chat/completions`. Pure parsing in
//! `parse_chat_response` for testability; the Azure client reuses it since
//! Azure speaks the same response dialect.

use std::time::Duration;

use serde_json::Value;

use super::config::LlmTimeouts;
use super::types::{LlmError, Message};

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key })
    }

    pub async fn chat(&self, model: &str, temperature: f32, messages: &[Message]) -> Result<String, LlmError> {
        let body = ApiRequest { model, temperature, max_tokens: super::config::max_tokens(), messages };

        let response = self
            .http
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_chat_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: &'a [Message],
}

// =============================================================================
// PARSING
// =============================================================================

/// Extract the reply text from a chat-completions response body.
///
/// Shared with the Azure client, which returns the same shape.
pub(crate) fn parse_chat_response(json: &str) -> Result<String, LlmError> {
    let root: Value = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let Some(content) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|msg| msg.get("content"))
        .and_then(Value::as_str)
    else {
        return Err(LlmError::ApiParse("chat_completions: missing choices[0].message.content".to_string()));
    };

    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_text_response() {
        let json = serde_json::json!({
            "model": "gpt-4o",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "Hello!" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 5 }
        })
        .to_string();
        assert_eq!(parse_chat_response(&json).unwrap(), "Hello!");
    }

    #[test]
    fn parse_missing_choices() {
        let json = serde_json::json!({ "model": "gpt-4o", "choices": [] }).to_string();
        assert!(matches!(parse_chat_response(&json), Err(LlmError::ApiParse(_))));
    }

    #[test]
    fn parse_null_content() {
        let json = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        })
        .to_string();
        assert!(matches!(parse_chat_response(&json), Err(LlmError::ApiParse(_))));
    }

    #[test]
    fn parse_invalid_json() {
        assert!(matches!(parse_chat_response("not json"), Err(LlmError::ApiParse(_))));
    }
}
