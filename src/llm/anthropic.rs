//! Anthropic Messages API client.
//!
//! Thin HTTP wrapper for `/v1/messages`. Anthropic takes the system prompt
//! as a top-level field rather than a message turn, so system messages are
//! lifted out of the conversation before the request is built.

use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{LlmError, Message, Role};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

#[derive(Debug)]
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key })
    }

    pub async fn chat(&self, model: &str, temperature: f32, messages: &[Message]) -> Result<String, LlmError> {
        let (system, turns) = split_system(messages);
        let body = ApiRequest {
            model,
            max_tokens: super::config::max_tokens(),
            temperature,
            system: if system.is_empty() { None } else { Some(&system) },
            messages: &turns,
        };

        let response = self
            .http
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
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

        parse_response(&text)
    }
}

/// Lift system messages into the `system` field; everything else stays a turn.
fn split_system(messages: &[Message]) -> (String, Vec<&Message>) {
    let system = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let turns = messages.iter().filter(|m| m.role != Role::System).collect();
    (system, turns)
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: &'a [&'a Message],
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(serde::Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str) -> Result<String, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let reply = api
        .content
        .iter()
        .filter(|block| block.kind == "text")
        .map(|block| block.text.as_str())
        .collect::<Vec<_>>()
        .join("");

    if reply.is_empty() {
        return Err(LlmError::ApiParse("messages: response contains no text content".to_string()));
    }
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_text_response() {
        let json = serde_json::json!({
            "content": [{ "type": "text", "text": "Hi there." }],
            "model": "claude-sonnet-4-5",
            "stop_reason": "end_turn",
            "usage": { "input_tokens": 12, "output_tokens": 4 }
        })
        .to_string();
        assert_eq!(parse_response(&json).unwrap(), "Hi there.");
    }

    #[test]
    fn parse_joins_multiple_text_blocks() {
        let json = serde_json::json!({
            "content": [
                { "type": "text", "text": "part one " },
                { "type": "thinking", "thinking": "ignored" },
                { "type": "text", "text": "part two" }
            ]
        })
        .to_string();
        assert_eq!(parse_response(&json).unwrap(), "part one part two");
    }

    #[test]
    fn parse_empty_content_is_protocol_error() {
        let json = serde_json::json!({ "content": [] }).to_string();
        assert!(matches!(parse_response(&json), Err(LlmError::ApiParse(_))));
    }

    #[test]
    fn split_system_lifts_seed_message() {
        let messages = vec![
            Message::system("be helpful"),
            Message::user("hi"),
            Message::assistant("hello"),
        ];
        let (system, turns) = split_system(&messages);
        assert_eq!(system, "be helpful");
        assert_eq!(turns.len(), 2);
        assert!(turns.iter().all(|m| m.role != Role::System));
    }
}
