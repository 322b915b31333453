//! Google Gemini client.
//!
//! Thin HTTP wrapper for the Generative Language `generateContent` endpoint.
//! Gemini has no `assistant` role (it uses `model`) and, like Anthropic,
//! takes the system prompt outside the conversation turns.

use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{LlmError, Message, Role};

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key })
    }

    pub async fn chat(&self, model: &str, temperature: f32, messages: &[Message]) -> Result<String, LlmError> {
        let url = format!("{API_BASE_URL}/models/{model}:generateContent?key={}", self.api_key);
        let body = build_request(temperature, messages);

        let response = self
            .http
            .post(url)
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

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(serde::Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: Option<Content>,
}

// =============================================================================
// REQUEST BUILDING / PARSING
// =============================================================================

fn build_request(temperature: f32, messages: &[Message]) -> ApiRequest {
    let system: Vec<Part> = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| Part { text: m.content.clone() })
        .collect();

    let contents = messages
        .iter()
        .filter(|m| m.role != Role::System)
        .map(|m| Content {
            role: Some(match m.role {
                Role::Assistant => "model".to_string(),
                _ => "user".to_string(),
            }),
            parts: vec![Part { text: m.content.clone() }],
        })
        .collect();

    ApiRequest {
        contents,
        system_instruction: if system.is_empty() { None } else { Some(Content { role: None, parts: system }) },
        generation_config: GenerationConfig { temperature, max_output_tokens: super::config::max_tokens() },
    }
}

fn parse_response(json: &str) -> Result<String, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let reply = api
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .map(|part| part.text.as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if reply.is_empty() {
        return Err(LlmError::ApiParse("generateContent: missing candidates[0].content.parts".to_string()));
    }
    Ok(reply)
}
