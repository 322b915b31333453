//! Azure OpenAI client.
//!
//! Same chat-completions dialect as OpenAI, but addressed by deployment id
//! under the caller's endpoint, authenticated with an `api-key` header, and
//! versioned via the `api-version` query parameter.

use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{LlmError, Message};

#[derive(Debug)]
pub struct AzureOpenAiClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    deployment: String,
    api_version: String,
}

impl AzureOpenAiClient {
    /// Build a client for one Azure deployment.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigParse`] when no endpoint was supplied, or
    /// [`LlmError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(
        api_key: String,
        endpoint: Option<&str>,
        deployment: String,
        api_version: String,
        timeouts: LlmTimeouts,
    ) -> Result<Self, LlmError> {
        let Some(endpoint) = endpoint.filter(|url| !url.trim().is_empty()) else {
            return Err(LlmError::ConfigParse("azure provider requires api_url as the endpoint".to_string()));
        };
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            api_key,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            deployment,
            api_version,
        })
    }

    pub async fn chat(&self, temperature: f32, messages: &[Message]) -> Result<String, LlmError> {
        let url = chat_url(&self.endpoint, &self.deployment, &self.api_version);
        let body = ApiRequest {
            temperature,
            max_tokens: super::config::max_tokens(),
            messages,
        };

        let response = self
            .http
            .post(url)
            .header("api-key", &self.api_key)
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

        super::openai::parse_chat_response(&text)
    }
}

// The model is implied by the deployment in the URL, so the body omits it.
#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    temperature: f32,
    max_tokens: u32,
    messages: &'a [Message],
}

fn chat_url(endpoint: &str, deployment: &str, api_version: &str) -> String {
    format!("{endpoint}/openai/deployments/{deployment}/chat/completions?api-version={api_version}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::config::DEFAULT_AZURE_API_VERSION;

    fn timeouts() -> LlmTimeouts {
        LlmTimeouts { request_secs: 1, connect_secs: 1 }
    }

    #[test]
    fn chat_url_layout() {
        let url = chat_url("https://acme.openai.azure.com", "gpt4-prod", "2025-01-01");
        assert_eq!(
            url,
            "https://acme.openai.azure.com/openai/deployments/gpt4-prod/chat/completions?api-version=2025-01-01"
        );
    }

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let client = AzureOpenAiClient::new(
            "key".into(),
            Some("https://acme.openai.azure.com/"),
            "dep".into(),
            DEFAULT_AZURE_API_VERSION.into(),
            timeouts(),
        )
        .unwrap();
        assert_eq!(client.endpoint, "https://acme.openai.azure.com");
    }

    #[test]
    fn missing_endpoint_is_config_error() {
        let err = AzureOpenAiClient::new("key".into(), None, "dep".into(), "v".into(), timeouts()).unwrap_err();
        assert!(matches!(err, LlmError::ConfigParse(_)));
    }

    #[test]
    fn blank_endpoint_is_config_error() {
        let err = AzureOpenAiClient::new("key".into(), Some("  "), "dep".into(), "v".into(), timeouts()).unwrap_err();
        assert!(matches!(err, LlmError::ConfigParse(_)));
    }
}
