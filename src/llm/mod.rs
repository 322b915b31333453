//! LLM — multi-provider adapter.
//!
//! DESIGN
//! ======
//! Four heterogeneous provider SDK dialects behind one uniform capability:
//! "invoke with an ordered list of role-tagged messages, get reply text".
//! `LlmClient` is a sum type over the provider kind; `select` maps the
//! caller-supplied [`ProviderRequest`] to exactly one branch. Selection only
//! constructs an in-memory handle — no network call happens until `chat`.

pub mod anthropic;
pub mod azure;
pub mod config;
pub mod gemini;
pub mod openai;
pub mod types;

use config::{DEFAULT_AZURE_API_VERSION, LlmTimeouts, ProviderKind, ProviderRequest};
pub use types::{LlmChat, LlmError, Message, Role};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client dispatching to one of the four supported providers.
#[derive(Debug)]
pub struct LlmClient {
    inner: Provider,
    model: String,
    temperature: f32,
}

#[derive(Debug)]
enum Provider {
    OpenAi(openai::OpenAiClient),
    AzureOpenAi(azure::AzureOpenAiClient),
    Anthropic(anthropic::AnthropicClient),
    Gemini(gemini::GeminiClient),
}

impl LlmClient {
    /// Select and construct the client for a logical provider request.
    ///
    /// Provider matching is case-insensitive; `azure` and `azureopenai` are
    /// the same family. Azure reads the endpoint from `api_url` and defaults
    /// `api_version` when absent; the other branches ignore both fields.
    ///
    /// # Errors
    ///
    /// [`LlmError::UnsupportedProvider`] for an unrecognized provider string
    /// (original casing preserved), [`LlmError::ConfigParse`] for an Azure
    /// request without an endpoint.
    pub fn select(request: &ProviderRequest) -> Result<Self, LlmError> {
        let kind = config::parse_provider(&request.provider)?;
        let timeouts = LlmTimeouts::from_env();

        let inner = match kind {
            ProviderKind::OpenAi => Provider::OpenAi(openai::OpenAiClient::new(request.api_key.clone(), timeouts)?),
            ProviderKind::AzureOpenAi => {
                let api_version = request
                    .api_version
                    .as_deref()
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or(DEFAULT_AZURE_API_VERSION);
                Provider::AzureOpenAi(azure::AzureOpenAiClient::new(
                    request.api_key.clone(),
                    request.api_url.as_deref(),
                    request.model.clone(),
                    api_version.to_string(),
                    timeouts,
                )?)
            }
            ProviderKind::Anthropic => {
                Provider::Anthropic(anthropic::AnthropicClient::new(request.api_key.clone(), timeouts)?)
            }
            ProviderKind::Gemini => Provider::Gemini(gemini::GeminiClient::new(request.api_key.clone(), timeouts)?),
        };

        Ok(Self { inner, model: request.model.clone(), temperature: request.temperature })
    }

    /// The model (or Azure deployment id) this client targets.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat_inner(&self, messages: &[Message]) -> Result<String, LlmError> {
        match &self.inner {
            Provider::OpenAi(c) => c.chat(&self.model, self.temperature, messages).await,
            Provider::AzureOpenAi(c) => c.chat(self.temperature, messages).await,
            Provider::Anthropic(c) => c.chat(&self.model, self.temperature, messages).await,
            Provider::Gemini(c) => c.chat(&self.model, self.temperature, messages).await,
        }
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, messages: &[Message]) -> Result<String, LlmError> {
        self.chat_inner(messages).await
    }
}
