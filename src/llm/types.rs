//! LLM types — provider-neutral message types and errors.
//!
//! Shared by the OpenAI, Azure OpenAI, Anthropic, and Gemini clients. Every
//! provider speaks a different wire dialect; the rest of the crate only ever
//! sees these types.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client selection and invocation.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The requested provider is not one of the four supported families.
    /// Carries the provider string exactly as the caller sent it.
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// A required configuration value was missing or could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body lacked the expected reply content.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// MESSAGES
// =============================================================================

/// Role of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

// =============================================================================
// LLM CHAT TRAIT
// =============================================================================

/// Provider-neutral async trait for LLM chat. Enables mocking in tests.
#[async_trait::async_trait]
pub trait LlmChat: Send + Sync {
    /// Send an ordered list of role-tagged messages to the provider and
    /// return the reply text.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response is
    /// missing the expected reply content.
    async fn chat(&self, messages: &[Message]) -> Result<String, LlmError>;
}
