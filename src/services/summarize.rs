//! Summarization service — one-shot system + user prompt.
//!
//! DESIGN
//! ======
//! Validates the input text, selects the provider client, and sends exactly
//! two messages: the system prompt (caller-supplied or the generic default)
//! and the trimmed text. No retries, no partial results.

use tracing::{info, warn};

use crate::llm::config::ProviderRequest;
use crate::llm::{LlmChat, LlmClient, LlmError, Message};

/// System prompt used when the caller does not supply one.
pub const DEFAULT_PROMPT: &str = "You are a helpful summarizer.";

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    /// Input text was empty after trimming. No provider call is attempted.
    #[error("Text is empty.")]
    EmptyText,
    /// Provider string not recognized; propagated unchanged from selection.
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),
    /// The provider replied, but without the expected content field.
    #[error("AI provider returned a malformed response: {0}")]
    Protocol(String),
    /// Any other selection or remote-call failure, cause preserved.
    #[error("AI API request failed: {0}")]
    Failed(String),
}

impl From<LlmError> for SummarizeError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::UnsupportedProvider(raw) => Self::UnsupportedProvider(raw),
            LlmError::ApiParse(detail) => Self::Protocol(detail),
            other => Self::Failed(other.to_string()),
        }
    }
}

/// Generate a summary of `text` with the requested provider.
///
/// # Errors
///
/// [`SummarizeError::EmptyText`] for blank input (checked before any client
/// is constructed), [`SummarizeError::UnsupportedProvider`] from selection,
/// and [`SummarizeError::Protocol`] / [`SummarizeError::Failed`] for remote
/// failures.
pub async fn summarize(
    request: &ProviderRequest,
    text: &str,
    prompt: Option<&str>,
) -> Result<String, SummarizeError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SummarizeError::EmptyText);
    }

    let client = LlmClient::select(request)?;
    summarize_with(&client, text, prompt).await
}

/// Provider-agnostic core, split out so tests can inject a mock client.
/// Expects pre-trimmed, non-empty text.
pub(crate) async fn summarize_with(
    llm: &dyn LlmChat,
    text: &str,
    prompt: Option<&str>,
) -> Result<String, SummarizeError> {
    let prompt = prompt.filter(|p| !p.is_empty()).unwrap_or(DEFAULT_PROMPT);
    let messages = [Message::system(prompt), Message::user(text)];

    info!(text_len = text.len(), custom_prompt = prompt != DEFAULT_PROMPT, "summarize: invoking provider");

    match llm.chat(&messages).await {
        Ok(summary) => Ok(summary),
        Err(e) => {
            warn!(error = %e, "summarize: provider call failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
#[path = "summarize_test.rs"]
mod tests;
