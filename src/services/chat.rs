//! Chat service — follow-up conversation with per-visitor memory.
//!
//! DESIGN
//! ======
//! Each turn locks the visitor's history for its whole duration, appends the
//! user message, sends the full accumulated history (seed system message
//! included) to the provider, and appends the reply on success.
//!
//! ERROR HANDLING
//! ==============
//! Selection and remote failures collapse into a single `ChatError::Failed`
//! with the cause preserved. The user turn appended before the provider call
//! is intentionally NOT rolled back on failure: the question a visitor asked
//! stays part of their history even when the answer never arrived.

use tracing::{info, warn};

use crate::llm::config::ProviderRequest;
use crate::llm::{LlmChat, LlmClient, LlmError, Message};
use crate::memory::ChatMemory;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Failed to get response from AI: {0}")]
    Failed(String),
}

impl From<LlmError> for ChatError {
    fn from(err: LlmError) -> Self {
        Self::Failed(err.to_string())
    }
}

/// Run one chat turn for a visitor.
///
/// The visitor id is an opaque caller-supplied string; an empty id is keyed
/// as-is. No prior summarization is required.
///
/// # Errors
///
/// [`ChatError::Failed`] for any selection or provider failure.
pub async fn chat(
    memory: &ChatMemory,
    request: &ProviderRequest,
    visitor_id: &str,
    message: &str,
) -> Result<String, ChatError> {
    run_turn(memory, visitor_id, message, || {
        LlmClient::select(request).map(|client| Box::new(client) as Box<dyn LlmChat>)
    })
    .await
}

/// One serialized turn: lock history, append user turn, build the client,
/// invoke with the full history, record the reply. Split from [`chat`] so
/// tests can inject a mock client factory.
pub(crate) async fn run_turn<F>(
    memory: &ChatMemory,
    visitor_id: &str,
    message: &str,
    make_llm: F,
) -> Result<String, ChatError>
where
    F: FnOnce() -> Result<Box<dyn LlmChat>, LlmError>,
{
    let handle = memory.get_or_create(visitor_id).await;
    let mut history = handle.lock().await;

    history.push(Message::user(message));

    // Client construction happens after the append on purpose: a failed turn
    // still leaves the question in the history.
    let llm = make_llm()?;

    info!(visitor_id, history_len = history.messages.len(), "chat: invoking provider");

    match llm.chat(&history.messages).await {
        Ok(reply) => {
            history.push(Message::assistant(reply.clone()));
            history.trim_to(memory.max_messages());
            Ok(reply)
        }
        Err(e) => {
            warn!(visitor_id, error = %e, "chat: provider call failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
