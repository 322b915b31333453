//! Provider selection config.
//!
//! Unlike most deployments, provider credentials arrive on every request
//! rather than from server-side configuration, so [`ProviderRequest`] is the
//! parse target here. Timeout and token-budget knobs still come from the
//! environment.

use super::types::LlmError;

pub const DEFAULT_AZURE_API_VERSION: &str = "2025-01-01";
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

/// The four supported provider families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    AzureOpenAi,
    Anthropic,
    Gemini,
}

/// Logical request shape shared by the summarize and chat paths: which
/// provider to call, with which model, credentials, and sampling temperature.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// Raw provider string as sent by the caller. Matched case-insensitively.
    pub provider: String,
    /// Model name, or the deployment id for Azure.
    pub model: String,
    pub api_key: String,
    /// Endpoint URL. Consumed only by the Azure branch.
    pub api_url: Option<String>,
    /// Azure API version. Defaults to [`DEFAULT_AZURE_API_VERSION`].
    pub api_version: Option<String>,
    pub temperature: f32,
}

/// Parse a caller-supplied provider string into a [`ProviderKind`].
///
/// Matching is case-insensitive; both `azure` and `azureopenai` select the
/// Azure branch. The error preserves the caller's original casing.
///
/// # Errors
///
/// Returns [`LlmError::UnsupportedProvider`] for anything outside the four
/// recognized families.
pub fn parse_provider(raw: &str) -> Result<ProviderKind, LlmError> {
    match raw.to_lowercase().as_str() {
        "openai" => Ok(ProviderKind::OpenAi),
        "azure" | "azureopenai" => Ok(ProviderKind::AzureOpenAi),
        "anthropic" => Ok(ProviderKind::Anthropic),
        "gemini" => Ok(ProviderKind::Gemini),
        _ => Err(LlmError::UnsupportedProvider(raw.to_string())),
    }
}

/// Outbound call timeouts, loaded from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl LlmTimeouts {
    /// Read `LLM_REQUEST_TIMEOUT_SECS` / `LLM_CONNECT_TIMEOUT_SECS`, falling
    /// back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            request_secs: env_parse_u64("LLM_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("LLM_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS),
        }
    }
}

/// Completion token budget sent to providers that require one (Anthropic) or
/// accept one (the rest). `LLM_MAX_TOKENS` overrides the default.
#[must_use]
pub fn max_tokens() -> u32 {
    std::env::var("LLM_MAX_TOKENS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_LLM_MAX_TOKENS)
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
