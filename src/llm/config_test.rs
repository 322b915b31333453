use super::*;

#[test]
fn parse_provider_recognizes_all_families() {
    assert_eq!(parse_provider("openai").unwrap(), ProviderKind::OpenAi);
    assert_eq!(parse_provider("azure").unwrap(), ProviderKind::AzureOpenAi);
    assert_eq!(parse_provider("azureopenai").unwrap(), ProviderKind::AzureOpenAi);
    assert_eq!(parse_provider("anthropic").unwrap(), ProviderKind::Anthropic);
    assert_eq!(parse_provider("gemini").unwrap(), ProviderKind::Gemini);
}

#[test]
fn parse_provider_is_case_insensitive() {
    assert_eq!(parse_provider("OpenAI").unwrap(), ProviderKind::OpenAi);
    assert_eq!(parse_provider("AZURE").unwrap(), ProviderKind::AzureOpenAi);
    assert_eq!(parse_provider("AzureOpenAI").unwrap(), ProviderKind::AzureOpenAi);
    assert_eq!(parse_provider("Anthropic").unwrap(), ProviderKind::Anthropic);
    assert_eq!(parse_provider("GEMINI").unwrap(), ProviderKind::Gemini);
}

#[test]
fn parse_provider_rejects_unknown_and_preserves_casing() {
    let err = parse_provider("Cohere").unwrap_err();
    match err {
        LlmError::UnsupportedProvider(raw) => assert_eq!(raw, "Cohere"),
        other => panic!("expected UnsupportedProvider, got {other:?}"),
    }
}

#[test]
fn parse_provider_rejects_empty_string() {
    assert!(matches!(parse_provider(""), Err(LlmError::UnsupportedProvider(raw)) if raw.is_empty()));
}

#[test]
fn timeouts_default_when_env_unset() {
    // Env vars are unset in the test environment unless a test sets them.
    let timeouts = LlmTimeouts::from_env();
    assert_eq!(timeouts.request_secs, DEFAULT_LLM_REQUEST_TIMEOUT_SECS);
    assert_eq!(timeouts.connect_secs, DEFAULT_LLM_CONNECT_TIMEOUT_SECS);
}
