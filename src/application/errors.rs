//! Application layer errors

use thiserror::Error;

/// Top-level error surfaced to the CLI
#[derive(Error, Debug)]
pub enum SmartmanError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// No usable provider credential
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error(
        "No API key found. Please set one of the following environment variables:\n\
         For OpenAI: export OPENAI_API_KEY='your-key-here'\n\
         For Anthropic: export ANTH_API_KEY='your-key-here'\n\
         (or LLM_API_KEY, or llm-api-key / openai-api-key / anthropic-api-key in the config file)"
    )]
    Missing,

    #[error("Unknown provider: {0} (expected openai, anthropic or custom)")]
    UnknownProvider(String),
}

/// Any failure talking to an LLM provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("LLM API error ({provider}): {message}")]
pub struct ProviderError {
    pub provider: String,
    pub message: String,
}

impl ProviderError {
    pub fn new(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

/// Cache record errors. Recovered inside the cache layer, never returned by
/// the LLM operations.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, SmartmanError>;
