//! LLM Configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::application::errors::CredentialError;

/// Default system prompt for every provider
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful CLI assistant that explains man pages and generates commands.";

/// Sampling temperature used for every request
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Completion length limit used for every request
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// LLM Provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Custom,
}

impl Default for ProviderKind {
    fn default() -> Self {
        Self::OpenAi
    }
}

impl ProviderKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Custom => "custom",
        }
    }

    /// Model used when none is given explicitly
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "gpt-4o",
            ProviderKind::Anthropic => "claude-3-opus-20240229",
            ProviderKind::Custom => "default-model",
        }
    }

    /// Environment variable holding this provider's key
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Anthropic => "ANTH_API_KEY",
            ProviderKind::Custom => "LLM_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = CredentialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "custom" => Ok(ProviderKind::Custom),
            other => Err(CredentialError::UnknownProvider(other.to_string())),
        }
    }
}

/// Provider selection with its model and system prompt
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub model: String,
    pub system_prompt: String,
}

impl ProviderConfig {
    pub fn new(kind: ProviderKind, model: Option<&str>) -> Self {
        Self {
            kind,
            model: model.unwrap_or(kind.default_model()).to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }
}
