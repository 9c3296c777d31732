//! LLM traits - Unified provider interface

use serde::Serialize;

use crate::application::errors::ProviderError;
use crate::infrastructure::llm::config::{DEFAULT_MAX_TOKENS, DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE};

/// Chat message for chat-style providers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LLMMessage {
    /// Role: "system", "user", or "assistant"
    pub role: String,
    /// Message content
    pub content: String,
}

impl LLMMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A single prompt to send to a provider
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub system_prompt: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }
}

/// Result type for LLM operations
pub type LLMResult<T> = Result<T, ProviderError>;

/// LLM Provider trait
pub trait LLM: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Send one prompt and return the response text
    fn send(&self, request: &CompletionRequest) -> LLMResult<String>;
}
