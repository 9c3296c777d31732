//! LLM integration - Multi-provider AI support

pub mod traits;
pub mod config;
pub mod providers;

#[cfg(test)]
mod tests;

pub use traits::{CompletionRequest, LLMMessage, LLMResult, LLM};
pub use config::{ProviderConfig, ProviderKind};
pub use providers::{AnthropicProvider, CustomProvider, OpenAiProvider, ProviderClient};
