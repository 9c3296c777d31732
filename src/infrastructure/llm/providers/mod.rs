//! LLM Providers

pub mod openai;
pub mod anthropic;
pub mod custom;

pub use openai::OpenAiProvider;
pub use anthropic::AnthropicProvider;
pub use custom::CustomProvider;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::application::errors::ProviderError;
use crate::infrastructure::llm::{CompletionRequest, LLMResult, ProviderKind, LLM};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Build the blocking HTTP client shared by all providers
pub fn build_http_client(timeout_secs: u64) -> Result<Client, ProviderError> {
    Client::builder()
        .user_agent(concat!("smartman/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ProviderError::new("http", format!("Failed to build HTTP client: {}", e)))
}

/// Provider selected at construction time
pub enum ProviderClient {
    OpenAi(OpenAiProvider),
    Anthropic(AnthropicProvider),
    Custom(CustomProvider),
}

impl ProviderClient {
    pub fn new(kind: ProviderKind, api_key: impl Into<String>, client: Client) -> Self {
        match kind {
            ProviderKind::OpenAi => Self::OpenAi(OpenAiProvider::new(api_key, client)),
            ProviderKind::Anthropic => Self::Anthropic(AnthropicProvider::new(api_key, client)),
            ProviderKind::Custom => Self::Custom(CustomProvider::new(api_key, client)),
        }
    }

    /// Point the provider at another endpoint (proxies, self-hosted gateways, tests)
    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        match self {
            Self::OpenAi(p) => Self::OpenAi(p.with_base_url(base_url)),
            Self::Anthropic(p) => Self::Anthropic(p.with_base_url(base_url)),
            Self::Custom(p) => Self::Custom(p.with_endpoint(base_url)),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::OpenAi(_) => ProviderKind::OpenAi,
            Self::Anthropic(_) => ProviderKind::Anthropic,
            Self::Custom(_) => ProviderKind::Custom,
        }
    }
}

impl LLM for ProviderClient {
    fn name(&self) -> &str {
        self.kind().name()
    }

    fn send(&self, request: &CompletionRequest) -> LLMResult<String> {
        match self {
            Self::OpenAi(p) => p.send(request),
            Self::Anthropic(p) => p.send(request),
            Self::Custom(p) => p.send(request),
        }
    }
}

/// POST a JSON body and return the raw response body of a 2xx reply.
/// Non-2xx replies become a `ProviderError` via [`error_from_status`].
fn post_json<T: Serialize>(provider: &str, builder: RequestBuilder, body: &T) -> LLMResult<String> {
    let response = builder
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .map_err(|e| ProviderError::new(provider, format!("Network error: {}", e)))?;

    let status = response.status();
    let text = response
        .text()
        .map_err(|e| ProviderError::new(provider, format!("Failed to read response body: {}", e)))?;

    if !status.is_success() {
        tracing::debug!(provider, status = status.as_u16(), "Provider returned an error status");
        return Err(error_from_status(provider, status, &text));
    }

    Ok(text)
}

fn parse_body<T: DeserializeOwned>(provider: &str, body: &str) -> LLMResult<T> {
    serde_json::from_str(body)
        .map_err(|e| ProviderError::new(provider, format!("Invalid response: {}", e)))
}

/// Turn a failed HTTP reply into a `ProviderError`.
///
/// Structured bodies of the form `{"error": {"message": "..."}}` (shared by
/// OpenAI, Anthropic and most compatible gateways) yield their message.
/// Anything that is not JSON falls back to the status code and raw body.
pub fn error_from_status(provider: &str, status: StatusCode, body: &str) -> ProviderError {
    let message = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("error") {
            Some(serde_json::Value::String(message)) => message.clone(),
            Some(error) => error
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Unknown error (HTTP {})", status.as_u16())),
            None => format!("Unknown error (HTTP {})", status.as_u16()),
        },
        Err(_) => format!("HTTP error {}: {}", status.as_u16(), body),
    };
    ProviderError::new(provider, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_error_message_is_extracted() {
        let err = error_from_status(
            "openai",
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":{"message":"boom","type":"server_error"}}"#,
        );
        assert_eq!(err.provider, "openai");
        assert_eq!(err.message, "boom");
        assert_eq!(err.to_string(), "LLM API error (openai): boom");
    }

    #[test]
    fn test_anthropic_error_envelope() {
        let err = error_from_status(
            "anthropic",
            StatusCode::UNAUTHORIZED,
            r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#,
        );
        assert_eq!(err.message, "invalid x-api-key");
    }

    #[test]
    fn test_non_json_body_falls_back_to_status() {
        let err = error_from_status("custom", StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(err.message.contains("502"), "got: {}", err.message);
        assert!(err.message.contains("bad gateway"));
    }

    #[test]
    fn test_json_without_message() {
        let err = error_from_status("openai", StatusCode::INTERNAL_SERVER_ERROR, r#"{"detail":"x"}"#);
        assert!(err.message.starts_with("Unknown error"));

        let err = error_from_status("custom", StatusCode::BAD_REQUEST, r#"{"error":"bad prompt"}"#);
        assert_eq!(err.message, "bad prompt");
    }

    #[test]
    fn test_provider_client_selects_variant() {
        let client = Client::new();
        let provider = ProviderClient::new(ProviderKind::Anthropic, "k", client);
        assert_eq!(provider.kind(), ProviderKind::Anthropic);
        assert_eq!(provider.name(), "anthropic");
    }
}
