//! Anthropic Provider - Messages API

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::application::errors::ProviderError;
use crate::infrastructure::llm::{CompletionRequest, LLMMessage, LLMResult, LLM};

use super::{parse_body, post_json};

/// Anthropic API endpoint
const API_BASE: &str = "https://api.anthropic.com/v1";

/// Messages API version header value
const API_VERSION: &str = "2023-06-01";

/// Anthropic provider
pub struct AnthropicProvider {
    api_key: String,
    client: Client,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(api_key: impl Into<String>, client: Client) -> Self {
        Self {
            api_key: api_key.into(),
            client,
            base_url: API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/messages", self.base_url.trim_end_matches('/'))
    }
}

/// API request structure. `system` is top-level, not a message.
#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    system: &'a str,
    messages: Vec<LLMMessage>,
    max_tokens: u32,
    temperature: f32,
}

/// API response structure
#[derive(Deserialize, Debug)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

/// Content block
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

impl LLM for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn send(&self, request: &CompletionRequest) -> LLMResult<String> {
        let body = MessagesRequest {
            model: &request.model,
            system: &request.system_prompt,
            messages: vec![LLMMessage::user(&request.prompt)],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let builder = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION);
        let text = post_json(self.name(), builder, &body)?;

        let response: MessagesResponse = parse_body(self.name(), &text)?;
        response
            .content
            .into_iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .ok_or_else(|| ProviderError::new(self.name(), "No text content in response"))
    }
}
