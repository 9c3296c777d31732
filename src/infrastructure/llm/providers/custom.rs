//! Custom Provider - Generic completions endpoint

use reqwest::blocking::Client;
use serde::Serialize;

use crate::infrastructure::llm::{CompletionRequest, LLMResult, LLM};

use super::{parse_body, post_json};

/// Placeholder completions endpoint, normally overridden by `custom-endpoint`
const DEFAULT_ENDPOINT: &str = "https://api.example.com/v1/completions";

/// Provider for any endpoint taking a flat `prompt` and returning `text`
pub struct CustomProvider {
    api_key: String,
    client: Client,
    endpoint: String,
}

impl CustomProvider {
    pub fn new(api_key: impl Into<String>, client: Client) -> Self {
        Self {
            api_key: api_key.into(),
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    prompt: String,
    max_tokens: u32,
    temperature: f32,
}

impl LLM for CustomProvider {
    fn name(&self) -> &str {
        "custom"
    }

    fn send(&self, request: &CompletionRequest) -> LLMResult<String> {
        let prompt = if request.system_prompt.is_empty() {
            request.prompt.clone()
        } else {
            format!("{}\n\n{}", request.system_prompt, request.prompt)
        };
        let body = CompletionBody {
            model: &request.model,
            prompt,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let builder = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key));
        let text = post_json(self.name(), builder, &body)?;

        // Lenient: a JSON reply without `text` is an empty answer
        let value: serde_json::Value = parse_body(self.name(), &text)?;
        Ok(value
            .get("text")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string())
    }
}
