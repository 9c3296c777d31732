//! OpenAI Provider - Chat completions API

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::application::errors::ProviderError;
use crate::infrastructure::llm::{CompletionRequest, LLMMessage, LLMResult, LLM};

use super::{parse_body, post_json};

/// OpenAI API endpoint
const API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI provider
pub struct OpenAiProvider {
    api_key: String,
    client: Client,
    base_url: String,
}

impl OpenAiProvider {
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

    /// Get base URL for API
    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// API request structure
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<LLMMessage>,
    temperature: f32,
    max_tokens: u32,
}

/// API response structure
#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// Choice in response
#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

/// Response message
#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: Option<String>,
}

impl LLM for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn send(&self, request: &CompletionRequest) -> LLMResult<String> {
        let body = ChatRequest {
            model: &request.model,
            messages: vec![
                LLMMessage::system(&request.system_prompt),
                LLMMessage::user(&request.prompt),
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let builder = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key));
        let text = post_json(self.name(), builder, &body)?;

        let chat_response: ChatResponse = parse_body(self.name(), &text)?;
        chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::new(self.name(), "No choices in response"))?
            .message
            .content
            .ok_or_else(|| ProviderError::new(self.name(), "Response message has no content"))
    }
}
