//! Provider selection tests against a local mock server

use crate::infrastructure::llm::providers::build_http_client;
use crate::infrastructure::llm::{CompletionRequest, LLMMessage, ProviderClient, ProviderKind, LLM};
use mockito::Server;

#[test]
fn test_provider_client_routes_to_openai_wire_format() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"ok"}}]}"#)
        .create();

    let client = build_http_client(5).expect("client");
    let provider: Box<dyn LLM> =
        Box::new(ProviderClient::new(ProviderKind::OpenAi, "k", client).with_base_url(server.url()));

    let response = provider.send(&CompletionRequest::new("hi", "gpt-4o"));
    mock.assert();
    assert_eq!(response.unwrap(), "ok");
}

#[test]
fn test_provider_client_routes_to_custom_endpoint() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/generate")
        .with_status(200)
        .with_body(r#"{"text":"done"}"#)
        .create();

    let client = build_http_client(5).expect("client");
    let provider = ProviderClient::new(ProviderKind::Custom, "k", client)
        .with_base_url(format!("{}/generate", server.url()));

    assert_eq!(provider.name(), "custom");
    assert_eq!(provider.send(&CompletionRequest::new("hi", "default-model")).unwrap(), "done");
    mock.assert();
}

#[test]
fn test_unreachable_endpoint_is_provider_error() {
    let client = build_http_client(2).expect("client");
    let provider = ProviderClient::new(ProviderKind::Anthropic, "k", client)
        .with_base_url("http://127.0.0.1:9");

    let err = provider
        .send(&CompletionRequest::new("hi", "claude-3-opus-20240229"))
        .unwrap_err();
    assert_eq!(err.provider, "anthropic");
    assert!(err.message.starts_with("Network error"));
}

#[test]
fn test_completion_request_defaults() {
    let request = CompletionRequest::new("prompt", "model");
    assert_eq!(request.max_tokens, 500);
    assert!((request.temperature - 0.2).abs() < f32::EPSILON);
    assert!(request.system_prompt.contains("CLI assistant"));
}

#[test]
fn test_llm_message_builder() {
    let msg = LLMMessage::user("Hello");
    assert_eq!(msg.role, "user");
    assert_eq!(msg.content, "Hello");

    let system_msg = LLMMessage::system("You are helpful.");
    assert_eq!(system_msg.role, "system");
}
