use crate::application::errors::{ProviderError, SmartmanError};
use crate::domain::entities::ActionType;
use crate::domain::traits::ResponseStore;
use crate::infrastructure::cache::ResponseCache;
use crate::infrastructure::config::Config;
use crate::infrastructure::credentials::Resolution;
use crate::infrastructure::llm::providers::build_http_client;
use crate::infrastructure::llm::{CompletionRequest, ProviderClient, ProviderConfig, ProviderKind, LLM};

/// Summaries, examples and command generation on top of one provider and an
/// optional response cache.
pub struct LLMInterface {
    provider: Box<dyn LLM>,
    config: ProviderConfig,
    cache: Option<Box<dyn ResponseStore>>,
}

impl LLMInterface {
    pub fn new(provider: Box<dyn LLM>, config: ProviderConfig) -> Self {
        Self {
            provider,
            config,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: impl ResponseStore + 'static) -> Self {
        self.cache = Some(Box::new(cache));
        self
    }

    /// Wire up the HTTP provider and cache described by a resolution and config
    pub fn from_resolution(resolution: &Resolution, config: &Config) -> Result<Self, SmartmanError> {
        let client = build_http_client(config.timeout_secs)?;
        let kind = resolution.credential.provider;
        let mut provider = ProviderClient::new(kind, resolution.credential.secret(), client);
        let endpoint = match kind {
            ProviderKind::Custom => config.custom_endpoint.as_deref(),
            ProviderKind::OpenAi | ProviderKind::Anthropic => config.base_url.as_deref(),
        };
        if let Some(endpoint) = endpoint {
            provider = provider.with_base_url(endpoint);
        }

        let mut llm = Self::new(Box::new(provider), resolution.provider.clone());
        if config.cache.enabled {
            match ResponseCache::open(config.cache.directory(), config.cache.ttl()) {
                Ok(cache) => llm = llm.with_cache(cache),
                Err(e) => tracing::warn!("Response cache disabled: {}", e),
            }
        }
        Ok(llm)
    }

    pub fn provider_config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Concise summary of a man page or help text
    pub fn summarize(&self, documentation: &str) -> Result<String, ProviderError> {
        self.cached(ActionType::Summary, documentation)
    }

    /// Practical usage examples for a man page or help text
    pub fn generate_examples(&self, documentation: &str) -> Result<String, ProviderError> {
        self.cached(ActionType::Example, documentation)
    }

    /// Shell command for a natural-language intent. Never cached.
    pub fn generate_command(&self, intent: &str) -> Result<String, ProviderError> {
        self.complete(ActionType::Command, intent)
    }

    // Keyed by the caller's text, not the constructed prompt
    fn cached(&self, action: ActionType, text: &str) -> Result<String, ProviderError> {
        let Some(cache) = &self.cache else {
            return self.complete(action, text);
        };

        if let Some(hit) = cache.get(action, text) {
            tracing::info!("Using cached {} response", action);
            return Ok(hit);
        }

        let response = self.complete(action, text)?;
        if let Err(e) = cache.put(action, text, &response) {
            tracing::warn!("Failed to cache {} response: {}", action, e);
        }
        Ok(response)
    }

    fn complete(&self, action: ActionType, text: &str) -> Result<String, ProviderError> {
        let request = CompletionRequest::new(action.prompt(text), &self.config.model)
            .with_system_prompt(&self.config.system_prompt);

        tracing::debug!(
            provider = self.provider.name(),
            model = %self.config.model,
            %action,
            "Sending request"
        );
        self.provider.send(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::CacheError;
    use crate::infrastructure::llm::LLMResult;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Provider double that records prompts and answers with a fixed reply
    #[derive(Clone, Default)]
    struct RecordingProvider {
        calls: Arc<AtomicUsize>,
        prompts: Arc<Mutex<Vec<CompletionRequest>>>,
        fail_with: Option<ProviderError>,
    }

    impl RecordingProvider {
        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(ProviderError::new("mock", message)),
                ..Self::default()
            }
        }
    }

    impl LLM for RecordingProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn send(&self, request: &CompletionRequest) -> LLMResult<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            self.prompts.lock().unwrap().push(request.clone());
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(format!("response #{}", n)),
            }
        }
    }

    /// Store whose writes always fail
    struct ReadOnlyStore;

    impl ResponseStore for ReadOnlyStore {
        fn get(&self, _action: ActionType, _text: &str) -> Option<String> {
            None
        }

        fn put(&self, _action: ActionType, _text: &str, _response: &str) -> Result<(), CacheError> {
            Err(CacheError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only")))
        }
    }

    fn interface(provider: &RecordingProvider) -> LLMInterface {
        LLMInterface::new(
            Box::new(provider.clone()),
            ProviderConfig::new(ProviderKind::OpenAi, None),
        )
    }

    fn cache() -> (tempfile::TempDir, ResponseCache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::open(dir.path(), Duration::from_secs(3600)).unwrap();
        (dir, cache)
    }

    #[test]
    fn test_summarize_uses_cache_on_second_call() {
        let provider = RecordingProvider::default();
        let (_dir, cache) = cache();
        let llm = interface(&provider).with_cache(cache.clone());
        let doc = "GREP(1) ... manual text";

        let first = llm.summarize(doc).unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get(ActionType::Summary, doc).as_deref(), Some(first.as_str()));

        let second = llm.summarize(doc).unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_prompt_wraps_documentation() {
        let provider = RecordingProvider::default();
        interface(&provider).summarize("LS(1)").unwrap();

        let prompts = provider.prompts.lock().unwrap();
        let request = &prompts[0];
        assert!(request.prompt.starts_with("Summarize this man page concisely"));
        assert!(request.prompt.ends_with("LS(1)"));
        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.max_tokens, 500);
        assert!(request.system_prompt.contains("CLI assistant"));
    }

    #[test]
    fn test_examples_are_cached_separately_from_summary() {
        let provider = RecordingProvider::default();
        let (_dir, cache) = cache();
        let llm = interface(&provider).with_cache(cache);

        let summary = llm.summarize("doc").unwrap();
        let examples = llm.generate_examples("doc").unwrap();
        assert_ne!(summary, examples);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);

        assert_eq!(llm.generate_examples("doc").unwrap(), examples);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_generate_command_is_never_cached() {
        let provider = RecordingProvider::default();
        let (_dir, cache) = cache();
        let llm = interface(&provider).with_cache(cache.clone());

        llm.generate_command("find all pdf files").unwrap();
        llm.generate_command("find all pdf files").unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.get(ActionType::Command, "find all pdf files"), None);
    }

    #[test]
    fn test_provider_error_propagates_and_nothing_is_cached() {
        let provider = RecordingProvider::failing("boom");
        let (_dir, cache) = cache();
        let llm = interface(&provider).with_cache(cache.clone());

        let err = llm.summarize("doc").unwrap_err();
        assert_eq!(err.provider, "mock");
        assert_eq!(err.message, "boom");
        assert_eq!(cache.get(ActionType::Summary, "doc"), None);
    }

    #[test]
    fn test_cache_write_failure_does_not_fail_request() {
        let provider = RecordingProvider::default();
        let llm = interface(&provider).with_cache(ReadOnlyStore);
        assert_eq!(llm.summarize("doc").unwrap(), "response #1");
    }

    #[test]
    fn test_without_cache_every_call_hits_provider() {
        let provider = RecordingProvider::default();
        let llm = interface(&provider);
        llm.summarize("doc").unwrap();
        llm.summarize("doc").unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }
}
