//! Credential resolution
//!
//! Precedence, first match wins:
//! 1. explicit `--api-key`
//! 2. environment: the named provider's variable, else `OPENAI_API_KEY`
//!    before `ANTH_API_KEY`, then the generic `LLM_API_KEY`
//! 3. config file: `llm-api-key`, then `openai-api-key`, then `anthropic-api-key`

use std::collections::HashMap;
use std::fmt;

use crate::application::errors::CredentialError;
use crate::infrastructure::config::Config;
use crate::infrastructure::llm::{ProviderConfig, ProviderKind};

/// Generic key variable, paired with whichever provider is configured
pub const GENERIC_KEY_VAR: &str = "LLM_API_KEY";

const KEY_VARS: [&str; 3] = ["OPENAI_API_KEY", "ANTH_API_KEY", GENERIC_KEY_VAR];

/// Where a credential was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Explicit,
    Environment(&'static str),
    ConfigFile,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Explicit => write!(f, "command line"),
            CredentialSource::Environment(var) => write!(f, "${}", var),
            CredentialSource::ConfigFile => write!(f, "config file"),
        }
    }
}

/// A provider secret and where it came from
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub provider: ProviderKind,
    pub source: CredentialSource,
    secret: String,
}

impl Credential {
    pub fn new(provider: ProviderKind, secret: impl Into<String>, source: CredentialSource) -> Self {
        Self {
            provider,
            source,
            secret: secret.into(),
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("provider", &self.provider)
            .field("source", &self.source)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Outcome of resolution: who to call, with what key and model
#[derive(Debug, Clone)]
pub struct Resolution {
    pub credential: Credential,
    pub provider: ProviderConfig,
}

/// Resolves provider, credential and model from arguments, environment and config
pub struct CredentialResolver {
    vars: HashMap<String, String>,
    config: Config,
}

impl CredentialResolver {
    pub fn new(config: Config) -> Self {
        Self {
            vars: HashMap::new(),
            config,
        }
    }

    /// Snapshot the provider key variables from the process environment
    pub fn from_env(config: Config) -> Self {
        let vars = KEY_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok().map(|value| (name.to_string(), value)))
            .collect::<Vec<_>>();
        Self::new(config).with_vars(vars)
    }

    pub fn with_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn resolve(
        &self,
        api_key: Option<&str>,
        provider: Option<&str>,
        model: Option<&str>,
    ) -> Result<Resolution, CredentialError> {
        let explicit_provider = non_empty(provider).map(str::parse::<ProviderKind>).transpose()?;
        let configured_provider = self.config.provider;
        let generic_provider = explicit_provider.or(configured_provider).unwrap_or_default();

        let credential = match non_empty(api_key) {
            Some(key) => Credential::new(generic_provider, key, CredentialSource::Explicit),
            None => self
                .env_credential(explicit_provider, generic_provider)
                .or_else(|| self.config_credential(explicit_provider, generic_provider))
                .ok_or(CredentialError::Missing)?,
        };

        let kind = credential.provider;
        // The configured model only applies to the provider it was written for
        let configured_model = match configured_provider {
            Some(p) if p != kind => None,
            _ => non_empty(self.config.model.as_deref()),
        };
        let mut provider_config = ProviderConfig::new(kind, non_empty(model).or(configured_model));
        if let Some(prompt) = non_empty(self.config.system_prompt.as_deref()) {
            provider_config = provider_config.with_system_prompt(prompt);
        }

        tracing::info!(
            "Using {} with model {} (key from {})",
            kind,
            provider_config.model,
            credential.source
        );

        Ok(Resolution {
            credential,
            provider: provider_config,
        })
    }

    fn env_credential(
        &self,
        explicit: Option<ProviderKind>,
        generic: ProviderKind,
    ) -> Option<Credential> {
        let candidates: Vec<ProviderKind> = match explicit {
            Some(kind) => vec![kind],
            None => vec![ProviderKind::OpenAi, ProviderKind::Anthropic],
        };

        candidates
            .into_iter()
            .find_map(|kind| {
                self.var(kind.env_var())
                    .map(|key| Credential::new(kind, key, CredentialSource::Environment(kind.env_var())))
            })
            .or_else(|| {
                self.var(GENERIC_KEY_VAR).map(|key| {
                    Credential::new(generic, key, CredentialSource::Environment(GENERIC_KEY_VAR))
                })
            })
    }

    fn config_credential(&self, explicit: Option<ProviderKind>, generic: ProviderKind) -> Option<Credential> {
        if let Some(key) = non_empty(self.config.llm_api_key.as_deref()) {
            return Some(Credential::new(generic, key, CredentialSource::ConfigFile));
        }

        let keyed = [
            (ProviderKind::OpenAi, self.config.openai_api_key.as_deref()),
            (ProviderKind::Anthropic, self.config.anthropic_api_key.as_deref()),
        ];
        keyed
            .into_iter()
            .filter(|(kind, _)| explicit.map_or(true, |e| e == *kind))
            .find_map(|(kind, key)| {
                non_empty(key).map(|key| Credential::new(kind, key, CredentialSource::ConfigFile))
            })
    }

    fn var(&self, name: &str) -> Option<&str> {
        non_empty(self.vars.get(name).map(String::as_str))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
