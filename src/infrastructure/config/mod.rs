//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::errors::ConfigError;
use crate::infrastructure::llm::providers::DEFAULT_TIMEOUT_SECS;
use crate::infrastructure::llm::ProviderKind;

/// Per-user directory name under the home directory
const APP_DIR: &str = ".smartman";

const SECS_PER_HOUR: u64 = 3600;

/// smartman configuration, read from `~/.smartman/config.yaml`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// openai, anthropic or custom
    pub provider: Option<ProviderKind>,
    pub model: Option<String>,

    /// Generic key, paired with `provider`
    #[serde(alias = "LLM_API_KEY")]
    pub llm_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,

    /// API base URL override for openai / anthropic (proxies, gateways)
    pub base_url: Option<String>,
    /// Completions URL for the custom provider
    pub custom_endpoint: Option<String>,
    pub system_prompt: Option<String>,
    pub timeout_secs: u64,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_hours: u64,
    pub directory: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: None,
            model: None,
            llm_api_key: None,
            openai_api_key: None,
            anthropic_api_key: None,
            base_url: None,
            custom_endpoint: None,
            system_prompt: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache: CacheConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_hours: 24,
            directory: None,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours.saturating_mul(SECS_PER_HOUR))
    }

    pub fn directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(default_cache_dir)
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config {}: {}", path.display(), e)))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, defaults otherwise
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("timeout-secs must be greater than 0".to_string()));
        }
        if self.cache.ttl_hours == 0 {
            return Err(ConfigError::InvalidValue("cache.ttl-hours must be greater than 0".to_string()));
        }
        if self.cache.ttl_hours > u64::MAX / SECS_PER_HOUR {
            return Err(ConfigError::InvalidValue(format!(
                "cache.ttl-hours must be at most {}",
                u64::MAX / SECS_PER_HOUR
            )));
        }
        Ok(())
    }
}

/// `~/.smartman`, or `.smartman` relative to the working directory when no
/// home directory is known
pub fn smartman_home() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(APP_DIR))
}

pub fn default_config_path() -> PathBuf {
    smartman_home().join("config.yaml")
}

pub fn default_cache_dir() -> PathBuf {
    smartman_home().join("cache")
}

/// Marker written after the welcome message has been shown once
pub fn first_run_flag() -> PathBuf {
    smartman_home().join(".first_run_complete")
}
