//! smartman - man page summaries, usage examples and shell commands from LLMs

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use application::errors::{CredentialError, ProviderError, SmartmanError};
pub use application::services::LLMInterface;
pub use infrastructure::cache::ResponseCache;
pub use infrastructure::credentials::{Credential, CredentialResolver, Resolution};
pub use infrastructure::llm::{ProviderClient, ProviderConfig, ProviderKind};
