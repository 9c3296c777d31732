//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading and per-user paths
//! - Credentials: Provider and API key resolution
//! - LLM: Provider clients (OpenAI, Anthropic, custom)
//! - Cache: Response persistence
//! - Docs: Man page and help retrieval
//! - Adapters: Terminal input and rendering
//! - Alias: Shell profile integration

pub mod config;
pub mod credentials;
pub mod llm;
pub mod cache;
pub mod docs;
pub mod adapters;
pub mod alias;
