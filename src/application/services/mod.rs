//! Application services - Business logic orchestration

pub mod llm_service;

pub use llm_service::LLMInterface;
