//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: LLM orchestration with response caching
//! - Interactive: parsing and dispatching interactive-mode input
//! - Errors: Domain-specific errors

pub mod errors;
pub mod services;
pub mod interactive;
