//! Domain layer - Core types with no external dependencies
//! 
//! This layer contains:
//! - Entities: Action types and documentation sources
//! - Traits: Abstractions for infrastructure (ResponseStore, DocumentationSource)

pub mod entities;
pub mod traits;
