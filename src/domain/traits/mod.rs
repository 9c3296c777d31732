//! Domain traits - Abstractions for infrastructure implementations

pub mod docs;
pub mod store;

pub use docs::DocumentationSource;
pub use store::ResponseStore;
