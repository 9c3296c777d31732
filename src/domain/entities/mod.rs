//! Domain entities - Core business objects with no external dependencies

pub mod action;
pub mod documentation;

pub use action::ActionType;
pub use documentation::DocSource;
