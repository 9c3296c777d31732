//! Adapters - terminal integration

pub mod console;

pub use console::ConsoleAdapter;
