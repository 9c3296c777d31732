//! Interactive mode - line parsing and dispatching

pub mod parser;
pub mod dispatcher;

pub use parser::{InteractiveCommand, LineParser};
pub use dispatcher::{Dispatch, Dispatcher, Reply, ReplyKind, USAGE};
