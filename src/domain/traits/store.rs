use crate::application::errors::CacheError;
use crate::domain::entities::ActionType;

/// ResponseStore trait - abstraction for response persistence
pub trait ResponseStore: Send + Sync {
    /// Previously stored response, if present and still fresh
    fn get(&self, action: ActionType, text: &str) -> Option<String>;

    /// Store a response, replacing any previous one for the same key
    fn put(&self, action: ActionType, text: &str, response: &str) -> Result<(), CacheError>;
}
