//! Config Store Port (Driven Port)
//!
//! Read access to persisted settings such as saved upstream cookies.

/// Persisted key/value configuration.
pub trait ConfigStore: Send + Sync {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
}

/// A store with no entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyConfigStore;

impl ConfigStore for EmptyConfigStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }
}
