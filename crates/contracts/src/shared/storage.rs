use std::collections::HashMap;

use super::error::StateError;

/// String key/value storage with the semantics of the browser's
/// `Storage` interface (session or local).
pub trait KeyValueStore {
    /// Returns `Ok(None)` when the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StateError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StateError>;
}

/// MemoryStore keeps items in a plain map.
/// Used where no browser storage exists (native builds, tests).
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StateError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StateError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
