//! In-memory key-value backing.

use super::{KeyValueStore, StorageError, StorageResult};
use std::collections::HashMap;

/// Process-local key-value store.
///
/// Writes can be switched off to exercise storage-unavailable paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
    reject_writes: bool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.into(), value.into());
        store
    }

    /// Makes every following `set`/`remove` fail with `Unavailable`.
    pub fn set_reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    /// Raw view of one entry, bypassing any decoding.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn ensure_writable(&self) -> StorageResult<()> {
        if self.reject_writes {
            return Err(StorageError::Unavailable(
                "memory store is read-only".to_string(),
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.ensure_writable()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<bool> {
        self.ensure_writable()?;
        Ok(self.entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKeyValueStore;
    use crate::storage::{KeyValueStore, StorageError};

    #[test]
    fn set_overwrites_previous_value() {
        let mut store = MemoryKeyValueStore::new();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn rejected_writes_leave_entries_untouched() {
        let mut store = MemoryKeyValueStore::with_entry("k", "kept");
        store.set_reject_writes(true);

        let err = store.set("k", "lost").unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert!(store.remove("k").is_err());
        assert_eq!(store.raw("k"), Some("kept"));
    }
}
