use std::collections::HashMap;
use std::sync::RwLock;

use super::KeyValueStore;
use crate::errors::StorageError;

/// Process-local storage with an optional total-size quota.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes that would push the stored total past `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self { entries: RwLock::default(), quota_bytes: Some(quota_bytes) }
    }

    /// Bytes currently held across all keys.
    pub fn used_bytes(&self) -> Result<usize, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.values().map(String::len).sum())
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;

        if let Some(quota) = self.quota_bytes {
            // The value being replaced still counts until the write succeeds.
            let used: usize = entries.values().map(String::len).sum();
            if used + value.len() > quota {
                return Err(StorageError::QuotaExceeded { key: key.to_owned(), bytes: value.len(), quota });
            }
        }

        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}
