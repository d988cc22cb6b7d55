//! In-process storage, mostly for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::store::validate_key;
use crate::{Storage, StorageError};

/// Storage held in memory.
///
/// Clones share the same underlying map, so a clone handed to a second
/// consumer behaves like reopening the same durable store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_records<R>(
        &self,
        f: impl FnOnce(&mut HashMap<String, Vec<u8>>) -> R,
    ) -> Result<R, StorageError> {
        let mut records = self.records.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(f(&mut records))
    }
}

impl Storage for MemoryStorage {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;
        self.with_records(|r| r.get(key).cloned())
    }

    fn set_raw(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        validate_key(key)?;
        self.with_records(|r| {
            r.insert(key.to_string(), bytes.to_vec());
        })
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.with_records(|r| {
            r.remove(key);
        })
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.with_records(|r| {
            let mut keys: Vec<String> = r.keys().cloned().collect();
            keys.sort();
            keys
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageExt;

    #[test]
    fn test_clones_share_records() {
        let store = MemoryStorage::new();
        let other = store.clone();

        store.set("shared", &vec![1, 2, 3]).unwrap();
        let seen: Option<Vec<i32>> = other.get("shared").unwrap();
        assert_eq!(seen, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_exists_and_delete() {
        let store = MemoryStorage::new();
        store.set("k", &true).unwrap();
        assert!(store.exists("k").unwrap());

        store.delete("k").unwrap();
        assert!(!store.exists("k").unwrap());
    }
}
