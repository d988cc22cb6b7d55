//! Storage trait and typed access helpers.

use serde::{de::DeserializeOwned, Serialize};

use crate::StorageError;

/// A durable key-value store.
///
/// Writes are synchronous from the caller's point of view: once `set_raw`
/// returns `Ok`, a fresh store opened on the same location sees the value.
pub trait Storage {
    /// Read the raw bytes stored under `key`.
    ///
    /// Returns `None` if the key doesn't exist.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Write raw bytes under `key`, replacing any previous value.
    fn set_raw(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Delete the value under `key`. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// List all keys currently stored.
    fn keys(&self) -> Result<Vec<String>, StorageError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get_raw(key)?.is_some())
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).set_raw(key, bytes)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        (**self).keys()
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).set_raw(key, bytes)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        (**self).keys()
    }
}

/// Typed JSON access on top of any [`Storage`].
pub trait StorageExt: Storage {
    /// Get a value, deserializing it from JSON.
    ///
    /// ```rust,ignore
    /// let cart: Option<CartState> = store.get("shop_cart")?;
    /// ```
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value, serializing it as JSON.
    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value)?;
        self.set_raw(key, &bytes)
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}

/// Check that a key is usable by every backend.
///
/// Keys are non-empty and made of ASCII alphanumerics, `_`, `-`, `.` and `:`,
/// and may not start with a dot.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("shop_cart").is_ok());
        assert!(validate_key("cart:guest-1.v2").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("a/b").is_err());
    }
}
