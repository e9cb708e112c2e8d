//! Local key-value persistence.
//!
//! The cart and session are mirrored to a long-lived store; checkout staging
//! data goes to a short-lived one. Both speak plain strings, the same way a
//! browser's local and session storage do; JSON encoding is layered on top by
//! [`read_json`] and [`write_json`].

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A stored value could not be encoded or decoded.
    #[error("storage serialization error for key {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The key contains characters the store cannot represent.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// String key-value store with last-writer-wins semantics.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Keys used in the stores.
pub mod keys {
    /// JSON array of cart lines (persistent store).
    pub const CART: &str = "shopping_cart";

    /// JSON profile of the logged-in user (persistent store).
    pub const CURRENT_USER: &str = "current_user";

    /// Plain-string bearer token (persistent store).
    pub const AUTH_TOKEN: &str = "auth_token";

    /// JSON shipping address staged between checkout and payment (staging store).
    pub const SHIPPING_ADDRESS: &str = "shippingAddress";
}

/// Read and decode a JSON value.
///
/// # Errors
///
/// Returns `StorageError` if the read fails or the stored value does not
/// decode as `T`.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Serialization {
            key: key.to_owned(),
            source,
        })
}

/// Encode and store a JSON value.
///
/// # Errors
///
/// Returns `StorageError` if encoding or the write fails.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialization {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_helpers_roundtrip_through_store() {
        let store = MemoryStore::new();
        write_json(&store, "numbers", &vec![1, 2, 3]).unwrap();
        let numbers: Option<Vec<i32>> = read_json(&store, "numbers").unwrap();
        assert_eq!(numbers, Some(vec![1, 2, 3]));

        let missing: Option<Vec<i32>> = read_json(&store, "absent").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_read_json_reports_corrupt_value() {
        let store = MemoryStore::new();
        store.set("numbers", "[1, 2,").unwrap();
        let result: Result<Option<Vec<i32>>, _> = read_json(&store, "numbers");
        assert!(matches!(
            result,
            Err(StorageError::Serialization { ref key, .. }) if key == "numbers"
        ));
    }
}
