//! The stored Places API key.

use crate::error::StoreError;
use crate::store::KeyValueStore;

pub const API_KEY_KEY: &str = "md_api_key";

/// Opaque API credential kept in the key/value store.
#[derive(Debug, Clone)]
pub struct Credentials<K> {
    store: K,
}

impl<K: KeyValueStore> Credentials<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// The stored key, or `None` when unset or blank.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    pub fn api_key(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .store
            .get(API_KEY_KEY)?
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty()))
    }

    /// Stores `key` after trimming. Returns `false` without writing when the
    /// trimmed key is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write fails.
    pub fn set_api_key(&self, key: &str) -> Result<bool, StoreError> {
        let key = key.trim();
        if key.is_empty() {
            return Ok(false);
        }
        self.store.set(API_KEY_KEY, key)?;
        Ok(true)
    }

    /// Forgets the stored key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write fails.
    pub fn clear_api_key(&self) -> Result<(), StoreError> {
        self.store.remove(API_KEY_KEY)
    }
}
