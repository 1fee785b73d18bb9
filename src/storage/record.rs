use super::engine::KvBackend;
use super::keys::namespaced_key;
use crate::core::{Result, StoreError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex};
use tracing::trace;

/// JSON records under namespaced keys.
///
/// One mutex serializes every store, get and delete regardless of key.
pub struct RecordStore {
    backend: Arc<dyn KvBackend>,
    lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self {
            backend,
            lock: Mutex::new(()),
        }
    }

    /// Encode `value` and write it under the namespaced `key`.
    ///
    /// Nothing reaches the backend when encoding fails.
    pub fn store<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let _guard = self.lock.lock()?;
        let data =
            serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.backend.store(&namespaced_key(key), &data)
    }

    /// Read and decode the value under `key`.
    ///
    /// An absent key yields [`StoreError::NotFound`].
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let _guard = self.lock.lock()?;
        match self.backend.get(&namespaced_key(key))? {
            Some(data) => serde_json::from_slice(&data)
                .map_err(|e| StoreError::Deserialization(format!("{}: {}", key, e))),
            None => Err(StoreError::NotFound(key.to_string())),
        }
    }

    /// Remove `key`; an absent key is not an error.
    pub fn delete(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock()?;
        let real_key = namespaced_key(key);
        trace!(key = %real_key, "delete");
        self.backend.delete(&real_key)
    }
}
