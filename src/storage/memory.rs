use super::engine::{KeyValue, KvBackend};
use crate::core::{Result, StoreError};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{PoisonError, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};

/// Embedded backend used when the endpoint is the `mem:` marker.
///
/// Keys are kept in a `BTreeMap`, so range reads come back in key order just
/// like they do from etcd.
pub struct InMemoryKv {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
    reachable: AtomicBool,
}

impl InMemoryKv {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
            reachable: AtomicBool::new(true),
        }
    }

    /// Simulate losing (or regaining) the backend. While unreachable every
    /// call fails with [`StoreError::Backend`].
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    pub fn is_reachable(&self) -> bool {
        self.reachable.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_reachable(&self) -> Result<()> {
        if self.is_reachable() {
            Ok(())
        } else {
            Err(StoreError::Backend("in-memory backend is unreachable".into()))
        }
    }
}

impl Default for InMemoryKv {
    fn default() -> Self {
        Self::new()
    }
}

impl KvBackend for InMemoryKv {
    fn store(&self, key: &str, value: &[u8]) -> Result<()> {
        self.check_reachable()?;
        let mut data = self.data.write()?;
        data.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.check_reachable()?;
        let data = self.data.read()?;
        Ok(data.get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.check_reachable()?;
        let mut data = self.data.write()?;
        data.remove(key);
        Ok(())
    }

    fn get_range(&self, start: &str, end: &str) -> Result<Vec<KeyValue>> {
        self.check_reachable()?;
        if start >= end {
            return Ok(Vec::new());
        }
        let data = self.data.read()?;
        Ok(data
            .range::<str, _>((Bound::Included(start), Bound::Excluded(end)))
            .map(|(key, value)| KeyValue::new(key.clone(), value.clone()))
            .collect())
    }
}
