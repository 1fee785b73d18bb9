use crate::core::Result;

/// One key-value pair returned by a range read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Key-value backend trait - allows pluggable storage backends
///
/// Every call blocks until the backend answers. Keys are opaque strings;
/// namespacing happens above this layer.
pub trait KvBackend: Send + Sync {
    /// Write `value` under `key`, replacing any previous value
    fn store(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Read `key`. An absent key is `Ok(None)`, not an error
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Remove `key`. Removing an absent key succeeds
    fn delete(&self, key: &str) -> Result<()>;

    /// All pairs with `start <= key < end`, ascending by key
    fn get_range(&self, start: &str, end: &str) -> Result<Vec<KeyValue>>;
}
