pub mod config;

use crate::core::{Result, StoreError};
use crate::storage::{InMemoryKv, KvBackend, RecordStore, SEGMENT_PING, segment_key};
use config::{Endpoint, StoreConfig};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Long-lived handle to the key-value backend.
///
/// Created once by [`Connector::init`]; there is no reconnect. The record
/// store built over the handle carries the lock every keyed operation takes.
pub struct Connector {
    endpoint: Endpoint,
    backend: Arc<dyn KvBackend>,
    records: RecordStore,
}

/// Open the backend for `endpoint`, one attempt.
pub fn open_endpoint(endpoint: &Endpoint, config: &StoreConfig) -> Result<Arc<dyn KvBackend>> {
    match endpoint {
        Endpoint::Memory => Ok(Arc::new(InMemoryKv::new())),
        Endpoint::Provided => Err(StoreError::Config(
            "a provided backend cannot be reopened".to_string(),
        )),
        #[cfg(feature = "etcd")]
        Endpoint::Url(url) => Ok(Arc::new(crate::storage::EtcdKv::connect(
            url,
            config.connect_timeout,
        )?)),
        #[cfg(not(feature = "etcd"))]
        Endpoint::Url(url) => {
            let _ = config;
            Err(StoreError::Backend(format!(
                "cannot open {}: built without the `etcd` feature",
                url
            )))
        }
    }
}

impl Connector {
    /// Validate `config` and connect, retrying up to `config.retries` times.
    pub fn init(config: &StoreConfig) -> Result<Self> {
        Self::init_with(config, open_endpoint)
    }

    /// Like [`Connector::init`] with a caller-supplied opener.
    ///
    /// Configuration errors return before the first attempt.
    pub fn init_with<F>(config: &StoreConfig, mut opener: F) -> Result<Self>
    where
        F: FnMut(&Endpoint, &StoreConfig) -> Result<Arc<dyn KvBackend>>,
    {
        let endpoint = config.endpoint()?;
        info!(endpoint = ?endpoint, "opening key-value backend");

        let mut last_error = String::new();
        for attempt in 1..=config.retries {
            match opener(&endpoint, config) {
                Ok(backend) => {
                    info!(attempt, "backend connection succeeded");
                    return Ok(Self::with_backend(endpoint, backend));
                }
                Err(e) => {
                    error!(attempt, error = %e, "error opening connection to backend");
                    last_error = e.to_string();
                    if attempt < config.retries {
                        let delay = config.backoff(attempt);
                        if !delay.is_zero() {
                            std::thread::sleep(delay);
                        }
                    }
                }
            }
        }

        warn!(attempts = config.retries, "backend connection attempts exhausted");
        Err(StoreError::ConnectionExhausted {
            attempts: config.retries,
            last_error,
        })
    }

    /// Wrap an already open backend.
    pub fn with_backend(endpoint: Endpoint, backend: Arc<dyn KvBackend>) -> Self {
        let records = RecordStore::new(Arc::clone(&backend));
        Self {
            endpoint,
            backend,
            records,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn backend(&self) -> &Arc<dyn KvBackend> {
        &self.backend
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    /// Round-trip probe: write a throwaway `/ping/<uuid>` key, then delete it.
    ///
    /// The key is briefly visible to concurrent scans of the ping segment.
    pub fn ping(&self) -> Result<()> {
        let key = segment_key(SEGMENT_PING, &Uuid::new_v4().to_string());
        debug!(key = %key, "backend ping");
        self.records.store(&key, "")?;
        self.records.delete(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn failing(times: usize) -> impl FnMut(&Endpoint, &StoreConfig) -> Result<Arc<dyn KvBackend>> {
        let mut calls = 0;
        move |_: &Endpoint, _: &StoreConfig| {
            calls += 1;
            if calls <= times {
                Err(StoreError::Backend(format!("refused #{}", calls)))
            } else {
                Ok(Arc::new(InMemoryKv::new()) as Arc<dyn KvBackend>)
            }
        }
    }

    #[test]
    fn test_init_in_memory() {
        let connector = Connector::init(&StoreConfig::in_memory()).unwrap();
        assert!(connector.endpoint().is_memory());
        assert!(connector.ping().is_ok());
    }

    #[test]
    fn test_config_error_is_not_retried() {
        let mut calls = 0;
        let config = StoreConfig::from_lookup(|_| None);
        let result = Connector::init_with(&config, |_, _| {
            calls += 1;
            Ok(Arc::new(InMemoryKv::new()) as Arc<dyn KvBackend>)
        });
        assert!(matches!(result, Err(StoreError::Config(_))));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_retry_then_succeed() {
        let config = StoreConfig::in_memory();
        let connector = Connector::init_with(&config, failing(4)).unwrap();
        assert!(connector.ping().is_ok());
    }

    #[test]
    fn test_retries_exhausted() {
        let config = StoreConfig::in_memory();
        match Connector::init_with(&config, failing(5)) {
            Err(StoreError::ConnectionExhausted { attempts, last_error }) => {
                assert_eq!(attempts, 5);
                assert!(last_error.contains("refused #5"));
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("connection should have been exhausted"),
        }
    }

    #[test]
    fn test_retry_count_is_configurable() {
        let config = StoreConfig::in_memory().retries(2);
        assert!(Connector::init_with(&config, failing(2)).is_err());
        assert!(Connector::init_with(&config, failing(1)).is_ok());
    }

    #[test]
    fn test_retry_delay_is_applied() {
        let config = StoreConfig::in_memory()
            .retries(3)
            .retry_delay(Duration::from_millis(10), Duration::from_millis(10));
        let started = Instant::now();
        assert!(Connector::init_with(&config, failing(2)).is_ok());
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[cfg(not(feature = "etcd"))]
    #[test]
    fn test_url_endpoint_without_etcd_support() {
        let config = StoreConfig::new("localhost", "2379").retries(1);
        assert!(matches!(
            Connector::init(&config),
            Err(StoreError::ConnectionExhausted { attempts: 1, .. })
        ));
    }

    #[test]
    fn test_ping_leaves_no_keys() {
        let kv = Arc::new(InMemoryKv::new());
        let connector = Connector::with_backend(Endpoint::Memory, kv.clone());
        connector.ping().unwrap();
        assert!(kv.is_empty());
    }

    #[test]
    fn test_ping_fails_when_unreachable() {
        let kv = Arc::new(InMemoryKv::new());
        let connector = Connector::with_backend(Endpoint::Memory, kv.clone());
        kv.set_reachable(false);
        assert!(connector.ping().is_err());
    }

    #[test]
    fn test_provided_endpoint_cannot_be_opened() {
        let config = StoreConfig::in_memory();
        assert!(matches!(
            open_endpoint(&Endpoint::Provided, &config),
            Err(StoreError::Config(_))
        ));
    }
}
