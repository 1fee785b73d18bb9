use crate::connection::Connector;
use crate::connection::config::{Endpoint, StoreConfig};
use crate::core::{PowerStatusCollection, PowerStatusRecord, Result, StoreError, is_valid_xname};
use crate::storage::{KvBackend, RangeScanner, SEGMENT_POWER_STATE, ScanOutcome, segment_key};
use std::sync::Arc;
use tracing::error;

/// Power status persistence, as seen by the HTTP layer and the poller.
pub trait PowerStatusStore: Send + Sync {
    /// Liveness probe against the backend
    fn ping(&self) -> Result<()>;

    /// Create or overwrite the record for `record.xname`
    fn store_power_status(&self, record: &PowerStatusRecord) -> Result<()>;

    /// Remove the record for `xname`; removing a missing record succeeds
    fn delete_power_status(&self, xname: &str) -> Result<()>;

    /// Fetch the record for `xname`
    fn get_power_status(&self, xname: &str) -> Result<PowerStatusRecord>;

    /// Every stored record in key order, with the ones that failed to decode
    fn get_all_power_status(&self) -> Result<ScanOutcome<PowerStatusRecord>>;
}

/// Backend-backed [`PowerStatusStore`].
///
/// Owns the connection and its lock; share it by reference (or `Arc`).
pub struct PowerStatusRepository {
    connector: Connector,
    scanner: RangeScanner,
}

fn validate_xname(xname: &str) -> Result<()> {
    if is_valid_xname(xname) {
        Ok(())
    } else {
        Err(StoreError::InvalidXname(xname.to_string()))
    }
}

fn power_state_key(xname: &str) -> String {
    segment_key(SEGMENT_POWER_STATE, xname)
}

fn logged<T>(result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        error!(error = %e, "power status operation failed");
    }
    result
}

impl PowerStatusRepository {
    /// Connect using `config`.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        Ok(Self::from_connector(Connector::init(config)?))
    }

    /// Connect using `ETCD_HOST` / `ETCD_PORT`.
    pub fn from_env() -> Result<Self> {
        Self::open(&StoreConfig::from_env())
    }

    /// Fresh repository over an empty in-memory backend.
    pub fn in_memory() -> Self {
        let backend = Arc::new(crate::storage::InMemoryKv::new());
        Self::from_connector(Connector::with_backend(Endpoint::Memory, backend))
    }

    /// Use an already open backend, e.g. a shared [`crate::storage::InMemoryKv`].
    pub fn with_backend(backend: Arc<dyn KvBackend>) -> Self {
        Self::from_connector(Connector::with_backend(Endpoint::Provided, backend))
    }

    pub fn from_connector(connector: Connector) -> Self {
        let scanner = RangeScanner::new(Arc::clone(connector.backend()));
        Self { connector, scanner }
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    /// All records, discarding per-record decode failures after logging them.
    pub fn power_status_collection(&self) -> Result<PowerStatusCollection> {
        let outcome = self.get_all_power_status()?;
        Ok(outcome.records.into_iter().collect())
    }
}

impl PowerStatusStore for PowerStatusRepository {
    fn ping(&self) -> Result<()> {
        self.connector.ping()
    }

    fn store_power_status(&self, record: &PowerStatusRecord) -> Result<()> {
        logged(validate_xname(&record.xname).and_then(|_| {
            self.connector
                .records()
                .store(&power_state_key(&record.xname), record)
        }))
    }

    fn delete_power_status(&self, xname: &str) -> Result<()> {
        logged(
            validate_xname(xname)
                .and_then(|_| self.connector.records().delete(&power_state_key(xname))),
        )
    }

    fn get_power_status(&self, xname: &str) -> Result<PowerStatusRecord> {
        logged(
            validate_xname(xname)
                .and_then(|_| self.connector.records().get(&power_state_key(xname))),
        )
    }

    fn get_all_power_status(&self) -> Result<ScanOutcome<PowerStatusRecord>> {
        self.scanner.scan_all(SEGMENT_POWER_STATE)
    }
}
