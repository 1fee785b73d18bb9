use super::engine::KvBackend;
use super::keys::segment_range;
use crate::core::{Result, StoreError};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::error;

/// A record that was in range but could not be decoded.
#[derive(Debug)]
pub struct ScanFailure {
    pub key: String,
    pub error: StoreError,
}

/// Result of a segment scan: everything that decoded, plus what did not.
#[derive(Debug)]
pub struct ScanOutcome<T> {
    pub records: Vec<T>,
    pub failures: Vec<ScanFailure>,
}

impl<T> ScanOutcome<T> {
    /// `true` when every pair in range decoded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// The last per-record failure, if any.
    pub fn last_error(&self) -> Option<&StoreError> {
        self.failures.last().map(|failure| &failure.error)
    }
}

/// Reads every record under a key segment.
pub struct RangeScanner {
    backend: Arc<dyn KvBackend>,
}

impl RangeScanner {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// Decode every value under `segment`, in key order.
    ///
    /// A failed range read is an `Err`; undecodable values are logged,
    /// skipped and reported in [`ScanOutcome::failures`].
    pub fn scan_all<T: DeserializeOwned>(&self, segment: &str) -> Result<ScanOutcome<T>> {
        let (start, end) = segment_range(segment);
        let pairs = self.backend.get_range(&start, &end).map_err(|e| {
            error!(segment, error = %e, "range scan failed");
            e
        })?;

        let mut outcome = ScanOutcome {
            records: Vec::with_capacity(pairs.len()),
            failures: Vec::new(),
        };
        for pair in pairs {
            match serde_json::from_slice::<T>(&pair.value) {
                Ok(record) => outcome.records.push(record),
                Err(e) => {
                    error!(key = %pair.key, error = %e, "skipping undecodable record");
                    outcome.failures.push(ScanFailure {
                        error: StoreError::Deserialization(format!("{}: {}", pair.key, e)),
                        key: pair.key,
                    });
                }
            }
        }
        Ok(outcome)
    }
}
