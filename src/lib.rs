// ============================================================================
// PCS Store Library
// ============================================================================

//! Power status storage for cluster hardware components.
//!
//! Records live in a key-value backend (etcd in production, an embedded
//! in-memory map for tests) under `/pcs/powerstate/<xname>` as JSON.
//!
//! ```
//! use pcs_store::{PowerState, PowerStatusRecord, PowerStatusRepository, PowerStatusStore};
//!
//! # fn main() -> pcs_store::Result<()> {
//! let repo = PowerStatusRepository::in_memory();
//! repo.store_power_status(&PowerStatusRecord::new("x0c0s1b0n0").power_state(PowerState::On))?;
//!
//! let record = repo.get_power_status("x0c0s1b0n0")?;
//! assert_eq!(record.power_state, PowerState::On);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod storage;
pub mod connection;
pub mod facade;

// Re-export main types for convenience
pub use crate::core::{
    ComponentType, ManagementState, PowerState, PowerStatusCollection, PowerStatusRecord, Result,
    StoreError, is_valid_xname,
};
pub use facade::{PowerStatusRepository, PowerStatusStore};
pub use storage::{InMemoryKv, KvBackend, ScanFailure, ScanOutcome};

// Re-export connection API
pub use connection::{
    Connector,
    config::{Endpoint, StoreConfig},
};
