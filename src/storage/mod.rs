pub mod engine;
pub mod keys;
pub mod memory;
pub mod record;
pub mod scan;
#[cfg(feature = "etcd")]
pub mod etcd;

pub use engine::{KeyValue, KvBackend};
pub use keys::{KEY_PREFIX, SEGMENT_PING, SEGMENT_POWER_STATE, namespaced_key, segment_key};
pub use memory::InMemoryKv;
pub use record::RecordStore;
pub use scan::{RangeScanner, ScanFailure, ScanOutcome};
#[cfg(feature = "etcd")]
pub use etcd::EtcdKv;
