/// Connector and configuration tests
///
/// Run with: cargo test --test connector_tests

use pcs_store::{
    Connector, Endpoint, InMemoryKv, KvBackend, PowerStatusRepository, PowerStatusStore,
    StoreConfig, StoreError,
};
use std::cell::Cell;
use std::sync::Arc;

#[test]
fn test_open_from_url() {
    let repo = PowerStatusRepository::open(&StoreConfig::from_url("mem:").unwrap()).unwrap();
    assert!(repo.ping().is_ok());
}

#[test]
fn test_missing_configuration_is_fatal() {
    let config = StoreConfig::from_lookup(|name| (name == "ETCD_HOST").then(|| "etcd".to_string()));
    match PowerStatusRepository::open(&config) {
        Err(StoreError::Config(msg)) => assert!(msg.contains("PORT")),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("open should fail without a port"),
    }
}

#[test]
fn test_each_attempt_uses_resolved_endpoint() {
    let attempts = Cell::new(0);
    let config = StoreConfig::new("etcd.local", "2379");

    let result = Connector::init_with(&config, |endpoint, _| {
        attempts.set(attempts.get() + 1);
        assert_eq!(endpoint, &Endpoint::Url("http://etcd.local:2379".into()));
        Err(StoreError::Backend("connection refused".into()))
    });

    assert!(matches!(result, Err(StoreError::ConnectionExhausted { attempts: 5, .. })));
    assert_eq!(attempts.get(), 5);
}

#[test]
fn test_injected_backend_is_shared() {
    let kv = Arc::new(InMemoryKv::new());
    let handle = Arc::clone(&kv);
    let connector = Connector::init_with(&StoreConfig::in_memory(), move |_, _| {
        Ok(Arc::clone(&handle) as Arc<dyn KvBackend>)
    })
    .unwrap();

    connector.records().store("/powerstate/x0c0s1b0n0", "raw").unwrap();
    assert_eq!(
        kv.get("/pcs/powerstate/x0c0s1b0n0").unwrap(),
        Some(br#""raw""#.to_vec())
    );
}
