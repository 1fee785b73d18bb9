use super::engine::{KeyValue, KvBackend};
use crate::core::{Result, StoreError};
use etcd_client::{Client, ConnectOptions, GetOptions, SortOrder, SortTarget};
use std::future::Future;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};

/// etcd v3 backend.
///
/// The client is async; an owned current-thread runtime drives each call so
/// callers see the same blocking API as [`super::InMemoryKv`].
pub struct EtcdKv {
    client: Client,
    runtime: Runtime,
}

fn backend_err(err: etcd_client::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

impl EtcdKv {
    /// Open a client against `url` (e.g. `http://etcd:2379`).
    pub fn connect(url: &str, connect_timeout: Duration) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StoreError::Backend(format!("Failed to start etcd runtime: {}", e)))?;

        let options = ConnectOptions::new()
            .with_connect_timeout(connect_timeout)
            .with_timeout(connect_timeout);
        let client = runtime
            .block_on(Client::connect([url], Some(options)))
            .map_err(backend_err)?;

        Ok(Self { client, runtime })
    }

    fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, etcd_client::Error>>,
    {
        self.runtime.block_on(fut).map_err(backend_err)
    }
}

impl KvBackend for EtcdKv {
    fn store(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut client = self.client.clone();
        self.run(async move { client.put(key, value, None).await })?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut client = self.client.clone();
        let resp = self.run(async move { client.get(key, None).await })?;
        Ok(resp.kvs().first().map(|kv| kv.value().to_vec()))
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut client = self.client.clone();
        self.run(async move { client.delete(key, None).await })?;
        Ok(())
    }

    fn get_range(&self, start: &str, end: &str) -> Result<Vec<KeyValue>> {
        let mut client = self.client.clone();
        let options = GetOptions::new()
            .with_range(end)
            .with_sort(SortTarget::Key, SortOrder::Ascend);
        let resp = self.run(async move { client.get(start, Some(options)).await })?;

        resp.kvs()
            .iter()
            .map(|kv| {
                let key = kv
                    .key_str()
                    .map_err(|e| StoreError::Backend(format!("Non UTF-8 key in range: {}", e)))?;
                Ok(KeyValue::new(key, kv.value()))
            })
            .collect()
    }
}
