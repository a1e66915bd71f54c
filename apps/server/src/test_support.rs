//! Fixtures for route tests: services over throwaway stores and local HTTP targets.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::{TempDir, tempdir};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use upwatch_service::{
    LibsqlSampleStore, MonitorService, ProbeEngine, Sample, SampleRecord, SampleStore, StoreError,
};

pub const OK_RESPONSE: &str =
    "HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\nok";

fn engine() -> ProbeEngine {
    ProbeEngine::new(Duration::from_secs(5), "upwatch-test/1.0").unwrap()
}

/// Service over an initialized on-disk store, keep the `TempDir` alive
pub async fn test_service() -> (MonitorService, TempDir) {
    let dir = tempdir().unwrap();
    let store = LibsqlSampleStore::open(dir.path().join("server.db"), 2).await.unwrap();
    store.initialize().await.unwrap();
    (MonitorService::new(engine(), Arc::new(store)), dir)
}

struct BrokenStore;

#[async_trait]
impl SampleStore for BrokenStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert(&self, _sample: &Sample) -> Result<i64, StoreError> {
        Err(StoreError::Decode("disk unavailable".into()))
    }

    async fn recent_history(&self, _limit: usize) -> Result<Vec<SampleRecord>, StoreError> {
        Err(StoreError::Decode("disk unavailable".into()))
    }
}

/// Service whose store rejects every operation
pub fn broken_service() -> MonitorService {
    MonitorService::new(engine(), Arc::new(BrokenStore))
}

/// Serve `response` verbatim to every connection, returns the base URL
pub async fn serve_canned(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });
    format!("http://{addr}/")
}

/// A local URL with nothing listening behind it
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}
