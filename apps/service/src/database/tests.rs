/// Integration tests for the sample store
///
/// Every test runs against a fresh database file in a temporary directory.
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tempfile::{TempDir, tempdir};

use super::{LibsqlSampleStore, SampleStore, StoreError};
use crate::monitoring::types::Sample;
use crate::pool::{LibsqlManager, build_pool};

/// Helper to create an initialized store; keep the `TempDir` alive for the test
async fn create_test_store() -> (LibsqlSampleStore, TempDir) {
    let temp_dir = tempdir().unwrap();
    let store = LibsqlSampleStore::open(temp_dir.path().join("test.db"), 4).await.unwrap();
    store.initialize().await.unwrap();
    (store, temp_dir)
}

fn completed(url: &str, status_code: u16, millis: u64) -> Sample {
    Sample::completed(url, status_code, Duration::from_millis(millis))
}

async fn count_rows(store: &LibsqlSampleStore) -> i64 {
    let conn = store.get_conn().await.unwrap();
    let mut rows = conn.query("SELECT COUNT(*) FROM response_times", ()).await.unwrap();
    rows.next().await.unwrap().unwrap().get(0).unwrap()
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let (store, _dir) = create_test_store().await;
    let id = store.insert(&completed("https://example.com", 200, 12)).await.unwrap();

    store.initialize().await.unwrap();
    store.initialize().await.unwrap();

    let history = store.recent_history(10).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, id);

    let conn = store.get_conn().await.unwrap();
    let mut rows = conn
        .query("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'response_times'", ())
        .await
        .unwrap();
    let tables: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
    assert_eq!(tables, 1);
}

#[tokio::test]
async fn test_insert_then_recent_history() {
    let (store, _dir) = create_test_store().await;

    let id = store.insert(&completed("https://example.com", 200, 87)).await.unwrap();
    let history = store.recent_history(1).await.unwrap();

    assert_eq!(history.len(), 1);
    let record = &history[0];
    assert_eq!(record.id, id);
    assert_eq!(record.url, "https://example.com");
    assert_eq!(record.status_code, Some(200));
    assert_eq!(record.response_time_ms, Some(87.0));
}

#[tokio::test]
async fn test_recent_history_on_empty_store() {
    let (store, _dir) = create_test_store().await;

    assert!(store.recent_history(10).await.unwrap().is_empty());
    assert!(store.recent_history(0).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_recent_history_returns_newest_first() {
    let (store, _dir) = create_test_store().await;

    let mut ids = Vec::new();
    for i in 0..12u64 {
        let url = format!("https://example.com/{i}");
        ids.push(store.insert(&completed(&url, 200, i)).await.unwrap());
    }

    let history = store.recent_history(10).await.unwrap();
    assert_eq!(history.len(), 10);

    let returned: Vec<i64> = history.iter().map(|r| r.id).collect();
    let expected: Vec<i64> = ids.iter().rev().take(10).copied().collect();
    assert_eq!(returned, expected);
    assert_eq!(history[0].url, "https://example.com/11");
    assert_eq!(history[9].url, "https://example.com/2");

    for pair in history.windows(2) {
        assert!(pair[0].timestamp >= pair[1].timestamp);
    }
}

#[tokio::test]
async fn test_recent_history_never_exceeds_row_count() {
    let (store, _dir) = create_test_store().await;
    for status in [200, 301, 404] {
        store.insert(&completed("https://example.com", status, 5)).await.unwrap();
    }

    assert_eq!(store.recent_history(10).await.unwrap().len(), 3);
    assert_eq!(store.recent_history(2).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_ties_are_broken_by_id() {
    let (store, _dir) = create_test_store().await;
    let conn = store.get_conn().await.unwrap();
    for url in ["https://a.example", "https://b.example", "https://c.example"] {
        conn.execute(
            "INSERT INTO response_times (url, status_code, response_time_ms, timestamp) VALUES (?, 200, 1.0, '2025-01-01 00:00:00.000')",
            libsql::params![url],
        )
        .await
        .unwrap();
    }
    drop(conn);

    let history = store.recent_history(10).await.unwrap();
    let urls: Vec<&str> = history.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, ["https://c.example", "https://b.example", "https://a.example"]);
    assert!(history.windows(2).all(|pair| pair[0].id > pair[1].id));
}

#[tokio::test]
async fn test_failed_sample_is_not_recorded() {
    let (store, _dir) = create_test_store().await;

    let err = store
        .insert(&Sample::failed("http://nonexistent.invalid", "dns error"))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::NotRecordable { ref url } if url == "http://nonexistent.invalid"));
    assert_eq!(count_rows(&store).await, 0);
}

#[tokio::test]
async fn test_ids_are_strictly_increasing() {
    let (store, _dir) = create_test_store().await;

    let first = store.insert(&completed("https://example.com", 200, 1)).await.unwrap();
    let second = store.insert(&completed("https://example.com", 500, 2)).await.unwrap();
    let third = store.insert(&completed("https://example.com", 200, 3)).await.unwrap();

    assert!(first < second && second < third);
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("durable.db");

    let id = {
        let store = LibsqlSampleStore::open(&path, 2).await.unwrap();
        store.initialize().await.unwrap();
        store.insert(&completed("https://example.com", 200, 31)).await.unwrap()
    };

    let reopened = LibsqlSampleStore::open(&path, 2).await.unwrap();
    reopened.initialize().await.unwrap();
    let history = reopened.recent_history(10).await.unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, id);
    assert_eq!(history[0].response_time_ms, Some(31.0));
}

#[tokio::test]
async fn test_concurrent_inserts() {
    let (store, _dir) = create_test_store().await;
    let store = Arc::new(store);

    let handles: Vec<_> = (0..16u16)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store.insert(&completed("https://example.com", 200 + i, 10)).await
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().unwrap());
    }

    assert_eq!(ids.len(), 16);
    assert_eq!(count_rows(&store).await, 16);
    assert_eq!(store.recent_history(100).await.unwrap().len(), 16);
}

#[tokio::test]
async fn test_initialize_keeps_legacy_table() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("monitoring.db");

    let manager = LibsqlManager::open_local(&path).await.unwrap();
    let pool = build_pool(manager, 1).unwrap();
    {
        let conn = pool.get().await.unwrap();
        conn.execute(
            "CREATE TABLE response_times (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT,
                status_code INTEGER,
                response_time_ms REAL,
                timestamp DATETIME DEFAULT CURRENT_TIMESTAMP)",
            (),
        )
        .await
        .unwrap();
        conn.execute(
            "INSERT INTO response_times (url, status_code, response_time_ms) VALUES ('https://legacy.example', 200, 55.5)",
            (),
        )
        .await
        .unwrap();
    }

    let store = LibsqlSampleStore::new_from_pool(pool);
    store.initialize().await.unwrap();
    store.insert(&completed("https://example.com", 200, 9)).await.unwrap();

    let history = store.recent_history(10).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().any(|r| r.url == "https://legacy.example"));
}
