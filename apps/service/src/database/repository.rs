use std::path::Path;

use async_trait::async_trait;
use libsql::params;
use tracing::debug;

use super::error::StoreError;
use super::models::SampleRecord;
use crate::monitoring::types::{ProbeOutcome, Sample};
use crate::pool::{LibsqlManager, LibsqlPool, build_pool};

/// Append-only sample log
#[async_trait]
pub trait SampleStore: Send + Sync {
    /// Ensure the schema exists, safe to call on every start
    async fn initialize(&self) -> Result<(), StoreError>;

    /// Append one completed sample and return its id
    async fn insert(&self, sample: &Sample) -> Result<i64, StoreError>;

    /// The `limit` most recent records, newest first
    async fn recent_history(&self, limit: usize) -> Result<Vec<SampleRecord>, StoreError>;
}

/// LibSQL sample store
pub struct LibsqlSampleStore {
    pool: LibsqlPool,
}

impl LibsqlSampleStore {
    /// Create a store from an existing pool
    pub fn new_from_pool(pool: LibsqlPool) -> Self {
        Self { pool }
    }

    /// Open the database file at `path` with up to `max_connections` pooled connections
    pub async fn open(path: impl AsRef<Path>, max_connections: usize) -> Result<Self, StoreError> {
        let manager = LibsqlManager::open_local(path.as_ref()).await?;
        let pool = build_pool(manager, max_connections)?;
        debug!(path = %path.as_ref().display(), max_connections, "opened sample store");
        Ok(Self::new_from_pool(pool))
    }

    /// Get a connection from the pool
    pub(crate) async fn get_conn(&self) -> Result<deadpool::managed::Object<LibsqlManager>, StoreError> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl SampleStore for LibsqlSampleStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        let conn = self.get_conn().await?;
        super::migrations::run_migrations(&conn).await
    }

    async fn insert(&self, sample: &Sample) -> Result<i64, StoreError> {
        let ProbeOutcome::Completed { status_code, response_time_ms } = sample.outcome else {
            return Err(StoreError::NotRecordable { url: sample.url.clone() });
        };

        let conn = self.get_conn().await?;
        conn.execute(
            "INSERT INTO response_times (url, status_code, response_time_ms) VALUES (?, ?, ?)",
            params![sample.url.clone(), i64::from(status_code), response_time_ms],
        )
        .await?;

        let id = conn.last_insert_rowid();
        debug!(id, url = %sample.url, "sample recorded");
        Ok(id)
    }

    async fn recent_history(&self, limit: usize) -> Result<Vec<SampleRecord>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let conn = self.get_conn().await?;
        let mut stmt = conn
            .prepare("SELECT id, url, status_code, response_time_ms, timestamp FROM response_times ORDER BY timestamp DESC, id DESC LIMIT ?")
            .await?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut rows = stmt.query(params![limit]).await?;
        let mut records = Vec::new();

        while let Some(row) = rows.next().await? {
            records.push(SampleRecord::from_row(&row)?);
        }

        Ok(records)
    }
}
