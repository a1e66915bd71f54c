use thiserror::Error;

/// Failure of the durable sample store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database query failed: {0}")]
    Query(#[from] libsql::Error),

    #[error("Failed to acquire a database connection: {0}")]
    Pool(#[from] deadpool::managed::PoolError<libsql::Error>),

    #[error("Failed to build the connection pool: {0}")]
    Build(#[from] deadpool::managed::BuildError),

    /// Only samples carrying a status code are written to history
    #[error("Sample for {url} has no status code and is not recorded")]
    NotRecordable { url: String },

    #[error("Malformed row in response_times: {0}")]
    Decode(String),
}
