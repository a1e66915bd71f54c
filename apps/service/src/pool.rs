use std::path::Path;

use deadpool::managed::{self, Pool, RecycleResult};
use libsql::{Builder, Connection, Database, Error as LibsqlError};

/// How long a connection waits on a locked database file before giving up
const BUSY_TIMEOUT_MS: u64 = 5_000;

pub struct LibsqlManager {
    database: Database,
}

impl LibsqlManager {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Open (or create) a local database file
    pub async fn open_local(path: impl AsRef<Path>) -> Result<Self, LibsqlError> {
        let database = Builder::new_local(path.as_ref()).build().await?;
        Ok(Self::new(database))
    }
}

impl managed::Manager for LibsqlManager {
    type Type = Connection;
    type Error = LibsqlError;

    async fn create(&self) -> Result<Self::Type, Self::Error> {
        let conn = self.database.connect()?;
        // PRAGMA answers with a row, so it goes through query()
        conn.query(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"), ()).await?;
        Ok(conn)
    }

    async fn recycle(
        &self,
        conn: &mut Self::Type,
        _: &managed::Metrics,
    ) -> RecycleResult<Self::Error> {
        conn.query("SELECT 1", ()).await?.next().await?.ok_or(LibsqlError::QueryReturnedNoRows)?;
        Ok(())
    }
}

pub type LibsqlPool = Pool<LibsqlManager>;

/// Build a pool of at most `max_size` connections over `manager`
pub fn build_pool(
    manager: LibsqlManager,
    max_size: usize,
) -> Result<LibsqlPool, managed::BuildError> {
    Pool::builder(manager).max_size(max_size).build()
}
