//! Database connection manager backed by the shared SQLite pool.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chairbook_common::storage::{
    PoolMetrics, SqliteConnection, SqlitePool, StorageConfig, WriteTransaction,
};
use chairbook_domain::{ChairbookError, DatabaseConfig, Result};
use rusqlite::params;
use tracing::info;

use crate::errors::InfraError;

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Database manager that wraps an [`SqlitePool`].
pub struct DbManager {
    pool: Arc<SqlitePool>,
    path: PathBuf,
}

impl DbManager {
    /// Open (or create) the database at `db_path`.
    ///
    /// `busy_timeout` bounds how long a writer waits for the write lock
    /// before failing.
    pub fn new<P: AsRef<Path>>(db_path: P, pool_size: u32, busy_timeout: Duration) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();

        let config = StorageConfig::new(&path)
            .with_pool_size(pool_size.max(1))
            .with_busy_timeout(busy_timeout);
        let pool = SqlitePool::new(config).map_err(map_storage_error)?;

        info!(
            db_path = %path.display(),
            max_connections = pool.config().pool_size,
            busy_timeout_ms = u64::try_from(busy_timeout.as_millis()).unwrap_or(u64::MAX),
            "sqlite pool initialised"
        );

        Ok(Self { pool: Arc::new(pool), path })
    }

    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::new(&config.path, config.pool_size, Duration::from_millis(config.busy_timeout_ms))
    }

    /// Borrow the underlying pool.
    pub fn pool(&self) -> &Arc<SqlitePool> {
        &self.pool
    }

    /// Acquire a connection for reads.
    pub fn get_connection(&self) -> Result<SqliteConnection> {
        self.pool.get_connection().map_err(map_storage_error)
    }

    /// Acquire a connection and take the write lock on it.
    pub fn begin_write(&self) -> Result<WriteTransaction> {
        self.get_connection()?.begin_write().map_err(map_storage_error)
    }

    /// Ensure the full schema exists on the current database.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        create_schema(&conn)?;
        info!(version = SCHEMA_VERSION, "schema ready");
        Ok(())
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metrics(&self) -> PoolMetrics {
        self.pool.metrics()
    }

    /// Acquire a connection and run a trivial query.
    pub fn health_check(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", params![], |row| row.get::<_, i32>(0)).map_err(map_sql_error)?;
        Ok(())
    }
}

fn create_schema(conn: &SqliteConnection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL).map_err(map_sql_error)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?, CAST(strftime('%s','now') AS INTEGER))",
        params![SCHEMA_VERSION],
    )
    .map_err(map_sql_error)?;
    Ok(())
}

pub(crate) fn map_sql_error(err: rusqlite::Error) -> ChairbookError {
    ChairbookError::from(InfraError::from(err))
}

pub(crate) fn map_storage_error(err: chairbook_common::storage::StorageError) -> ChairbookError {
    ChairbookError::from(InfraError::from(err))
}
