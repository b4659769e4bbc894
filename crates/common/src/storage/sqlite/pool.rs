//! SQLite connection pool
//!
//! r2d2 pool over `r2d2_sqlite`, with pragmas applied to every connection
//! as it is opened.

use std::sync::Arc;
use std::time::Instant;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use tracing::{debug, info, instrument, warn};

use super::connection::SqliteConnection;
use super::pragmas::apply_connection_pragmas;
use crate::storage::config::StorageConfig;
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::metrics::StorageMetrics;
use crate::storage::types::{HealthStatus, PoolMetrics};

/// SQLite connection pool
#[derive(Debug)]
pub struct SqlitePool {
    pool: Pool<SqliteConnectionManager>,
    config: StorageConfig,
    metrics: Arc<StorageMetrics>,
}

impl SqlitePool {
    /// Create a new pool, creating the database file (and its parent
    /// directory) if needed.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid, the directory
    /// cannot be created or the first connection cannot be opened.
    #[instrument(skip(config), fields(db_path = %config.path.display(), pool_size = config.pool_size))]
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        config.validate()?;

        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let pragma_config = config.clone();
        let manager = SqliteConnectionManager::file(&config.path).with_init(move |conn| {
            apply_connection_pragmas(conn, &pragma_config)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
        });

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(config.connection_timeout())
            .build(manager)
            .map_err(|e| {
                warn!("Failed to create connection pool: {}", e);
                StorageError::Connection(format!("Failed to create pool: {}", e))
            })?;

        let metrics = Arc::new(StorageMetrics::new(config.pool_size));
        info!("SQLite pool created with {} connections", config.pool_size);

        Ok(Self { pool, config, metrics })
    }

    /// Check out a connection.
    ///
    /// # Errors
    /// [`StorageError::Timeout`] when every connection stays busy past the
    /// checkout timeout; [`StorageError::Connection`] otherwise.
    #[instrument(skip(self), fields(pool_size = self.config.pool_size))]
    pub fn get_connection(&self) -> StorageResult<SqliteConnection> {
        let start = Instant::now();

        match self.pool.get() {
            Ok(conn) => {
                let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                self.metrics.record_connection_acquired(duration_ms);
                debug!("Connection acquired in {}ms", duration_ms);
                Ok(SqliteConnection::new(conn, Arc::clone(&self.metrics)))
            }
            Err(e) => {
                let err_str = e.to_string().to_lowercase();
                if err_str.contains("timed out") || err_str.contains("timeout") {
                    self.metrics.record_connection_timeout();
                    warn!("Connection timeout after {:?}", self.config.connection_timeout());
                    Err(StorageError::Timeout(self.config.connection_timeout_secs))
                } else {
                    self.metrics.record_connection_error();
                    warn!("Connection error: {}", e);
                    Err(StorageError::Connection(format!("Failed to get connection: {}", e)))
                }
            }
        }
    }

    /// Pool state plus a live checkout.
    pub fn health_check(&self) -> HealthStatus {
        let state = self.pool.state();
        match self.pool.get() {
            Ok(_conn) => HealthStatus::healthy(
                state.connections as usize,
                state.idle_connections as usize,
                self.config.pool_size as usize,
            ),
            Err(e) => HealthStatus::unhealthy(format!("Pool unhealthy: {}", e)),
        }
    }

    pub fn metrics(&self) -> PoolMetrics {
        self.metrics.snapshot()
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}
