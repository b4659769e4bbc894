//! Storage configuration
//!
//! Connection pool sizing, timeouts and per-connection pragmas for the SQLite
//! backend.

use std::path::PathBuf;
use std::time::Duration;

use super::error::{StorageError, StorageResult};

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Database file path
    pub path: PathBuf,

    /// Connection pool size (default: 8)
    pub pool_size: u32,

    /// Pool checkout timeout in seconds (default: 5)
    pub connection_timeout_secs: u64,

    /// SQLite busy timeout in milliseconds (default: 5000); bounds how long a
    /// writer waits for another writer's transaction.
    pub busy_timeout_ms: u64,

    /// Enable WAL mode (default: true)
    pub enable_wal: bool,

    /// Enable foreign keys (default: true)
    pub enable_foreign_keys: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/chairbook.db"),
            pool_size: 8,
            connection_timeout_secs: 5,
            busy_timeout_ms: 5000,
            enable_wal: true,
            enable_foreign_keys: true,
        }
    }
}

impl StorageConfig {
    /// Create a new configuration with the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidConfig`] if any value is out of range.
    pub fn validate(&self) -> StorageResult<()> {
        if self.pool_size == 0 {
            return Err(StorageError::InvalidConfig(
                "pool_size must be greater than 0".to_string(),
            ));
        }
        if self.pool_size > 100 {
            return Err(StorageError::InvalidConfig("pool_size too large (max: 100)".to_string()));
        }
        if self.connection_timeout_secs == 0 {
            return Err(StorageError::InvalidConfig(
                "connection_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.busy_timeout_ms == 0 {
            return Err(StorageError::InvalidConfig(
                "busy_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.path.as_os_str().is_empty() {
            return Err(StorageError::InvalidConfig("database path cannot be empty".to_string()));
        }

        Ok(())
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Set the connection pool size
    pub fn with_pool_size(mut self, size: u32) -> Self {
        self.pool_size = size;
        self
    }

    /// Set the busy timeout
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the pool checkout timeout
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout_secs = timeout.as_secs();
        self
    }

    /// Disable WAL mode (rollback journal instead)
    pub fn without_wal(mut self) -> Self {
        self.enable_wal = false;
        self
    }
}
