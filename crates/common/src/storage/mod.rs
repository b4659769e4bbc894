//! Storage primitives for SQLite-backed repositories
//!
//! This module provides the connection pool, write transaction guard and
//! supporting configuration, error and metrics types.

pub mod config;
pub mod error;
pub mod metrics;
pub mod sqlite;
pub mod types;

// Re-export commonly used types
pub use config::StorageConfig;
pub use error::{StorageError, StorageResult};
pub use metrics::StorageMetrics;
pub use sqlite::{apply_connection_pragmas, SqliteConnection, SqlitePool, WriteTransaction};
pub use types::{HealthStatus, PoolMetrics};
