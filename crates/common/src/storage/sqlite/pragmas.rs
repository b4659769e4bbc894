//! SQLite pragma management
//!
//! Applies per-connection pragmas when the pool opens a connection.

use rusqlite::Connection;

use crate::storage::config::StorageConfig;
use crate::storage::error::{StorageError, StorageResult};

/// Apply connection-level pragmas
///
/// - WAL journal so readers never wait on the single writer
/// - `synchronous=NORMAL`
/// - foreign keys, when enabled
/// - busy timeout, which bounds how long `BEGIN IMMEDIATE` waits for a
///   competing writer before failing with `SQLITE_BUSY`
pub fn apply_connection_pragmas(conn: &Connection, config: &StorageConfig) -> StorageResult<()> {
    let mut pragma_sql = String::new();

    if config.enable_wal {
        pragma_sql.push_str("PRAGMA journal_mode=WAL;\n");
        pragma_sql.push_str("PRAGMA wal_autocheckpoint=1000;\n");
    }

    pragma_sql.push_str("PRAGMA synchronous=NORMAL;\n");

    if config.enable_foreign_keys {
        pragma_sql.push_str("PRAGMA foreign_keys=ON;\n");
    }

    conn.execute_batch(&pragma_sql)
        .map_err(|e| StorageError::Query(format!("Failed to apply pragmas: {}", e)))?;

    conn.busy_timeout(config.busy_timeout())
        .map_err(|e| StorageError::Query(format!("Failed to set busy timeout: {}", e)))?;

    Ok(())
}
