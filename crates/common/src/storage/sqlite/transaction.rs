//! Write transaction guard
//!
//! Owns its pooled connection so the transaction can be handed across
//! function boundaries (and boxed behind a trait object) without borrowing
//! from the pool. Rolls back on drop unless committed.

use std::ops::Deref;

use rusqlite::Connection as RusqliteConnection;
use tracing::{debug, warn};

use super::connection::SqliteConnection;
use crate::storage::error::{StorageError, StorageResult};

/// An open `BEGIN IMMEDIATE` transaction.
pub struct WriteTransaction {
    conn: SqliteConnection,
    open: bool,
}

impl WriteTransaction {
    pub(crate) fn begin(conn: SqliteConnection) -> StorageResult<Self> {
        conn.execute_batch("BEGIN IMMEDIATE").map_err(StorageError::from)?;
        debug!("write transaction started");
        Ok(Self { conn, open: true })
    }

    /// Commit the transaction
    pub fn commit(mut self) -> StorageResult<()> {
        self.conn.execute_batch("COMMIT").map_err(StorageError::from)?;
        self.open = false;
        self.conn.metrics().record_commit();
        Ok(())
    }

    /// Roll back explicitly (dropping the guard has the same effect).
    pub fn rollback(mut self) -> StorageResult<()> {
        self.open = false;
        self.conn.metrics().record_rollback();
        self.conn.execute_batch("ROLLBACK").map_err(StorageError::from)
    }
}

impl Deref for WriteTransaction {
    type Target = RusqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl Drop for WriteTransaction {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        self.conn.metrics().record_rollback();
        if let Err(err) = self.conn.execute_batch("ROLLBACK") {
            warn!(error = %err, "failed to roll back write transaction");
        }
    }
}
