//! Pooled SQLite connection wrapper

use std::ops::Deref;
use std::sync::Arc;

use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection as RusqliteConnection;
use tracing::instrument;

use super::transaction::WriteTransaction;
use crate::storage::error::StorageResult;
use crate::storage::metrics::StorageMetrics;

/// Pooled connection; returned to the pool when dropped.
///
/// Derefs to [`rusqlite::Connection`] for reads. Writes that must be
/// serialized go through [`SqliteConnection::begin_write`].
pub struct SqliteConnection {
    inner: PooledConnection<SqliteConnectionManager>,
    metrics: Arc<StorageMetrics>,
}

impl SqliteConnection {
    pub(crate) fn new(
        conn: PooledConnection<SqliteConnectionManager>,
        metrics: Arc<StorageMetrics>,
    ) -> Self {
        Self { inner: conn, metrics }
    }

    /// Open a `BEGIN IMMEDIATE` transaction, taking the database write lock
    /// up front.
    ///
    /// Everything read inside the transaction stays valid until commit, so a
    /// check followed by a write cannot interleave with another writer.
    #[instrument(skip(self))]
    pub fn begin_write(self) -> StorageResult<WriteTransaction> {
        WriteTransaction::begin(self)
    }

    pub(crate) fn metrics(&self) -> &StorageMetrics {
        &self.metrics
    }
}

impl Deref for SqliteConnection {
    type Target = RusqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
