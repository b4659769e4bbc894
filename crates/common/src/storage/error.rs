//! Storage error types
//!
//! Defines error types for the storage layer and classifies them with the
//! shared [`ErrorClassification`] vocabulary.

use thiserror::Error;

use crate::error::{ErrorClassification, ErrorSeverity};

/// Storage error type
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(String),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Connection timeout after {0}s")]
    Timeout(u64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Rusqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    R2d2(#[from] r2d2::Error),
}

/// Storage result type
pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// The SQLite error code, when the failure came from SQLite itself.
    pub fn sqlite_code(&self) -> Option<rusqlite::ErrorCode> {
        match self {
            Self::Rusqlite(err) => err.sqlite_error_code(),
            _ => None,
        }
    }
}

impl ErrorClassification for StorageError {
    /// Pool timeouts, connection failures and SQLite BUSY/LOCKED are
    /// transient.
    fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Connection(_) => true,
            Self::Rusqlite(_) => matches!(
                self.sqlite_code(),
                Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
            ),
            _ => false,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Timeout(_) => ErrorSeverity::Warning,
            Self::Migration(_) => ErrorSeverity::Critical,
            Self::Rusqlite(_) if self.is_retryable() => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}
