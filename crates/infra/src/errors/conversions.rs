//! Conversions from storage errors into domain errors.

use chairbook_common::storage::StorageError;
use chairbook_domain::ChairbookError;
use rusqlite::ffi::ErrorCode;
use rusqlite::Error as SqlError;

/// `SQLITE_CONSTRAINT_UNIQUE`
const UNIQUE_VIOLATION: i32 = 2067;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ChairbookError);

impl From<InfraError> for ChairbookError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ChairbookError> for InfraError {
    fn from(value: ChairbookError) -> Self {
        InfraError(value)
    }
}

/// A unique index rejected the write.
pub fn is_unique_violation(err: &SqlError) -> bool {
    matches!(
        err,
        SqlError::SqliteFailure(inner, _)
            if inner.code == ErrorCode::ConstraintViolation && inner.extended_code == UNIQUE_VIOLATION
    )
}

/// Any constraint (unique, primary key, check) rejected the write.
pub fn is_constraint_violation(err: &SqlError) -> bool {
    err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation)
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → ChairbookError */
/* -------------------------------------------------------------------------- */

fn from_sql(err: SqlError) -> ChairbookError {
    use rusqlite::Error as RE;

    match err {
        RE::SqliteFailure(inner, maybe_message) => {
            let message = maybe_message.unwrap_or_default();
            match (inner.code, inner.extended_code) {
                (ErrorCode::DatabaseBusy, _) => ChairbookError::Database("database is busy".into()),
                (ErrorCode::DatabaseLocked, _) => {
                    ChairbookError::Database("database is locked".into())
                }
                (ErrorCode::ConstraintViolation, UNIQUE_VIOLATION) => {
                    ChairbookError::Database("unique constraint violation".into())
                }
                (ErrorCode::ConstraintViolation, _) => {
                    ChairbookError::Database(format!("constraint violation: {message}"))
                }
                _ => ChairbookError::Database(format!(
                    "sqlite failure {:?} (code {}): {}",
                    inner.code, inner.extended_code, message
                )),
            }
        }
        RE::QueryReturnedNoRows => ChairbookError::NotFound("no rows returned by query".into()),
        RE::FromSqlConversionFailure(_, _, cause) => {
            ChairbookError::Database(format!("failed to convert sqlite value: {cause}"))
        }
        RE::InvalidColumnType(_, name, ty) => {
            ChairbookError::Database(format!("invalid column type for {name}: {ty}"))
        }
        RE::InvalidPath(path) => ChairbookError::Database(format!(
            "invalid database path: {}",
            path.to_string_lossy()
        )),
        other => ChairbookError::Database(other.to_string()),
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(from_sql(value))
    }
}

/* -------------------------------------------------------------------------- */
/* StorageError → ChairbookError */
/* -------------------------------------------------------------------------- */

impl From<StorageError> for InfraError {
    fn from(value: StorageError) -> Self {
        InfraError(match value {
            StorageError::Rusqlite(err) => from_sql(err),
            StorageError::Timeout(secs) => ChairbookError::Database(format!(
                "no database connection available after {secs}s"
            )),
            StorageError::InvalidConfig(message) => ChairbookError::Config(message),
            StorageError::Migration(message) => {
                ChairbookError::Database(format!("migration failed: {message}"))
            }
            other => ChairbookError::Database(other.to_string()),
        })
    }
}
