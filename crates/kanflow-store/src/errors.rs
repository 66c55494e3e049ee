//! Error handling for kanflow-store
//!
//! Wraps kanflow-core ExError with store-specific helpers

use kanflow_core::errors::{ExError, ExErrorKind};
use rusqlite::ErrorCode;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::InvariantViolation)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
///
/// - `SQLITE_BUSY`: the connection's busy timeout ran out, `Timeout`
/// - `SQLITE_LOCKED`: `Concurrency`
/// - a stored value that does not decode: `Serialization`
/// - anything else: `Persistence`
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = match &err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::DatabaseBusy => {
            ExErrorKind::Timeout
        }
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::DatabaseLocked => {
            ExErrorKind::Concurrency
        }
        rusqlite::Error::FromSqlConversionFailure(..) => ExErrorKind::Serialization,
        _ => ExErrorKind::Persistence,
    };
    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
