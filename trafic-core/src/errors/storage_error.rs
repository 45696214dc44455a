//! Storage-layer errors for SQLite operations.

use super::error_code::{self, TraficErrorCode};

/// Errors that can occur in the storage layer.
///
/// A failed read aborts the whole evaluation — the engine never returns a
/// partial report. Dangling foreign keys are NOT errors; the source join
/// excludes them by inner-join semantics.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Database busy (another operation in progress)")]
    DbBusy,

    #[error("Database corrupt: {details}")]
    DbCorrupt { details: String },

    #[error("Operation not supported: {operation} — {reason}")]
    NotSupported { operation: String, reason: String },
}

impl TraficErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DbBusy => error_code::DB_BUSY,
            Self::DbCorrupt { .. } => error_code::DB_CORRUPT,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
