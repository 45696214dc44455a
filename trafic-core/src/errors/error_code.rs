//! Stable string error codes, so callers can match on a code instead of
//! an error message that may be reworded.

/// Trait implemented by every Trafic error enum.
pub trait TraficErrorCode {
    /// Stable, machine-matchable error code.
    fn error_code(&self) -> &'static str;
}

pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const DB_CORRUPT: &str = "DB_CORRUPT";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
