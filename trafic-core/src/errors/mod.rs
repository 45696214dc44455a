//! Error types for the Trafic workspace.

pub mod error_code;
pub mod storage_error;

pub use storage_error::StorageError;
