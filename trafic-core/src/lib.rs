//! # trafic-core
//!
//! Foundation crate for the Trafic unified traffic report.
//! Defines the row types, grouping key, report window, errors, config,
//! and the storage trait the report engine implements.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::ReportConfig;
pub use errors::error_code::TraficErrorCode;
pub use errors::StorageError;
pub use types::row::{Direction, Metrics, RowKind, TrafficKey, UnifiedTrafficRow};
pub use types::window::ReportWindow;
