//! # trafic-storage
//!
//! SQLite report layer for the unified call-center traffic report.
//! WAL mode, one serialized connection, versioned migrations,
//! snapshot-isolated report evaluation, materialized refresh.

pub mod connection;
pub mod engine;
pub mod materialized;
pub mod migrations;
pub mod queries;

pub use connection::DatabaseManager;
pub use engine::TraficReportEngine;
