//! Core data types for the unified traffic report.

pub mod row;
pub mod window;
