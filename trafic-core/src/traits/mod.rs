//! Traits at the storage seam.

pub mod storage;

pub use storage::ITraficReport;
