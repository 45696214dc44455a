//! `TraficReportEngine` — the report engine implementing `ITraficReport`.
//!
//! Wraps `DatabaseManager` (read/write routing). Every evaluation runs all
//! three stages (source join, directional projection, total derivation)
//! against one transaction-isolated snapshot of the input tables.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDateTime;
use rusqlite::Transaction;
use tracing::debug;

use trafic_core::config::ReportConfig;
use trafic_core::errors::StorageError;
use trafic_core::traits::storage::ITraficReport;
use trafic_core::types::row::UnifiedTrafficRow;
use trafic_core::types::window::{ReportWindow, DEFAULT_WINDOW_DAYS};

use crate::connection::DatabaseManager;
use crate::materialized;
use crate::queries;

/// The unified traffic report engine.
///
/// Read-only over the KPI tables; its only write path is the materialized
/// refresh of `trafic_unifie`.
pub struct TraficReportEngine {
    db: DatabaseManager,
    window_days: u32,
}

impl TraficReportEngine {
    /// Open a file-backed engine with the default 365-day window.
    /// Runs migrations and applies pragmas.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open(path)?,
            window_days: DEFAULT_WINDOW_DAYS,
        })
    }

    /// Open a file-backed engine with a configured window.
    pub fn open_with_config(path: &Path, config: &ReportConfig) -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open(path)?,
            window_days: config.effective_window_days(),
        })
    }

    /// Open an in-memory engine (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
            window_days: DEFAULT_WINDOW_DAYS,
        })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }

    /// Expose as `Arc<dyn ITraficReport>` for scheduler consumption.
    pub fn as_trafic_report(self: &Arc<Self>) -> Arc<dyn ITraficReport> {
        Arc::clone(self) as Arc<dyn ITraficReport>
    }

    /// Raw read access (one snapshot transaction) — for operations not
    /// covered by the trait. Prefer trait methods where possible.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Transaction) -> Result<T, StorageError>,
    {
        self.db.with_reader(f)
    }

    /// Raw write access — for seeding the KPI tables in tests and tooling.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Transaction) -> Result<T, StorageError>,
    {
        self.db.with_writer(f)
    }

    fn window(&self, as_of: NaiveDateTime) -> ReportWindow {
        ReportWindow::trailing(as_of, self.window_days)
    }
}

impl ITraficReport for TraficReportEngine {
    fn unified_traffic(
        &self,
        as_of: NaiveDateTime,
    ) -> Result<Vec<UnifiedTrafficRow>, StorageError> {
        let window = self.window(as_of);
        debug!("evaluating unified traffic as of {as_of}");
        self.db
            .with_reader(|tx| queries::unified::unified_rows(tx, window))
    }

    fn refresh_unified_traffic(&self, as_of: NaiveDateTime) -> Result<usize, StorageError> {
        let window = self.window(as_of);
        // Recompute and swap inside the same write transaction: the
        // snapshot the rows were derived from is the one they replace
        // the table under.
        self.db.with_writer(|tx| {
            let rows = queries::unified::unified_rows(tx, window)?;
            materialized::refresh(tx, &rows)
        })
    }
}
