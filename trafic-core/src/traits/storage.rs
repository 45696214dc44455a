//! `ITraficReport` trait — the externally observable report operations.
//!
//! Maps to `trafic-storage/src/engine.rs`. The three internal stages
//! (source join, directional projection, total derivation) are not part
//! of the trait; callers only see the assembled unified report.

use chrono::NaiveDateTime;

use crate::errors::StorageError;
use crate::types::row::UnifiedTrafficRow;

/// Read interface over the unified traffic report.
///
/// Both operations are pure functions of `as_of` and the current committed
/// contents of `kpi_summary`, `traffic_entree`, and `traffic_sortie`;
/// re-invoking with the same inputs and the same `as_of` yields identical
/// output. `as_of` determines the trailing window boundary.
pub trait ITraficReport: Send + Sync {
    /// Compute the unified report: Inbound and Outbound projections plus
    /// the per-key Total rows, in the deterministic default order
    /// (date, node, operator, suffix, kind).
    fn unified_traffic(
        &self,
        as_of: NaiveDateTime,
    ) -> Result<Vec<UnifiedTrafficRow>, StorageError>;

    /// Recompute the unified report and replace the contents of the
    /// `trafic_unifie` table with it. Returns the number of rows written.
    fn refresh_unified_traffic(&self, as_of: NaiveDateTime) -> Result<usize, StorageError>;
}
