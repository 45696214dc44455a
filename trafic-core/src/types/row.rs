//! Row types for the unified traffic report.
//!
//! One output shape (`UnifiedTrafficRow`) with a row-kind discriminator,
//! produced by three independent branches (Inbound, Outbound, Total) and
//! concatenated — never aligned positionally across union branches.

use std::ops::AddAssign;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A directional fact source: inbound ("entree") or outbound ("sortie").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Entree,
    Sortie,
}

impl Direction {
    /// Source table holding this direction's facts.
    pub fn table(self) -> &'static str {
        match self {
            Self::Entree => "traffic_entree",
            Self::Sortie => "traffic_sortie",
        }
    }

    /// Row kind a projected fact of this direction is tagged with.
    pub fn row_kind(self) -> RowKind {
        match self {
            Self::Entree => RowKind::Inbound,
            Self::Sortie => RowKind::Outbound,
        }
    }

    /// Whether this direction carries an `appel_non_repondu` column.
    /// Entree has no such field; it contributes a fixed 0 and the column
    /// takes no part in Entree's zero-suppression test.
    pub fn has_unanswered(self) -> bool {
        matches!(self, Self::Sortie)
    }
}

/// Discriminator for the unified report rows.
///
/// Ordering (Inbound < Outbound < Total) is the tie-break within one
/// grouping key in the deterministic default output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RowKind {
    Inbound,
    Outbound,
    Total,
}

impl RowKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbound => "Inbound",
            Self::Outbound => "Outbound",
            Self::Total => "Total",
        }
    }

    /// Inverse of [`as_str`](Self::as_str), for rows read back from the
    /// materialized table.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Inbound" => Some(Self::Inbound),
            "Outbound" => Some(Self::Outbound),
            "Total" => Some(Self::Total),
            _ => None,
        }
    }
}

/// The (date, node, operator, suffix) tuple identifying one reporting cell.
///
/// Shared by the directional projections and the Total derivation so the
/// two stages can never group differently. `Ord` gives BTreeMap grouping
/// the deterministic default order for free.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrafficKey {
    pub date: NaiveDate,
    pub node: String,
    pub operator: String,
    pub suffix: String,
}

/// The four metric slots of one report row.
///
/// Entree facts carry `appel_non_repondu = 0` (no source column).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub traffic: i64,
    pub tentative_appel: i64,
    pub appel_repondu: i64,
    pub appel_non_repondu: i64,
}

impl Metrics {
    /// True when every slot is zero. A projected fact whose eligible slots
    /// are all zero is suppressed before it reaches the report.
    pub fn is_zero(&self) -> bool {
        self.traffic == 0
            && self.tentative_appel == 0
            && self.appel_repondu == 0
            && self.appel_non_repondu == 0
    }
}

impl AddAssign for Metrics {
    fn add_assign(&mut self, rhs: Self) {
        self.traffic += rhs.traffic;
        self.tentative_appel += rhs.tentative_appel;
        self.appel_repondu += rhs.appel_repondu;
        self.appel_non_repondu += rhs.appel_non_repondu;
    }
}

/// One row of the unified traffic report — the sole output entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedTrafficRow {
    pub date: NaiveDate,
    pub node: String,
    pub operator: String,
    pub suffix: String,
    pub total_traffic: i64,
    pub total_tentative_appel: i64,
    pub total_appel_repondu: i64,
    pub total_appel_non_repondu: i64,
    pub kind: RowKind,
}

impl UnifiedTrafficRow {
    pub fn from_parts(key: TrafficKey, metrics: Metrics, kind: RowKind) -> Self {
        Self {
            date: key.date,
            node: key.node,
            operator: key.operator,
            suffix: key.suffix,
            total_traffic: metrics.traffic,
            total_tentative_appel: metrics.tentative_appel,
            total_appel_repondu: metrics.appel_repondu,
            total_appel_non_repondu: metrics.appel_non_repondu,
            kind,
        }
    }

    /// The grouping key of this row (clones the string fields).
    pub fn key(&self) -> TrafficKey {
        TrafficKey {
            date: self.date,
            node: self.node.clone(),
            operator: self.operator.clone(),
            suffix: self.suffix.clone(),
        }
    }

    /// The four metric slots of this row.
    pub fn metrics(&self) -> Metrics {
        Metrics {
            traffic: self.total_traffic,
            tentative_appel: self.total_tentative_appel,
            appel_repondu: self.total_appel_repondu,
            appel_non_repondu: self.total_appel_non_repondu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_sum_elementwise() {
        let mut a = Metrics { traffic: 5, tentative_appel: 5, appel_repondu: 5, appel_non_repondu: 0 };
        let b = Metrics { traffic: 3, tentative_appel: 3, appel_repondu: 2, appel_non_repondu: 1 };
        a += b;
        assert_eq!(a, Metrics { traffic: 8, tentative_appel: 8, appel_repondu: 7, appel_non_repondu: 1 });
    }

    #[test]
    fn zero_metrics_detected() {
        assert!(Metrics::default().is_zero());
        assert!(!Metrics { appel_non_repondu: 5, ..Metrics::default() }.is_zero());
    }

    #[test]
    fn row_kind_order_is_inbound_outbound_total() {
        assert!(RowKind::Inbound < RowKind::Outbound);
        assert!(RowKind::Outbound < RowKind::Total);
    }
}
