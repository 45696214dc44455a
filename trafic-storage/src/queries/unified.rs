//! Total derivation and unified result assembly.

use std::collections::BTreeMap;

use rusqlite::Connection;

use trafic_core::errors::StorageError;
use trafic_core::types::row::{Direction, Metrics, RowKind, TrafficKey, UnifiedTrafficRow};
use trafic_core::types::window::ReportWindow;

use super::projection;

/// Per-key Total rows over the disjoint union of both tagged projections.
///
/// Groups by `TrafficKey` and sums all four metric slots across however
/// many rows (1 or 2) fall in a group. Every contributing row already
/// passed the suppression filter, so a group is never all-zero and no
/// further suppression check is needed here.
pub fn derive_totals(
    inbound: &[UnifiedTrafficRow],
    outbound: &[UnifiedTrafficRow],
) -> Vec<UnifiedTrafficRow> {
    let mut groups: BTreeMap<TrafficKey, Metrics> = BTreeMap::new();
    for row in inbound.iter().chain(outbound) {
        *groups.entry(row.key()).or_default() += row.metrics();
    }
    groups
        .into_iter()
        .map(|(key, metrics)| UnifiedTrafficRow::from_parts(key, metrics, RowKind::Total))
        .collect()
}

/// The unified report: Inbound rows ∪ Outbound rows ∪ Total rows.
///
/// A set union of three same-shaped producers, not a join. Output is in
/// the deterministic default order (date, node, operator, suffix, kind);
/// the order carries no meaning, it only eases testing and diffing.
pub fn unified_rows(
    conn: &Connection,
    window: ReportWindow,
) -> Result<Vec<UnifiedTrafficRow>, StorageError> {
    let inbound = projection::direction_rows(conn, Direction::Entree, window)?;
    let outbound = projection::direction_rows(conn, Direction::Sortie, window)?;
    let totals = derive_totals(&inbound, &outbound);

    let mut rows = Vec::with_capacity(inbound.len() + outbound.len() + totals.len());
    rows.extend(inbound);
    rows.extend(outbound);
    rows.extend(totals);
    rows.sort_by(|a, b| {
        (a.date, &a.node, &a.operator, &a.suffix, a.kind)
            .cmp(&(b.date, &b.node, &b.operator, &b.suffix, b.kind))
    });
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(kind: RowKind, metrics: Metrics) -> UnifiedTrafficRow {
        UnifiedTrafficRow::from_parts(
            TrafficKey {
                date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                node: "N1".to_string(),
                operator: "OP1".to_string(),
                suffix: "S1".to_string(),
            },
            metrics,
            kind,
        )
    }

    #[test]
    fn totals_sum_both_directions_per_key() {
        let inbound = vec![row(
            RowKind::Inbound,
            Metrics { traffic: 5, tentative_appel: 5, appel_repondu: 5, appel_non_repondu: 0 },
        )];
        let outbound = vec![row(
            RowKind::Outbound,
            Metrics { traffic: 3, tentative_appel: 3, appel_repondu: 2, appel_non_repondu: 1 },
        )];

        let totals = derive_totals(&inbound, &outbound);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].kind, RowKind::Total);
        assert_eq!(
            totals[0].metrics(),
            Metrics { traffic: 8, tentative_appel: 8, appel_repondu: 7, appel_non_repondu: 1 }
        );
    }

    #[test]
    fn missing_direction_is_zero_filled() {
        let inbound = vec![row(
            RowKind::Inbound,
            Metrics { traffic: 10, tentative_appel: 12, appel_repondu: 9, appel_non_repondu: 0 },
        )];

        let totals = derive_totals(&inbound, &[]);
        assert_eq!(totals.len(), 1);
        assert_eq!(
            totals[0].metrics(),
            Metrics { traffic: 10, tentative_appel: 12, appel_repondu: 9, appel_non_repondu: 0 }
        );
    }

    #[test]
    fn no_contributing_rows_means_no_total() {
        assert!(derive_totals(&[], &[]).is_empty());
    }
}
