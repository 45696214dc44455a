//! The tagged directional projection — source join + window filter +
//! zero-suppression, for one direction.
//!
//! This is the single definition of the projection rules: the Inbound and
//! Outbound branches of the report call it directly, and the Total branch
//! sums its output.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use tracing::debug;

use trafic_core::errors::StorageError;
use trafic_core::types::row::{Direction, UnifiedTrafficRow};
use trafic_core::types::window::ReportWindow;

use crate::connection::map_sqlite_err;

/// Projection SQL for one direction.
///
/// - Inner join to `kpi_summary`: a fact whose `kpi_id` resolves to no
///   summary row is silently excluded, never an error.
/// - Window filter on the summary's calendar date, both bounds inclusive.
/// - Suppression: a row survives only if at least one eligible metric is
///   non-zero. Entree's eligible metrics are (traffic, tentative_appel,
///   appel_repondu) — it has no `appel_non_repondu` column and selects a
///   fixed 0 for that slot. Sortie additionally includes
///   `appel_non_repondu` in the test.
fn projection_sql(direction: Direction) -> String {
    let unanswered = if direction.has_unanswered() {
        "f.appel_non_repondu"
    } else {
        "0"
    };
    let mut suppression =
        String::from("f.traffic <> 0 OR f.tentative_appel <> 0 OR f.appel_repondu <> 0");
    if direction.has_unanswered() {
        suppression.push_str(" OR f.appel_non_repondu <> 0");
    }

    format!(
        "SELECT date(k.date), k.node, f.operator, f.suffix,
                f.traffic, f.tentative_appel, f.appel_repondu, {unanswered}
         FROM {table} f
         JOIN kpi_summary k ON k.id = f.kpi_id
         WHERE date(k.date) >= ?1 AND date(k.date) <= ?2
           AND ({suppression})",
        table = direction.table(),
    )
}

/// Run the projection for one direction, tagging every row with the
/// direction's row kind.
pub fn direction_rows(
    conn: &Connection,
    direction: Direction,
    window: ReportWindow,
) -> Result<Vec<UnifiedTrafficRow>, StorageError> {
    let sql = projection_sql(direction);
    let mut stmt = conn.prepare_cached(&sql).map_err(map_sqlite_err)?;

    let kind = direction.row_kind();
    let mapped = stmt
        .query_map(
            params![window.start.to_string(), window.end.to_string()],
            |row| {
                let jour: String = row.get(0)?;
                let date = NaiveDate::parse_from_str(&jour, "%Y-%m-%d").map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        0,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;
                Ok(UnifiedTrafficRow {
                    date,
                    node: row.get(1)?,
                    operator: row.get(2)?,
                    suffix: row.get(3)?,
                    total_traffic: row.get(4)?,
                    total_tentative_appel: row.get(5)?,
                    total_appel_repondu: row.get(6)?,
                    total_appel_non_repondu: row.get(7)?,
                    kind,
                })
            },
        )
        .map_err(map_sqlite_err)?;

    let mut rows = Vec::new();
    for row in mapped {
        rows.push(row.map_err(map_sqlite_err)?);
    }

    debug!(
        "projected {} {} rows in [{}, {}]",
        rows.len(),
        kind.as_str(),
        window.start,
        window.end
    );
    Ok(rows)
}
