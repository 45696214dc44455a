//! Materialized form of the unified report — the `trafic_unifie` table.
//!
//! Refresh-on-demand: the external scheduler calls
//! `ITraficReport::refresh_unified_traffic`, which recomputes the report
//! and swaps the table contents inside one write transaction. Readers of
//! the table never observe a half-refreshed state.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use tracing::info;

use trafic_core::errors::StorageError;
use trafic_core::types::row::{RowKind, UnifiedTrafficRow};

use crate::connection::map_sqlite_err;

/// Replace the contents of `trafic_unifie` with `rows`.
/// Must run inside the caller's write transaction. Returns the row count.
pub fn refresh(conn: &Connection, rows: &[UnifiedTrafficRow]) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM trafic_unifie", [])
        .map_err(map_sqlite_err)?;

    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO trafic_unifie
             (date, node, operator, suffix, total_traffic, total_tentative_appel,
              total_appel_repondu, total_appel_non_repondu, kind)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .map_err(map_sqlite_err)?;

    for row in rows {
        stmt.execute(params![
            row.date.to_string(),
            row.node,
            row.operator,
            row.suffix,
            row.total_traffic,
            row.total_tentative_appel,
            row.total_appel_repondu,
            row.total_appel_non_repondu,
            row.kind.as_str(),
        ])
        .map_err(map_sqlite_err)?;
    }

    info!("materialized {} unified traffic rows", rows.len());
    Ok(rows.len())
}

/// Load the materialized report, in the deterministic default order.
pub fn load(conn: &Connection) -> Result<Vec<UnifiedTrafficRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT date, node, operator, suffix, total_traffic, total_tentative_appel,
                    total_appel_repondu, total_appel_non_repondu, kind
             FROM trafic_unifie
             ORDER BY date, node, operator, suffix, kind",
        )
        .map_err(map_sqlite_err)?;

    let mapped = stmt
        .query_map([], |row| {
            let date: String = row.get(0)?;
            let kind: String = row.get(8)?;
            Ok((
                date,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, i64>(5)?,
                row.get::<_, i64>(6)?,
                row.get::<_, i64>(7)?,
                kind,
            ))
        })
        .map_err(map_sqlite_err)?;

    let mut rows = Vec::new();
    for row in mapped {
        let (date, node, operator, suffix, traffic, tentative, repondu, non_repondu, kind) =
            row.map_err(map_sqlite_err)?;
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| {
            StorageError::DbCorrupt {
                details: format!("trafic_unifie.date '{date}': {e}"),
            }
        })?;
        let kind = RowKind::parse(&kind).ok_or_else(|| StorageError::DbCorrupt {
            details: format!("trafic_unifie.kind '{kind}' is not a known row kind"),
        })?;
        rows.push(UnifiedTrafficRow {
            date,
            node,
            operator,
            suffix,
            total_traffic: traffic,
            total_tentative_appel: tentative,
            total_appel_repondu: repondu,
            total_appel_non_repondu: non_repondu,
            kind,
        });
    }
    Ok(rows)
}
