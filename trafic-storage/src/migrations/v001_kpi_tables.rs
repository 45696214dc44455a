//! v001 — KPI source tables: `kpi_summary` plus the two directional fact
//! tables. Column layout follows the upstream ETL's DDL; metric columns are
//! INTEGER (the counters are counts). `traffic_entree` has no
//! `appel_non_repondu` column — inbound facts have no unanswered-call
//! metric.

use rusqlite::Connection;

use trafic_core::errors::StorageError;

use crate::connection::map_sqlite_err;

pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS kpi_summary (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             date TEXT NOT NULL,
             node TEXT NOT NULL
         );
         CREATE INDEX IF NOT EXISTS idx_kpi_summary_date_node
             ON kpi_summary(date, node);

         CREATE TABLE IF NOT EXISTS traffic_entree (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             kpi_id INTEGER NOT NULL,
             operator TEXT NOT NULL,
             suffix TEXT NOT NULL,
             traffic INTEGER NOT NULL DEFAULT 0,
             tentative_appel INTEGER NOT NULL DEFAULT 0,
             appel_repondu INTEGER NOT NULL DEFAULT 0,
             FOREIGN KEY (kpi_id) REFERENCES kpi_summary(id)
         );
         CREATE INDEX IF NOT EXISTS idx_traffic_entree_kpi
             ON traffic_entree(kpi_id, operator, suffix);

         CREATE TABLE IF NOT EXISTS traffic_sortie (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             kpi_id INTEGER NOT NULL,
             operator TEXT NOT NULL,
             suffix TEXT NOT NULL,
             traffic INTEGER NOT NULL DEFAULT 0,
             tentative_appel INTEGER NOT NULL DEFAULT 0,
             appel_repondu INTEGER NOT NULL DEFAULT 0,
             appel_non_repondu INTEGER NOT NULL DEFAULT 0,
             FOREIGN KEY (kpi_id) REFERENCES kpi_summary(id)
         );
         CREATE INDEX IF NOT EXISTS idx_traffic_sortie_kpi
             ON traffic_sortie(kpi_id, operator, suffix);",
    )
    .map_err(map_sqlite_err)
}
