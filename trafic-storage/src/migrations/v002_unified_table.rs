//! v002 — materialized unified report table.
//!
//! The primary key enforces the report invariant: at most one row per
//! (date, node, operator, suffix, kind).

use rusqlite::Connection;

use trafic_core::errors::StorageError;

use crate::connection::map_sqlite_err;

pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS trafic_unifie (
             date TEXT NOT NULL,
             node TEXT NOT NULL,
             operator TEXT NOT NULL,
             suffix TEXT NOT NULL,
             total_traffic INTEGER NOT NULL,
             total_tentative_appel INTEGER NOT NULL,
             total_appel_repondu INTEGER NOT NULL,
             total_appel_non_repondu INTEGER NOT NULL,
             kind TEXT NOT NULL,
             PRIMARY KEY (date, node, operator, suffix, kind)
         );",
    )
    .map_err(map_sqlite_err)
}
