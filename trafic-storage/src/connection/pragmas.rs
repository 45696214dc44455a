//! Connection pragmas.

use std::time::Duration;

use rusqlite::Connection;

use trafic_core::errors::StorageError;

use super::map_sqlite_err;

/// Apply the standard pragma set to a fresh connection.
///
/// WAL only applies to file-backed databases; in-memory connections keep
/// their default journal mode. `foreign_keys` stays OFF: the KPI tables are
/// owned and populated by the external ETL, and the report must tolerate
/// fact rows whose `kpi_id` no longer resolves (the source join excludes
/// them) rather than reject them at the storage layer.
pub fn apply_pragmas(conn: &Connection, file_backed: bool) -> Result<(), StorageError> {
    if file_backed {
        let _mode: String = conn
            .query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))
            .map_err(map_sqlite_err)?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(map_sqlite_err)?;
    }
    // The bundled SQLite is compiled with SQLITE_DEFAULT_FOREIGN_KEYS=1,
    // so OFF must be set explicitly rather than relied on as the default.
    conn.pragma_update(None, "foreign_keys", "OFF")
        .map_err(map_sqlite_err)?;
    conn.busy_timeout(Duration::from_secs(5))
        .map_err(map_sqlite_err)?;
    Ok(())
}
