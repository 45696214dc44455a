//! Migration runner — version tracking, forward-only, transactional per migration.

mod v001_kpi_tables;
mod v002_unified_table;

use rusqlite::Connection;
use tracing::{debug, info};

use trafic_core::errors::StorageError;

use crate::connection::map_sqlite_err;

/// Latest schema version.
pub const LATEST_VERSION: u32 = 2;

/// All migrations in order. Index 0 = v001, etc.
type MigrationFn = fn(&Connection) -> Result<(), StorageError>;

const MIGRATIONS: [(u32, &str, MigrationFn); 2] = [
    (1, "kpi_tables", v001_kpi_tables::migrate),
    (2, "unified_table", v002_unified_table::migrate),
];

/// Get the current schema version from the database.
/// Returns 0 if the schema_version table doesn't exist yet.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    let exists: bool = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version'")
        .and_then(|mut stmt| stmt.exists([]))
        .map_err(map_sqlite_err)?;

    if !exists {
        return Ok(0);
    }

    let version: u32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .map_err(map_sqlite_err)?;

    Ok(version)
}

/// Run all pending migrations. Forward-only, each wrapped in a transaction.
/// Returns the number of migrations applied.
pub fn run_migrations(conn: &Connection) -> Result<u32, StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
             version INTEGER PRIMARY KEY,
             applied_at TEXT NOT NULL DEFAULT (datetime('now'))
         )",
    )
    .map_err(map_sqlite_err)?;

    let current = current_version(conn)?;
    let mut applied = 0;

    if current >= LATEST_VERSION {
        debug!("database schema is up to date (v{current})");
        return Ok(0);
    }

    info!("running migrations: v{} → v{}", current, LATEST_VERSION);

    for &(version, name, migrate_fn) in &MIGRATIONS {
        if version <= current {
            continue;
        }

        debug!("applying migration v{version:03}: {name}");

        // Each migration runs in its own transaction.
        conn.execute_batch("BEGIN IMMEDIATE")
            .map_err(map_sqlite_err)?;

        let result = migrate_fn(conn).and_then(|()| {
            conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
                .map(|_| ())
                .map_err(map_sqlite_err)
        });

        match result {
            Ok(()) => {
                conn.execute_batch("COMMIT").map_err(map_sqlite_err)?;
                applied += 1;
            }
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(StorageError::MigrationFailed {
                    version,
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(applied)
}
