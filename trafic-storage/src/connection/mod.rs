//! `DatabaseManager` — connection ownership and read/write routing.
//!
//! Owns the single SQLite connection for the report database. All reads go
//! through `with_reader()` (one deferred transaction = one consistent
//! snapshot of the three input tables), all writes through `with_writer()`
//! (immediate transaction, committed on success). No code outside this
//! crate should touch a raw `&Connection` for trafic.db operations.

pub mod pragmas;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{Connection, ErrorCode, Transaction, TransactionBehavior};
use tracing::debug;

use trafic_core::errors::StorageError;

use crate::migrations;

/// Map a rusqlite error to the storage error taxonomy.
pub(crate) fn map_sqlite_err(e: rusqlite::Error) -> StorageError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::DatabaseBusy => {
            StorageError::DbBusy
        }
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::DatabaseCorrupt => {
            StorageError::DbCorrupt {
                details: e.to_string(),
            }
        }
        _ => StorageError::SqliteError {
            message: e.to_string(),
        },
    }
}

/// Owner of the report database connection.
///
/// The connection is behind a `Mutex`: the report is evaluated by one
/// synchronous invocation at a time, and the external ETL writes through
/// its own connection — SQLite's WAL mode isolates our read snapshot from
/// those concurrent writers.
pub struct DatabaseManager {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a file-backed database. Applies pragmas and runs migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(map_sqlite_err)?;
        debug!("opened report database at {}", path.display());
        Self::init(conn, Some(path.to_path_buf()))
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(map_sqlite_err)?;
        Self::init(conn, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self, StorageError> {
        pragmas::apply_pragmas(&conn, path.is_some())?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run a read closure inside one deferred transaction.
    ///
    /// Every report evaluation goes through here, so its three stages see
    /// one isolated snapshot — a Total row can never disagree with the
    /// directional rows computed in the same invocation.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Transaction) -> Result<T, StorageError>,
    {
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction().map_err(map_sqlite_err)?;
        let out = f(&tx)?;
        // Read-only snapshot: nothing to commit, rollback on drop.
        Ok(out)
    }

    /// Run a write closure inside one immediate transaction.
    /// Committed when the closure succeeds, rolled back when it errors.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Transaction) -> Result<T, StorageError>,
    {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(map_sqlite_err)?;
        let out = f(&tx)?;
        tx.commit().map_err(map_sqlite_err)?;
        Ok(out)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::SqliteError {
            message: "connection mutex poisoned".to_string(),
        })
    }
}
