//! Database connection manager for the local activity store.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{params, Connection};
use safehours_domain::{Result, SafeHoursError};
use tracing::info;

use crate::errors::InfraError;

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Owns the SQLite connection shared by the repositories.
///
/// A single guarded connection: the store backs one user's personal log,
/// so there is no pooling requirement.
pub struct DbManager {
    connection: Mutex<Connection>,
    path: PathBuf,
}

impl DbManager {
    /// Open (or create) the database at the given path and ensure the
    /// schema exists.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();
        let connection = Connection::open(&path).map_err(InfraError::from)?;

        info!(db_path = %path.display(), "sqlite database opened");

        let manager = Self { connection: Mutex::new(connection), path };
        manager.run_migrations()?;
        Ok(manager)
    }

    /// Open an in-memory database. Used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(InfraError::from)?;
        let manager = Self { connection: Mutex::new(connection), path: PathBuf::from(":memory:") };
        manager.run_migrations()?;
        Ok(manager)
    }

    /// Ensure the full schema exists on the current database.
    pub fn run_migrations(&self) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute_batch(SCHEMA_SQL)?;
            conn.execute(
                "INSERT OR IGNORE INTO schema_version (version, applied_at) \
                 VALUES (?1, CAST(strftime('%s','now') AS INTEGER))",
                params![SCHEMA_VERSION],
            )?;
            Ok(())
        })
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Verify the database is accessible and responding.
    pub fn health_check(&self) -> Result<()> {
        self.with_connection(|conn| {
            conn.query_row("SELECT 1", params![], |row| row.get::<_, i32>(0))?;
            Ok(())
        })
    }

    /// Run a closure against the guarded connection, mapping failures
    /// into domain errors.
    pub(crate) fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| SafeHoursError::Storage(String::from("connection lock poisoned")))?;
        f(&conn).map_err(|err| SafeHoursError::from(InfraError::from(err)))
    }
}
