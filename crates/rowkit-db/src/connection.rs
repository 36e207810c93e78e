//! Database connection management.
//!
//! A [`DbConnection`] is a cheap, clonable handle to one SQLite connection.
//! Clones share the same connection; statements are serialized through a
//! mutex so only one is in flight at a time. There is no isolation between
//! callers beyond a single statement.

use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::Connection;
use tracing::{debug, error, info};

use crate::error::{DbError, Result};

/// Shared SQLite connection handle.
#[derive(Clone)]
pub struct DbConnection {
    conn: Arc<Mutex<Connection>>,
}

impl DbConnection {
    /// Opens (or creates) the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::ConnectionError`] if SQLite cannot open the file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{}: {e}", path.display())))?;
        Ok(Self::from_connection(conn))
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DbError::ConnectionError(format!(":memory: {e}")))?;
        Ok(Self::from_connection(conn))
    }

    /// Wraps an already opened rusqlite connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Turns on foreign key enforcement for this connection.
    ///
    /// SQLite leaves it off by default, so `tasks.project_id` is not checked
    /// unless this is called.
    pub fn enable_foreign_keys(&self) -> Result<()> {
        self.with(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"))
    }

    /// Runs `f` with exclusive access to the underlying connection.
    pub fn with<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.lock()?;
        Ok(f(&conn)?)
    }

    /// Whether the connection is in autocommit mode, i.e. outside any
    /// explicit transaction.
    pub fn is_autocommit(&self) -> Result<bool> {
        Ok(self.lock()?.is_autocommit())
    }

    /// Commits the open transaction, if any.
    ///
    /// Statements run in autocommit mode are already durable when they
    /// return, so this is a no-op unless a transaction was started with raw
    /// SQL (`BEGIN`).
    pub fn commit(&self) -> Result<()> {
        let conn = self.lock()?;
        if !conn.is_autocommit() {
            conn.execute_batch("COMMIT;")?;
        }
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::Poisoned)
    }
}

/// Version string of the linked SQLite library.
pub fn sqlite_version() -> &'static str {
    rusqlite::version()
}

/// Opens the database at `path`, logging the outcome.
///
/// Failures are logged and reported as `None` instead of an error.
pub fn create_connection<P: AsRef<Path>>(path: P) -> Option<DbConnection> {
    let path = path.as_ref();
    match DbConnection::open(path) {
        Ok(conn) => {
            info!(
                "Connected to {}, sqlite version: {}",
                path.display(),
                sqlite_version()
            );
            Some(conn)
        }
        Err(err) => {
            error!("{err}");
            None
        }
    }
}

/// Opens an in-memory database, reports the SQLite version and closes it again.
///
/// Returns the reported version, or `None` if the database could not be
/// opened or closed cleanly. Errors are logged, never returned.
pub fn probe_in_memory() -> Option<&'static str> {
    let conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!("{err}");
            return None;
        }
    };

    info!("Connected, sqlite version: {}", sqlite_version());

    match conn.close() {
        Ok(()) => {
            debug!("closed in-memory probe connection");
            Some(sqlite_version())
        }
        Err((_, err)) => {
            error!("{err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_is_autocommit() {
        let db = DbConnection::open_in_memory().unwrap();
        assert!(db.is_autocommit().unwrap());
        db.commit().unwrap();
    }

    #[test]
    fn test_commit_closes_explicit_transaction() {
        let db = DbConnection::open_in_memory().unwrap();
        db.with(|conn| conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY); BEGIN;"))
            .unwrap();
        assert!(!db.is_autocommit().unwrap());

        db.with(|conn| conn.execute("INSERT INTO t (id) VALUES (1)", []))
            .unwrap();
        db.commit().unwrap();

        assert!(db.is_autocommit().unwrap());
    }

    #[test]
    fn test_clones_share_connection() {
        let db = DbConnection::open_in_memory().unwrap();
        let other = db.clone();

        db.with(|conn| conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY)"))
            .unwrap();
        let count: i64 = other
            .with(|conn| conn.query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0)))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_create_connection_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.db");

        assert!(create_connection(&path).is_some());
        assert!(path.exists());
    }

    #[test]
    fn test_create_connection_failure_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("nested").join("database.db");

        assert!(create_connection(&path).is_none());
    }

    #[test]
    fn test_probe_in_memory_reports_version() {
        let version = probe_in_memory().unwrap();
        assert!(version.starts_with('3'));
    }

    #[test]
    fn test_enable_foreign_keys() {
        let db = DbConnection::open_in_memory().unwrap();
        db.enable_foreign_keys().unwrap();
        let enabled: i64 = db
            .with(|conn| conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0)))
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
