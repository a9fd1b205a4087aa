//! Database connection management
//!
//! Every repository call opens its own connection through [`with_connection`]
//! and the connection is closed when that call returns, on success or error.

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Apply the fixed connection configuration
pub fn configure(conn: &Connection) -> Result<()> {
    // Enforce referential integrity
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(from_rusqlite)?;

    Ok(())
}

/// Run `f` against a freshly opened and configured connection
///
/// The connection is dropped (and closed) before this returns.
pub fn with_connection<T, F>(path: &Path, f: F) -> Result<T>
where
    F: FnOnce(&Connection) -> Result<T>,
{
    let conn = open(path)?;
    configure(&conn)?;
    f(&conn)
}
