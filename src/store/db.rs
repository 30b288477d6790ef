// Plug Password — SQLite Database Handle
//
// Thin wrapper around a rusqlite connection. A handle lives for the duration
// of one store operation and is dropped (closing the file) before the
// operation returns.

use std::path::Path;

use rusqlite::{Connection, OpenFlags, OptionalExtension};

use super::StoreError;

/// Wrapper around a SQLite connection to the password database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `path`, creating the file if it does not exist.
    pub fn create(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "Opened database (create)");
        Ok(Self { conn })
    }

    /// Open an existing database. Fails if the file is missing.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)?;
        tracing::debug!(path = %path.display(), "Opened database");
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing only).
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Get a reference to the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Catalog lookup: does a table with exactly this name exist?
    pub fn table_exists(&self, name: &str) -> Result<bool, StoreError> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [name],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Number of rows in `table`. The name must already be validated.
    pub fn row_count(&self, table: &super::TableName) -> Result<i64, StoreError> {
        let sql = format!("SELECT count(*) FROM {}", table.quoted());
        let count = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
