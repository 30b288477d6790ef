// Plug Password — Versioned Table Store
//
// Implements the table lifecycle on top of one SQLite file: schema creation,
// whole-table snapshots, the active-table pointer and the snapshot listing.
// Every operation opens its own connection and drops it before returning;
// nothing about the database is cached between calls.

use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension};

use super::db::Database;
use super::models::{Account, NewAccount};
use super::snapshot::{snapshot_name, DATABASE_FILE_NAME, DATABASE_PREFIX, LIVE_TABLE};
use super::table_name::TableName;
use super::StoreError;
use crate::config::{ConfigProvider, KEY_STORE_DIRECTORY, TABLE_STORE_DIRECTORY};

/// Single-row table naming the live table.
const POINTER_TABLE: &str = "active_table";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the versioned table store, so callers never depend on the
/// SQLite specifics.
pub trait TableStore {
    /// Create whichever of the `accounts` table and the active-table pointer
    /// is missing. Fails with `AlreadyInitialized` when both exist.
    fn create(&self) -> Result<(), StoreError>;

    /// Name of the active table, or `None` if the store was never initialized.
    fn get_current_table(&self) -> Result<Option<String>, StoreError>;

    /// Copy every row of `accounts` into a fresh table `new_name`, replacing
    /// any table that already has that name. The pointer is not touched.
    fn backup_current_table(&self, new_name: &str) -> Result<(), StoreError>;

    /// Point the active table at `name`, which must already exist.
    fn switch_table(&self, name: &str) -> Result<(), StoreError>;

    /// Every table whose name ends in `_accounts`, in catalog order.
    fn get_all_tables(&self) -> Result<Vec<String>, StoreError>;

    /// Insert one row into `accounts`.
    fn insert_account(&self, account: &NewAccount) -> Result<(), StoreError>;

    /// All rows of `accounts`, in insertion order.
    fn list_accounts(&self) -> Result<Vec<Account>, StoreError>;

    /// Write a compacted copy of the whole database into `dest_dir`, named
    /// after `taken_at`. Returns the path of the new file.
    fn archive(&self, dest_dir: &Path, taken_at: NaiveDateTime) -> Result<PathBuf, StoreError>;
}

/// Read the configured storage directory.
pub fn resolve_store_dir(config: &impl ConfigProvider) -> Result<PathBuf, StoreError> {
    match config.get(KEY_STORE_DIRECTORY, Some(TABLE_STORE_DIRECTORY))? {
        Some(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir)),
        _ => Err(StoreError::NotConfigured),
    }
}

// ─── SQLite Implementation ──────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SqliteTableStore {
    db_path: PathBuf,
}

impl SqliteTableStore {
    /// Store backed by `<store_dir>/passwords.sqlite`.
    pub fn new(store_dir: &Path) -> Self {
        Self {
            db_path: store_dir.join(DATABASE_FILE_NAME),
        }
    }

    /// Build a store from the directory recorded in `config`.
    pub fn from_config(config: &impl ConfigProvider) -> Result<Self, StoreError> {
        let dir = resolve_store_dir(config)?;
        Ok(Self::new(&dir))
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open the database file, or `None` when it has not been created yet.
    fn connect_if_present(&self) -> Result<Option<Database>, StoreError> {
        if !self.db_path.is_file() {
            return Ok(None);
        }
        Database::open(&self.db_path).map(Some)
    }

    fn create_accounts_table(db: &Database) -> Result<(), StoreError> {
        db.conn().execute_batch(
            "CREATE TABLE IF NOT EXISTS accounts (
                id        TEXT NOT NULL PRIMARY KEY,
                platform  TEXT NOT NULL
            );",
        )?;
        tracing::debug!("Created accounts table");
        Ok(())
    }

    fn create_pointer(db: &Database, initial: &str) -> Result<(), StoreError> {
        let tx = db.conn().unchecked_transaction()?;

        tx.execute_batch(
            "CREATE TABLE IF NOT EXISTS active_table (
                id          INTEGER PRIMARY KEY CHECK (id = 1),
                table_name  TEXT NOT NULL
            );",
        )?;
        tx.execute(
            "INSERT INTO active_table (id, table_name) VALUES (1, ?1)
             ON CONFLICT(id) DO UPDATE SET table_name = excluded.table_name",
            params![initial],
        )?;

        tx.commit()?;
        tracing::debug!(table = %initial, "Created active table pointer");
        Ok(())
    }

    fn pointer_exists(db: &Database) -> Result<bool, StoreError> {
        if !db.table_exists(POINTER_TABLE)? {
            return Ok(false);
        }
        let row = db
            .conn()
            .query_row("SELECT 1 FROM active_table WHERE id = 1", [], |_| Ok(()))
            .optional()?;
        Ok(row.is_some())
    }

    fn row_to_account(row: &rusqlite::Row<'_>) -> rusqlite::Result<Account> {
        Ok(Account {
            id: row.get(0)?,
            platform: row.get(1)?,
        })
    }
}

impl TableStore for SqliteTableStore {
    fn create(&self) -> Result<(), StoreError> {
        let db = Database::create(&self.db_path)?;

        let accounts_exists = db.table_exists(LIVE_TABLE)?;
        let pointer_exists = Self::pointer_exists(&db)?;

        if accounts_exists && pointer_exists {
            return Err(StoreError::AlreadyInitialized);
        }

        // Each missing object is created on its own; a failure on the second
        // leaves the first in place.
        if !accounts_exists {
            Self::create_accounts_table(&db)?;
        }
        if !pointer_exists {
            Self::create_pointer(&db, LIVE_TABLE)?;
        }

        tracing::info!(path = %self.db_path.display(), "Storage initialized");
        Ok(())
    }

    fn get_current_table(&self) -> Result<Option<String>, StoreError> {
        let Some(db) = self.connect_if_present()? else {
            return Ok(None);
        };
        if !db.table_exists(POINTER_TABLE)? {
            return Ok(None);
        }

        let name = db
            .conn()
            .query_row(
                "SELECT table_name FROM active_table WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        Ok(name)
    }

    fn backup_current_table(&self, new_name: &str) -> Result<(), StoreError> {
        let target = TableName::parse(new_name)?;
        if target.is(LIVE_TABLE) || target.is(POINTER_TABLE) {
            return Err(StoreError::InvalidTableName(new_name.to_string()));
        }

        let db = Database::open(&self.db_path)?;
        let tx = db.conn().unchecked_transaction()?;

        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {t};
             CREATE TABLE {t} AS SELECT * FROM accounts WHERE 0;",
            t = target.quoted()
        ))?;
        let copied = tx.execute(
            &format!("INSERT INTO {} SELECT * FROM accounts", target.quoted()),
            [],
        )?;

        tx.commit()?;

        tracing::info!(table = %target, rows = copied, "Backed up accounts table");
        Ok(())
    }

    fn switch_table(&self, name: &str) -> Result<(), StoreError> {
        let target = TableName::parse(name)?;
        if target.is(POINTER_TABLE) {
            return Err(StoreError::InvalidTableName(name.to_string()));
        }

        let Some(db) = self.connect_if_present()? else {
            return Err(StoreError::NotFound(name.to_string()));
        };
        if !db.table_exists(POINTER_TABLE)? {
            return Err(StoreError::NotFound(POINTER_TABLE.to_string()));
        }
        if !db.table_exists(target.as_str())? {
            return Err(StoreError::NotFound(name.to_string()));
        }

        let updated = db.conn().execute(
            "UPDATE active_table SET table_name = ?1 WHERE id = 1",
            params![target.as_str()],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(POINTER_TABLE.to_string()));
        }

        tracing::info!(table = %target, "Switched active table");
        Ok(())
    }

    fn get_all_tables(&self) -> Result<Vec<String>, StoreError> {
        let Some(db) = self.connect_if_present()? else {
            return Ok(Vec::new());
        };

        // `_` is a LIKE wildcard, so it is escaped to match the literal suffix.
        let mut stmt = db.conn().prepare(
            r"SELECT name FROM sqlite_master
              WHERE type = 'table' AND name LIKE '%\_accounts' ESCAPE '\'",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut tables = Vec::new();
        for row in rows {
            tables.push(row?);
        }

        Ok(tables)
    }

    fn insert_account(&self, account: &NewAccount) -> Result<(), StoreError> {
        let db = Database::open(&self.db_path)?;
        let tx = db.conn().unchecked_transaction()?;

        tx.execute(
            "INSERT INTO accounts (id, platform) VALUES (?1, ?2)",
            params![account.id.to_string(), account.platform],
        )?;

        tx.commit()?;

        tracing::info!(
            account_id = %account.id,
            platform = %account.platform,
            "Account stored"
        );
        Ok(())
    }

    fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let db = Database::open(&self.db_path)?;
        let mut stmt = db
            .conn()
            .prepare("SELECT id, platform FROM accounts ORDER BY rowid")?;

        let rows = stmt.query_map([], Self::row_to_account)?;

        let mut accounts = Vec::new();
        for row in rows {
            accounts.push(row?);
        }

        Ok(accounts)
    }

    fn archive(&self, dest_dir: &Path, taken_at: NaiveDateTime) -> Result<PathBuf, StoreError> {
        let dest = dest_dir.join(snapshot_name(DATABASE_PREFIX, Some(taken_at)));
        if dest.exists() {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("archive '{}' already exists", dest.display()),
            )));
        }

        if !self.db_path.is_file() {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("database '{}' does not exist", self.db_path.display()),
            )));
        }

        // Opened with create flags so the connection may create the output file.
        let db = Database::create(&self.db_path)?;
        let dest_str = dest.to_string_lossy().into_owned();
        db.conn().execute("VACUUM INTO ?1", params![dest_str])?;

        tracing::info!(path = %dest.display(), "Database archived");
        Ok(dest)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
