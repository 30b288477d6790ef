// Plug Password — Store Module
//
// Versioned table store over a single SQLite file. The live `accounts` table
// is snapshotted by copying it into `<token>_accounts` tables, and a one-row
// `active_table` pointer records which table is considered live.

mod accounts;
mod db;
mod error;
mod models;
mod repository;
mod snapshot;
mod table_name;

pub use accounts::{AccountRegistrar, NewAccountReceipt};
pub use db::Database;
pub use error::StoreError;
pub use models::{Account, NewAccount, TableListing};
pub use repository::{resolve_store_dir, SqliteTableStore, TableStore};
pub use snapshot::{
    snapshot_name, snapshot_table_name, Snapshot, DATABASE_FILE_NAME, DATABASE_PREFIX,
    LIVE_TABLE, SNAPSHOT_SUFFIX,
};
pub use table_name::TableName;
