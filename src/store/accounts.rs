// Plug Password — Account Registrar
//
// Adds credential rows. Before every insert the current `accounts` table is
// snapshotted under a fresh random `<token>_accounts` name, so the state
// prior to each change stays recoverable via `store switch`.

use rand::RngCore;
use uuid::Uuid;

use super::models::{Account, NewAccount};
use super::repository::TableStore;
use super::snapshot::{snapshot_table_name, LIVE_TABLE};
use super::StoreError;

/// Random bytes per snapshot token (rendered as twice as many hex chars).
const SNAPSHOT_TOKEN_BYTES: usize = 4;

/// Result of a successful `add_new_account`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccountReceipt {
    pub id: Uuid,
    /// The table holding the pre-insert state.
    pub snapshot: String,
}

pub struct AccountRegistrar<'a, S: TableStore> {
    store: &'a S,
}

impl<'a, S: TableStore> AccountRegistrar<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Snapshot `accounts`, then insert a new row for `platform`.
    ///
    /// If the insert fails the snapshot is left in place.
    pub fn add_new_account(&self, platform: &str) -> Result<NewAccountReceipt, StoreError> {
        if let Some(active) = self.store.get_current_table()? {
            if active != LIVE_TABLE {
                tracing::warn!(
                    active = %active,
                    "Active table is not `accounts`; the new row is still written to `accounts`"
                );
            }
        }

        let snapshot = snapshot_table_name(&generate_snapshot_token());
        self.store.backup_current_table(&snapshot)?;

        let account = NewAccount::new(platform);
        self.store.insert_account(&account)?;

        Ok(NewAccountReceipt {
            id: account.id,
            snapshot,
        })
    }

    pub fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        self.store.list_accounts()
    }
}

fn generate_snapshot_token() -> String {
    let mut bytes = [0u8; SNAPSHOT_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

// ─── In-Memory Mock for Testing ──────────────────────────────────────────────


// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::mock::RecordingStore;
    use super::*;
    use crate::store::{Database, SqliteTableStore, TableName};

    #[test]
    fn test_snapshot_token_is_eight_hex_chars() {
        let token = generate_snapshot_token();
        assert_eq!(token.len(), 8);
        assert!(token.bytes().all(|b| b.is_ascii_hexdigit()));
        assert!(TableName::parse(&snapshot_table_name(&token)).is_ok());
    }

    #[test]
    fn test_backup_happens_before_insert() {
        let store = RecordingStore::default();
        let registrar = AccountRegistrar::new(&store);

        let receipt = registrar.add_new_account("github").unwrap();

        let calls = store.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], format!("backup:{}", receipt.snapshot));
        assert_eq!(calls[1], "insert:github");
        assert!(receipt.snapshot.ends_with("_accounts"));
    }

    #[test]
    fn test_failed_insert_keeps_snapshot() {
        let store = RecordingStore {
            fail_insert: true,
            ..Default::default()
        };
        let registrar = AccountRegistrar::new(&store);

        let result = registrar.add_new_account("github");
        assert!(result.is_err());

        let calls = store.calls.borrow();
        assert_eq!(calls.len(), 1, "Only the backup should have run");
        assert!(calls[0].starts_with("backup:"));
    }

    #[test]
    fn test_end_to_end_add_account() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteTableStore::new(dir.path());
        store.create().unwrap();
        let registrar = AccountRegistrar::new(&store);

        let receipt = registrar.add_new_account("github").unwrap();

        let tables = store.get_all_tables().unwrap();
        assert_eq!(tables, vec![receipt.snapshot.clone()]);

        let db = Database::open(store.db_path()).unwrap();
        let snapshot = TableName::parse(&receipt.snapshot).unwrap();
        assert_eq!(
            db.row_count(&snapshot).unwrap(),
            0,
            "The snapshot must hold the empty pre-insert state"
        );

        let accounts = registrar.list_accounts().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].platform, "github");
        assert_eq!(accounts[0].id, receipt.id.to_string());
    }

    #[test]
    fn test_each_add_creates_a_new_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteTableStore::new(dir.path());
        store.create().unwrap();
        let registrar = AccountRegistrar::new(&store);

        let first = registrar.add_new_account("github").unwrap();
        let second = registrar.add_new_account("gitlab").unwrap();

        assert_ne!(first.snapshot, second.snapshot);
        assert_eq!(store.get_all_tables().unwrap().len(), 2);

        let db = Database::open(store.db_path()).unwrap();
        let second_snapshot = TableName::parse(&second.snapshot).unwrap();
        assert_eq!(db.row_count(&second_snapshot).unwrap(), 1);
    }

    #[test]
    fn test_add_before_init_fails_and_inserts_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteTableStore::new(dir.path());
        let registrar = AccountRegistrar::new(&store);

        let err = registrar.add_new_account("github").unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
        assert!(!store.db_path().exists());
    }

    #[test]
    fn test_add_still_targets_accounts_after_switch() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteTableStore::new(dir.path());
        store.create().unwrap();
        let registrar = AccountRegistrar::new(&store);

        let first = registrar.add_new_account("github").unwrap();
        store.switch_table(&first.snapshot).unwrap();
        registrar.add_new_account("gitlab").unwrap();

        assert_eq!(registrar.list_accounts().unwrap().len(), 2);
        assert_eq!(
            store.get_current_table().unwrap().as_deref(),
            Some(first.snapshot.as_str()),
            "Adding an account must not move the pointer"
        );
    }
}
