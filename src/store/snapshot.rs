// Plug Password — Snapshot naming
//
// Pure naming helpers. `snapshot_name` builds file names such as
// `passwords.sqlite` or `passwords_03-14-2025_09-26.sqlite`;
// `snapshot_table_name` builds `<token>_accounts` table names.

use chrono::NaiveDateTime;

/// Extension appended to every snapshot file name.
pub const SNAPSHOT_EXTENSION: &str = "sqlite";

/// Prefix of the database file inside the storage directory.
pub const DATABASE_PREFIX: &str = "passwords";

/// Fixed database file name, i.e. the timestamp-less snapshot of `DATABASE_PREFIX`.
pub const DATABASE_FILE_NAME: &str = "passwords.sqlite";

/// The live data table.
pub const LIVE_TABLE: &str = "accounts";

/// Suffix shared by every snapshot table.
pub const SNAPSHOT_SUFFIX: &str = "_accounts";

/// Minute-resolution timestamp, e.g. `03-14-2025_09-26`.
const TIMESTAMP_FORMAT: &str = "%m-%d-%Y_%H-%M";

/// A named point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    prefix: String,
    taken_at: Option<NaiveDateTime>,
}

impl Snapshot {
    pub fn new(prefix: &str, taken_at: Option<NaiveDateTime>) -> Self {
        Self {
            prefix: prefix.to_string(),
            taken_at,
        }
    }

    /// The prefix, trimmed and lower-cased, joined with the timestamp if any.
    pub fn formatted(&self) -> String {
        let prefix = self.prefix.trim().to_lowercase();

        match self.taken_at {
            None => format!("{}.{}", prefix, SNAPSHOT_EXTENSION),
            Some(at) => format!(
                "{}_{}.{}",
                prefix,
                at.format(TIMESTAMP_FORMAT),
                SNAPSHOT_EXTENSION
            ),
        }
    }
}

pub fn snapshot_name(prefix: &str, taken_at: Option<NaiveDateTime>) -> String {
    Snapshot::new(prefix, taken_at).formatted()
}

/// `<token>_accounts`
pub fn snapshot_table_name(token: &str) -> String {
    format!("{}{}", token, SNAPSHOT_SUFFIX)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
