// Plug Password — Validated SQL table identifiers
//
// Table names end up interpolated into DDL (`CREATE TABLE ... AS SELECT`),
// which cannot take bound parameters. Every such name goes through
// `TableName::parse` first and is emitted double-quoted.

use std::fmt;

use super::StoreError;

/// Longest table name accepted.
const MAX_TABLE_NAME_LEN: usize = 64;

/// SQLite reserves this prefix for its own catalog tables.
const RESERVED_PREFIX: &str = "sqlite_";

/// A table name restricted to `[A-Za-z0-9_]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    pub fn parse(name: &str) -> Result<Self, StoreError> {
        let valid = !name.is_empty()
            && name.len() <= MAX_TABLE_NAME_LEN
            && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
            && !name.to_ascii_lowercase().starts_with(RESERVED_PREFIX);

        if !valid {
            return Err(StoreError::InvalidTableName(name.to_string()));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SQLite resolves table names case-insensitively, so this is how two
    /// names are compared for identity.
    pub fn is(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }

    /// Double-quoted form for use inside SQL text.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
