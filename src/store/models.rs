// Plug Password — Store data models

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// One credential row of an accounts table. Ids are opaque text; rows
/// written by this tool carry a v4 UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: String,
    pub platform: String,
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.id, self.platform)
    }
}

/// Input for inserting a new row. The id is generated by the registrar.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub id: Uuid,
    pub platform: String,
}

impl NewAccount {
    pub fn new(platform: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            platform: platform.to_string(),
        }
    }
}

/// A table as shown by `store list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableListing {
    pub name: String,
    pub active: bool,
}

impl TableListing {
    /// Mark whichever of `tables` matches `current`.
    pub fn mark_active(tables: Vec<String>, current: Option<&str>) -> Vec<Self> {
        tables
            .into_iter()
            .map(|name| {
                let active = current == Some(name.as_str());
                Self { name, active }
            })
            .collect()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_generates_v4_id() {
        let account = NewAccount::new("github");
        assert_eq!(account.id.get_version(), Some(uuid::Version::Random));
        assert_eq!(account.platform, "github");
    }

    #[test]
    fn test_account_display() {
        let account = Account {
            id: "legacy-42".to_string(),
            platform: "gitlab".to_string(),
        };
        assert_eq!(account.to_string(), "[legacy-42] gitlab");
    }

    #[test]
    fn test_account_serializes_id_as_text() {
        let account = Account {
            id: "legacy-42".to_string(),
            platform: "gitlab".to_string(),
        };
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "legacy-42", "platform": "gitlab" })
        );
    }

    #[test]
    fn test_mark_active() {
        let listing = TableListing::mark_active(
            vec!["accounts".to_string(), "deadbeef_accounts".to_string()],
            Some("deadbeef_accounts"),
        );

        assert!(!listing[0].active);
        assert!(listing[1].active);
    }

    #[test]
    fn test_mark_active_uninitialized() {
        let listing = TableListing::mark_active(vec!["a_accounts".to_string()], None);
        assert!(listing.iter().all(|t| !t.active));
    }
}
