// Plug Password — Store error types

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage already initialized")]
    AlreadyInitialized,

    #[error("Table '{0}' does not exist")]
    NotFound(String),

    #[error("Storage directory is not configured — run `plug-password store set <path>` first")]
    NotConfigured,

    #[error("Invalid table name '{0}': use ASCII letters, digits and '_' only")]
    InvalidTableName(String),
}
