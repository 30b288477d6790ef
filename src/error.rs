// Plug Password — Top-level error types
//
// Aggregates errors from the config and store modules into a single
// error enum for the application boundary.

use thiserror::Error;

/// Top-level error type for all Plug Password operations.
#[derive(Debug, Error)]
pub enum PlugError {
    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),

    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Aborted")]
    Aborted,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PlugError>;
