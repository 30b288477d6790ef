// Plug Password — Config error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config file: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("key and table name can't be empty strings")]
    EmptyKey,

    #[error("'{0}' is a value, not a table")]
    NotATable(String),

    #[error("Could not determine the platform config directory")]
    NoConfigDir,
}
