// Plug Password — Config Module
//
// TOML configuration file under the platform config directory. The only key
// the store depends on is the storage directory.

mod error;
mod provider;

pub use error::ConfigError;
pub use provider::{ConfigProvider, TomlConfig, CONFIG_FILE_NAME};

/// Key holding the storage directory.
pub const KEY_STORE_DIRECTORY: &str = "store_directory";

/// Table the storage directory key lives in.
pub const TABLE_STORE_DIRECTORY: &str = "sqlite_directory";
