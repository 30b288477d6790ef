// Plug Password — Library root
//
// Re-exports the config, store, and CLI modules.

pub mod cli;
pub mod config;
pub mod error;
pub mod store;

pub use error::{PlugError, Result};
