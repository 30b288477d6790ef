// Plug Password — CLI Module
//
// Command-line interface using clap derive macros.
// Command groups: store, account, config.

mod commands;
mod prompt;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{execute, run};
pub use prompt::{Prompter, StdinPrompter};

/// Plug Password — a tool for managing backup passwords with SQLite.
#[derive(Parser, Debug)]
#[command(name = "plug-password")]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Directory holding config.toml (defaults to the platform config directory).
    #[arg(long, global = true, env = "PLUG_PASSWORD_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the password storage.
    #[command(subcommand)]
    Store(StoreCommand),

    /// Manage account passwords.
    #[command(subcommand)]
    Account(AccountCommand),

    /// Manage the configuration file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
pub enum StoreCommand {
    /// Set the directory where the storage is kept (e.g. `store set ~/Documents/pw`).
    Set {
        #[arg(value_parser = non_empty)]
        path: String,

        /// Create the directory without asking if it does not exist.
        #[arg(long, short)]
        yes: bool,
    },

    /// Initialize an empty storage and create the accounts table.
    Init,

    /// Show the active table.
    Status,

    /// List the accounts table and its snapshots, marking the active one.
    List {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Make an existing table the active one.
    Switch {
        #[arg(value_parser = non_empty)]
        name: String,
    },

    /// Write a timestamped copy of the whole database file.
    Archive {
        /// Target directory (defaults to the storage directory).
        #[arg(long)]
        dest: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// Add a new account to the storage.
    Add {
        /// The platform the account belongs to (e.g. "github").
        #[arg(value_parser = non_empty)]
        platform: String,
    },

    /// List the rows of the accounts table.
    List {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a value in the config file.
    Set {
        #[arg(value_parser = non_empty)]
        key: String,
        #[arg(value_parser = non_empty)]
        value: String,
        /// Optional TOML table to put the key in.
        table: Option<String>,
    },

    /// Get a value from the config file.
    Get {
        #[arg(value_parser = non_empty)]
        key: String,
        /// Optional TOML table to read the key from.
        table: Option<String>,
    },

    /// Print the directory where the config file is stored.
    Location,
}

fn non_empty(value: &str) -> Result<String, String> {
    if value.is_empty() {
        return Err("can't be an empty string".to_string());
    }
    Ok(value.to_string())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
