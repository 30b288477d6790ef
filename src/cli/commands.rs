// Plug Password — CLI Command Handlers
//
// Each function handles one CLI subcommand. The store handle is built once
// per invocation from the configured storage directory and passed down by
// reference; nothing is shared between invocations.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::{ConfigProvider, TomlConfig, KEY_STORE_DIRECTORY, TABLE_STORE_DIRECTORY};
use crate::error::{PlugError, Result};
use crate::store::{
    resolve_store_dir, AccountRegistrar, SqliteTableStore, StoreError, TableListing, TableStore,
    LIVE_TABLE,
};

use super::prompt::{Prompter, StdinPrompter};
use super::{AccountCommand, Cli, Commands, ConfigCommand, StoreCommand};

/// Execute the parsed CLI invocation against the real config and stdin.
pub fn execute(cli: Cli) -> Result<()> {
    let config = match cli.config_dir {
        Some(dir) => TomlConfig::new(dir),
        None => TomlConfig::default_location()?,
    };

    run(cli.command, &config, &mut StdinPrompter)
}

/// Dispatch one command.
pub fn run(command: Commands, config: &TomlConfig, prompter: &mut impl Prompter) -> Result<()> {
    match command {
        Commands::Store(command) => match command {
            StoreCommand::Set { path, yes } => cmd_store_set(&path, yes, config, prompter),
            StoreCommand::Init => cmd_store_init(config, prompter),
            StoreCommand::Status => cmd_store_status(config),
            StoreCommand::List { json } => cmd_store_list(config, json),
            StoreCommand::Switch { name } => cmd_store_switch(config, &name),
            StoreCommand::Archive { dest } => cmd_store_archive(config, dest),
        },
        Commands::Account(command) => match command {
            AccountCommand::Add { platform } => cmd_account_add(config, &platform),
            AccountCommand::List { json } => cmd_account_list(config, json),
        },
        Commands::Config(command) => match command {
            ConfigCommand::Set { key, value, table } => {
                cmd_config_set(config, &key, &value, table.as_deref())
            }
            ConfigCommand::Get { key, table } => cmd_config_get(config, &key, table.as_deref()),
            ConfigCommand::Location => cmd_config_location(config),
        },
    }
}

// ─── Store ───────────────────────────────────────────────────────────────────

fn cmd_store_set(
    path: &str,
    assume_yes: bool,
    config: &TomlConfig,
    prompter: &mut impl Prompter,
) -> Result<()> {
    let dir = set_store_directory(path, assume_yes, config, prompter)?;
    println!("✓ Store directory set to {}", dir.display());
    Ok(())
}

fn cmd_store_init(config: &TomlConfig, prompter: &mut impl Prompter) -> Result<()> {
    let store_dir = match resolve_store_dir(config) {
        Ok(dir) => dir,
        Err(StoreError::NotConfigured) => {
            let answer = ask_store_directory(prompter)?;
            set_store_directory(&answer, false, config, prompter)?
        }
        Err(e) => return Err(e.into()),
    };

    if !store_dir.is_dir() {
        return Err(PlugError::Other(format!(
            "Storage directory not found: {}",
            store_dir.display()
        )));
    }

    let store = SqliteTableStore::new(&store_dir);
    match store.create() {
        Ok(()) => {
            println!("✓ Storage initialized");
            println!("  Database: {}", store.db_path().display());
            println!();
            println!("Next: add an account with `plug-password account add <platform>`");
            Ok(())
        }
        Err(StoreError::AlreadyInitialized) => {
            println!("Storage already initialized at {}", store.db_path().display());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_store_status(config: &TomlConfig) -> Result<()> {
    let store = SqliteTableStore::from_config(config)?;

    match store.get_current_table()? {
        Some(name) => println!("Active table: {}", name),
        None => println!("Storage is not initialized. Run `plug-password store init` first."),
    }

    Ok(())
}

fn cmd_store_list(config: &TomlConfig, json: bool) -> Result<()> {
    let listing = store_listing(&SqliteTableStore::from_config(config)?)?;

    if json {
        let out = serde_json::to_string_pretty(&listing)
            .map_err(|e| PlugError::Other(format!("Failed to encode listing: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    if listing.is_empty() {
        println!("Storage is not initialized. Run `plug-password store init` first.");
        return Ok(());
    }

    for table in &listing {
        let marker = if table.active { "*" } else { " " };
        println!("{} {}", marker, table.name);
    }

    Ok(())
}

fn cmd_store_switch(config: &TomlConfig, name: &str) -> Result<()> {
    let store = SqliteTableStore::from_config(config)?;
    store.switch_table(name)?;
    println!("✓ Active table is now {}", name);
    Ok(())
}

fn cmd_store_archive(config: &TomlConfig, dest: Option<PathBuf>) -> Result<()> {
    let store_dir = resolve_store_dir(config)?;
    let store = SqliteTableStore::new(&store_dir);
    let dest = dest.unwrap_or(store_dir);

    let path = store.archive(&dest, Local::now().naive_local())?;
    println!("✓ Database archived to {}", path.display());
    Ok(())
}

// ─── Account ─────────────────────────────────────────────────────────────────

fn cmd_account_add(config: &TomlConfig, platform: &str) -> Result<()> {
    let store = SqliteTableStore::from_config(config)?;
    let registrar = AccountRegistrar::new(&store);

    let receipt = registrar.add_new_account(platform)?;
    println!("✓ Account added");
    println!("  ID:       {}", receipt.id);
    println!("  Platform: {}", platform);
    println!("  Snapshot: {}", receipt.snapshot);

    Ok(())
}

fn cmd_account_list(config: &TomlConfig, json: bool) -> Result<()> {
    let store = SqliteTableStore::from_config(config)?;
    let accounts = AccountRegistrar::new(&store).list_accounts()?;

    if json {
        let out = serde_json::to_string_pretty(&accounts)
            .map_err(|e| PlugError::Other(format!("Failed to encode accounts: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    if accounts.is_empty() {
        println!("No accounts stored yet.");
        println!("Add one with: plug-password account add <platform>");
        return Ok(());
    }

    println!("Stored accounts ({}):\n", accounts.len());
    for account in &accounts {
        println!("  {} │ {}", account.id, account.platform);
    }

    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

fn cmd_config_set(config: &TomlConfig, key: &str, value: &str, table: Option<&str>) -> Result<()> {
    config.set(key, value, table)?;
    println!("✓ Config value set");
    Ok(())
}

fn cmd_config_get(config: &TomlConfig, key: &str, table: Option<&str>) -> Result<()> {
    match config.get(key, table)? {
        Some(value) => println!("{}", value),
        None => println!(
            "value with key: {} is not found or could be inside tables",
            key.to_uppercase()
        ),
    }
    Ok(())
}

fn cmd_config_location(config: &TomlConfig) -> Result<()> {
    println!("{}", config.location()?.display());
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// `accounts` plus every snapshot, with the active table marked.
/// Empty when the store has not been initialized.
fn store_listing(store: &impl TableStore) -> Result<Vec<TableListing>> {
    let Some(current) = store.get_current_table()? else {
        return Ok(Vec::new());
    };

    let mut tables = vec![LIVE_TABLE.to_string()];
    tables.extend(store.get_all_tables()?);

    Ok(TableListing::mark_active(tables, Some(current.as_str())))
}

/// Prompt until a non-empty directory is given.
fn ask_store_directory(prompter: &mut impl Prompter) -> Result<String> {
    loop {
        match prompter.ask("Set path where the storage needs to be stored")? {
            None => return Err(PlugError::Aborted),
            Some(answer) if answer.trim().is_empty() => continue,
            Some(answer) => return Ok(answer),
        }
    }
}

/// Validate `path` as a writable directory (offering to create it) and
/// record it in the config.
fn set_store_directory(
    path: &str,
    assume_yes: bool,
    config: &impl ConfigProvider,
    prompter: &mut impl Prompter,
) -> Result<PathBuf> {
    let dir = absolutize(&expand_home(path))?;

    if !dir.exists() {
        let create = assume_yes
            || prompter.confirm(&format!(
                "Directory '{}' does not exist. Create it?",
                dir.display()
            ))?;
        if !create {
            return Err(PlugError::Aborted);
        }
        fs::create_dir_all(&dir)?;
        println!("Created directory: {}", dir.display());
    }

    if !dir.is_dir() {
        return Err(PlugError::Other(format!(
            "'{}' exists but is not a directory",
            path
        )));
    }

    ensure_writable(&dir)?;

    let dir = fs::canonicalize(&dir)?;
    config.set(
        KEY_STORE_DIRECTORY,
        &dir.to_string_lossy(),
        Some(TABLE_STORE_DIRECTORY),
    )?;
    tracing::info!(path = %dir.display(), "Store directory configured");

    Ok(dir)
}

/// Create (and immediately discard) an anonymous file in `dir`, so the check
/// reflects what the current user can actually do there.
fn ensure_writable(dir: &Path) -> Result<()> {
    tempfile::tempfile_in(dir).map_err(|e| {
        tracing::debug!(path = %dir.display(), error = %e, "Write check failed");
        PlugError::Other(format!("Directory '{}' is not writable", dir.display()))
    })?;
    Ok(())
}

fn expand_home(path: &str) -> PathBuf {
    let home = dirs_next::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
