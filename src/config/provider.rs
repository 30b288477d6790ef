// Plug Password — TOML Configuration Provider
//
// Keys live either at the top level of `config.toml` or inside a named table.
// The file is re-read on every access and rewritten on every `set`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use super::ConfigError;

/// Directory name under the platform config dir.
const APP_DIR_NAME: &str = "plug-password";

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Written into a freshly created (empty) config file.
const DEFAULT_CONFIG: &str = "[sqlite_directory]\nlocation_path = \"\"\n";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Key/value configuration, optionally grouped into named tables.
pub trait ConfigProvider {
    /// Look up `key`, inside `table` when one is given.
    fn get(&self, key: &str, table: Option<&str>) -> Result<Option<String>, ConfigError>;

    /// Store `value` under `key`, creating `table` if needed.
    fn set(&self, key: &str, value: &str, table: Option<&str>) -> Result<(), ConfigError>;
}

// ─── TOML Implementation ─────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TomlConfig {
    config_dir: PathBuf,
}

impl TomlConfig {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// `<platform config dir>/plug-password`
    pub fn default_location() -> Result<Self, ConfigError> {
        let base = dirs_next::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::new(base.join(APP_DIR_NAME)))
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Create the config directory and an empty config file if missing.
    /// Existing content is left alone.
    pub fn setup_config_dir(&self) -> Result<PathBuf, ConfigError> {
        fs::create_dir_all(&self.config_dir)?;

        let file = self.config_file();
        OpenOptions::new().create(true).append(true).open(&file)?;

        Ok(file)
    }

    /// Directory holding the config file.
    pub fn location(&self) -> Result<&Path, ConfigError> {
        self.setup_config_dir()?;
        Ok(&self.config_dir)
    }

    fn load(&self) -> Result<Table, ConfigError> {
        let file = self.setup_config_dir()?;

        if fs::metadata(&file)?.len() == 0 {
            fs::write(&file, DEFAULT_CONFIG)?;
            tracing::debug!(path = %file.display(), "Wrote default config");
        }

        let content = fs::read_to_string(&file)?;
        Ok(content.parse::<Table>()?)
    }

    fn save(&self, doc: Table) -> Result<(), ConfigError> {
        // Serialized through `Value` so plain keys are emitted before tables.
        let content = toml::to_string(&Value::Table(doc))?;
        fs::write(self.config_file(), content)?;
        Ok(())
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl ConfigProvider for TomlConfig {
    fn get(&self, key: &str, table: Option<&str>) -> Result<Option<String>, ConfigError> {
        let doc = self.load()?;

        let value = match table.filter(|t| !t.is_empty()) {
            Some(name) => doc
                .get(name)
                .and_then(Value::as_table)
                .and_then(|t| t.get(key)),
            None => doc.get(key),
        };

        Ok(value.map(render))
    }

    fn set(&self, key: &str, value: &str, table: Option<&str>) -> Result<(), ConfigError> {
        if key.is_empty() || table == Some("") {
            return Err(ConfigError::EmptyKey);
        }

        let mut doc = self.load()?;
        let new_value = Value::String(value.to_string());

        match table {
            Some(name) => {
                let entry = doc
                    .entry(name.to_string())
                    .or_insert(Value::Table(Table::new()));
                let Some(section) = entry.as_table_mut() else {
                    return Err(ConfigError::NotATable(name.to_string()));
                };
                section.insert(key.to_string(), new_value);
            }
            None => {
                doc.insert(key.to_string(), new_value);
            }
        }

        self.save(doc)?;
        tracing::debug!(key = %key, table = ?table, "Config value updated");
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_config() -> (tempfile::TempDir, TomlConfig) {
        let dir = tempfile::tempdir().unwrap();
        let config = TomlConfig::new(dir.path().join("plug-password"));
        (dir, config)
    }

    #[test]
    fn test_setup_creates_dir_and_file() {
        let (dir, config) = setup_config();

        let file = config.setup_config_dir().unwrap();
        assert_eq!(file, dir.path().join("plug-password").join("config.toml"));
        assert!(file.is_file());
    }

    #[test]
    fn test_setup_keeps_existing_content() {
        let (_dir, config) = setup_config();
        config.set("singer", "Lizzy McAlpine", None).unwrap();

        config.setup_config_dir().unwrap();
        assert_eq!(
            config.get("singer", None).unwrap().as_deref(),
            Some("Lizzy McAlpine")
        );
    }

    #[test]
    fn test_location_is_config_dir() {
        let (dir, config) = setup_config();
        let location = config.location().unwrap();
        assert_eq!(location, dir.path().join("plug-password"));
        assert!(location.join(CONFIG_FILE_NAME).is_file());
    }

    #[test]
    fn test_get_default_value() {
        let (_dir, config) = setup_config();
        let value = config
            .get("location_path", Some("sqlite_directory"))
            .unwrap();
        assert_eq!(value.as_deref(), Some(""), "Defaults are written on first load");
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let (_dir, config) = setup_config();
        assert!(config.get("something", None).unwrap().is_none());
        assert!(config.get("something", Some("nowhere")).unwrap().is_none());
    }

    #[test]
    fn test_set_top_level_key() {
        let (_dir, config) = setup_config();
        config.set("singer", "Lizzy McAlpine", None).unwrap();
        assert_eq!(
            config.get("singer", None).unwrap().as_deref(),
            Some("Lizzy McAlpine")
        );
        // The default table survives a top-level write.
        assert_eq!(
            config.get("location_path", Some("sqlite_directory")).unwrap().as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_set_in_table() {
        let (_dir, config) = setup_config();
        config.set("name", "plug-password", Some("project")).unwrap();
        assert_eq!(
            config.get("name", Some("project")).unwrap().as_deref(),
            Some("plug-password")
        );
        assert!(config.get("name", None).unwrap().is_none());
    }

    #[test]
    fn test_set_replaces_existing_value() {
        let (_dir, config) = setup_config();
        config.set("location_path", ".tmp", Some("sqlite_directory")).unwrap();
        assert_eq!(
            config.get("location_path", Some("sqlite_directory")).unwrap().as_deref(),
            Some(".tmp")
        );
    }

    #[test]
    fn test_set_rejects_empty_key_or_table() {
        let (_dir, config) = setup_config();
        assert!(matches!(config.set("", "", None), Err(ConfigError::EmptyKey)));
        assert!(matches!(
            config.set("key", "value", Some("")),
            Err(ConfigError::EmptyKey)
        ));
    }

    #[test]
    fn test_set_into_scalar_is_rejected() {
        let (_dir, config) = setup_config();
        config.set("server", "localhost", None).unwrap();

        let err = config.set("port", "8080", Some("server")).unwrap_err();
        assert!(matches!(err, ConfigError::NotATable(ref name) if name == "server"));
    }

    #[test]
    fn test_non_string_values_are_rendered() {
        let (_dir, config) = setup_config();
        fs::create_dir_all(&config.config_dir).unwrap();
        fs::write(config.config_file(), "retries = 3\n[ui]\ncolor = true\n").unwrap();

        assert_eq!(config.get("retries", None).unwrap().as_deref(), Some("3"));
        assert_eq!(config.get("color", Some("ui")).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let (_dir, config) = setup_config();
        fs::create_dir_all(&config.config_dir).unwrap();
        fs::write(config.config_file(), "this is = = not toml").unwrap();

        assert!(matches!(config.get("x", None), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_values_persist_across_instances() {
        let (dir, config) = setup_config();
        config.set("store_directory", "/srv/pw", Some("sqlite_directory")).unwrap();

        let reopened = TomlConfig::new(dir.path().join("plug-password"));
        assert_eq!(
            reopened.get("store_directory", Some("sqlite_directory")).unwrap().as_deref(),
            Some("/srv/pw")
        );
    }
}
