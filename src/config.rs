//! Configuration file handling for penny.
//!
//! The configuration file is stored at `$PENNY_HOME/config.json`. It holds the default view
//! settings used by the `list` and `dashboard` commands and, optionally, the location of the
//! SQLite database.

use crate::model::{SortOption, TimeFrame};
use crate::store::SqliteStore;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "penny";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const PENNY_SQLITE: &str = "penny.sqlite";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$PENNY_HOME` and from there it loads `$PENNY_HOME/config.json` and opens the
/// transaction database.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    store: SqliteStore,
    sqlite_path: PathBuf,
}

impl Config {
    /// Creates the data directory and:
    /// - Writes an initial `config.json` file with default settings
    /// - Creates an empty SQLite database
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of data directory, e.g. `$HOME/penny`
    ///
    /// # Errors
    /// - Returns an error if a config file already exists or if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the penny home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!("A config file already exists at '{}'", config_path.display())
        }
        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;

        let sqlite_path = config_file.database_path(&root);
        let store = SqliteStore::init(&sqlite_path)
            .await
            .context("Unable to create SQLite DB")?;

        Ok(Self {
            root,
            config_path,
            config_file,
            store,
            sqlite_path,
        })
    }

    /// This will
    /// - validate that `penny_home` exists and that the config file exists
    /// - load the config file
    /// - open the SQLite database
    pub async fn load(penny_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = penny_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Penny Home is missing, run 'penny init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let sqlite_path = config_file.database_path(&root);
        let store = SqliteStore::load(&sqlite_path)
            .await
            .context("Unable to load SQLite DB")?;

        Ok(Self {
            root,
            config_path,
            config_file,
            store,
            sqlite_path,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn sqlite_path(&self) -> &Path {
        &self.sqlite_path
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    /// The time frame used when a command does not specify one.
    pub fn time_frame(&self) -> TimeFrame {
        self.config_file.time_frame
    }

    /// The sort order used when a command does not specify one.
    pub fn sort_option(&self) -> SortOption {
        self.config_file.sort_option
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "penny",
///   "config_version": 1,
///   "time_frame": "month",
///   "sort_option": "date_descending",
///   "database_path": "data/penny.sqlite"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "penny"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    #[serde(default)]
    time_frame: TimeFrame,

    #[serde(default)]
    sort_option: SortOption,

    /// Path to the SQLite file (optional, relative to config.json or absolute)
    /// Defaults to $PENNY_HOME/penny.sqlite if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    database_path: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            time_frame: TimeFrame::default(),
            sort_option: SortOption::default(),
            database_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;
        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version <= CONFIG_VERSION,
            "Unsupported config_version {}, this version of penny understands up to {}",
            config.config_version,
            CONFIG_VERSION
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    /// Resolves the database location against `root` when it is relative.
    fn database_path(&self, root: &Path) -> PathBuf {
        match &self.database_path {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => root.join(p),
            None => root.join(PENNY_SQLITE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("penny_home");

        let config = Config::create(&home_dir).await.unwrap();

        assert!(config.config_path().is_file());
        assert!(config.sqlite_path().is_file());
        assert_eq!(config.sqlite_path(), config.root().join(PENNY_SQLITE));
        assert_eq!(config.time_frame(), TimeFrame::Month);
        assert_eq!(config.sort_option(), SortOption::DateDescending);
    }

    #[tokio::test]
    async fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        let _config = Config::create(dir.path()).await.unwrap();
        let result = Config::create(dir.path()).await;
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_config_load() {
        let dir = TempDir::new().unwrap();
        let created = Config::create(dir.path()).await.unwrap();
        created.store().close().await;

        let loaded = Config::load(dir.path()).await.unwrap();
        assert_eq!(created.root(), loaded.root());
        assert_eq!(created.sqlite_path(), loaded.sqlite_path());
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path().join("nope")).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_config_file_default() {
        let config = ConfigFile::default();
        assert_eq!(config.app_name, "penny");
        assert_eq!(config.time_frame, TimeFrame::Month);
        assert_eq!(config.sort_option, SortOption::DateDescending);
        assert_eq!(
            config.database_path(Path::new("/home/me/penny")),
            PathBuf::from("/home/me/penny/penny.sqlite")
        );
    }

    #[test]
    fn test_database_path_resolution() {
        let mut config = ConfigFile::default();
        config.database_path = Some(PathBuf::from("data/money.sqlite"));
        assert_eq!(
            config.database_path(Path::new("/root")),
            PathBuf::from("/root/data/money.sqlite")
        );
        config.database_path = Some(PathBuf::from("/var/money.sqlite"));
        assert_eq!(
            config.database_path(Path::new("/root")),
            PathBuf::from("/var/money.sqlite")
        );
    }

    #[tokio::test]
    async fn test_config_file_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let original = ConfigFile {
            time_frame: TimeFrame::Year,
            sort_option: SortOption::AmountDescending,
            database_path: Some(PathBuf::from("other.sqlite")),
            ..ConfigFile::default()
        };
        original.save(&config_path).await.unwrap();

        let loaded = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(original, loaded);
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "penny",
            "config_version": 1
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "ledger",
            "config_version": 1
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_load_future_version() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "penny",
            "config_version": 9
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.unwrap_err().to_string().contains("config_version"));
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("database_path"));
        assert!(json.contains(r#""sort_option":"date_descending""#));
    }
}
