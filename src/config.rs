//! Configuration file handling.
//!
//! The configuration file is stored at `$EXPENSES_HOME/config.json`. It names the storage key
//! that the expense list is saved under, which is also the name of the data file,
//! `$EXPENSES_HOME/<storage_key>.json`.

use crate::persist::{FileSlot, Persistence, DEFAULT_STORAGE_KEY};
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "expenses";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$EXPENSES_HOME` and from there it loads `$EXPENSES_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory if needed and writes a new `config.json` into it, replacing any
    /// existing one.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of data directory, e.g. `$HOME/expenses`
    /// - `storage_key` - The name the expense list is stored under.
    ///
    /// # Errors
    /// - Returns an error if `storage_key` is not a usable file name.
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>, storage_key: &str) -> Result<Self> {
        validate_storage_key(storage_key)?;

        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the expenses home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;
        let config_path = root.join(CONFIG_JSON);

        let config_file = ConfigFile {
            storage_key: storage_key.to_string(),
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that the `expenses_home` exists and that the config file exists
    /// - load and validate the config file
    /// - return the loaded configuration object
    pub async fn load(expenses_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = expenses_home.into();
        if !maybe_relative.is_dir() {
            bail!(
                "The expenses home directory is missing '{}'",
                maybe_relative.display()
            )
        }
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// Loads the configuration, or creates a default one if this is the first run.
    pub async fn open(expenses_home: impl Into<PathBuf>) -> Result<Self> {
        let home = expenses_home.into();
        if home.join(CONFIG_JSON).is_file() {
            Self::load(home).await
        } else {
            Self::create(home, DEFAULT_STORAGE_KEY).await
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn storage_key(&self) -> &str {
        &self.config_file.storage_key
    }

    /// The file that the expense list is saved to.
    pub fn data_path(&self) -> PathBuf {
        self.slot().path(self.storage_key())
    }

    /// A `FileSlot` rooted in the home directory.
    pub fn slot(&self) -> FileSlot {
        FileSlot::new(&self.root)
    }

    /// The file-backed `Persistence` for this configuration.
    pub fn persistence(&self) -> Persistence {
        Persistence::new(Box::new(self.slot()), self.storage_key())
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "expenses",
///   "config_version": 1,
///   "storage_key": "expenses"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "expenses"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The key the expense list is stored under. Defaults to "expenses" when absent.
    #[serde(default = "default_storage_key")]
    storage_key: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            storage_key: default_storage_key(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if its values are invalid
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        validate_storage_key(&config.storage_key)?;

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}

/// The storage key becomes a file name, so it must be a plain, non-empty name.
fn validate_storage_key(key: &str) -> Result<()> {
    if key.is_empty() {
        bail!("The storage key cannot be empty")
    }
    if key == "config" {
        bail!("The storage key 'config' is reserved")
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        bail!("Invalid storage key '{key}': use only letters, digits, '-' and '_'")
    }
    Ok(())
}
