//! Configuration file handling.
//!
//! The configuration file is optional. When present it is stored at `$WELLNESS_HOME/config.json`
//! and names the journal file. Without it, the journal lives at
//! `$WELLNESS_HOME/wellness_data.txt`.

use crate::data_file::{DataFile, DATA_FILE};
use crate::error::{Error, ErrorType, IntoResult};
use crate::{utils, Result};
use anyhow::{anyhow, ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "wellness";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

/// The resolved configuration of the app. You instantiate it by providing the path to
/// `$WELLNESS_HOME`, and optionally an explicit data file that takes precedence over the one
/// named in `config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    data_path: PathBuf,
}

impl Config {
    /// Creates the home directory if needed and writes an initial `config.json` into it.
    ///
    /// # Errors
    /// - `ErrorType::Config` if `config.json` already exists.
    /// - `ErrorType::Io` if the directory or file cannot be written.
    pub fn create(home: impl Into<PathBuf>) -> Result<Self> {
        let root = home.into();
        utils::create_dir_all(&root)
            .context("Unable to create the wellness home directory")
            .pub_result(ErrorType::Io)?;
        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            return Err(Error::new(
                ErrorType::Config,
                anyhow!("A config file already exists at {}", config_path.display()),
            ));
        }
        let config_file = ConfigFile::default();
        config_file.save(&config_path).pub_result(ErrorType::Io)?;
        let data_path = config_file.resolve(&root);
        Ok(Self {
            root,
            config_path,
            config_file,
            data_path,
        })
    }

    /// Loads `$WELLNESS_HOME/config.json` if it exists, otherwise uses the defaults.
    /// `data_file`, when given, overrides whatever the config file says.
    ///
    /// # Errors
    /// - `ErrorType::Config` if the config file exists but cannot be read or parsed.
    pub fn load(home: impl Into<PathBuf>, data_file: Option<&Path>) -> Result<Self> {
        let root = home.into();
        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            ConfigFile::load(&config_path).pub_result(ErrorType::Config)?
        } else {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            ConfigFile::default()
        };
        let data_path = match data_file {
            Some(p) => p.to_path_buf(),
            None => config_file.resolve(&root),
        };
        Ok(Self {
            root,
            config_path,
            config_file,
            data_path,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config_version(&self) -> u8 {
        self.config_file.config_version
    }

    /// The path of the journal file.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn data_file(&self) -> DataFile {
        DataFile::new(&self.data_path)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "wellness",
///   "config_version": 1,
///   "data_file": "wellness_data.txt"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "wellness"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Path to the journal file, relative to the home directory or absolute.
    /// Defaults to $WELLNESS_HOME/wellness_data.txt if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_file: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_file: Some(PathBuf::from(DATA_FILE)),
        }
    }
}

impl ConfigFile {
    fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path)?;
        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path, data).context("Unable to write config file")
    }

    /// Returns the configured data file if it is absolute, otherwise resolves it against `root`.
    fn resolve(&self, root: &Path) -> PathBuf {
        let p = self
            .data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA_FILE));
        if p.is_absolute() {
            return p;
        }
        root.join(p)
    }
}
