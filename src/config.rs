//! Configuration file handling.
//!
//! The configuration file is optional. It is looked for at `--config` or, failing that, at
//! `<config dir>/expenses/config.json` (e.g. `~/.config/expenses/config.json` on Linux). Every
//! setting in it has a default, and the location of the expenses file can be overridden on the
//! command line.

use crate::codec::LoadPolicy;
use crate::error::{ErrorType, IntoResult};
use crate::{fs, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "expenses";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "expenses.csv";
const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// The resolved settings of the app.
#[derive(Debug, Clone)]
pub struct Config {
    config_path: Option<PathBuf>,
    config_file: ConfigFile,
    data_file: PathBuf,
}

impl Config {
    /// Resolves the configuration.
    ///
    /// # Arguments
    /// - `config_path` - An explicit config file. It must exist. When `None`, the default location
    ///   is used if a file is there.
    /// - `data_file` - Overrides the expenses file named in the config file. When neither is
    ///   given, `expenses.csv` in the working directory is used.
    ///
    /// # Errors
    /// - Returns an error of type `ErrorType::Config` if a config file cannot be read or parsed.
    pub fn load(config_path: Option<&Path>, data_file: Option<&Path>) -> Result<Self> {
        let config_path = match config_path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.is_file()),
        };
        let config_file = match &config_path {
            Some(p) => ConfigFile::load(p).pub_result(ErrorType::Config)?,
            None => ConfigFile::default(),
        };
        let data_file = data_file
            .map(Path::to_path_buf)
            .or_else(|| config_file.data_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        debug!(
            "Using config file {:?} and expenses file {}",
            config_path,
            data_file.display()
        );
        Ok(Self {
            config_path,
            config_file,
            data_file,
        })
    }

    /// The config file that was read, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// The file expenses are loaded from and saved to.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// The symbol written in front of amounts shown to people.
    pub fn currency_symbol(&self) -> &str {
        self.config_file
            .currency_symbol
            .as_deref()
            .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
    }

    /// What to do with lines of the expenses file that cannot be parsed.
    pub fn load_policy(&self) -> LoadPolicy {
        self.config_file.on_bad_line.unwrap_or_default()
    }

    /// Replaces the configured load policy, e.g. from a command line flag.
    pub fn with_load_policy(mut self, policy: LoadPolicy) -> Self {
        self.config_file.on_bad_line = Some(policy);
        self
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME).join(CONFIG_JSON))
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "expenses",
///   "config_version": 1,
///   "data_file": "/home/me/Documents/expenses.csv",
///   "currency_symbol": "$",
///   "on_bad_line": "skip"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "expenses"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Path to the expenses CSV file, relative to the working directory or absolute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_file: Option<PathBuf>,

    /// Currency symbol for display, defaults to "₹"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency_symbol: Option<String>,

    /// Either "stop" or "skip", defaults to "stop"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    on_bad_line: Option<LoadPolicy>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_file: None,
            currency_symbol: None,
            on_bad_line: None,
        }
    }
}

impl ConfigFile {
    fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).context("Failed to read config file")?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }
}
