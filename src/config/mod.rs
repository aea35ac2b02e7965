//! Configuration management for `saveit`.
//!
//! Configuration is loaded from YAML files and merged in layers, later layers
//! winning:
//! - Built-in defaults
//! - User config (`$XDG_CONFIG_HOME/saveit/config.yaml`, or
//!   `~/.config/saveit/config.yaml`)
//! - Workspace config (`.saveit/config.yaml`)
//! - Environment variable overrides (`SAVEIT_DATA_FILE`, `SAVEIT_AUTOSAVE`)
//! - Command-line flags

use std::fs;
use std::path::{Path, PathBuf};

use saveit_core::SortKey;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Directory holding workspace state, relative to the working directory.
pub const WORKSPACE_DIR: &str = ".saveit";
pub const DATA_FILE_NAME: &str = "issues.jsonl";
pub const CONFIG_FILE_NAME: &str = "config.yaml";

pub const ENV_DATA_FILE: &str = "SAVEIT_DATA_FILE";
pub const ENV_AUTOSAVE: &str = "SAVEIT_AUTOSAVE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSONL file issues are loaded from and saved to.
    pub data_file: PathBuf,
    /// Persist every committed change.
    pub autosave: bool,
    /// Display order for `list` when no `--sort` is given.
    pub default_sort: Option<SortKey>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: Path::new(WORKSPACE_DIR).join(DATA_FILE_NAME),
            autosave: true,
            default_sort: None,
        }
    }
}

/// One layer as written in a YAML file. Absent keys leave lower layers alone.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    data_file: Option<PathBuf>,
    autosave: Option<bool>,
    default_sort: Option<String>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration for the workspace rooted at `root`, reading the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed,
    /// or if a value is invalid.
    pub fn load(root: &Path, cli: &CliOverrides) -> Result<Self, ConfigError> {
        Self::load_with_env(root, cli, |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`], with environment lookups supplied by `env`.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_with_env(
        root: &Path,
        cli: &CliOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = user_config_path(&env) {
            if let Some(layer) = read_layer(&path)? {
                config.merge(layer)?;
            }
        }

        let workspace_path = root.join(WORKSPACE_DIR).join(CONFIG_FILE_NAME);
        if let Some(layer) = read_layer(&workspace_path)? {
            config.merge(layer)?;
        }

        if let Some(data_file) = env(ENV_DATA_FILE).filter(|v| !v.trim().is_empty()) {
            config.data_file = PathBuf::from(data_file);
        }
        if let Some(autosave) = env(ENV_AUTOSAVE) {
            config.autosave = parse_bool(ENV_AUTOSAVE, &autosave)?;
        }

        if let Some(ref data_file) = cli.data_file {
            config.data_file.clone_from(data_file);
        }

        if config.data_file.is_relative() {
            config.data_file = root.join(&config.data_file);
        }

        debug!(
            data_file = %config.data_file.display(),
            autosave = config.autosave,
            default_sort = ?config.default_sort,
            "resolved config"
        );
        Ok(config)
    }

    /// Apply a file layer. Relative data paths are resolved against the
    /// workspace root once every layer is in.
    fn merge(&mut self, layer: ConfigLayer) -> Result<(), ConfigError> {
        if let Some(data_file) = layer.data_file {
            self.data_file = data_file;
        }
        if let Some(autosave) = layer.autosave {
            self.autosave = autosave;
        }
        if let Some(sort) = layer.default_sort {
            self.default_sort = parse_sort(&sort)?;
        }
        Ok(())
    }
}

fn user_config_path(env: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    let base = env("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| env("HOME").map(|home| Path::new(&home).join(".config")))?;
    Some(base.join("saveit").join(CONFIG_FILE_NAME))
}

fn read_layer(path: &Path) -> Result<Option<ConfigLayer>, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if contents.trim().is_empty() {
        return Ok(None);
    }

    let layer = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded config layer");
    Ok(Some(layer))
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

/// `none` turns the default ordering off.
fn parse_sort(value: &str) -> Result<Option<SortKey>, ConfigError> {
    if value.trim().eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|e: saveit_core::SaveItError| ConfigError::InvalidValue {
            key: "default_sort",
            value: value.to_string(),
            reason: e.to_string(),
        })
}
