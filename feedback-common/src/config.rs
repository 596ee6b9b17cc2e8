//! Configuration loading and root folder resolution
//!
//! The root folder holds `feedback.db`. It is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or unreadable config file never aborts startup.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Application directory name used under config and data folders
pub const APP_DIR_NAME: &str = "course-feedback";

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV_VAR: &str = "FEEDBACK_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "feedback.db";

/// Default HTTP bind address
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5730";

/// Compiled defaults used when nothing else is configured
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub log_level: String,
    pub bind: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            log_level: "info".to_string(),
            bind: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

/// Logging section of the TOML config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Server section of the TOML config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl TomlConfig {
    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load a config file without logging, falling back to defaults
    ///
    /// `None` means no config file exists. The outcome is returned so the
    /// caller can report it once logging is up.
    pub fn load_from_or_default(path: Option<&Path>) -> LoadedConfig {
        let Some(path) = path else {
            return LoadedConfig {
                config: Self::default(),
                source: ConfigSource::Defaults,
            };
        };

        match Self::from_file(path) {
            Ok(config) => LoadedConfig {
                config,
                source: ConfigSource::File(path.to_path_buf()),
            },
            Err(e) => LoadedConfig {
                config: Self::default(),
                source: ConfigSource::Invalid(e.to_string()),
            },
        }
    }

    /// Load the platform config file without logging
    pub fn load() -> LoadedConfig {
        Self::load_from_or_default(config_file_path().as_deref())
    }

    /// Load the platform config file, logging the outcome
    pub fn load_or_default() -> Self {
        let loaded = Self::load();
        loaded.log_outcome();
        loaded.config
    }
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// No config file found
    Defaults,
    /// Parsed from this file
    File(PathBuf),
    /// A config file exists but could not be read or parsed
    Invalid(String),
}

/// Result of loading the config file
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: TomlConfig,
    pub source: ConfigSource,
}

impl LoadedConfig {
    /// Report how the config was loaded; a bad file is a warning
    pub fn log_outcome(&self) {
        match &self.source {
            ConfigSource::Defaults => debug!("No config file found, using defaults"),
            ConfigSource::File(path) => debug!("Loaded config file: {}", path.display()),
            ConfigSource::Invalid(reason) => {
                warn!("Ignoring config file, using defaults: {}", reason)
            }
        }
    }
}

/// Resolves the root folder from CLI, environment, TOML and defaults
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    env_var_name: String,
    cli_arg: Option<PathBuf>,
    toml_config: Option<TomlConfig>,
}

impl RootFolderResolver {
    pub fn new(env_var_name: &str) -> Self {
        Self {
            env_var_name: env_var_name.to_string(),
            cli_arg: None,
            toml_config: None,
        }
    }

    /// Command-line override (priority 1)
    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    /// Use an already loaded config instead of reading the platform file
    pub fn with_toml_config(mut self, config: TomlConfig) -> Self {
        self.toml_config = Some(config);
        self
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        if let Ok(path) = std::env::var(&self.env_var_name) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }

        let from_toml = match &self.toml_config {
            Some(config) => config.root_folder.clone(),
            None => TomlConfig::load_or_default().root_folder,
        };
        if let Some(path) = from_toml {
            return path;
        }

        default_root_folder()
    }
}

/// Prepares the root folder and locates the database inside it
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    /// Create the root folder (and parents) if missing. Idempotent.
    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE_NAME)
    }

    pub fn database_exists(&self) -> bool {
        self.database_path().exists()
    }
}

/// Platform config file, if one exists
fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc").join(APP_DIR_NAME).join("config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default root folder
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_defaults_when_sections_missing() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(config.root_folder, None);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.bind, DEFAULT_BIND_ADDRESS);
    }

    #[test]
    fn test_toml_partial_sections() {
        let config: TomlConfig = toml::from_str(
            r#"
            root_folder = "/srv/feedback"
            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.root_folder, Some(PathBuf::from("/srv/feedback")));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.server.bind, DEFAULT_BIND_ADDRESS);
    }
}
