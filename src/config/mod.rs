//! Configuration management for lexdump
//!
//! Handles loading, saving, and validating configuration from TOML files.

mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// SQL dump generation
    #[serde(default)]
    pub dump: DumpConfig,

    /// Word list and duplicate reports
    #[serde(default)]
    pub words: WordsConfig,

    /// Path the configuration was loaded from (internal, not user-editable)
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

/// SQL dump configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Directory holding one JSON record per word
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Directory receiving the numbered dump files
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// File name prefix for dump files
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Size threshold that triggers rotation to the next dump file
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,

    /// Extension of input records (without the dot)
    #[serde(default = "default_extension")]
    pub extension: String,
}

/// Word tools configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordsConfig {
    /// Compiled list of every headword, one per line
    #[serde(default = "default_word_list_file")]
    pub word_list_file: String,

    /// Duplicates report for the compiled headword list
    #[serde(default = "default_duplicates_file")]
    pub duplicates_file: String,

    /// Duplicates report written by `lexdump duplicates`
    #[serde(default = "default_text_duplicates_file")]
    pub text_duplicates_file: String,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
            max_file_bytes: default_max_file_bytes(),
            extension: default_extension(),
        }
    }
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            word_list_file: default_word_list_file(),
            duplicates_file: default_duplicates_file(),
            text_duplicates_file: default_text_duplicates_file(),
        }
    }
}

impl Config {
    /// Get the default config file path in the working directory
    pub fn default_config_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Get the per-user config file path (e.g. ~/.config/lexdump/config.toml)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lexdump").join("config.toml"))
    }

    /// Load configuration from a specific file path
    pub fn load(config_path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", config_path);

        if !config_path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        let content = std::fs::read_to_string(config_path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.config_file = Some(config_path.to_path_buf());

        config.validate()?;
        Ok(config)
    }

    /// Resolve configuration: an explicit path must exist, otherwise the
    /// working directory and the user config dir are tried before defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local = Self::default_config_path();
        if local.exists() {
            return Self::load(&local);
        }

        if let Some(user) = Self::user_config_path().filter(|p| p.exists()) {
            return Self::load(&user);
        }

        debug!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.dump.max_file_bytes == 0 {
            return Err(Error::Config(
                "dump.max_file_bytes must be positive".to_string(),
            ));
        }

        if self.dump.file_prefix.is_empty() {
            return Err(Error::Config(
                "dump.file_prefix must not be empty".to_string(),
            ));
        }

        if self.dump.file_prefix.contains(|c| c == '/' || c == '\\') {
            return Err(Error::Config(
                "dump.file_prefix must be a file name, not a path".to_string(),
            ));
        }

        if self.dump.extension.is_empty() {
            return Err(Error::Config(
                "dump.extension must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
