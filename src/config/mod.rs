//! Configuration management for coordprep.
//!
//! This module handles loading, saving, and validating the user
//! configuration: application settings and the CRS presets offered by the
//! CRS picker.

mod crs;
mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use crs::{default_presets, CrsEntry};
pub use settings::{Settings, DEFAULT_PREVIEW_ROWS};

/// Name of the configuration file inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur while handling configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The config file could not be read.
    #[error("Failed to read configuration file: {0}")]
    ReadError(std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration parsed but holds invalid values.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The full on-disk configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Application settings.
    #[serde(default)]
    pub settings: Settings,

    /// CRS presets offered by the picker, in display order.
    #[serde(default, rename = "crs")]
    pub crs_presets: Vec<CrsEntry>,
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// A missing file is not an error; defaults are returned instead.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load the configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;

        info!(
            path = %path.display(),
            presets = config.crs_presets.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - Linux: `~/.config/coordprep/config.toml`
    /// - macOS: `~/Library/Application Support/coordprep/config.toml`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\coordprep\config.toml`
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("coordprep").join(CONFIG_FILE_NAME))
    }

    /// Validate settings and presets.
    pub fn validate(&self) -> Result<()> {
        if self.settings.preview_rows == 0 {
            return Err(ConfigError::ValidationError(
                "preview_rows must be at least 1".to_string(),
            ));
        }

        for (idx, crs) in self.crs_presets.iter().enumerate() {
            crs.validate()?;
            if self.crs_presets[..idx].iter().any(|c| c.code == crs.code) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate CRS preset '{}'",
                    crs.code
                )));
            }
        }

        for code in [
            &self.settings.default_input_crs,
            &self.settings.default_output_crs,
        ]
        .into_iter()
        .flatten()
        {
            CrsEntry::new(code.as_str(), "").validate()?;
        }

        Ok(())
    }

    /// Get the CRS presets, falling back to the built-in list when none are
    /// configured.
    pub fn presets(&self) -> Vec<CrsEntry> {
        if self.crs_presets.is_empty() {
            default_presets()
        } else {
            self.crs_presets.clone()
        }
    }

    /// Resolve a CRS code to a preset, or a bare entry if it is not listed.
    pub fn resolve_crs(&self, code: &str) -> CrsEntry {
        self.presets()
            .into_iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .unwrap_or_else(|| CrsEntry::new(code, ""))
    }

    /// The preselected input CRS, if configured.
    pub fn default_input_crs(&self) -> Option<CrsEntry> {
        self.settings
            .default_input_crs
            .as_deref()
            .map(|code| self.resolve_crs(code))
    }

    /// The preselected output CRS, if configured.
    pub fn default_output_crs(&self) -> Option<CrsEntry> {
        self.settings
            .default_output_crs
            .as_deref()
            .map(|code| self.resolve_crs(code))
    }
}
