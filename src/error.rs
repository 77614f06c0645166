//! Centralized error types for coordprep.
//!
//! This module provides a unified error hierarchy with user-friendly
//! messages. All error types use `thiserror`.

use thiserror::Error;

use crate::config::ConfigError;
use crate::tasks::LoadError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// File loading errors.
    #[error("{0}")]
    Load(#[from] LoadError),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Using defaults.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Using defaults.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Load(e) => match e {
                LoadError::NotFound(path) => format!("'{}' was not found.", path.display()),
                LoadError::NotText(path) => {
                    format!("'{}' is not a text file.", path.display())
                }
                LoadError::Empty(path) => format!("'{}' is empty.", path.display()),
                LoadError::Read { path, .. } => {
                    format!("Could not read '{}'.", path.display())
                }
            },
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// Check if this error prevents the application from running.
    pub fn is_critical(&self) -> bool {
        matches!(self, AppError::Terminal(_))
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix or remove the config file, or pass --config with another path.")
            }
            AppError::Load(LoadError::NotFound(_)) => {
                Some("Check the path; relative paths start from the launch directory.")
            }
            AppError::Load(LoadError::NotText(_)) => Some("Export the data as UTF-8 CSV."),
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_load_error() {
        let app_err: AppError = LoadError::Empty(PathBuf::from("x.csv")).into();
        assert!(matches!(app_err, AppError::Load(LoadError::Empty(_))));
    }

    #[test]
    fn test_user_message_not_found() {
        let err = AppError::Load(LoadError::NotFound(PathBuf::from("points.csv")));
        let msg = err.user_message();
        assert!(msg.contains("points.csv"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "duplicate CRS preset 'EPSG:4326'".to_string(),
        ));
        assert!(err.user_message().contains("EPSG:4326"));
    }

    #[test]
    fn test_load_errors_are_not_critical() {
        let err = AppError::Load(LoadError::NotText(PathBuf::from("a.bin")));
        assert!(!err.is_critical());
        assert!(AppError::terminal("raw mode").is_critical());
    }

    #[test]
    fn test_suggested_action_not_text() {
        let err = AppError::Load(LoadError::NotText(PathBuf::from("a.bin")));
        assert!(err.suggested_action().unwrap().contains("UTF-8"));
    }

    #[test]
    fn test_no_suggested_action_for_terminal() {
        assert!(AppError::terminal("raw mode").suggested_action().is_none());
    }

    #[test]
    fn test_terminal_message() {
        let err = AppError::terminal("raw mode unsupported");
        assert_eq!(err.user_message(), "Terminal error: raw mode unsupported");
    }
}
