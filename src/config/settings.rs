//! Application settings configuration.

use serde::{Deserialize, Serialize};

/// Number of data rows shown in the preview table by default.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How many data rows the preview table shows.
    pub preview_rows: usize,
    /// The UI theme to use.
    pub theme: String,
    /// Whether to use vim-style keybindings.
    pub vim_mode: bool,
    /// CRS code preselected for the input slot.
    pub default_input_crs: Option<String>,
    /// CRS code preselected for the output slot.
    pub default_output_crs: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            theme: "dark".to_string(),
            vim_mode: true,
            default_input_crs: None,
            default_output_crs: None,
        }
    }
}
