//! Coordinate reference system presets.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Separator between code and name in the display form of a CRS.
const DISPLAY_SEPARATOR: &str = " - ";

/// A coordinate reference system identified by an authority code.
///
/// Entries are offered in the CRS picker. Nothing here knows how to
/// project between them; the code is passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrsEntry {
    /// Authority-qualified code, e.g. `EPSG:4326`.
    pub code: String,

    /// Human-readable name, e.g. `WGS 84`.
    #[serde(default)]
    pub name: String,
}

impl CrsEntry {
    /// Create a new CRS entry.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Parse the `AUTH:CODE - Name` display form.
    ///
    /// Everything before the first `" - "` is the code. A bare `AUTH:CODE`
    /// yields an entry with an empty name.
    pub fn parse(display: &str) -> Result<Self> {
        let display = display.trim();
        let (code, name) = match display.split_once(DISPLAY_SEPARATOR) {
            Some((code, name)) => (code.trim(), name.trim()),
            None => (display, ""),
        };

        let entry = Self::new(code, name);
        entry.validate()?;
        Ok(entry)
    }

    /// Validate this entry.
    ///
    /// The code must be non-empty, contain no whitespace, and have the
    /// form `AUTHORITY:CODE` with both parts present.
    pub fn validate(&self) -> Result<()> {
        if self.code.is_empty() {
            return Err(ConfigError::ValidationError(
                "CRS code cannot be empty".to_string(),
            ));
        }

        if self.code.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "CRS code '{}' cannot contain whitespace",
                self.code
            )));
        }

        match self.code.split_once(':') {
            Some((auth, code)) if !auth.is_empty() && !code.is_empty() => Ok(()),
            _ => Err(ConfigError::ValidationError(format!(
                "CRS code '{}' must look like AUTHORITY:CODE (e.g. EPSG:4326)",
                self.code
            ))),
        }
    }

    /// Check whether this entry matches a case-insensitive search query.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.code.to_lowercase().contains(query_lower)
            || self.name.to_lowercase().contains(query_lower)
    }
}

impl fmt::Display for CrsEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{}{}{}", self.code, DISPLAY_SEPARATOR, self.name)
        }
    }
}

/// The presets offered when the config file lists none.
pub fn default_presets() -> Vec<CrsEntry> {
    vec![
        CrsEntry::new("EPSG:4326", "WGS 84"),
        CrsEntry::new("EPSG:3857", "WGS 84 / Pseudo-Mercator"),
        CrsEntry::new("EPSG:4258", "ETRS89"),
        CrsEntry::new("EPSG:4269", "NAD83"),
        CrsEntry::new("EPSG:27700", "OSGB36 / British National Grid"),
        CrsEntry::new("EPSG:25832", "ETRS89 / UTM zone 32N"),
        CrsEntry::new("EPSG:32633", "WGS 84 / UTM zone 33N"),
        CrsEntry::new("EPSG:2154", "RGF93 v1 / Lambert-93"),
    ]
}
