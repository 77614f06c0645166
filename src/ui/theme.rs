//! Theme and styling configuration.

use std::sync::OnceLock;

use ratatui::style::Color;
use tracing::{debug, warn};

static THEME: OnceLock<Theme> = OnceLock::new();

/// Color theme for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Primary background color.
    pub bg: Color,
    /// Accent color for focused and selected items.
    pub accent: Color,
    /// Border color for unfocused widgets.
    pub border: Color,
    /// Border color for the focused widget.
    pub border_focused: Color,
    /// Text color inside inputs.
    pub input_fg: Color,
    /// Placeholder text color.
    pub input_placeholder: Color,
    /// Dimmed text (hints, captions).
    pub muted: Color,
    /// Table header color.
    pub header: Color,
}

impl Theme {
    /// The dark theme.
    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            bg: Color::Black,
            accent: Color::Cyan,
            border: Color::DarkGray,
            border_focused: Color::Yellow,
            input_fg: Color::White,
            input_placeholder: Color::DarkGray,
            muted: Color::DarkGray,
            header: Color::Yellow,
        }
    }

    /// The light theme.
    pub fn light() -> Self {
        Self {
            fg: Color::Black,
            bg: Color::White,
            accent: Color::Blue,
            border: Color::Gray,
            border_focused: Color::Magenta,
            input_fg: Color::Black,
            input_placeholder: Color::Gray,
            muted: Color::Gray,
            header: Color::Blue,
        }
    }

    /// Look up a theme by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Install the named theme. Only the first call has an effect.
pub fn init_theme(name: &str) {
    let theme = Theme::by_name(name).unwrap_or_else(|| {
        warn!(theme = %name, "Unknown theme, falling back to dark");
        Theme::dark()
    });
    if THEME.set(theme).is_err() {
        debug!("Theme already initialized");
    }
}

/// Get the active theme.
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}
