//! User interface components.
//!
//! This module contains the TUI widgets the application composes: column
//! dropdowns, text input, the CRS picker, the preview table and toasts.

pub mod components;
pub mod theme;

pub use components::{
    centered_rect, render_context_help, CrsModal, CrsModalAction, Dropdown, DropdownAction,
    DropdownItem, Notification, NotificationKind, NotificationManager, PreviewTable, TextInput,
};
pub use theme::{init_theme, theme, Theme};
