//! Event handling for the application.
//!
//! Terminal input arrives as [`Event`]s from the [`EventHandler`]; results
//! of background file reads arrive separately through the task channel.

mod handler;
mod keys;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;
pub use keys::{context_hints, KeyContext};

/// Events driving the application update loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// Text was pasted into the terminal.
    Paste(String),
    /// No input within the tick rate.
    Tick,
}
