//! Single-line text input.
//!
//! Used for the file path field and the CRS search box. The cursor is
//! tracked in characters, so paths with non-ASCII names edit correctly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::theme;

/// A text input widget.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// Cursor position in characters.
    cursor: usize,
    placeholder: String,
}

impl TextInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty input showing `placeholder` until something is typed.
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            ..Self::default()
        }
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value and move the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_len();
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get the cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Byte offset of the given character position.
    fn byte_at(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value changed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                let changed = !self.value.is_empty();
                self.clear();
                changed
            }
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => self.delete_word(),
            (KeyCode::Char('a'), KeyModifiers::CONTROL) | (KeyCode::Home, _) => {
                self.cursor = 0;
                false
            }
            (KeyCode::Char('e'), KeyModifiers::CONTROL) | (KeyCode::End, _) => {
                self.cursor = self.char_len();
                false
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_at(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            (KeyCode::Backspace, _) if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_at(self.cursor);
                self.value.remove(at);
                true
            }
            (KeyCode::Delete, _) if self.cursor < self.char_len() => {
                let at = self.byte_at(self.cursor);
                self.value.remove(at);
                true
            }
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                false
            }
            _ => false,
        }
    }

    /// Delete the word before the cursor, stopping at path separators.
    fn delete_word(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let end = self.byte_at(self.cursor);
        let before = &self.value[..end];
        let trimmed = before.trim_end_matches(['/', '\\', ' ']);
        let start = trimmed
            .rfind(['/', '\\', ' '])
            .map(|i| i + 1)
            .unwrap_or(0);
        let removed = self.value[start..end].chars().count();
        self.value.replace_range(start..end, "");
        self.cursor -= removed;
        true
    }

    /// Render the input inside a labelled border.
    pub fn render_with_label(&self, frame: &mut Frame, area: Rect, label: &str, focused: bool) {
        let t = theme();
        let showing_placeholder = self.value.is_empty() && !self.placeholder.is_empty();

        let display = if showing_placeholder {
            self.placeholder.as_str()
        } else {
            self.value.as_str()
        };

        let text_style = if showing_placeholder {
            Style::default().fg(t.input_placeholder)
        } else {
            Style::default().fg(t.input_fg)
        };

        let (border_style, title_style) = if focused {
            (
                Style::default().fg(t.border_focused),
                Style::default()
                    .fg(t.border_focused)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (Style::default().fg(t.border), Style::default().fg(t.fg))
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        // Keep the cursor visible on long paths.
        let inner_width = area.width.saturating_sub(2) as usize;
        let scroll = self.cursor.saturating_sub(inner_width.saturating_sub(1));

        let paragraph = Paragraph::new(display)
            .style(text_style)
            .block(block)
            .scroll((0, scroll as u16));
        frame.render_widget(paragraph, area);

        if focused {
            let cursor_x = area.x + 1 + (self.cursor - scroll) as u16;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn typed(text: &str) -> TextInput {
        let mut input = TextInput::new();
        for c in text.chars() {
            input.handle_input(key(KeyCode::Char(c)));
        }
        input
    }

    #[test]
    fn test_new_input() {
        let input = TextInput::with_placeholder("path/to/file.csv");
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_typing() {
        let input = typed("data.csv");
        assert_eq!(input.value(), "data.csv");
        assert_eq!(input.cursor(), 8);
    }

    #[test]
    fn test_shift_characters() {
        let mut input = TextInput::new();
        input.handle_input(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT));
        assert_eq!(input.value(), "D");
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = typed("abc");
        assert!(input.handle_input(key(KeyCode::Backspace)));
        assert_eq!(input.value(), "ab");

        input.handle_input(key(KeyCode::Home));
        assert!(input.handle_input(key(KeyCode::Delete)));
        assert_eq!(input.value(), "b");

        input.handle_input(key(KeyCode::Home));
        assert!(!input.handle_input(key(KeyCode::Backspace)));
        input.handle_input(key(KeyCode::End));
        assert!(!input.handle_input(key(KeyCode::Delete)));
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = typed("größe.csv");
        assert_eq!(input.cursor(), 9);

        for _ in 0..4 {
            input.handle_input(key(KeyCode::Left));
        }
        input.handle_input(key(KeyCode::Backspace));
        assert_eq!(input.value(), "größ.csv");

        input.handle_input(key(KeyCode::Left));
        input.handle_input(key(KeyCode::Char('s')));
        assert_eq!(input.value(), "grösß.csv");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = typed("ab");
        input.handle_input(key(KeyCode::Right));
        assert_eq!(input.cursor(), 2);
        input.handle_input(ctrl('a'));
        input.handle_input(key(KeyCode::Left));
        assert_eq!(input.cursor(), 0);
        input.handle_input(ctrl('e'));
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = typed("hello");
        assert!(input.handle_input(ctrl('u')));
        assert!(input.is_empty());
        assert!(!input.handle_input(ctrl('u')));
    }

    #[test]
    fn test_ctrl_w_deletes_path_segment() {
        let mut input = typed("/data/points.csv");
        assert!(input.handle_input(ctrl('w')));
        assert_eq!(input.value(), "/data/");
        assert!(input.handle_input(ctrl('w')));
        assert_eq!(input.value(), "/");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_set_value_moves_cursor_to_end() {
        let mut input = TextInput::new();
        input.set_value("EPSG:4326");
        assert_eq!(input.cursor(), 9);
        input.clear();
        assert_eq!(input.cursor(), 0);
    }
}
