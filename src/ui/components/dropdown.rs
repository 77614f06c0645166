//! Dropdown for choosing one column header.
//!
//! Behaves like a native select box:
//! - Replacing the options selects the first one, like a freshly
//!   populated `<select>`
//! - Enter expands the option list, j/k or arrows move, Enter picks,
//!   Esc/q closes without changing the value
//! - h/l or Left/Right step through the options while collapsed

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::ui::theme::theme;

/// Maximum number of options visible at once in the expanded list.
const MAX_VISIBLE_OPTIONS: usize = 8;

/// A single option in a dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownItem {
    /// Value reported when the option is chosen.
    pub value: String,
    /// Text shown for the option.
    pub label: String,
}

impl DropdownItem {
    /// Create an option whose value and label are the same text.
    pub fn from_header(header: impl Into<String>) -> Self {
        let header = header.into();
        Self {
            value: header.clone(),
            label: header,
        }
    }
}

/// Action resulting from dropdown input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownAction {
    /// The chosen value changed.
    Changed(String),
    /// The expanded list was closed without choosing.
    Cancel,
}

/// Dropdown over a list of options with exactly one chosen when non-empty.
#[derive(Debug)]
pub struct Dropdown {
    label: String,
    items: Vec<DropdownItem>,
    selected: Option<usize>,
    highlighted: usize,
    expanded: bool,
}

impl Dropdown {
    /// Create an empty dropdown with a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            items: Vec::new(),
            selected: None,
            highlighted: 0,
            expanded: false,
        }
    }

    /// Remove every option.
    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
        self.highlighted = 0;
        self.expanded = false;
    }

    /// Append an option. The first option appended becomes the value.
    pub fn push(&mut self, item: DropdownItem) {
        self.items.push(item);
        if self.selected.is_none() {
            self.selected = Some(0);
        }
    }

    /// Get the options.
    pub fn items(&self) -> &[DropdownItem] {
        &self.items
    }

    /// Check if the dropdown has no options.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the chosen value, if any.
    pub fn value(&self) -> Option<&str> {
        self.selected_item().map(|item| item.value.as_str())
    }

    /// Get the chosen option.
    pub fn selected_item(&self) -> Option<&DropdownItem> {
        self.selected.and_then(|idx| self.items.get(idx))
    }

    /// Check if the option list is open.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Open the option list at the chosen option.
    pub fn expand(&mut self) {
        if !self.items.is_empty() {
            self.expanded = true;
            self.highlighted = self.selected.unwrap_or(0);
        }
    }

    /// Get the dropdown label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<DropdownAction> {
        if self.expanded {
            self.handle_expanded_input(key)
        } else {
            self.handle_collapsed_input(key)
        }
    }

    fn handle_collapsed_input(&mut self, key: KeyEvent) -> Option<DropdownAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, KeyModifiers::NONE) => {
                self.expand();
                None
            }
            (KeyCode::Left, KeyModifiers::NONE) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
                let current = self.selected?;
                if current == 0 {
                    return None;
                }
                self.choose(current - 1)
            }
            (KeyCode::Right, KeyModifiers::NONE) | (KeyCode::Char('l'), KeyModifiers::NONE) => {
                let current = self.selected?;
                if current + 1 >= self.items.len() {
                    return None;
                }
                self.choose(current + 1)
            }
            _ => None,
        }
    }

    fn handle_expanded_input(&mut self, key: KeyEvent) -> Option<DropdownAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                if self.highlighted + 1 < self.items.len() {
                    self.highlighted += 1;
                }
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.highlighted = self.highlighted.saturating_sub(1);
                None
            }
            (KeyCode::Enter, KeyModifiers::NONE) => {
                self.expanded = false;
                if Some(self.highlighted) == self.selected {
                    return None;
                }
                self.choose(self.highlighted)
            }
            (KeyCode::Esc, _) | (KeyCode::Char('q'), KeyModifiers::NONE) => {
                self.expanded = false;
                Some(DropdownAction::Cancel)
            }
            _ => None,
        }
    }

    fn choose(&mut self, idx: usize) -> Option<DropdownAction> {
        let item = self.items.get(idx)?;
        self.selected = Some(idx);
        self.highlighted = idx;
        Some(DropdownAction::Changed(item.value.clone()))
    }

    /// Render the collapsed field.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let t = theme();

        let display = match self.selected_item() {
            Some(item) => {
                let indicator = if self.expanded { "▲" } else { "▼" };
                format!("{} {}", item.label, indicator)
            }
            None => "No columns".to_string(),
        };

        let (text_style, border_style, title_style) = if focused {
            (
                Style::default().fg(t.accent),
                Style::default().fg(t.border_focused),
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            )
        } else if self.selected.is_none() {
            (
                Style::default().fg(t.input_placeholder),
                Style::default().fg(t.border),
                Style::default().fg(t.fg),
            )
        } else {
            (
                Style::default().fg(t.input_fg),
                Style::default().fg(t.border),
                Style::default().fg(t.fg),
            )
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", self.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        frame.render_widget(Paragraph::new(display).style(text_style).block(block), area);
    }

    /// Render the expanded option list as an overlay below or above the field.
    pub fn render_expanded_list(&self, frame: &mut Frame, field_area: Rect, screen_area: Rect) {
        if !self.expanded || self.items.is_empty() {
            return;
        }

        let t = theme();
        let list_height = (self.items.len().min(MAX_VISIBLE_OPTIONS) + 2) as u16;

        let space_below = screen_area
            .height
            .saturating_sub(field_area.y + field_area.height);
        let space_above = field_area.y.saturating_sub(screen_area.y);

        let list_area = if space_below >= list_height || space_below >= space_above {
            Rect::new(
                field_area.x,
                field_area.y + field_area.height - 1,
                field_area.width,
                list_height.min(space_below + 1),
            )
        } else {
            Rect::new(
                field_area.x,
                field_area.y.saturating_sub(list_height - 1),
                field_area.width,
                list_height.min(space_above + 1),
            )
        };

        frame.render_widget(Clear, list_area);

        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let style = if Some(idx) == self.selected {
                    Style::default().fg(t.accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(t.fg)
                };
                ListItem::new(item.label.clone()).style(style)
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(t.border_focused)),
            )
            .style(Style::default().bg(t.bg))
            .highlight_style(
                Style::default()
                    .fg(t.bg)
                    .bg(t.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.highlighted));
        frame.render_stateful_widget(list, list_area, &mut state);
    }
}

impl Default for Dropdown {
    fn default() -> Self {
        Self::new("")
    }
}
