//! CRS picker modal.
//!
//! One modal serves both CRS slots. The slot being edited travels with the
//! modal session: [`CrsModal::open`] takes the target and the confirm action
//! hands it back, so callers never track which trigger opened the dialog.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use tracing::debug;

use crate::config::CrsEntry;
use crate::controller::CrsTarget;
use crate::ui::components::TextInput;
use crate::ui::theme::theme;

/// Action returned from the CRS modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrsModalAction {
    /// A CRS was chosen for the given slot.
    Confirm { target: CrsTarget, crs: CrsEntry },
    /// The modal was closed without choosing.
    Cancel,
}

/// Search-and-pick dialog over the configured CRS presets.
#[derive(Debug)]
pub struct CrsModal {
    presets: Vec<CrsEntry>,
    /// Indices into `presets` matching the current query.
    filtered: Vec<usize>,
    search: TextInput,
    target: Option<CrsTarget>,
    list_state: ListState,
}

impl CrsModal {
    /// Create a closed modal over the given presets.
    pub fn new(presets: Vec<CrsEntry>) -> Self {
        let filtered = (0..presets.len()).collect();
        Self {
            presets,
            filtered,
            search: TextInput::with_placeholder("Search code or name, or type AUTH:CODE"),
            target: None,
            list_state: ListState::default(),
        }
    }

    /// Open the modal to fill `target`, highlighting `current` if listed.
    pub fn open(&mut self, target: CrsTarget, current: Option<&CrsEntry>) {
        debug!(?target, "Opening CRS modal");
        self.target = Some(target);
        self.search.clear();
        self.refilter();

        let highlighted = current
            .and_then(|crs| self.filtered.iter().position(|&i| self.presets[i] == *crs))
            .unwrap_or(0);
        self.select(highlighted);
    }

    /// Close the modal and end the session.
    pub fn close(&mut self) {
        self.target = None;
        self.search.clear();
    }

    /// Check if the modal is open.
    pub fn is_visible(&self) -> bool {
        self.target.is_some()
    }

    /// Get the slot the open session fills.
    pub fn target(&self) -> Option<CrsTarget> {
        self.target
    }

    /// Get the current search query.
    pub fn query(&self) -> &str {
        self.search.value()
    }

    /// Get the presets matching the current query, in preset order.
    pub fn results(&self) -> Vec<&CrsEntry> {
        self.filtered.iter().map(|&i| &self.presets[i]).collect()
    }

    /// Get the highlighted result.
    pub fn highlighted(&self) -> Option<&CrsEntry> {
        self.list_state
            .selected()
            .and_then(|pos| self.filtered.get(pos))
            .map(|&i| &self.presets[i])
    }

    fn preset_by_code(&self, code: &str) -> Option<&CrsEntry> {
        self.presets.iter().find(|c| c.code.eq_ignore_ascii_case(code))
    }

    fn refilter(&mut self) {
        let query = self.search.value().trim().to_lowercase();
        self.filtered = self
            .presets
            .iter()
            .enumerate()
            .filter(|(_, crs)| query.is_empty() || crs.matches(&query))
            .map(|(i, _)| i)
            .collect();
        self.select(0);
    }

    fn select(&mut self, pos: usize) {
        if self.filtered.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(pos.min(self.filtered.len() - 1)));
        }
    }

    fn move_down(&mut self) {
        if let Some(pos) = self.list_state.selected() {
            self.select(pos + 1);
        }
    }

    fn move_up(&mut self) {
        if let Some(pos) = self.list_state.selected() {
            self.select(pos.saturating_sub(1));
        }
    }

    /// Handle keyboard input while open.
    ///
    /// Typing edits the search query. When the query reads as `AUTH:CODE`,
    /// Enter confirms the preset with exactly that code, or the typed code
    /// itself; partial matches never stand in for it. Any other query
    /// confirms the highlighted result.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<CrsModalAction> {
        let target = self.target?;

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                self.close();
                Some(CrsModalAction::Cancel)
            }
            (KeyCode::Down, _) | (KeyCode::Char('n'), KeyModifiers::CONTROL) => {
                self.move_down();
                None
            }
            (KeyCode::Up, _) | (KeyCode::Char('p'), KeyModifiers::CONTROL) => {
                self.move_up();
                None
            }
            (KeyCode::Enter, _) => {
                let crs = match CrsEntry::parse(self.search.value()) {
                    Ok(typed) => self.preset_by_code(&typed.code).cloned().unwrap_or(typed),
                    Err(e) => match self.highlighted() {
                        Some(crs) => crs.clone(),
                        None => {
                            debug!(error = %e, "Query is not a CRS code");
                            return None;
                        }
                    },
                };
                self.close();
                Some(CrsModalAction::Confirm { target, crs })
            }
            _ => {
                if self.search.handle_input(key) {
                    self.refilter();
                }
                None
            }
        }
    }

    /// Render the modal centered in `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(target) = self.target else {
            return;
        };
        let t = theme();

        let width = 64u16.min(area.width.saturating_sub(4));
        let height = 18u16.min(area.height.saturating_sub(2));
        let dialog_area = centered_rect(area, width, height);

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(Span::styled(
                format!(" Select {} CRS ", target.label()),
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent))
            .style(Style::default().bg(t.bg));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        self.search.render_with_label(frame, chunks[0], "Search", true);

        let items: Vec<ListItem> = self
            .results()
            .iter()
            .map(|crs| ListItem::new(crs.to_string()))
            .collect();
        let typed = CrsEntry::parse(self.query())
            .ok()
            .filter(|crs| self.preset_by_code(&crs.code).is_none());

        if items.is_empty() {
            let hint = if typed.is_some() {
                "No preset matches. Enter uses the typed code."
            } else {
                "No matching CRS"
            };
            frame.render_widget(
                Paragraph::new(hint)
                    .style(Style::default().fg(t.muted))
                    .alignment(Alignment::Center),
                chunks[1],
            );
        } else {
            let list = List::new(items)
                .style(Style::default().fg(t.fg))
                .highlight_style(
                    Style::default()
                        .fg(t.bg)
                        .bg(t.accent)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");
            frame.render_stateful_widget(list, chunks[1], &mut self.list_state);
        }

        let footer = match &typed {
            Some(crs) => format!("Enter:use {}  Esc:cancel", crs.code),
            None => "↑/↓:navigate  Enter:select  Esc:cancel".to_string(),
        };
        frame.render_widget(
            Paragraph::new(footer)
                .style(Style::default().fg(t.muted))
                .alignment(Alignment::Center),
            chunks[2],
        );
    }
}

/// Calculate a centered rectangle within the given area.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
