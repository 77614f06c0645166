//! Main application state and event loop glue.
//!
//! This module implements The Elm Architecture (TEA): [`App::update`]
//! consumes events, [`App::view`] renders the current state, and the main
//! loop moves file reads off-thread through [`App::take_pending_load`] and
//! [`App::handle_message`].

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tracing::{debug, error, info, trace, warn};

use crate::config::Config;
use crate::controller::{CrsTarget, PreviewController};
use crate::error::AppError;
use crate::events::{Event, KeyContext};
use crate::tasks::{LoadMessage, LoadRequest};
use crate::ui::{
    centered_rect, render_context_help, theme, Dropdown, DropdownAction, NotificationManager,
    TextInput,
};

/// The current screen state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// The main screen.
    #[default]
    Ready,
    /// The help overlay is shown.
    Help,
    /// The application is exiting.
    Exiting,
}

/// Which control receives key input on the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    FileInput,
    LatitudeColumn,
    LongitudeColumn,
    InputCrs,
    OutputCrs,
    Transform,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::FileInput,
        Focus::LatitudeColumn,
        Focus::LongitudeColumn,
        Focus::InputCrs,
        Focus::OutputCrs,
        Focus::Transform,
    ];

    fn is_column(self) -> bool {
        matches!(self, Focus::LatitudeColumn | Focus::LongitudeColumn)
    }

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// The main application struct that holds all state.
pub struct App {
    state: AppState,
    should_quit: bool,
    focus: Focus,
    file_input: TextInput,
    controller: PreviewController,
    notifications: NotificationManager,
    /// A read waiting to be handed to the task spawner.
    pending_load: Option<LoadRequest>,
    /// The latest selection, until its read reports back.
    loading: Option<LoadRequest>,
    /// Bumped on every file selection.
    load_generation: u64,
    vim_mode: bool,
}

impl App {
    /// Create a new application instance with the given configuration.
    pub fn new(config: Config) -> Self {
        debug!("Creating application instance");
        Self {
            state: AppState::Ready,
            should_quit: false,
            focus: Focus::FileInput,
            file_input: TextInput::with_placeholder("path/to/points.csv"),
            controller: PreviewController::from_config(&config),
            notifications: NotificationManager::new(),
            pending_load: None,
            loading: None,
            load_generation: 0,
            vim_mode: config.settings.vim_mode,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn controller(&self) -> &PreviewController {
        &self.controller
    }

    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Get the path of the selection still being read, if any.
    pub fn loading_path(&self) -> Option<&Path> {
        self.loading.as_ref().map(|request| request.path.as_path())
    }

    /// Take the read waiting to be spawned, if any.
    pub fn take_pending_load(&mut self) -> Option<LoadRequest> {
        self.pending_load.take()
    }

    /// Put a path in the file field and select it, as if typed and submitted.
    pub fn select_file(&mut self, path: impl AsRef<Path>) {
        self.file_input
            .set_value(path.as_ref().to_string_lossy().into_owned());
        self.submit_file_input();
    }

    /// Report an error to the user.
    pub fn handle_error(&mut self, error: &AppError) {
        if error.is_critical() {
            error!(error = %error, "Critical error reported to user");
        } else {
            warn!(error = %error, "Error reported to user");
        }
        let message = match error.suggested_action() {
            Some(action) => format!("{} {}", error.user_message(), action),
            None => error.user_message(),
        };
        self.notifications.error(message);
    }

    /// Handle a result coming back from a background task.
    pub fn handle_message(&mut self, message: LoadMessage) {
        match message {
            LoadMessage::FileLoaded {
                generation,
                path,
                result,
            } => {
                let latest = self.loading.as_ref().map(|request| request.generation);
                if latest != Some(generation) {
                    debug!(
                        path = %path.display(),
                        generation,
                        latest = ?latest,
                        "Discarding result of a superseded load"
                    );
                    return;
                }
                self.loading = None;

                match result {
                    Ok(text) => {
                        self.controller.on_file_loaded(path, &text);
                        if let Some(table) = self.controller.table() {
                            let name = self
                                .controller
                                .source()
                                .and_then(Path::file_name)
                                .map(|n| n.to_string_lossy().into_owned())
                                .unwrap_or_default();
                            let message = format!(
                                "Loaded {}: {} columns, {} rows",
                                name,
                                table.column_count(),
                                table.row_count()
                            );
                            self.notifications.success(message);
                            if table.has_ragged_rows() {
                                self.notifications.warning(
                                    "Some rows have a different number of fields than the header",
                                );
                            }
                        }
                        self.focus = Focus::LatitudeColumn;
                    }
                    Err(e) => self.handle_error(&AppError::from(e)),
                }
            }
        }
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                trace!(key = ?key.code, modifiers = ?key.modifiers, "Key event");
                self.handle_key_event(key);
            }
            Event::Paste(text) => self.handle_paste(&text),
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.notifications.tick(),
        }
    }

    fn quit(&mut self) {
        info!("Quit requested");
        self.should_quit = true;
        self.state = AppState::Exiting;
    }

    /// Dropping a file onto most terminals pastes its path.
    fn handle_paste(&mut self, text: &str) {
        if self.controller.crs_modal().is_visible() || self.state != AppState::Ready {
            return;
        }
        let path = text.trim().trim_matches(|c| c == '\'' || c == '"');
        self.focus = Focus::FileInput;
        self.file_input.set_value(path);
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.quit();
            return;
        }

        // The CRS picker blocks all other input while open
        if self.controller.crs_modal().is_visible() {
            if let Some(action) = self.controller.crs_modal_mut().handle_input(key) {
                if let Some((target, crs)) = self.controller.handle_crs_action(action) {
                    let message = format!("{} CRS: {}", target.label(), crs);
                    self.notifications.success(message);
                }
            }
            return;
        }

        match self.state {
            AppState::Help => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::F(1)
                ) {
                    self.state = AppState::Ready;
                }
                return;
            }
            AppState::Exiting => return,
            AppState::Ready => {}
        }

        // F1 reaches help from every control, the path field included
        if key.code == KeyCode::F(1) {
            self.state = AppState::Help;
            return;
        }

        if !self.vim_mode && is_vim_key(&key) && self.focus.is_column() {
            return;
        }

        // An open option list keeps the keys until it closes
        if let Some(dropdown) = self.focused_dropdown_mut() {
            if dropdown.is_expanded() {
                if let Some(DropdownAction::Changed(value)) = dropdown.handle_input(key) {
                    debug!(column = %value, "Column selected");
                }
                return;
            }
        }

        match key.code {
            KeyCode::Tab => {
                self.cycle_focus(true);
                return;
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
                return;
            }
            _ => {}
        }

        if self.focus == Focus::FileInput {
            match key.code {
                KeyCode::Enter => self.submit_file_input(),
                KeyCode::Esc => self.cycle_focus(true),
                _ => {
                    self.file_input.handle_input(key);
                }
            }
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => self.quit(),
            (KeyCode::Char('?'), _) => self.state = AppState::Help,
            _ => self.handle_focused_key(key),
        }
    }

    fn handle_focused_key(&mut self, key: KeyEvent) {
        match self.focus {
            Focus::LatitudeColumn | Focus::LongitudeColumn => {
                if let Some(dropdown) = self.focused_dropdown_mut() {
                    if let Some(DropdownAction::Changed(value)) = dropdown.handle_input(key) {
                        debug!(column = %value, "Column selected");
                    }
                }
            }
            Focus::InputCrs if key.code == KeyCode::Enter => {
                self.controller.open_crs_modal(CrsTarget::Input);
            }
            Focus::OutputCrs if key.code == KeyCode::Enter => {
                self.controller.open_crs_modal(CrsTarget::Output);
            }
            Focus::Transform if key.code == KeyCode::Enter => {
                let request = self.controller.transform_coordinates();
                let message = format!(
                    "Transforming coordinates from {} and {}",
                    request.latitude_column.as_deref().unwrap_or("(none)"),
                    request.longitude_column.as_deref().unwrap_or("(none)")
                );
                self.notifications.info(message);
            }
            _ => {}
        }
    }

    fn focused_dropdown_mut(&mut self) -> Option<&mut Dropdown> {
        match self.focus {
            Focus::LatitudeColumn => Some(self.controller.latitude_mut()),
            Focus::LongitudeColumn => Some(self.controller.longitude_mut()),
            _ => None,
        }
    }

    /// Move focus forward or backward, skipping the column dropdowns until a
    /// file is loaded.
    fn cycle_focus(&mut self, forward: bool) {
        let len = Focus::ORDER.len();
        let mut pos = self.focus.position();
        loop {
            pos = if forward {
                (pos + 1) % len
            } else {
                (pos + len - 1) % len
            };
            let candidate = Focus::ORDER[pos];
            if !candidate.is_column() || self.controller.is_file_loaded() {
                self.focus = candidate;
                break;
            }
        }
    }

    fn submit_file_input(&mut self) {
        let typed = self.file_input.value().trim();
        let path = expand_home(typed);
        let selected = (!typed.is_empty()).then_some(path.as_path());

        match self.controller.handle_file_select(selected) {
            Some(path) => {
                self.load_generation += 1;
                let request = LoadRequest {
                    generation: self.load_generation,
                    path,
                };
                info!(
                    path = %request.path.display(),
                    generation = request.generation,
                    "Loading file"
                );
                self.loading = Some(request.clone());
                self.pending_load = Some(request);
            }
            None => debug!("No file chosen"),
        }
    }

    /// Get the key context for the hint bar.
    pub fn key_context(&self) -> KeyContext {
        if self.controller.crs_modal().is_visible() {
            return KeyContext::CrsModal;
        }
        if self.state == AppState::Help {
            return KeyContext::Help;
        }
        match self.focus {
            Focus::FileInput => KeyContext::FileInput,
            Focus::LatitudeColumn => column_context(self.controller.latitude().is_expanded()),
            Focus::LongitudeColumn => column_context(self.controller.longitude().is_expanded()),
            Focus::InputCrs | Focus::OutputCrs => KeyContext::CrsButton,
            Focus::Transform => KeyContext::TransformButton,
        }
    }

    /// Render the application UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // File input
                Constraint::Length(3), // Column dropdowns
                Constraint::Length(3), // CRS + transform buttons
                Constraint::Min(3),    // Preview
                Constraint::Length(1), // Hints
            ])
            .split(area);

        self.render_title(frame, chunks[0]);
        self.file_input
            .render_with_label(frame, chunks[1], "CSV file", self.focus == Focus::FileInput);

        let column_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        if self.controller.is_file_loaded() {
            self.controller.latitude().render(
                frame,
                column_areas[0],
                self.focus == Focus::LatitudeColumn,
            );
            self.controller.longitude().render(
                frame,
                column_areas[1],
                self.focus == Focus::LongitudeColumn,
            );
        }

        self.render_buttons(frame, chunks[3]);
        self.render_content(frame, chunks[4]);
        render_context_help(frame, chunks[5], self.key_context(), self.vim_mode);

        // Overlays, last drawn on top
        match self.focus {
            Focus::LatitudeColumn => {
                self.controller
                    .latitude()
                    .render_expanded_list(frame, column_areas[0], area)
            }
            Focus::LongitudeColumn => {
                self.controller
                    .longitude()
                    .render_expanded_list(frame, column_areas[1], area)
            }
            _ => {}
        }
        self.controller.crs_modal_mut().render(frame, area);
        if self.state == AppState::Help {
            render_help(frame, area);
        }
        self.notifications.render(frame, area);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let title = Paragraph::new("coordprep: CSV coordinate preparation")
            .style(Style::default().fg(t.accent).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(title, area);
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect) {
        let areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(40),
                Constraint::Percentage(20),
            ])
            .split(area);

        let crs_text = |target| {
            self.controller
                .crs(target)
                .map(ToString::to_string)
                .unwrap_or_else(|| "Not set".to_string())
        };

        render_button(
            frame,
            areas[0],
            "Input CRS",
            &crs_text(CrsTarget::Input),
            self.focus == Focus::InputCrs,
        );
        render_button(
            frame,
            areas[1],
            "Output CRS",
            &crs_text(CrsTarget::Output),
            self.focus == Focus::OutputCrs,
        );
        render_button(
            frame,
            areas[2],
            "",
            "Transform",
            self.focus == Focus::Transform,
        );
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        let t = theme();

        if let Some(path) = self.loading_path() {
            let text = format!("Loading {}...", path.display());
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(t.border));
            let paragraph = Paragraph::new(text)
                .style(Style::default().fg(t.muted))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        if self.controller.is_file_loaded() {
            self.controller.preview().render(frame, area);
        } else {
            let lines = vec![
                Line::raw(""),
                Line::styled("No file loaded", Style::default().fg(t.fg)),
                Line::styled(
                    "Type a CSV path above and press Enter, or paste one.",
                    Style::default().fg(t.muted),
                ),
            ];
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(t.border));
            let paragraph = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, area);
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn is_vim_key(key: &KeyEvent) -> bool {
    key.modifiers == KeyModifiers::NONE
        && matches!(key.code, KeyCode::Char('h' | 'j' | 'k' | 'l'))
}

fn column_context(expanded: bool) -> KeyContext {
    if expanded {
        KeyContext::ColumnList
    } else {
        KeyContext::ColumnSelect
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn render_button(frame: &mut Frame, area: Rect, label: &str, text: &str, focused: bool) {
    let t = theme();
    let (border_style, text_style) = if focused {
        (
            Style::default().fg(t.border_focused),
            Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
        )
    } else {
        (Style::default().fg(t.border), Style::default().fg(t.fg))
    };

    let mut block = Block::default().borders(Borders::ALL).border_style(border_style);
    if !label.is_empty() {
        block = block.title(Span::styled(format!(" {} ", label), Style::default().fg(t.fg)));
    }

    let paragraph = Paragraph::new(text)
        .style(text_style)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let t = theme();
    let section = Style::default().fg(t.header);

    let lines = vec![
        Line::styled("Global", section),
        Line::raw("  Tab / Shift+Tab  Next / previous control"),
        Line::raw("  ? / F1           Toggle this help"),
        Line::raw("  q / Ctrl+C       Quit"),
        Line::raw(""),
        Line::styled("CSV file", section),
        Line::raw("  Enter            Load the typed path"),
        Line::raw("  Esc              Leave the field"),
        Line::raw(""),
        Line::styled("Column dropdowns", section),
        Line::raw("  Enter            Open / choose"),
        Line::raw("  j/k, ↑/↓         Move in the open list"),
        Line::raw("  h/l, ←/→         Cycle while closed"),
        Line::raw(""),
        Line::styled("CRS picker", section),
        Line::raw("  type             Filter by code or name"),
        Line::raw("  Enter            Select, or use a typed AUTH:CODE"),
        Line::raw("  Esc              Cancel"),
    ];

    let height = (lines.len() as u16 + 2).min(area.height);
    let dialog = centered_rect(area, 56.min(area.width), height);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.accent))
        .style(Style::default().bg(t.bg));
    frame.render_widget(Paragraph::new(lines).block(block), dialog);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrsEntry;
    use crate::tasks::LoadError;
    use crate::ui::NotificationKind;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.update(key(KeyCode::Char(c)));
        }
    }

    fn deliver(app: &mut App, request: LoadRequest, result: Result<String, LoadError>) {
        app.handle_message(LoadMessage::FileLoaded {
            generation: request.generation,
            path: request.path,
            result,
        });
    }

    fn loaded_app(text: &str) -> App {
        let mut app = App::default();
        app.select_file("points.csv");
        let request = app.take_pending_load().unwrap();
        deliver(&mut app, request, Ok(text.to_string()));
        app
    }

    #[test]
    fn test_app_default() {
        let app = App::default();
        assert_eq!(app.state(), AppState::Ready);
        assert_eq!(app.focus(), Focus::FileInput);
        assert!(!app.should_quit());
        assert!(!app.controller().is_file_loaded());
    }

    #[test]
    fn test_typing_path_and_enter_queues_load() {
        let mut app = App::default();
        type_text(&mut app, "data/quarry.csv");
        app.update(key(KeyCode::Enter));

        assert_eq!(app.loading_path(), Some(Path::new("data/quarry.csv")));
        let request = app.take_pending_load().unwrap();
        assert_eq!(request.path, PathBuf::from("data/quarry.csv"));
        assert_eq!(request.generation, 1);
        assert!(app.take_pending_load().is_none());
    }

    #[test]
    fn test_enter_on_empty_path_is_noop() {
        let mut app = App::default();
        app.update(key(KeyCode::Enter));
        assert!(app.loading_path().is_none());
        assert!(app.take_pending_load().is_none());
    }

    #[test]
    fn test_q_in_file_input_is_typed() {
        let mut app = App::default();
        type_text(&mut app, "q");
        assert!(!app.should_quit());
    }

    #[test]
    fn test_quit_on_ctrl_c() {
        let mut app = App::default();
        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
        assert_eq!(app.state(), AppState::Exiting);
    }

    #[test]
    fn test_loaded_file_fills_controller() {
        let app = loaded_app("lat,lon\n1,2\n3,4");
        assert!(app.loading_path().is_none());
        assert!(app.controller().is_file_loaded());
        assert_eq!(app.focus(), Focus::LatitudeColumn);
        assert_eq!(app.controller().latitude().items().len(), 2);
        assert_eq!(app.notifications().len(), 1);
    }

    #[test]
    fn test_ragged_file_warns() {
        let app = loaded_app("lat,lon\n1,2,3\n4,5");
        let kinds: Vec<NotificationKind> = app.notifications().iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NotificationKind::Success, NotificationKind::Warning]);
    }

    #[test]
    fn test_load_error_notifies() {
        let mut app = App::default();
        app.select_file("missing.csv");
        let request = app.take_pending_load().unwrap();
        let error = LoadError::NotFound(request.path.clone());
        deliver(&mut app, request, Err(error));

        assert!(app.loading_path().is_none());
        assert!(!app.controller().is_file_loaded());
        let toast = app.notifications().iter().next().unwrap();
        assert!(toast.message.contains("missing.csv"));
    }

    #[test]
    fn test_superseded_load_is_discarded() {
        let mut app = App::default();
        app.select_file("first.csv");
        let first = app.take_pending_load().unwrap();
        app.select_file("second.csv");
        let second = app.take_pending_load().unwrap();

        deliver(&mut app, first, Ok("a,b\n1,2".to_string()));
        assert!(!app.controller().is_file_loaded());
        assert_eq!(app.loading_path(), Some(Path::new("second.csv")));

        deliver(&mut app, second, Ok("x,y\n1,2".to_string()));
        assert_eq!(app.controller().latitude().value(), Some("x"));
    }

    #[test]
    fn test_reselecting_same_path_keeps_latest_read() {
        let mut app = App::default();
        app.select_file("a.csv");
        let old = app.take_pending_load().unwrap();
        app.select_file("a.csv");
        let new = app.take_pending_load().unwrap();
        assert!(new.generation > old.generation);

        deliver(&mut app, old, Ok("old1,old2\n1,2".to_string()));
        assert!(!app.controller().is_file_loaded());

        deliver(&mut app, new, Ok("new1,new2\n1,2".to_string()));
        assert_eq!(
            app.controller().table().unwrap().headers,
            vec!["new1".to_string(), "new2".to_string()]
        );
        assert_eq!(app.controller().latitude().value(), Some("new1"));
    }

    #[test]
    fn test_focus_skips_columns_before_load() {
        let mut app = App::default();
        app.update(key(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::InputCrs);
        app.update(key(KeyCode::BackTab));
        assert_eq!(app.focus(), Focus::FileInput);
        app.update(key(KeyCode::BackTab));
        assert_eq!(app.focus(), Focus::Transform);
    }

    #[test]
    fn test_focus_cycles_through_columns_after_load() {
        let mut app = loaded_app("lat,lon\n1,2");
        app.update(key(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::LongitudeColumn);
        app.update(key(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::InputCrs);
    }

    #[test]
    fn test_choose_columns_with_keys() {
        let mut app = loaded_app("id,lat,lon\n1,2,3");

        app.update(key(KeyCode::Char('l')));
        assert_eq!(app.controller().latitude().value(), Some("lat"));

        app.update(key(KeyCode::Tab));
        app.update(key(KeyCode::Enter));
        assert_eq!(app.key_context(), KeyContext::ColumnList);
        app.update(key(KeyCode::Char('j')));
        app.update(key(KeyCode::Char('j')));
        app.update(key(KeyCode::Enter));
        assert_eq!(app.controller().longitude().value(), Some("lon"));
        assert_eq!(app.key_context(), KeyContext::ColumnSelect);
    }

    #[test]
    fn test_vim_keys_off_leaves_arrows() {
        let mut config = Config::default();
        config.settings.vim_mode = false;
        let mut app = App::new(config);
        app.select_file("points.csv");
        let request = app.take_pending_load().unwrap();
        deliver(&mut app, request, Ok("id,lat,lon".to_string()));

        app.update(key(KeyCode::Char('l')));
        assert_eq!(app.controller().latitude().value(), Some("id"));
        app.update(key(KeyCode::Right));
        assert_eq!(app.controller().latitude().value(), Some("lat"));
    }

    #[test]
    fn test_q_in_open_list_closes_it_only() {
        let mut app = loaded_app("lat,lon\n1,2");
        app.update(key(KeyCode::Enter));
        app.update(key(KeyCode::Char('q')));
        assert!(!app.should_quit());
        assert!(!app.controller().latitude().is_expanded());

        app.update(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_crs_modal_routes_choice_to_opening_slot() {
        let mut app = App::default();
        app.update(key(KeyCode::Tab));
        app.update(key(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::OutputCrs);

        app.update(key(KeyCode::Enter));
        assert_eq!(app.key_context(), KeyContext::CrsModal);
        type_text(&mut app, "mercator");
        app.update(key(KeyCode::Enter));

        assert!(!app.controller().crs_modal().is_visible());
        assert!(app.controller().crs(CrsTarget::Input).is_none());
        assert_eq!(
            app.controller().crs(CrsTarget::Output),
            Some(&CrsEntry::new("EPSG:3857", "WGS 84 / Pseudo-Mercator"))
        );
    }

    #[test]
    fn test_q_typed_in_crs_modal_does_not_quit() {
        let mut app = App::default();
        app.update(key(KeyCode::Tab));
        app.update(key(KeyCode::Enter));
        type_text(&mut app, "q");
        assert!(!app.should_quit());
        assert_eq!(app.controller().crs_modal().query(), "q");

        app.update(key(KeyCode::Esc));
        assert!(!app.controller().crs_modal().is_visible());
    }

    #[test]
    fn test_transform_only_notifies() {
        let mut app = loaded_app("lat,lon\n59.9,10.7");
        app.update(key(KeyCode::BackTab));
        assert_eq!(app.focus(), Focus::FileInput);
        app.update(key(KeyCode::BackTab));
        assert_eq!(app.focus(), Focus::Transform);

        let before = app.controller().preview().clone();
        app.update(key(KeyCode::Enter));

        assert_eq!(app.controller().preview(), &before);
        assert_eq!(app.controller().latitude().value(), Some("lat"));
        let last = app.notifications().iter().last().unwrap();
        assert_eq!(last.message, "Transforming coordinates from lat and lat");
    }

    #[test]
    fn test_help_toggle() {
        let mut app = loaded_app("lat,lon");
        app.update(key(KeyCode::Char('?')));
        assert_eq!(app.state(), AppState::Help);
        assert_eq!(app.key_context(), KeyContext::Help);
        app.update(key(KeyCode::Esc));
        assert_eq!(app.state(), AppState::Ready);
    }

    #[test]
    fn test_f1_opens_help_from_file_input() {
        let mut app = App::default();
        assert_eq!(app.focus(), Focus::FileInput);

        app.update(key(KeyCode::F(1)));
        assert_eq!(app.state(), AppState::Help);
        app.update(key(KeyCode::F(1)));
        assert_eq!(app.state(), AppState::Ready);
        assert!(app.file_input.is_empty());
    }

    #[test]
    fn test_paste_fills_file_input() {
        let mut app = loaded_app("lat,lon");
        app.update(Event::Paste("'/tmp/drop.csv'\n".to_string()));
        assert_eq!(app.focus(), Focus::FileInput);
        app.update(key(KeyCode::Enter));
        let request = app.take_pending_load().unwrap();
        assert_eq!(request.path, PathBuf::from("/tmp/drop.csv"));
    }

    #[test]
    fn test_tick_and_resize_keep_state() {
        let mut app = App::default();
        app.update(Event::Tick);
        app.update(Event::Resize(80, 24));
        assert_eq!(app.state(), AppState::Ready);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("data.csv"), PathBuf::from("data.csv"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/data.csv"), home.join("data.csv"));
        }
    }

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_content_area_placeholders() {
        let mut app = App::default();
        assert!(screen_text(&mut app).contains("No file loaded"));

        app.select_file("points.csv");
        assert!(screen_text(&mut app).contains("Loading points.csv..."));
    }
}
