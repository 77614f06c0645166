//! Toast notifications.
//!
//! Load failures, CRS changes and the transform stub report back to the
//! user through short-lived toasts in the bottom-right corner.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Maximum toasts kept at once; older ones are dropped first.
const MAX_VISIBLE: usize = 3;

/// The kind of notification, which determines its appearance and lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    /// Get the icon for this kind.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Info => "ℹ",
            NotificationKind::Success => "✓",
            NotificationKind::Warning => "⚠",
            NotificationKind::Error => "✗",
        }
    }

    /// Get the color for this kind.
    pub fn color(&self) -> Color {
        match self {
            NotificationKind::Info => Color::Blue,
            NotificationKind::Success => Color::Green,
            NotificationKind::Warning => Color::Yellow,
            NotificationKind::Error => Color::Red,
        }
    }

    /// How long a toast of this kind stays up.
    pub fn lifetime(&self) -> Duration {
        match self {
            NotificationKind::Info | NotificationKind::Success => Duration::from_secs(3),
            NotificationKind::Warning | NotificationKind::Error => Duration::from_secs(6),
        }
    }
}

/// A single toast.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    created_at: Instant,
    lifetime: Duration,
}

impl Notification {
    /// Create a toast with the default lifetime for its kind.
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Instant::now(),
            lifetime: kind.lifetime(),
        }
    }

    /// Check if the toast should be removed.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.lifetime
    }
}

/// Holds the active toasts.
#[derive(Debug, Default)]
pub struct NotificationManager {
    notifications: VecDeque<Notification>,
}

impl NotificationManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a toast, dropping the oldest past the limit.
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
        while self.notifications.len() > MAX_VISIBLE {
            self.notifications.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::new(NotificationKind::Info, message));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::new(NotificationKind::Success, message));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Notification::new(NotificationKind::Warning, message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::new(NotificationKind::Error, message));
    }

    /// Drop expired toasts. Called on every tick.
    pub fn tick(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Render the toasts stacked upward from the bottom-right corner.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 50.min(area.width.saturating_sub(4));
        let inner_width = width.saturating_sub(4).max(1) as usize;

        let mut bottom = area.y + area.height.saturating_sub(1);
        for notification in self.notifications.iter().rev() {
            let text_len = notification.message.chars().count() + 2;
            let height = ((text_len + inner_width - 1) / inner_width) as u16 + 2;
            if bottom < area.y + height {
                break;
            }
            bottom -= height;

            let toast_area = Rect::new(
                area.x + area.width.saturating_sub(width + 2),
                bottom,
                width,
                height,
            );
            render_notification(notification, frame, toast_area);
        }
    }
}

fn render_notification(notification: &Notification, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let style = Style::default().fg(notification.kind.color());
    let text = Line::from(vec![
        Span::styled(
            format!("{} ", notification.kind.icon()),
            style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(notification.message.as_str(), style),
    ]);

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).border_style(style))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_lifetime() {
        assert_eq!(NotificationKind::Info.lifetime(), Duration::from_secs(3));
        assert_eq!(NotificationKind::Error.lifetime(), Duration::from_secs(6));
    }

    #[test]
    fn test_kind_icon_and_color() {
        assert_eq!(NotificationKind::Warning.icon(), "⚠");
        assert_eq!(NotificationKind::Success.color(), Color::Green);
    }

    #[test]
    fn test_push_respects_limit() {
        let mut manager = NotificationManager::new();
        for i in 0..5 {
            manager.info(format!("message {}", i));
        }
        assert_eq!(manager.len(), MAX_VISIBLE);
        let first = manager.iter().next().unwrap();
        assert_eq!(first.message, "message 2");
    }

    #[test]
    fn test_tick_drops_expired() {
        let mut manager = NotificationManager::new();
        let mut stale = Notification::new(NotificationKind::Info, "short");
        stale.lifetime = Duration::from_millis(1);
        manager.push(stale);
        manager.error("long");
        std::thread::sleep(Duration::from_millis(5));
        manager.tick();
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.iter().next().unwrap().kind, NotificationKind::Error);
    }

    #[test]
    fn test_warning_kind() {
        let mut manager = NotificationManager::new();
        manager.warning("ragged rows");
        assert_eq!(manager.iter().next().unwrap().kind, NotificationKind::Warning);
    }

    #[test]
    fn test_fresh_notification_not_expired() {
        let n = Notification::new(NotificationKind::Success, "ok");
        assert!(!n.is_expired());
    }
}
