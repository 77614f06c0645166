//! Contextual help bar.
//!
//! Displays the key hints for whatever currently has focus.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::events::{context_hints, KeyContext};
use crate::ui::theme::theme;

/// Render the hint line for the given context.
pub fn render_context_help(frame: &mut Frame, area: Rect, context: KeyContext, vim_mode: bool) {
    let line = Line::from(hint_spans(context_hints(context, vim_mode)));
    frame.render_widget(Paragraph::new(line), area);
}

/// Split hint text into spans, styling `[key]` parts apart from the
/// descriptions between them.
fn hint_spans(hints: &str) -> Vec<Span<'static>> {
    let t = theme();
    let key_style = Style::default().fg(t.accent);
    let text_style = Style::default().fg(t.muted);

    let mut spans = Vec::new();
    let mut rest = hints;

    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|i| open + i) else {
            break;
        };
        if open > 0 {
            spans.push(Span::styled(rest[..open].to_string(), text_style));
        }
        spans.push(Span::styled(rest[open..=close].to_string(), key_style));
        rest = &rest[close + 1..];
    }

    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), text_style));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(spans: &[Span]) -> Vec<String> {
        spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_single_key() {
        let spans = hint_spans("[Enter] load");
        assert_eq!(texts(&spans), vec!["[Enter]", " load"]);
    }

    #[test]
    fn test_multiple_keys() {
        let spans = hint_spans("[j/k] move  [Enter] choose  [Esc] close");
        assert_eq!(spans.len(), 6);
        assert_eq!(spans[4].content, "[Esc]");
    }

    #[test]
    fn test_empty() {
        assert!(hint_spans("").is_empty());
    }

    #[test]
    fn test_no_brackets() {
        assert_eq!(texts(&hint_spans("just text")), vec!["just text"]);
    }

    #[test]
    fn test_unclosed_bracket_is_text() {
        assert_eq!(texts(&hint_spans("[Esc close")), vec!["[Esc close"]);
    }
}
