//! Key hints for each focus context.

/// Where keyboard input is currently routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Typing a file path.
    FileInput,
    /// A column dropdown is focused but collapsed.
    ColumnSelect,
    /// A column dropdown's option list is open.
    ColumnList,
    /// One of the CRS buttons is focused.
    CrsButton,
    /// The transform button is focused.
    TransformButton,
    /// The CRS picker is open.
    CrsModal,
    /// The help screen is shown.
    Help,
}

/// Get the hint line for a context. Keys are wrapped in brackets.
///
/// Without `vim_mode` the dropdown hints show arrow keys instead of h/j/k/l.
pub fn context_hints(context: KeyContext, vim_mode: bool) -> &'static str {
    match context {
        KeyContext::FileInput => {
            "[Enter] load  [Tab] next  [Ctrl+U] clear  [Esc] leave field  [F1] help"
        }
        KeyContext::ColumnSelect if vim_mode => {
            "[Enter] open  [h/l] cycle  [Tab] next  [?] help  [q] quit"
        }
        KeyContext::ColumnSelect => "[Enter] open  [←/→] cycle  [Tab] next  [?] help  [q] quit",
        KeyContext::ColumnList if vim_mode => "[j/k] move  [Enter] choose  [Esc] close",
        KeyContext::ColumnList => "[↑/↓] move  [Enter] choose  [Esc] close",
        KeyContext::CrsButton => "[Enter] choose CRS  [Tab] next  [?] help  [q] quit",
        KeyContext::TransformButton => "[Enter] transform  [Tab] next  [?] help  [q] quit",
        KeyContext::CrsModal => "[type] search  [↑/↓] move  [Enter] select  [Esc] cancel",
        KeyContext::Help => "[Esc/q/?/F1] close help",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_context_has_hints() {
        for context in [
            KeyContext::FileInput,
            KeyContext::ColumnSelect,
            KeyContext::ColumnList,
            KeyContext::CrsButton,
            KeyContext::TransformButton,
            KeyContext::CrsModal,
            KeyContext::Help,
        ] {
            assert!(context_hints(context, true).starts_with('['));
            assert!(context_hints(context, false).starts_with('['));
        }
    }

    #[test]
    fn test_column_hints_follow_vim_mode() {
        assert!(context_hints(KeyContext::ColumnSelect, true).contains("[h/l]"));
        let arrows = context_hints(KeyContext::ColumnSelect, false);
        assert!(arrows.contains("[←/→]"));
        assert!(!arrows.contains("h/l"));
        assert!(context_hints(KeyContext::ColumnList, false).contains("[↑/↓]"));
    }

    #[test]
    fn test_file_input_hints_mention_help() {
        assert!(context_hints(KeyContext::FileInput, true).contains("[F1] help"));
    }
}
