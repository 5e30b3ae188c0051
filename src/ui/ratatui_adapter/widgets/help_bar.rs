//! Help bar widget for displaying keybind hints

use crate::ui::ratatui_adapter::state::Mode;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// Key combination (e.g., "Tab", "Ctrl+W")
    pub key: String,
    /// Action description (e.g., "accept", "filter")
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint
    #[must_use]
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    /// Hints to display
    hints: &'a [KeyHint],
    /// Theme for styling
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    /// Create a new help bar widget
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }

    /// Hints for the keys available in `mode`
    #[must_use]
    pub fn hints_for(mode: Mode) -> Vec<KeyHint> {
        match mode {
            Mode::Normal => vec![
                KeyHint::new("↑/↓", "navigate"),
                KeyHint::new("Enter", "open/toggle"),
                KeyHint::new("/", "filter"),
                KeyHint::new("f", "query"),
                KeyHint::new("PgUp/PgDn", "scroll"),
                KeyHint::new("Esc", "clear"),
                KeyHint::new("q", "quit"),
            ],
            Mode::TreeFilter => vec![
                KeyHint::new("Enter", "keep"),
                KeyHint::new("Esc", "restore"),
                KeyHint::new("Ctrl+W", "delete word"),
                KeyHint::new("Ctrl+←/→", "word"),
            ],
            Mode::QueryFilter => vec![
                KeyHint::new("↑/↓", "suggestion"),
                KeyHint::new("Tab", "accept"),
                KeyHint::new("Enter", "apply"),
                KeyHint::new("Esc", "cancel"),
            ],
        }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key.as_str(), self.theme.cursor_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(hint.action.as_str()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_follow_mode() {
        let normal = HelpBar::hints_for(Mode::Normal);
        assert!(normal.iter().any(|h| h.key == "/"));

        let query = HelpBar::hints_for(Mode::QueryFilter);
        assert!(query.iter().any(|h| h.key == "Tab" && h.action == "accept"));
    }

    #[test]
    fn test_render_hints() {
        let theme = Theme::default();
        let hints = vec![KeyHint::new("q", "quit")];
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        HelpBar::new(&hints, &theme).render(area, &mut buf);

        let content: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(content.starts_with("q:quit"));
    }
}
