//! Filter bar widget for the tree filter input

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render `text` with a caret at char index `cursor`, scrolled to fit `width`
pub(crate) fn input_line(text: &str, cursor: usize, width: usize, caret: Style) -> Line<'static> {
    let total_chars = text.chars().count();

    let start_char = if total_chars < width {
        0
    } else {
        let half_width = width / 2;
        if cursor <= half_width {
            0
        } else if cursor + half_width >= total_chars {
            (total_chars + 1).saturating_sub(width)
        } else {
            cursor.saturating_sub(half_width)
        }
    };
    let cursor_offset = cursor - start_char.min(cursor);

    let visible: Vec<char> = text.chars().skip(start_char).take(width).collect();
    let before: String = visible.iter().take(cursor_offset).collect();
    let under: String = visible.get(cursor_offset).map_or_else(|| " ".to_string(), char::to_string);
    let after: String = visible.iter().skip(cursor_offset + 1).collect();

    Line::from(vec![Span::raw(before), Span::styled(under, caret), Span::raw(after)])
}

/// Filter bar widget that displays the tree filter text
pub struct FilterBar<'a> {
    /// Current filter text
    text: &'a str,
    /// Cursor position (character index)
    cursor: usize,
    /// Collection name shown as the title
    title: &'a str,
    /// Theme for styling
    theme: &'a Theme,
    /// Whether the widget has focus
    focused: bool,
}

impl<'a> FilterBar<'a> {
    /// Create a new filter bar widget
    #[must_use]
    pub const fn new(text: &'a str, cursor: usize, title: &'a str, theme: &'a Theme) -> Self {
        Self {
            text,
            cursor,
            title,
            theme,
            focused: false,
        }
    }

    /// Set focus state
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.cursor_style()
        } else {
            self.theme.border_style()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.title));

        let inner = block.inner(area);
        block.render(area, buf);

        let prompt = Span::styled("/ ", self.theme.dimmed_style());
        let line = if self.focused {
            let width = (inner.width as usize).saturating_sub(2);
            let mut input = input_line(self.text, self.cursor, width, self.theme.caret_style());
            input.spans.insert(0, prompt);
            input
        } else if self.text.is_empty() {
            Line::from(vec![
                prompt,
                Span::styled("press / to filter requests", self.theme.dimmed_style()),
            ])
        } else {
            Line::from(vec![prompt, Span::styled(self.text, self.theme.info_style())])
        };

        Paragraph::new(line).render(inner, buf);
    }
}
