//! Modal query input with its suggestion list
//!
//! Renders a [`QueryFilterSession`]: the expression being typed, the
//! suggestions for it and the keys that drive them.

use super::filter_bar::input_line;
use crate::session::QueryFilterSession;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Widget},
};

/// Maximum suggestion rows shown at once
const MAX_SUGGESTION_ROWS: usize = 8;

/// Query filter modal
pub struct QueryInputModal<'a> {
    session: &'a QueryFilterSession,
    theme: &'a Theme,
}

impl<'a> QueryInputModal<'a> {
    /// Create a modal over `session`
    #[must_use]
    pub const fn new(session: &'a QueryFilterSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }

    /// Calculate centered rectangle for modal
    fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect::new(x, y, width.min(area.width), height.min(area.height))
    }

    /// First suggestion row such that the selected one stays in view
    const fn window_start(selected: usize, total: usize) -> usize {
        if total <= MAX_SUGGESTION_ROWS || selected < MAX_SUGGESTION_ROWS {
            0
        } else {
            selected + 1 - MAX_SUGGESTION_ROWS
        }
    }

    /// Build the suggestion list
    fn build_suggestions(&self) -> Vec<ListItem<'a>> {
        let suggestions = self.session.suggestions();
        let selected = self.session.selected_index();
        let start = Self::window_start(selected, suggestions.len());

        suggestions
            .iter()
            .enumerate()
            .skip(start)
            .take(MAX_SUGGESTION_ROWS)
            .map(|(idx, suggestion)| {
                if idx == selected {
                    ListItem::new(Line::from(vec![
                        Span::styled("▶ ", self.theme.cursor_style()),
                        Span::styled(suggestion.as_str(), self.theme.selected_style()),
                    ]))
                } else {
                    ListItem::new(Line::from(vec![
                        Span::raw("  "),
                        Span::raw(suggestion.as_str()),
                    ]))
                }
            })
            .collect()
    }
}

impl Widget for QueryInputModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 64.min(area.width.saturating_sub(4));
        let show_suggestions = !self.session.suggestions().is_empty();

        #[allow(clippy::cast_possible_truncation)]
        let suggestions_height = if show_suggestions {
            self.session.suggestions().len().min(MAX_SUGGESTION_ROWS) as u16 + 2
        } else {
            0
        };
        // 2 (modal borders) + 3 (input field) + 1 (help text)
        let height = 6 + suggestions_height;

        let modal_area = Self::centered_rect(width, height, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(" Query ")
            .title_alignment(Alignment::Center);

        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let mut constraints = vec![Constraint::Length(3)];
        if show_suggestions {
            constraints.push(Constraint::Length(suggestions_height));
        }
        constraints.push(Constraint::Length(1));
        let chunks = Layout::vertical(constraints).split(inner);

        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let input_inner = input_block.inner(chunks[0]);
        input_block.render(chunks[0], buf);

        let line = input_line(
            self.session.text(),
            self.session.cursor(),
            input_inner.width as usize,
            self.theme.caret_style(),
        );
        Paragraph::new(line).render(input_inner, buf);

        let help_text = if show_suggestions {
            let total = self.session.suggestions().len();
            List::new(self.build_suggestions())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(self.theme.border_style())
                        .title(format!(" Suggestions ({total}) ")),
                )
                .render(chunks[1], buf);
            "TAB: accept | ↑↓: navigate | Enter: apply | ESC: cancel"
        } else {
            "Enter: apply | ESC: cancel"
        };

        Paragraph::new(help_text)
            .style(self.theme.dimmed_style())
            .alignment(Alignment::Center)
            .render(chunks[chunks.len() - 1], buf);
    }
}
