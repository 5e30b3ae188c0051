//! Request summary and response pane widgets

use crate::collection::RequestRecord;
use crate::ui::ratatui_adapter::state::ResponseView;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Method, URL and headers of the opened request
pub struct RequestSummary<'a> {
    record: Option<&'a RequestRecord>,
    theme: &'a Theme,
}

impl<'a> RequestSummary<'a> {
    /// Create a summary for `record`
    #[must_use]
    pub const fn new(record: Option<&'a RequestRecord>, theme: &'a Theme) -> Self {
        Self { record, theme }
    }
}

impl Widget for RequestSummary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Request ");

        let lines = match self.record {
            None => vec![Line::styled(
                "Select a request and press Enter",
                self.theme.dimmed_style(),
            )],
            Some(record) => {
                let mut lines = vec![Line::from(vec![
                    Span::styled(record.method.as_str(), self.theme.method_style(&record.method)),
                    Span::raw(" "),
                    Span::raw(record.url.as_str()),
                ])];
                lines.extend(record.headers.iter().map(|(name, value)| {
                    Line::from(vec![
                        Span::styled(format!("{name}: "), self.theme.dimmed_style()),
                        Span::raw(value.as_str()),
                    ])
                }));
                if let Some(body) = &record.body {
                    lines.push(Line::styled(body.as_str(), self.theme.dimmed_style()));
                }
                lines
            }
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

/// Saved response body, or the output of the applied query
pub struct ResponsePane<'a> {
    record: Option<&'a RequestRecord>,
    view: &'a ResponseView,
    applied_query: Option<&'a str>,
    theme: &'a Theme,
    scroll: u16,
    pending: bool,
}

impl<'a> ResponsePane<'a> {
    /// Create a response pane
    #[must_use]
    pub const fn new(record: Option<&'a RequestRecord>, view: &'a ResponseView, theme: &'a Theme) -> Self {
        Self {
            record,
            view,
            applied_query: None,
            theme,
            scroll: 0,
            pending: false,
        }
    }

    /// Show the applied query in the title
    #[must_use]
    pub const fn applied_query(mut self, query: Option<&'a str>) -> Self {
        self.applied_query = query;
        self
    }

    /// Mark a query evaluation as in flight
    #[must_use]
    pub const fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }

    /// Set scroll offset
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll as u16;
        self
    }

    fn text_lines(text: &'a str, style: Style) -> Vec<Line<'a>> {
        text.lines().map(|line| Line::styled(line, style)).collect()
    }

    fn title(&self) -> String {
        let status = self
            .record
            .and_then(|record| record.response.as_ref())
            .map(|response| format!(" {}", response.status))
            .unwrap_or_default();

        match (self.view, self.applied_query) {
            (ResponseView::Filtered(_), Some(query)) => format!(" Response{status} | {query} "),
            (ResponseView::Error(_), _) => format!(" Response{status} | error "),
            _ if self.pending => format!(" Response{status} | running… "),
            _ => format!(" Response{status} "),
        }
    }
}

impl Widget for ResponsePane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = match (self.view, self.record.and_then(|r| r.response.as_ref())) {
            (ResponseView::Filtered(output), _) => Self::text_lines(output, self.theme.normal_style()),
            (ResponseView::Error(message), _) => Self::text_lines(message, self.theme.error_style()),
            (ResponseView::Raw, Some(response)) => {
                let mut lines = Vec::new();
                if let Some(content_type) = &response.content_type {
                    lines.push(Line::styled(content_type.as_str(), self.theme.dimmed_style()));
                }
                lines.extend(Self::text_lines(&response.body, self.theme.normal_style()));
                lines
            }
            (ResponseView::Raw, None) if self.record.is_some() => {
                vec![Line::styled("No saved response", self.theme.dimmed_style())]
            }
            (ResponseView::Raw, None) => Vec::new(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(self.title());

        Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll, 0))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
