//! Color theme definitions for the ratatui TUI
//!
//! Defines colors and styles used throughout the application.

use crate::collection::NodeKind;
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color for the highlighted tree row
    pub selection_bg: Color,
    /// Foreground color for the highlighted tree row
    pub selection_fg: Color,
    /// Color for the cursor indicator and focused borders
    pub cursor: Color,
    /// Color for success messages
    pub success: Color,
    /// Color for error messages
    pub error: Color,
    /// Color for warning messages
    pub warning: Color,
    /// Color for info messages
    pub info: Color,
    /// Color for borders
    pub border: Color,
    /// Color for dimmed/inactive text
    pub dimmed: Color,
    /// Color for folder names
    pub folder: Color,
    /// Color for tag group names
    pub tag_group: Color,
    /// Color for request names
    pub request: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            cursor: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Cyan,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
            folder: Color::Blue,
            tag_group: Color::Magenta,
            request: Color::White,
        }
    }

    /// Style for the highlighted tree row
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for plain text
    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default()
    }

    /// Style for the cursor indicator and focused borders
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the text cursor cell
    #[must_use]
    pub fn caret_style(&self) -> Style {
        Style::default()
            .bg(self.cursor)
            .fg(Color::Black)
            .add_modifier(Modifier::SLOW_BLINK)
    }

    /// Style for success messages
    #[must_use]
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Style for error messages
    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Style for warning messages
    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Style for info messages
    #[must_use]
    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    /// Style for a tree node name by kind
    #[must_use]
    pub fn node_style(&self, kind: NodeKind) -> Style {
        match kind {
            NodeKind::Folder => Style::default()
                .fg(self.folder)
                .add_modifier(Modifier::BOLD),
            NodeKind::TagGroup => Style::default().fg(self.tag_group),
            NodeKind::Leaf => Style::default().fg(self.request),
        }
    }

    /// Style for an HTTP method label
    #[must_use]
    pub fn method_style(&self, method: &str) -> Style {
        let color = match method {
            "GET" => self.success,
            "POST" => self.warning,
            "PUT" | "PATCH" => self.info,
            "DELETE" => self.error,
            _ => self.dimmed,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.method_style("GET").fg, Some(Color::Green));
        assert_eq!(theme.method_style("DELETE").fg, Some(Color::Red));
        assert_eq!(theme.method_style("OPTIONS").fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_folder_is_bold() {
        let style = Theme::default().node_style(NodeKind::Folder);
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }
}
