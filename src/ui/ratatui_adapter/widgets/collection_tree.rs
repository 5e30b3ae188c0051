//! Collection tree widget
//!
//! Renders the visible nodes of the flattened collection with indentation
//! derived from [`TreeIndex`] depths. Containers show an expansion marker;
//! leaves show the HTTP method of their request.

use crate::collection::{CollectionNode, NodeKind, RequestStore, TreeIndex};
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Widget},
};

/// Width of the method column for leaves
const METHOD_WIDTH: usize = 7;

/// Tree widget over a node sequence
pub struct CollectionTree<'a> {
    nodes: &'a [CollectionNode],
    visible: &'a [usize],
    store: &'a RequestStore,
    theme: &'a Theme,
    /// Cursor position among `visible`
    selected: usize,
    scroll_offset: usize,
    block: Option<Block<'a>>,
}

impl<'a> CollectionTree<'a> {
    /// Create a tree over `visible` (indices into `nodes`)
    #[must_use]
    pub const fn new(
        nodes: &'a [CollectionNode],
        visible: &'a [usize],
        store: &'a RequestStore,
        theme: &'a Theme,
    ) -> Self {
        Self {
            nodes,
            visible,
            store,
            theme,
            selected: 0,
            scroll_offset: 0,
            block: None,
        }
    }

    /// Set the highlighted row
    #[must_use]
    pub const fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    /// Set the first rendered row
    #[must_use]
    pub const fn scroll(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Wrap the tree in a block
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn row(&self, idx: usize, depth: usize, is_selected: bool) -> Line<'a> {
        let node = &self.nodes[idx];
        let mut spans = vec![Span::raw("  ".repeat(depth))];

        match node.kind {
            NodeKind::Folder | NodeKind::TagGroup => {
                let marker = if node.expanded { "▾ " } else { "▸ " };
                spans.push(Span::styled(marker, self.theme.dimmed_style()));
                if node.kind == NodeKind::TagGroup {
                    spans.push(Span::styled("#", self.theme.node_style(node.kind)));
                }
            }
            NodeKind::Leaf => {
                let method = node
                    .request
                    .and_then(|request| self.store.get(request))
                    .map_or("", |record| record.method.as_str());
                spans.push(Span::styled(
                    format!("{method:<METHOD_WIDTH$}"),
                    self.theme.method_style(method),
                ));
            }
        }

        let name_style = if is_selected {
            self.theme.selected_style()
        } else {
            self.theme.node_style(node.kind)
        };
        spans.push(Span::styled(node.name.as_str(), name_style));

        Line::from(spans)
    }
}

impl Widget for CollectionTree<'_> {
    fn render(mut self, area: Rect, buf: &mut Buffer) {
        let area = self.block.take().map_or(area, |b| {
            let inner = b.inner(area);
            b.render(area, buf);
            inner
        });

        if area.height == 0 {
            return;
        }

        if self.visible.is_empty() {
            let line = Line::styled("No matching requests", self.theme.dimmed_style());
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let index = TreeIndex::build(self.nodes);
        let start = self.scroll_offset.min(self.visible.len());
        let end = (start + area.height as usize).min(self.visible.len());

        for (row, &idx) in self.visible[start..end].iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let y = area.y + row as u16;
            let line = self.row(idx, index.depth(idx), start + row == self.selected);
            buf.set_line(area.x, y, &line, area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::visible_indices;
    use crate::testing::SAMPLE_COLLECTION;

    fn rows(buf: &Buffer) -> Vec<String> {
        let width = buf.area.width as usize;
        buf.content()
            .chunks(width)
            .map(|cells| cells.iter().map(|c| c.symbol()).collect::<String>().trim_end().to_string())
            .collect()
    }

    #[test]
    fn test_renders_collapsed_roots() {
        let (nodes, store) = RequestStore::from_json_str(SAMPLE_COLLECTION).unwrap();
        let visible = visible_indices(&nodes);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);

        CollectionTree::new(&nodes, &visible, &store, &theme).render(area, &mut buf);

        assert_eq!(rows(&buf), vec!["▸ #public", "▸ Users", "▸ Orders", ""]);
    }

    #[test]
    fn test_leaves_are_indented_with_method() {
        let (mut nodes, store) = RequestStore::from_json_str(SAMPLE_COLLECTION).unwrap();
        for node in &mut nodes {
            node.expanded = true;
        }
        crate::collection::recompute(&mut nodes);
        let visible = visible_indices(&nodes);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);

        CollectionTree::new(&nodes, &visible, &store, &theme).render(area, &mut buf);

        let rows = rows(&buf);
        assert_eq!(rows[1], "  GET    Health Check");
        assert_eq!(rows[5], "    DELETE Delete User");
    }

    #[test]
    fn test_scroll_offset() {
        let (nodes, store) = RequestStore::from_json_str(SAMPLE_COLLECTION).unwrap();
        let visible = visible_indices(&nodes);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 30, 2);
        let mut buf = Buffer::empty(area);

        CollectionTree::new(&nodes, &visible, &store, &theme)
            .scroll(1)
            .render(area, &mut buf);

        assert_eq!(rows(&buf), vec!["▸ Users", "▸ Orders"]);
    }

    #[test]
    fn test_empty_message() {
        let (nodes, store) = RequestStore::from_json_str(SAMPLE_COLLECTION).unwrap();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 30, 2);
        let mut buf = Buffer::empty(area);

        CollectionTree::new(&nodes, &[], &store, &theme).render(area, &mut buf);

        assert_eq!(rows(&buf)[0], "No matching requests");
    }
}
