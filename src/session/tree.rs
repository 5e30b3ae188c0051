//! Tree-scope filter session

use crate::collection::{apply_filter, CollectionNode};
use crate::text::{EditCommand, LineEditor};
use tracing::debug;

/// Live substring filter over the collection tree
///
/// The first non-empty filter snapshots the live node sequence; every later
/// keystroke re-filters that snapshot, never the previous output. Exiting
/// hands the snapshot back for restoration.
#[derive(Debug, Clone, Default)]
pub struct TreeFilterSession {
    active: bool,
    editor: LineEditor,
    original: Option<Vec<CollectionNode>>,
    last_persisted: String,
}

impl TreeFilterSession {
    /// Create an inactive session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate with the text persisted by the previous exit
    ///
    /// Returns the filtered sequence when that text is non-empty. An already
    /// active session keeps its current text and filter.
    pub fn start(&mut self, live: &[CollectionNode]) -> Option<Vec<CollectionNode>> {
        if self.active {
            return None;
        }
        self.active = true;
        self.editor.set_text(self.last_persisted.clone());
        debug!(text = self.editor.text(), "tree filter started");

        if self.editor.is_empty() {
            None
        } else {
            Some(self.refilter(live))
        }
    }

    /// Apply an editing command
    ///
    /// Returns the new filtered sequence when the text changed; `live` is only
    /// read when no snapshot has been taken yet.
    pub fn edit(
        &mut self,
        command: EditCommand,
        live: &[CollectionNode],
    ) -> Option<Vec<CollectionNode>> {
        if !self.active || !self.editor.apply(command) {
            return None;
        }
        Some(self.refilter(live))
    }

    fn refilter(&mut self, live: &[CollectionNode]) -> Vec<CollectionNode> {
        let text = self.editor.text();
        let basis = if text.is_empty() {
            self.original.as_deref().unwrap_or(live)
        } else {
            self.original.get_or_insert_with(|| live.to_vec()).as_slice()
        };
        apply_filter(basis, text)
    }

    /// Deactivate, persisting the text
    ///
    /// Returns the original sequence to restore if a filter was applied.
    pub fn exit(&mut self) -> Option<Vec<CollectionNode>> {
        self.last_persisted = self.editor.text().to_string();
        self.active = false;
        debug!(persisted = %self.last_persisted, "tree filter exited");
        self.original.take()
    }

    /// Whether the session is active
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the live tree currently shows filtered output
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        self.original.is_some()
    }

    /// Current filter text
    #[must_use]
    pub fn text(&self) -> &str {
        self.editor.text()
    }

    /// Cursor position in characters
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.editor.cursor()
    }

    /// Text that the next [`Self::start`] restores
    #[must_use]
    pub fn persisted_input(&self) -> &str {
        &self.last_persisted
    }
}
