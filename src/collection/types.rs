//! Collection tree node types
//!
//! The tree is stored as one flat, pre-ordered sequence. Parent/child
//! relationships are implicit: a node's parent is the nearest preceding node
//! of an enclosing kind (see [`super::visibility::TreeIndex`]).

use std::fmt;

/// Kind of a collection tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Top-level folder
    Folder,
    /// Grouping of requests sharing a tag, under a folder or at root
    TagGroup,
    /// A single request
    Leaf,
}

impl NodeKind {
    /// Whether nodes of this kind can contain other nodes
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Folder | Self::TagGroup)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Folder => "folder",
            Self::TagGroup => "tag",
            Self::Leaf => "request",
        };
        f.write_str(name)
    }
}

/// Opaque handle to the request record behind a leaf node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestRef(pub(crate) usize);

impl RequestRef {
    /// Index into the owning store's records
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One entry of the flattened collection tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionNode {
    /// Display name
    pub name: String,
    /// Node kind
    pub kind: NodeKind,
    /// Expansion state (meaningful for folders and tag groups)
    pub expanded: bool,
    /// Derived from ancestor expansion, see [`super::visibility::recompute`]
    pub visible: bool,
    /// Request handle, set for leaves only
    pub request: Option<RequestRef>,
}

impl CollectionNode {
    /// Create a collapsed folder node
    #[must_use]
    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Folder,
            expanded: false,
            visible: true,
            request: None,
        }
    }

    /// Create a collapsed tag group node
    #[must_use]
    pub fn tag_group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::TagGroup,
            expanded: false,
            visible: true,
            request: None,
        }
    }

    /// Create a leaf node referring to a request record
    #[must_use]
    pub fn leaf(name: impl Into<String>, request: RequestRef) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Leaf,
            expanded: false,
            visible: true,
            request: Some(request),
        }
    }

    /// Builder-style expansion flag
    #[must_use]
    pub const fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Whether this is a leaf node
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf)
    }
}
