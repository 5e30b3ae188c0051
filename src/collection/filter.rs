//! Live substring filtering of the collection tree
//!
//! Filtering always starts from the untouched original sequence; callers must
//! never feed a filtered result back in, otherwise narrowing becomes
//! irreversible as the user backspaces.
//!
//! # Examples
//!
//! ```
//! use reqtui::collection::apply_filter;
//! # use reqtui::collection::RequestStore;
//! # let (nodes, _) = RequestStore::from_json_str(r#"{
//! #   "folders": [{ "name": "A", "tags": [{ "name": "t1", "requests": [
//! #     { "name": "Get Users", "url": "/users" },
//! #     { "name": "Post Users", "method": "POST", "url": "/users" }
//! #   ]}]}]
//! # }"#).unwrap();
//!
//! let filtered = apply_filter(&nodes, "post");
//! let names: Vec<&str> = filtered.iter().map(|n| n.name.as_str()).collect();
//! assert_eq!(names, ["A", "t1", "Post Users"]);
//! assert!(filtered[0].expanded && filtered[1].expanded);
//! ```

use super::types::{CollectionNode, NodeKind};
use super::visibility::recompute;
use tracing::debug;

/// Filter `original` by case-insensitive substring match on leaf names
///
/// - Empty text: a copy of `original` with every folder and tag group
///   collapsed.
/// - Otherwise: only matching leaves, each preceded (once per scope) by its
///   folder and tag group, both forced expanded. Containers without a
///   matching leaf are dropped.
///
/// The text is matched literally; no character has special meaning.
#[must_use]
pub fn apply_filter(original: &[CollectionNode], text: &str) -> Vec<CollectionNode> {
    let mut output = if text.is_empty() {
        collapse_all(original)
    } else {
        filter_matches(original, &text.to_lowercase())
    };

    recompute(&mut output);
    debug!(
        filter = text,
        input = original.len(),
        output = output.len(),
        "applied collection filter"
    );
    output
}

fn collapse_all(original: &[CollectionNode]) -> Vec<CollectionNode> {
    original
        .iter()
        .map(|node| {
            let mut node = node.clone();
            if node.kind.is_container() {
                node.expanded = false;
            }
            node
        })
        .collect()
}

/// Ancestor currently in scope during the forward pass
struct Ancestor<'a> {
    node: &'a CollectionNode,
    emitted: bool,
}

impl<'a> Ancestor<'a> {
    const fn new(node: &'a CollectionNode) -> Self {
        Self {
            node,
            emitted: false,
        }
    }

    /// Emit the ancestor (expanded) the first time a match needs it
    fn emit_once(&mut self, output: &mut Vec<CollectionNode>) {
        if !self.emitted {
            output.push(self.node.clone().with_expanded(true));
            self.emitted = true;
        }
    }
}

fn filter_matches(original: &[CollectionNode], needle: &str) -> Vec<CollectionNode> {
    let mut output = Vec::new();
    let mut folder: Option<Ancestor<'_>> = None;
    let mut group: Option<Ancestor<'_>> = None;

    for node in original {
        match node.kind {
            NodeKind::Folder => {
                folder = Some(Ancestor::new(node));
                group = None;
            }
            NodeKind::TagGroup => group = Some(Ancestor::new(node)),
            NodeKind::Leaf => {
                if !node.name.to_lowercase().contains(needle) {
                    continue;
                }
                if let Some(folder) = folder.as_mut() {
                    folder.emit_once(&mut output);
                }
                if let Some(group) = group.as_mut() {
                    group.emit_once(&mut output);
                }
                output.push(node.clone());
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{folder, leaf, names, sample_nodes, tag_group};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filter_keeps_ancestors_of_match() {
        let nodes = vec![
            folder("A"),
            tag_group("t1"),
            leaf("Get Users", 0),
            leaf("Post Users", 1),
        ];

        let filtered = apply_filter(&nodes, "post");

        assert_eq!(
            filtered,
            vec![
                folder("A").with_expanded(true),
                tag_group("t1").with_expanded(true),
                leaf("Post Users", 1),
            ]
        );
        assert!(filtered.iter().all(|n| n.visible));
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let filtered = apply_filter(&sample_nodes(), "USER");
        assert_eq!(
            names(&filtered),
            vec!["Users", "List Users", "admin", "Delete User", "Post Users"]
        );
    }

    #[test]
    fn test_ancestors_emitted_once_per_scope() {
        let filtered = apply_filter(&sample_nodes(), "user");
        let users = filtered.iter().filter(|n| n.name == "Users").count();
        let admin = filtered.iter().filter(|n| n.name == "admin").count();
        assert_eq!(users, 1);
        assert_eq!(admin, 1);
    }

    #[test]
    fn test_root_tag_group_match() {
        let filtered = apply_filter(&sample_nodes(), "health");
        assert_eq!(names(&filtered), vec!["public", "Health Check"]);
        assert!(filtered[0].expanded);
        assert!(filtered[1].visible);
    }

    #[test]
    fn test_no_match_yields_empty() {
        assert!(apply_filter(&sample_nodes(), "nothing-here").is_empty());
    }

    #[test]
    fn test_special_characters_match_literally() {
        let nodes = vec![folder("F"), leaf("GET /users/{id}", 0), leaf("GET /users", 1)];
        let filtered = apply_filter(&nodes, "{id}");
        assert_eq!(names(&filtered), vec!["F", "GET /users/{id}"]);

        assert!(apply_filter(&nodes, ".*").is_empty());
    }

    #[test]
    fn test_empty_filter_collapses_everything() {
        let mut nodes = sample_nodes();
        for node in &mut nodes {
            node.expanded = true;
        }

        let restored = apply_filter(&nodes, "");

        assert_eq!(restored.len(), nodes.len());
        for (before, after) in nodes.iter().zip(&restored) {
            assert_eq!(before.name, after.name);
            assert_eq!(before.kind, after.kind);
            assert_eq!(before.request, after.request);
            if after.kind.is_container() {
                assert!(!after.expanded);
            }
        }
    }

    #[test]
    fn test_repeated_filtering_of_original_is_stable() {
        let nodes = sample_nodes();
        let first = apply_filter(&nodes, "o");
        let second = apply_filter(&nodes, "o");
        assert_eq!(first, second);
    }

    #[test]
    fn test_leaf_directly_under_folder() {
        let filtered = apply_filter(&sample_nodes(), "list");
        assert_eq!(names(&filtered), vec!["Users", "List Users"]);
    }
}
