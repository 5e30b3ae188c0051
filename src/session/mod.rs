//! Filter sessions
//!
//! One independent session per [`Scope`], created once and reused across
//! activations. Callers select a session explicitly through
//! [`FilterSessions::get_mut`].

pub mod query;
pub mod tree;

pub use query::{ApplyOutcome, ApplyRequest, QueryFilterSession};
pub use tree::TreeFilterSession;

use std::fmt;

/// Which filter a session drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Substring filter over the collection tree
    Tree,
    /// Expression filter over the response body
    Query,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree => f.write_str("tree"),
            Self::Query => f.write_str("query"),
        }
    }
}

/// Mutable access to the session of one scope
#[derive(Debug)]
pub enum SessionMut<'a> {
    /// Tree-scope session
    Tree(&'a mut TreeFilterSession),
    /// Query-scope session
    Query(&'a mut QueryFilterSession),
}

impl SessionMut<'_> {
    /// Scope of the referenced session
    #[must_use]
    pub const fn scope(&self) -> Scope {
        match self {
            Self::Tree(_) => Scope::Tree,
            Self::Query(_) => Scope::Query,
        }
    }

    /// Whether the referenced session is active
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            Self::Tree(session) => session.is_active(),
            Self::Query(session) => session.is_active(),
        }
    }

    /// Current input text
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Tree(session) => session.text(),
            Self::Query(session) => session.text(),
        }
    }

    /// Cursor position in characters
    #[must_use]
    pub fn cursor(&self) -> usize {
        match self {
            Self::Tree(session) => session.cursor(),
            Self::Query(session) => session.cursor(),
        }
    }
}

/// Both filter sessions of the application
#[derive(Debug, Clone, Default)]
pub struct FilterSessions {
    tree: TreeFilterSession,
    query: QueryFilterSession,
}

impl FilterSessions {
    /// Create both sessions, inactive
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session of `scope`
    pub fn get_mut(&mut self, scope: Scope) -> SessionMut<'_> {
        match scope {
            Scope::Tree => SessionMut::Tree(&mut self.tree),
            Scope::Query => SessionMut::Query(&mut self.query),
        }
    }

    /// Tree-scope session
    #[must_use]
    pub const fn tree(&self) -> &TreeFilterSession {
        &self.tree
    }

    /// Tree-scope session, mutable
    pub fn tree_mut(&mut self) -> &mut TreeFilterSession {
        &mut self.tree
    }

    /// Query-scope session
    #[must_use]
    pub const fn query(&self) -> &QueryFilterSession {
        &self.query
    }

    /// Query-scope session, mutable
    pub fn query_mut(&mut self) -> &mut QueryFilterSession {
        &mut self.query
    }

    /// Scope whose session is currently active, query first
    #[must_use]
    pub const fn active_scope(&self) -> Option<Scope> {
        if self.query.is_active() {
            Some(Scope::Query)
        } else if self.tree.is_active() {
            Some(Scope::Tree)
        } else {
            None
        }
    }
}
