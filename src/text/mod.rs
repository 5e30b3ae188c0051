//! Text input primitives shared by both filter scopes
//!
//! - [`navigator`]: word-boundary arithmetic over `.`, `[` and `]`
//! - [`editor`]: the line buffer and cursor driven by editing keys

pub mod editor;
pub mod navigator;

pub use editor::{EditCommand, LineEditor};
pub use navigator::{find_next_boundary, find_previous_boundary};
