//! Ratatui widgets for the collection browser

mod collection_tree;
mod filter_bar;
mod help_bar;
mod query_input;
mod response_pane;
mod status_bar;

pub use collection_tree::CollectionTree;
pub use filter_bar::FilterBar;
pub use help_bar::{HelpBar, KeyHint};
pub use query_input::QueryInputModal;
pub use response_pane::{RequestSummary, ResponsePane};
pub use status_bar::StatusBar;
