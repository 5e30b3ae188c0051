//! Collection tree: node model, visibility, filtering and loading

pub mod error;
pub mod filter;
pub mod store;
pub mod types;
pub mod visibility;

pub use error::StoreError;
pub use filter::apply_filter;
pub use store::{CollectionFile, RequestRecord, RequestStore, SavedResponse};
pub use types::{CollectionNode, NodeKind, RequestRef};
pub use visibility::{recompute, toggle_expanded, visible_indices, TreeIndex};
