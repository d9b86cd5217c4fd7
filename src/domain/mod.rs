//! Domain Layer
//!
//! Contains the catalog entities, derived index types and query state.
//! This layer does no I/O.

mod error;
mod item;
mod link_metadata;
mod query;
mod tree_node;
pub mod vault_path;

pub use error::{DomainError, DomainResult};
pub use item::{now_timestamp, Item, ItemEntry, DEFAULT_ITEM_TYPE};
pub use link_metadata::{LinkMetadata, MetadataFetcher};
pub use query::{FilterMode, FolderFilterState, ItemQuery};
pub use tree_node::{find_node, FolderNode, ItemNode, TreeNode};
