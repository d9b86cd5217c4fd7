//! Item Catalog
//!
//! A personal reference catalog kept as one markdown document per item
//! inside a vault of folders.
//!
//! Layered architecture:
//! - domain: Core entities, paths and query state
//! - codec: Markdown document encoding and decoding
//! - repository: Document store abstraction and the item repository
//! - tree / filter / stats: Derived views over the catalog
//! - config: Persisted user settings
//! - commands: Host-facing command handlers

pub mod codec;
pub mod commands;
pub mod config;
pub mod domain;
pub mod filter;
pub mod repository;
pub mod stats;
pub mod tree;

pub use commands::AppState;
pub use config::Settings;
pub use domain::{DomainError, DomainResult, Item, ItemEntry, ItemQuery, TreeNode};
pub use repository::{DocumentStore, FsDocumentStore, ItemRepository, MemoryDocumentStore};
