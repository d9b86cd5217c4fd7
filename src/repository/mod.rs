//! Repository Layer
//!
//! Document-store abstraction, its implementations, and the item repository.

mod fs_store;
mod item_repo;
mod memory_store;
mod traits;

#[cfg(test)]
mod tests;

pub use fs_store::FsDocumentStore;
pub use item_repo::ItemRepository;
pub use memory_store::MemoryDocumentStore;
pub use traits::{DocumentStore, EntryKind};
