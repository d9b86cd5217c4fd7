//! Repository Layer - Core Traits
//!
//! Defines the document-store primitives the catalog is built on.
//! Implementations can use the filesystem, memory, or a host application's
//! vault API.

use async_trait::async_trait;

use crate::domain::{vault_path, DomainResult};

/// What lives at a vault path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Document,
    Folder,
}

/// Scoped operations over a hierarchical document store.
///
/// Paths are vault-relative and `/`-separated. Each call is atomic only as
/// far as the backing store makes single-document operations atomic; there
/// is no locking across calls and the last writer wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Kind of entry at `path`, or `None` if nothing is there
    async fn entry_kind(&self, path: &str) -> DomainResult<Option<EntryKind>>;

    async fn read(&self, path: &str) -> DomainResult<String>;

    /// Create a new document; `AlreadyExists` if the path is taken
    async fn create(&self, path: &str, content: &str) -> DomainResult<()>;

    /// Overwrite an existing document; `NotFound` if there is none
    async fn modify(&self, path: &str, content: &str) -> DomainResult<()>;

    async fn delete(&self, path: &str) -> DomainResult<()>;

    /// Move a document; `AlreadyExists` if `to` holds a different document
    async fn rename(&self, from: &str, to: &str) -> DomainResult<()>;

    /// Create a folder along with any missing ancestors
    async fn create_folder(&self, path: &str) -> DomainResult<()>;

    /// Every markdown document path in the store
    async fn list_documents(&self) -> DomainResult<Vec<String>>;

    /// Every folder path in the store, empty ones included, root excluded
    async fn list_folders(&self) -> DomainResult<Vec<String>>;

    /// Whether two paths name the same stored document. Stores that fold
    /// case or follow links override this.
    async fn same_document(&self, a: &str, b: &str) -> DomainResult<bool> {
        Ok(vault_path::normalize(a) == vault_path::normalize(b))
    }

    /// Create `path` as a folder unless something already exists there
    async fn ensure_folder(&self, path: &str) -> DomainResult<()> {
        if path.is_empty() || self.entry_kind(path).await?.is_some() {
            return Ok(());
        }
        self.create_folder(path).await
    }
}
