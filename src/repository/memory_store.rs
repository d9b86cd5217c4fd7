//! In-Memory Document Store
//!
//! A vault held entirely in memory. Used by tests and by hosts that keep
//! their own document cache.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{vault_path, DomainError, DomainResult};
use super::traits::{DocumentStore, EntryKind};

#[derive(Debug, Default)]
struct Vault {
    documents: BTreeMap<String, String>,
    folders: BTreeSet<String>,
}

impl Vault {
    fn kind(&self, path: &str) -> Option<EntryKind> {
        if self.documents.contains_key(path) {
            Some(EntryKind::Document)
        } else if self.folders.contains(path) {
            Some(EntryKind::Folder)
        } else {
            None
        }
    }

    fn require_parent(&self, path: &str) -> DomainResult<()> {
        let parent = vault_path::parent(path);
        if parent.is_empty() || self.folders.contains(parent) {
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("Folder {} does not exist", parent)))
        }
    }

    fn add_folder_chain(&mut self, path: &str) {
        for ancestor in vault_path::ancestors(path) {
            self.folders.insert(ancestor.to_string());
        }
        if !path.is_empty() {
            self.folders.insert(path.to_string());
        }
    }
}

/// Memory-backed [`DocumentStore`]
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    vault: Mutex<Vault>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a document in place, creating its folders; overwrites silently
    pub async fn insert(&self, path: &str, content: &str) {
        let path = vault_path::normalize(path);
        let mut vault = self.vault.lock().await;
        vault.add_folder_chain(vault_path::parent(&path));
        vault.documents.insert(path, content.to_string());
    }

    pub async fn document_count(&self) -> usize {
        self.vault.lock().await.documents.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn entry_kind(&self, path: &str) -> DomainResult<Option<EntryKind>> {
        Ok(self.vault.lock().await.kind(&vault_path::normalize(path)))
    }

    async fn read(&self, path: &str) -> DomainResult<String> {
        let path = vault_path::normalize(path);
        self.vault
            .lock()
            .await
            .documents
            .get(&path)
            .cloned()
            .ok_or(DomainError::NotFound(path))
    }

    async fn create(&self, path: &str, content: &str) -> DomainResult<()> {
        let path = vault_path::normalize(path);
        let mut vault = self.vault.lock().await;
        if vault.kind(&path).is_some() {
            return Err(DomainError::AlreadyExists(path));
        }
        vault.require_parent(&path)?;
        vault.documents.insert(path, content.to_string());
        Ok(())
    }

    async fn modify(&self, path: &str, content: &str) -> DomainResult<()> {
        let path = vault_path::normalize(path);
        let mut vault = self.vault.lock().await;
        match vault.documents.get_mut(&path) {
            Some(existing) => {
                *existing = content.to_string();
                Ok(())
            }
            None => Err(DomainError::NotFound(path)),
        }
    }

    async fn delete(&self, path: &str) -> DomainResult<()> {
        let path = vault_path::normalize(path);
        match self.vault.lock().await.documents.remove(&path) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(path)),
        }
    }

    async fn rename(&self, from: &str, to: &str) -> DomainResult<()> {
        let from = vault_path::normalize(from);
        let to = vault_path::normalize(to);
        let mut vault = self.vault.lock().await;
        if !vault.documents.contains_key(&from) {
            return Err(DomainError::NotFound(from));
        }
        if vault.kind(&to).is_some() {
            return Err(DomainError::AlreadyExists(to));
        }
        vault.require_parent(&to)?;
        if let Some(content) = vault.documents.remove(&from) {
            vault.documents.insert(to, content);
        }
        Ok(())
    }

    async fn create_folder(&self, path: &str) -> DomainResult<()> {
        let path = vault_path::normalize(path);
        let mut vault = self.vault.lock().await;
        if vault.documents.contains_key(&path) {
            return Err(DomainError::AlreadyExists(path));
        }
        vault.add_folder_chain(&path);
        Ok(())
    }

    async fn list_documents(&self) -> DomainResult<Vec<String>> {
        let vault = self.vault.lock().await;
        Ok(vault
            .documents
            .keys()
            .filter(|path| vault_path::is_document(path))
            .cloned()
            .collect())
    }

    async fn list_folders(&self) -> DomainResult<Vec<String>> {
        Ok(self.vault.lock().await.folders.iter().cloned().collect())
    }
}
