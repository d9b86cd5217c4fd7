//! Item Repository Implementation
//!
//! CRUD over item documents on top of a [`DocumentStore`]. Every item is one
//! document at `<folder>/<sanitized title>.md`.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::codec;
use crate::config::Settings;
use crate::domain::{
    now_timestamp, vault_path, DomainError, DomainResult, Item, ItemEntry, TreeNode,
};
use crate::tree;
use super::traits::{DocumentStore, EntryKind};

/// Document-backed item repository
#[derive(Clone)]
pub struct ItemRepository {
    store: Arc<dyn DocumentStore>,
}

impl ItemRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    async fn is_document(&self, path: &str) -> DomainResult<bool> {
        Ok(self.store.entry_kind(path).await? == Some(EntryKind::Document))
    }

    /// Write a new item document.
    ///
    /// Fails with `AlreadyExists` when another document already sits at the
    /// derived path; title uniqueness is the caller's job.
    pub async fn create(&self, item: &Item) -> DomainResult<ItemEntry> {
        let mut item = item.clone().normalized();
        item.validate()?;

        let now = now_timestamp();
        if item.created_at.is_empty() {
            item.created_at = now.clone();
        }
        item.updated_at = now;

        self.store.ensure_folder(&item.folder).await?;
        let path = vault_path::item_file_path(&item.folder, &item.title);
        self.store.create(&path, &codec::encode(&item)).await?;

        info!("Created item {} at {}", item.id, path);
        Ok(ItemEntry::new(item, path))
    }

    /// Rewrite the document at `path`, moving it when the title or folder
    /// now yields a different path. `createdAt` is kept from the stored
    /// document.
    pub async fn update(&self, path: &str, item: &Item) -> DomainResult<ItemEntry> {
        let mut item = item.clone().normalized();
        item.validate()?;

        let path = vault_path::normalize(path);
        if !self.is_document(&path).await? {
            return Err(DomainError::NotFound(path));
        }

        // Only item documents are updated; other notes stay untouched
        let Some(existing) = codec::decode(&self.store.read(&path).await?, &path) else {
            return Err(DomainError::NotFound(path));
        };
        item.created_at = existing.created_at;
        item.updated_at = now_timestamp();

        let new_path = vault_path::item_file_path(&item.folder, &item.title);
        let moving = new_path != path;
        if moving
            && self.store.entry_kind(&new_path).await?.is_some()
            && !self.store.same_document(&path, &new_path).await?
        {
            return Err(DomainError::AlreadyExists(new_path));
        }

        self.store.modify(&path, &codec::encode(&item)).await?;

        if moving {
            self.store.ensure_folder(&item.folder).await?;
            self.store.rename(&path, &new_path).await?;
            info!("Moved item {} from {} to {}", item.id, path, new_path);
        } else {
            info!("Updated item {} at {}", item.id, path);
        }

        Ok(ItemEntry::new(item, new_path))
    }

    /// Remove the document at `path`; nothing happens if it is not a document
    pub async fn delete(&self, path: &str) -> DomainResult<()> {
        if !self.is_document(path).await? {
            debug!("Delete skipped, no document at {}", path);
            return Ok(());
        }
        self.store.delete(path).await?;
        info!("Deleted item at {}", path);
        Ok(())
    }

    /// Decode every item document, optionally only those whose path starts
    /// with `folder`. Order is unspecified.
    pub async fn list_all(&self, folder: Option<&str>) -> DomainResult<Vec<ItemEntry>> {
        let mut entries = Vec::new();

        for path in self.store.list_documents().await? {
            if let Some(prefix) = folder {
                if !path.starts_with(prefix) {
                    continue;
                }
            }

            let content = match self.store.read(&path).await {
                Ok(content) => content,
                Err(e) => {
                    warn!("Error reading file {}: {}", path, e);
                    continue;
                }
            };

            match codec::decode(&content, &path) {
                Some(item) => entries.push(ItemEntry::new(item, path)),
                None => debug!("Skipping non-item document {}", path),
            }
        }

        Ok(entries)
    }

    /// The item stored at `path`, if that is an item document
    pub async fn get_by_path(&self, path: &str) -> DomainResult<Option<ItemEntry>> {
        let path = vault_path::normalize(path);
        if !self.is_document(&path).await? {
            return Ok(None);
        }
        let content = self.store.read(&path).await?;
        Ok(codec::decode(&content, &path).map(|item| ItemEntry::new(item, path)))
    }

    /// Store folders (empty ones included) plus folders holding documents,
    /// sorted
    pub async fn list_known_folders(&self) -> DomainResult<Vec<String>> {
        let mut folders: BTreeSet<String> = self.store.list_folders().await?.into_iter().collect();
        for path in self.store.list_documents().await? {
            let parent = vault_path::parent(&path);
            if !parent.is_empty() {
                folders.insert(parent.to_string());
            }
        }
        folders.remove("");
        Ok(folders.into_iter().collect())
    }

    /// Distinct tags across all items, sorted
    pub async fn list_all_tags(&self) -> DomainResult<Vec<String>> {
        let tags: BTreeSet<String> = self
            .list_all(None)
            .await?
            .into_iter()
            .flat_map(|entry| entry.item.tags)
            .collect();
        Ok(tags.into_iter().collect())
    }

    /// Build the folder/item index from the current store contents
    pub async fn tree(&self, folder_icons: &HashMap<String, String>) -> DomainResult<Vec<TreeNode>> {
        let entries = self.list_all(None).await?;
        let folders = self.list_known_folders().await?;
        Ok(tree::build(&entries, &folders, folder_icons))
    }

    /// Make sure the configured default folder exists
    pub async fn ensure_default_folder(&self, settings: &Settings) -> DomainResult<()> {
        let folder = vault_path::normalize(&settings.default_folder);
        self.store.ensure_folder(&folder).await
    }
}
