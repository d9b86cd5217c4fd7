//! Item Commands
//!
//! Create, edit and remove single items.

use serde::{Deserialize, Serialize};

use crate::config::parse_tag_input;
use crate::domain::{Item, ItemEntry};
use super::AppState;

/// Editable fields of an item as submitted by a form; `None` keeps the
/// current value on update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemForm {
    pub title: Option<String>,
    pub folder: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    /// Comma-separated tags
    pub tags: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub banner: Option<String>,
    pub icon: Option<String>,
}

impl ItemForm {
    fn apply_to(&self, item: &mut Item) {
        if let Some(title) = &self.title {
            item.title = title.trim().to_string();
        }
        if let Some(folder) = &self.folder {
            item.folder = folder.trim().to_string();
        }
        if let Some(link) = &self.link {
            item.link = link.trim().to_string();
        }
        if let Some(description) = &self.description {
            item.description = description.trim().to_string();
        }
        if let Some(tags) = &self.tags {
            item.tags = parse_tag_input(tags);
        }
        if let Some(item_type) = &self.item_type {
            item.item_type = Some(item_type.trim().to_string()).filter(|t| !t.is_empty());
        }
        if let Some(banner) = &self.banner {
            item.banner = Some(banner.trim().to_string()).filter(|b| !b.is_empty());
        }
        if let Some(icon) = &self.icon {
            item.icon = Some(icon.trim().to_string()).filter(|i| !i.is_empty());
        }
    }
}

/// Create a new item; the folder defaults to the configured default folder
pub async fn create_item(state: &AppState, form: ItemForm) -> Result<ItemEntry, String> {
    let folder = form
        .folder
        .clone()
        .unwrap_or_else(|| state.settings.default_folder.clone());
    let mut item = Item::new(form.title.clone().unwrap_or_default(), folder);
    form.apply_to(&mut item);
    // Collection title follows the (possibly overridden) folder
    item.collection_title.clear();
    state.repo.create(&item).await.map_err(|e| e.to_string())
}

/// Apply `form` to the item at `path`
pub async fn update_item(state: &AppState, path: String, form: ItemForm) -> Result<ItemEntry, String> {
    let existing = state
        .repo
        .get_by_path(&path)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Item {} not found", path))?;

    let mut item = existing.item;
    let folder_changed = form.folder.as_deref().map_or(false, |f| f.trim() != item.folder);
    form.apply_to(&mut item);
    if folder_changed {
        item.collection_title.clear();
    }
    state.repo.update(&existing.path, &item).await.map_err(|e| e.to_string())
}

pub async fn get_item(state: &AppState, path: String) -> Result<Option<ItemEntry>, String> {
    state.repo.get_by_path(&path).await.map_err(|e| e.to_string())
}

pub async fn delete_item(state: &AppState, path: String) -> Result<(), String> {
    state.repo.delete(&path).await.map_err(|e| e.to_string())
}

/// List items, optionally under a folder prefix
pub async fn list_items(state: &AppState, folder: Option<String>) -> Result<Vec<ItemEntry>, String> {
    state
        .repo
        .list_all(folder.as_deref())
        .await
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::Settings;
    use crate::repository::MemoryDocumentStore;

    fn state() -> AppState {
        AppState::new(Arc::new(MemoryDocumentStore::new()), Settings::default())
    }

    #[tokio::test]
    async fn test_create_uses_default_folder() {
        let state = state();
        let form = ItemForm {
            title: Some("  Tokio  ".into()),
            tags: Some("rust, async, bad tag".into()),
            ..Default::default()
        };

        let created = create_item(&state, form).await.unwrap();
        assert_eq!(created.path, "Items/Tokio.md");
        assert_eq!(created.item.collection_title, "Items");
        assert_eq!(created.item.tags, vec!["rust".to_string(), "async".to_string()]);
    }

    #[tokio::test]
    async fn test_update_keeps_unset_fields() {
        let state = state();
        let form = ItemForm {
            title: Some("Guide".into()),
            link: Some("https://tokio.rs".into()),
            ..Default::default()
        };
        let created = create_item(&state, form).await.unwrap();

        let edit = ItemForm {
            folder: Some("Web".into()),
            ..Default::default()
        };
        let updated = update_item(&state, created.path.clone(), edit).await.unwrap();
        assert_eq!(updated.path, "Web/Guide.md");
        assert_eq!(updated.item.link, "https://tokio.rs");
        assert_eq!(updated.item.collection_title, "Web");

        assert!(get_item(&state, created.path).await.unwrap().is_none());
        assert_eq!(list_items(&state, Some("Web".into())).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_errors_cross_as_text() {
        let state = state();
        let err = update_item(&state, "Items/None.md".into(), ItemForm::default())
            .await
            .unwrap_err();
        assert!(err.contains("Items/None.md"));

        let err = create_item(&state, ItemForm::default()).await.unwrap_err();
        assert!(err.starts_with("Invalid input"));
    }
}
