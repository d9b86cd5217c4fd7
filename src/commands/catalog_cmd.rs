//! Catalog Commands
//!
//! Read-side views over the whole catalog: tree, folders, tags, search and
//! the dashboard summary.

use crate::domain::{ItemEntry, ItemQuery, TreeNode};
use crate::filter;
use crate::stats::{self, CatalogSummary};
use super::AppState;

pub async fn get_tree(state: &AppState) -> Result<Vec<TreeNode>, String> {
    state
        .repo
        .tree(&state.settings.folder_icons)
        .await
        .map_err(|e| e.to_string())
}

pub async fn list_folders(state: &AppState) -> Result<Vec<String>, String> {
    state.repo.list_known_folders().await.map_err(|e| e.to_string())
}

pub async fn list_tags(state: &AppState) -> Result<Vec<String>, String> {
    state.repo.list_all_tags().await.map_err(|e| e.to_string())
}

/// Items matching `query`
pub async fn search_items(state: &AppState, query: ItemQuery) -> Result<Vec<ItemEntry>, String> {
    let entries = state.repo.list_all(None).await.map_err(|e| e.to_string())?;
    Ok(filter::apply(&entries, &query))
}

pub async fn get_summary(state: &AppState) -> Result<CatalogSummary, String> {
    let entries = state.repo.list_all(None).await.map_err(|e| e.to_string())?;
    let tree = get_tree(state).await?;
    let tags = list_tags(state).await?;
    Ok(stats::summarize(&entries, &tree, tags.len(), chrono::Utc::now()))
}

/// Create the configured default folder if it is missing
pub async fn init_default_folder(state: &AppState) -> Result<(), String> {
    state
        .repo
        .ensure_default_folder(&state.settings)
        .await
        .map_err(|e| e.to_string())
}
