//! Filter Engine
//!
//! Narrows a flat item collection by the current [`ItemQuery`]. Pure and
//! order-preserving.
//!
//! Predicates are ANDed and each one passes when its query field is empty:
//! search, selected tags (any of), single active folder, folder include set
//! (any of), then the folder exclude set, which vetoes everything before it.
//! Folder predicates are plain path-prefix matches, so subfolders follow
//! their parent.

use crate::domain::{Item, ItemQuery};

/// Items matching `query`, in input order
pub fn apply<T>(items: &[T], query: &ItemQuery) -> Vec<T>
where
    T: AsRef<Item> + Clone,
{
    let search = query.search.to_lowercase();
    items
        .iter()
        .filter(|entry| {
            let item: &Item = (*entry).as_ref();
            matches_prepared(item, query, &search)
        })
        .cloned()
        .collect()
}

/// Whether a single item passes every active predicate
pub fn matches(item: &Item, query: &ItemQuery) -> bool {
    matches_prepared(item, query, &query.search.to_lowercase())
}

fn matches_prepared(item: &Item, query: &ItemQuery, search: &str) -> bool {
    matches_search(item, search)
        && matches_tags(item, query)
        && matches_selected_folder(item, query)
        && matches_included(item, query)
        && !is_excluded(item, query)
}

fn matches_search(item: &Item, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    item.title.to_lowercase().contains(search)
        || item.description.to_lowercase().contains(search)
        || item.tags.iter().any(|tag| tag.to_lowercase().contains(search))
}

fn matches_tags(item: &Item, query: &ItemQuery) -> bool {
    query.selected_tags.is_empty() || query.selected_tags.iter().any(|tag| item.has_tag(tag))
}

fn matches_selected_folder(item: &Item, query: &ItemQuery) -> bool {
    match query.selected_folder.as_deref() {
        Some(folder) if !folder.is_empty() => item.folder.starts_with(folder),
        _ => true,
    }
}

fn matches_included(item: &Item, query: &ItemQuery) -> bool {
    let include = query.folders.include();
    include.is_empty() || include.iter().any(|folder| item.folder.starts_with(folder.as_str()))
}

fn is_excluded(item: &Item, query: &ItemQuery) -> bool {
    query
        .folders
        .exclude()
        .iter()
        .any(|folder| item.folder.starts_with(folder.as_str()))
}
