//! Catalog Statistics
//!
//! Dashboard numbers derived from the item list and the tree.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ItemEntry, TreeNode};

/// Window for "recent" items, in days
pub const RECENT_DAYS: i64 = 7;
/// Number of recent items reported
pub const RECENT_LIMIT: usize = 5;

/// Item count of one top-level collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStat {
    pub name: String,
    pub path: String,
    pub item_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub collections: usize,
    pub total_items: usize,
    pub tags: usize,
    pub recent: usize,
    pub breakdown: Vec<CollectionStat>,
}

/// One row per root folder
pub fn collection_breakdown(forest: &[TreeNode]) -> Vec<CollectionStat> {
    forest
        .iter()
        .filter_map(|node| match node {
            TreeNode::Folder(folder) => Some(CollectionStat {
                name: folder.name.clone(),
                path: folder.path.clone(),
                item_count: folder.item_count,
            }),
            TreeNode::Item(_) => None,
        })
        .collect()
}

/// Items updated within `days` of `now`, newest first, at most `limit`.
/// Items with unparseable timestamps are left out.
pub fn recent_items(entries: &[ItemEntry], now: DateTime<Utc>, days: i64, limit: usize) -> Vec<ItemEntry> {
    let since = now - Duration::days(days);
    let mut recent: Vec<(DateTime<Utc>, &ItemEntry)> = entries
        .iter()
        .filter_map(|entry| {
            let updated = DateTime::parse_from_rfc3339(&entry.item.updated_at).ok()?;
            let updated = updated.with_timezone(&Utc);
            (updated >= since).then_some((updated, entry))
        })
        .collect();

    recent.sort_by(|a, b| b.0.cmp(&a.0));
    recent.into_iter().take(limit).map(|(_, entry)| entry.clone()).collect()
}

pub fn summarize(
    entries: &[ItemEntry],
    forest: &[TreeNode],
    tag_count: usize,
    now: DateTime<Utc>,
) -> CatalogSummary {
    let breakdown = collection_breakdown(forest);
    CatalogSummary {
        collections: breakdown.len(),
        total_items: entries.len(),
        tags: tag_count,
        recent: recent_items(entries, now, RECENT_DAYS, RECENT_LIMIT).len(),
        breakdown,
    }
}
