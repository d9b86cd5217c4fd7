//! Item Entity
//!
//! A catalogued bookmark/reference. Each item lives in exactly one folder
//! and is persisted as one markdown document.

use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};

use super::error::{DomainError, DomainResult};
use super::vault_path;

/// Classification used when an item has no explicit type
pub const DEFAULT_ITEM_TYPE: &str = "link";

/// Last issued id stamp, so ids stay unique within a process
static LAST_ID_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Next `item-<millis>` id; bumped past the previous one when two items are
/// created in the same millisecond
fn next_item_id(now_millis: i64) -> String {
    let previous = LAST_ID_MILLIS
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now_millis.max(last + 1)))
        .unwrap_or(now_millis);
    format!("item-{}", now_millis.max(previous + 1))
}

/// A tag the header codec stores verbatim: no leading `#` (stripped as
/// hashtag syntax) and no surrounding quotes (stripped as quoting)
fn is_plain_tag(tag: &str) -> bool {
    let single_quoted = tag.len() >= 2 && tag.starts_with('\'') && tag.ends_with('\'');
    !(tag.starts_with('#') || tag.starts_with('"') || tag.ends_with('"') || single_quoted)
}

/// Current time as an ISO-8601 UTC timestamp with milliseconds
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Opaque identifier, stable across edits
    pub id: String,
    /// Display name, also the source of the file name
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Source URL (empty when the item has none)
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default, rename = "type")]
    pub item_type: Option<String>,
    /// Icon asset path
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Containing folder; the single source of truth for location
    pub folder: String,

    // Denormalized folder identity kept for the external catalog format
    #[serde(default)]
    pub collection_id: String,
    #[serde(default)]
    pub collection_title: String,
    #[serde(default)]
    pub collection_path: String,
    #[serde(default)]
    pub collection_parent_id: Option<String>,

    pub created_at: String,
    pub updated_at: String,
}

impl Item {
    /// Create a new item in `folder`, stamped with the current time
    pub fn new(title: impl Into<String>, folder: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        let stamp = now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let mut item = Self {
            id: next_item_id(now.timestamp_millis()),
            title: title.into(),
            description: String::new(),
            link: String::new(),
            banner: None,
            item_type: None,
            icon: None,
            tags: Vec::new(),
            folder: vault_path::normalize(&folder.into()),
            collection_id: String::new(),
            collection_title: String::new(),
            collection_path: String::new(),
            collection_parent_id: None,
            created_at: stamp.clone(),
            updated_at: stamp,
        };
        item.sync_collection();
        item
    }

    /// The item's classification, `"link"` unless set
    pub fn kind(&self) -> &str {
        self.item_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_ITEM_TYPE)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Keep the collection fields in step with `folder`
    pub fn sync_collection(&mut self) {
        self.collection_path = self.folder.clone();
        if self.collection_title.is_empty() {
            self.collection_title = vault_path::last_segment(&self.folder).to_string();
        }
    }

    /// Trim the title, normalize the folder, drop empty and duplicate tags,
    /// and sync the collection fields
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.folder = vault_path::normalize(&self.folder);

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags.drain(..) {
            let tag = tag.trim().to_string();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        self.tags = tags;

        self.sync_collection();
        self
    }

    /// Check the preconditions for writing this item
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("Title is required".into()));
        }
        if self.title.contains(['\n', '\r']) {
            return Err(DomainError::Validation("Title must be a single line".into()));
        }
        if self.folder.trim().is_empty() {
            return Err(DomainError::Validation("Folder is required".into()));
        }
        if self.folder.contains(['\n', '\r']) {
            return Err(DomainError::Validation("Folder must be a single line".into()));
        }
        if let Some(tag) = self.tags.iter().find(|t| t.is_empty() || t.chars().any(char::is_whitespace)) {
            return Err(DomainError::Validation(format!(
                "Tag '{}' is invalid: tags cannot be empty or contain spaces",
                tag
            )));
        }
        if let Some(tag) = self.tags.iter().find(|t| !is_plain_tag(t)) {
            return Err(DomainError::Validation(format!(
                "Tag '{}' is invalid: tags cannot start with '#' or be quoted",
                tag
            )));
        }
        Ok(())
    }
}

impl AsRef<Item> for Item {
    fn as_ref(&self) -> &Item {
        self
    }
}

/// An item together with the path of the document backing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub item: Item,
    pub path: String,
}

impl ItemEntry {
    pub fn new(item: Item, path: impl Into<String>) -> Self {
        Self { item, path: path.into() }
    }
}

impl AsRef<Item> for ItemEntry {
    fn as_ref(&self) -> &Item {
        &self.item
    }
}
