//! Link Metadata
//!
//! Result shape of the external page-metadata collaborator. Fetching is the
//! host's business; the catalog only consumes the triple.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::item::Item;

/// Best-effort title/description/banner for a URL; any field may be empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMetadata {
    pub title: String,
    pub description: String,
    pub banner: String,
}

impl LinkMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.banner.is_empty()
    }

    /// Copy fetched values into the item's empty fields only
    pub fn fill_missing(&self, item: &mut Item) {
        if item.title.trim().is_empty() && !self.title.trim().is_empty() {
            item.title = self.title.trim().to_string();
        }
        if item.description.trim().is_empty() && !self.description.trim().is_empty() {
            item.description = self.description.trim().to_string();
        }
        let has_banner = item.banner.as_deref().map_or(false, |b| !b.is_empty());
        if !has_banner && !self.banner.trim().is_empty() {
            item.banner = Some(self.banner.trim().to_string());
        }
    }
}

/// Fetches metadata for a URL.
///
/// Implementations enforce their own timeout and return an empty
/// [`LinkMetadata`] instead of failing.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> LinkMetadata;
}
