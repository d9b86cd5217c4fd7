//! Query State
//!
//! What the user has asked to see. State changes go through pure reducers
//! that return a new value, so the include/exclude invariant lives here
//! and not with the callers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Which folder set a toggle targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    Include,
    Exclude,
}

/// Folder include/exclude sets; a path is never in both
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderFilterState {
    include: BTreeSet<String>,
    exclude: BTreeSet<String>,
}

impl FolderFilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(&self) -> &BTreeSet<String> {
        &self.include
    }

    pub fn exclude(&self) -> &BTreeSet<String> {
        &self.exclude
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Toggle `folder` in the set chosen by `mode`.
    ///
    /// A folder already in that set is removed from it. Otherwise it is added
    /// there and removed from the opposite set.
    pub fn toggle(&self, folder: &str, mode: FilterMode) -> Self {
        let mut next = self.clone();
        let (target, other) = match mode {
            FilterMode::Include => (&mut next.include, &mut next.exclude),
            FilterMode::Exclude => (&mut next.exclude, &mut next.include),
        };
        if !target.remove(folder) {
            target.insert(folder.to_string());
            other.remove(folder);
        }
        next
    }

    pub fn cleared(&self) -> Self {
        Self::default()
    }
}

/// Everything the filter engine narrows by
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemQuery {
    /// Free-text search, matched case-insensitively
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub selected_tags: BTreeSet<String>,
    /// Single active folder (prefix match)
    #[serde(default)]
    pub selected_folder: Option<String>,
    #[serde(default)]
    pub folders: FolderFilterState,
}

impl ItemQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.selected_folder = Some(folder.into());
        self
    }

    pub fn with_folders(mut self, folders: FolderFilterState) -> Self {
        self.folders = folders;
        self
    }

    /// Add `tag` to the selection, or remove it if already selected
    pub fn toggle_tag(&self, tag: &str) -> Self {
        let mut next = self.clone();
        if !next.selected_tags.remove(tag) {
            next.selected_tags.insert(tag.to_string());
        }
        next
    }

    /// True when no predicate is active
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.selected_tags.is_empty()
            && self.selected_folder.as_deref().map_or(true, str::is_empty)
            && self.folders.is_empty()
    }
}
