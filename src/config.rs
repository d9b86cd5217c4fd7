//! Settings
//!
//! Persisted catalog preferences. Stored as camelCase JSON; fields missing
//! from the file take their defaults, so older files keep loading.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Icons shown on the view tabs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabIcons {
    pub analytics: String,
    pub collections: String,
    pub items: String,
    pub search: String,
}

impl Default for TabIcons {
    fn default() -> Self {
        Self {
            analytics: "📊".to_string(),
            collections: "📁".to_string(),
            items: "🔗".to_string(),
            search: "🔍".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Folder new items go to
    pub default_folder: String,
    /// Quick tags offered when editing an item
    pub predefined_tags: Vec<String>,
    pub enable_auto_save: bool,
    /// Folder path -> icon asset path
    pub folder_icons: HashMap<String, String>,
    pub default_folder_icon: String,
    pub tab_icons: TabIcons,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_folder: "Items".to_string(),
            predefined_tags: ["important", "todo", "reference", "project"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            enable_auto_save: true,
            folder_icons: HashMap::new(),
            default_folder_icon: "📁".to_string(),
            tab_icons: TabIcons::default(),
        }
    }
}

impl Settings {
    /// Load from `path`; a missing file yields the defaults
    pub async fn load(path: &Path) -> DomainResult<Self> {
        let label = path.display().to_string();
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(DomainError::from_io(&label, e)),
        };
        serde_json::from_str(&raw)
            .map_err(|e| DomainError::Validation(format!("Malformed settings {}: {}", label, e)))
    }

    pub async fn save(&self, path: &Path) -> DomainResult<()> {
        let label = path.display().to_string();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::from_io(&label, e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| DomainError::StoreIo(format!("{}: {}", label, e)))?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| DomainError::from_io(&label, e))
    }

    /// Icon for a folder, falling back to the default folder icon
    pub fn folder_icon(&self, folder: &str) -> &str {
        self.folder_icons
            .get(folder)
            .map(String::as_str)
            .unwrap_or(&self.default_folder_icon)
    }
}

/// Parse comma-separated tag input; a leading `#` is dropped and entries
/// with whitespace are skipped
pub fn parse_tag_input(text: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in text.split(',').map(|t| t.trim().trim_start_matches('#')) {
        if tag.is_empty() || tag.chars().any(char::is_whitespace) {
            continue;
        }
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Append a quick tag unless it is already present
pub fn add_quick_tag(tags: &mut Vec<String>, tag: &str) {
    if !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}
