//! Filesystem Document Store
//!
//! Treats a directory on disk as the vault. Hidden entries (names starting
//! with `.`) are host configuration and are never listed.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::{vault_path, DomainError, DomainResult};
use super::traits::{DocumentStore, EntryKind};

/// Directory-backed [`DocumentStore`]
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a vault path; `..` segments are rejected
    fn resolve(&self, path: &str) -> DomainResult<PathBuf> {
        let normalized = vault_path::normalize(path);
        if normalized.split('/').any(|segment| segment == "..") {
            return Err(DomainError::Validation(format!(
                "Path {} escapes the vault",
                path
            )));
        }
        if normalized.is_empty() {
            return Ok(self.root.clone());
        }
        Ok(self.root.join(normalized))
    }

    fn relative(&self, absolute: &Path) -> Option<String> {
        let relative = absolute.strip_prefix(&self.root).ok()?;
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(segments.join("/"))
    }

    /// Walk the vault once, collecting (documents, folders)
    async fn walk(&self) -> DomainResult<(Vec<String>, Vec<String>)> {
        let mut documents = Vec::new();
        let mut folders = Vec::new();
        let mut to_visit = vec![self.root.clone()];

        while let Some(dir) = to_visit.pop() {
            let dir_label = self.relative(&dir).unwrap_or_default();
            let mut entries = fs::read_dir(&dir)
                .await
                .map_err(|e| DomainError::from_io(&dir_label, e))?;

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| DomainError::from_io(&dir_label, e))?
            {
                if entry.file_name().to_string_lossy().starts_with('.') {
                    continue;
                }
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|e| DomainError::from_io(&dir_label, e))?;
                let absolute = entry.path();
                let Some(relative) = self.relative(&absolute) else {
                    continue;
                };

                if file_type.is_dir() {
                    folders.push(relative);
                    to_visit.push(absolute);
                } else if file_type.is_file() && vault_path::is_document(&relative) {
                    documents.push(relative);
                }
            }
        }

        Ok((documents, folders))
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn entry_kind(&self, path: &str) -> DomainResult<Option<EntryKind>> {
        let absolute = self.resolve(path)?;
        match fs::metadata(&absolute).await {
            Ok(meta) if meta.is_dir() => Ok(Some(EntryKind::Folder)),
            Ok(meta) if meta.is_file() => Ok(Some(EntryKind::Document)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::from_io(path, e)),
        }
    }

    async fn read(&self, path: &str) -> DomainResult<String> {
        fs::read_to_string(self.resolve(path)?)
            .await
            .map_err(|e| DomainError::from_io(path, e))
    }

    async fn create(&self, path: &str, content: &str) -> DomainResult<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.resolve(path)?)
            .await
            .map_err(|e| DomainError::from_io(path, e))?;
        file.write_all(content.as_bytes())
            .await
            .map_err(|e| DomainError::from_io(path, e))?;
        file.flush().await.map_err(|e| DomainError::from_io(path, e))
    }

    async fn modify(&self, path: &str, content: &str) -> DomainResult<()> {
        if self.entry_kind(path).await? != Some(EntryKind::Document) {
            return Err(DomainError::NotFound(path.to_string()));
        }
        fs::write(self.resolve(path)?, content)
            .await
            .map_err(|e| DomainError::from_io(path, e))
    }

    async fn delete(&self, path: &str) -> DomainResult<()> {
        fs::remove_file(self.resolve(path)?)
            .await
            .map_err(|e| DomainError::from_io(path, e))
    }

    async fn rename(&self, from: &str, to: &str) -> DomainResult<()> {
        if self.entry_kind(to).await?.is_some() && !self.same_document(from, to).await? {
            return Err(DomainError::AlreadyExists(to.to_string()));
        }
        fs::rename(self.resolve(from)?, self.resolve(to)?)
            .await
            .map_err(|e| DomainError::from_io(from, e))
    }

    /// Compares file identity, so a case-only rename on a case-insensitive
    /// filesystem is not mistaken for a collision
    async fn same_document(&self, a: &str, b: &str) -> DomainResult<bool> {
        let (a_path, b_path) = (self.resolve(a)?, self.resolve(b)?);
        let a_meta = match fs::metadata(&a_path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(DomainError::from_io(a, e)),
        };
        let b_meta = match fs::metadata(&b_path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(DomainError::from_io(b, e)),
        };
        Ok(same_file(&a_path, &a_meta, &b_path, &b_meta).await)
    }

    async fn create_folder(&self, path: &str) -> DomainResult<()> {
        fs::create_dir_all(self.resolve(path)?)
            .await
            .map_err(|e| DomainError::from_io(path, e))
    }

    async fn list_documents(&self) -> DomainResult<Vec<String>> {
        Ok(self.walk().await?.0)
    }

    async fn list_folders(&self) -> DomainResult<Vec<String>> {
        Ok(self.walk().await?.1)
    }
}

#[cfg(unix)]
async fn same_file(_: &Path, a: &std::fs::Metadata, _: &Path, b: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    a.dev() == b.dev() && a.ino() == b.ino()
}

#[cfg(not(unix))]
async fn same_file(a: &Path, _: &std::fs::Metadata, b: &Path, _: &std::fs::Metadata) -> bool {
    match (fs::canonicalize(a).await, fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
