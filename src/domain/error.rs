//! Domain Errors
//!
//! One error type shared by the domain, the stores and the repository.

use serde::{Deserialize, Serialize};

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// A document that is not a catalog item is never an error: decoding
/// returns `None` and listings skip it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainError {
    /// User-supplied item failed a precondition; nothing was written
    Validation(String),
    NotFound(String),
    AlreadyExists(String),
    /// Backing store failed for its own reasons (permissions, disk, ...)
    StoreIo(String),
}

impl DomainError {
    /// Map an I/O failure on `path` to the matching domain error
    pub fn from_io(path: &str, e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => DomainError::NotFound(path.to_string()),
            std::io::ErrorKind::AlreadyExists => DomainError::AlreadyExists(path.to_string()),
            _ => DomainError::StoreIo(format!("{}: {}", path, e)),
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::Validation(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::AlreadyExists(msg) => write!(f, "Already exists: {}", msg),
            DomainError::StoreIo(msg) => write!(f, "Store error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
