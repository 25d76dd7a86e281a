//! Directory access contract
//!
//! The layout core consumes this trait; it never implements listing itself.

use crate::entry::FileEntry;
use thiserror::Error;

/// Errors reported by a directory access backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// Path does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Path exists but cannot be read
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Path is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// Path is a filesystem root
    #[error("No parent directory: {0}")]
    NoParent(String),

    /// Any other I/O failure
    #[error("I/O error at {path}: {message}")]
    Io { path: String, message: String },
}

/// Access to directory listings
///
/// Implementations may be slow or remote. Timeouts are the implementation's
/// concern; callers issue one request per call and never retry.
pub trait DirectoryAccess {
    /// Lists the entries of the directory at `path`
    fn list_directory(&self, path: &str) -> Result<Vec<FileEntry>, DirectoryError>;

    /// Resolves the parent of `path`
    ///
    /// Fails with [`DirectoryError::NoParent`] for filesystem roots.
    fn parent_of(&self, path: &str) -> Result<String, DirectoryError>;
}

impl<T: DirectoryAccess + ?Sized> DirectoryAccess for Box<T> {
    fn list_directory(&self, path: &str) -> Result<Vec<FileEntry>, DirectoryError> {
        (**self).list_directory(path)
    }

    fn parent_of(&self, path: &str) -> Result<String, DirectoryError> {
        (**self).parent_of(path)
    }
}
