//! File entry type reported by directory access

use serde::{Deserialize, Serialize};

/// Name of the synthetic parent-directory entry
pub const PARENT_ENTRY_NAME: &str = "..";

/// Type label used for directories
pub const FOLDER_LABEL: &str = "folder";

/// A single file-system item
///
/// Field names on the wire match the bridge (`is_dir`, `modified`, `file_type`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Final path segment
    pub name: String,
    /// Absolute path
    pub path: String,
    /// Whether the entry is a directory
    pub is_dir: bool,
    /// Size in bytes, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Modification time in UNIX seconds, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<u64>,
    /// Type label (`folder`, `file`, `other`, or an extension label)
    #[serde(rename = "file_type")]
    pub type_label: String,
}

impl FileEntry {
    /// Creates a file entry with no size or modification time
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        is_dir: bool,
        type_label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir,
            size: None,
            modified: None,
            type_label: type_label.into(),
        }
    }

    /// Creates a directory entry
    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, path, true, FOLDER_LABEL)
    }

    /// Creates a regular file entry
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, path, false, "file")
    }

    /// Builds the synthetic `..` entry pointing at `parent_path`
    pub fn parent_link(parent_path: impl Into<String>) -> Self {
        Self {
            name: PARENT_ENTRY_NAME.to_string(),
            path: parent_path.into(),
            is_dir: true,
            size: Some(0),
            modified: Some(0),
            type_label: FOLDER_LABEL.to_string(),
        }
    }

    /// Sets the size
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the modification time
    pub fn with_modified(mut self, modified: u64) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Returns true for the synthetic `..` entry
    pub fn is_parent_link(&self) -> bool {
        self.name == PARENT_ENTRY_NAME
    }
}
