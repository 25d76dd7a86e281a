//! Host file-system implementation of [`DirectoryAccess`]

use crate::access::{DirectoryAccess, DirectoryError};
use crate::entry::{FileEntry, FOLDER_LABEL};
use std::fs;
use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;
use tracing::debug;

/// Reads directories from the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDirectoryAccess;

impl LocalDirectoryAccess {
    pub fn new() -> Self {
        Self
    }
}

fn map_io_error(path: &str, err: io::Error) -> DirectoryError {
    match err.kind() {
        io::ErrorKind::NotFound => DirectoryError::NotFound(path.to_string()),
        io::ErrorKind::PermissionDenied => DirectoryError::PermissionDenied(path.to_string()),
        _ => DirectoryError::Io {
            path: path.to_string(),
            message: err.to_string(),
        },
    }
}

impl DirectoryAccess for LocalDirectoryAccess {
    fn list_directory(&self, path: &str) -> Result<Vec<FileEntry>, DirectoryError> {
        let metadata = fs::metadata(path).map_err(|e| map_io_error(path, e))?;
        if !metadata.is_dir() {
            return Err(DirectoryError::NotADirectory(path.to_string()));
        }

        let read = fs::read_dir(path).map_err(|e| map_io_error(path, e))?;
        let mut entries = Vec::new();
        for entry in read {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(path, error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) => {
                    debug!(path, error = %err, "skipping entry without metadata");
                    continue;
                }
            };
            let type_label = if metadata.is_dir() {
                FOLDER_LABEL
            } else if metadata.is_file() {
                "file"
            } else {
                "other"
            };
            let modified = metadata
                .modified()
                .ok()
                .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs());

            entries.push(FileEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.path().to_string_lossy().to_string(),
                is_dir: metadata.is_dir(),
                size: Some(metadata.len()),
                modified,
                type_label: type_label.to_string(),
            });
        }

        Ok(entries)
    }

    fn parent_of(&self, path: &str) -> Result<String, DirectoryError> {
        Path::new(path)
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .filter(|p| !p.is_empty())
            .ok_or_else(|| DirectoryError::NoParent(path.to_string()))
    }
}
