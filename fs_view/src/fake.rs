//! In-memory implementation of [`DirectoryAccess`]
//!
//! A deterministic directory tree for tests and demos. Clones share the same
//! tree, so a test can keep a handle while the workspace owns another.

use crate::access::{DirectoryAccess, DirectoryError};
use crate::entry::FileEntry;
use crate::path::{join, lexical_parent, title_from_path};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

#[derive(Debug, Default)]
struct FakeTree {
    /// Directory path -> entries, in insertion order
    directories: BTreeMap<String, Vec<FileEntry>>,
    /// Paths that fail with a permission error
    denied: BTreeSet<String>,
    /// Every path passed to `list_directory`, in call order
    list_calls: Vec<String>,
}

/// Fake directory access backed by an in-memory tree
#[derive(Debug, Clone, Default)]
pub struct FakeDirectoryAccess {
    tree: Rc<RefCell<FakeTree>>,
}

impl FakeDirectoryAccess {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory, creating missing ancestors
    pub fn add_dir(&self, path: &str) -> &Self {
        let mut tree = self.tree.borrow_mut();
        Self::ensure_dir(&mut tree, path);
        self
    }

    /// Adds a file entry to `dir`, creating the directory if needed
    pub fn add_file(&self, dir: &str, name: &str, size: u64, modified: u64) -> &Self {
        let mut tree = self.tree.borrow_mut();
        Self::ensure_dir(&mut tree, dir);
        let entry = FileEntry::file(name, join(dir, name))
            .with_size(size)
            .with_modified(modified);
        if let Some(entries) = tree.directories.get_mut(dir) {
            entries.push(entry);
        }
        self
    }

    /// Makes listing `path` fail with a permission error
    pub fn deny(&self, path: &str) -> &Self {
        self.tree.borrow_mut().denied.insert(path.to_string());
        self
    }

    /// Removes a directory listing (entries in the parent stay)
    pub fn remove_dir(&self, path: &str) -> &Self {
        self.tree.borrow_mut().directories.remove(path);
        self
    }

    /// Returns every path listed so far
    pub fn list_calls(&self) -> Vec<String> {
        self.tree.borrow().list_calls.clone()
    }

    fn ensure_dir(tree: &mut FakeTree, path: &str) {
        if tree.directories.contains_key(path) {
            return;
        }
        tree.directories.insert(path.to_string(), Vec::new());
        if let Some(parent) = lexical_parent(path) {
            Self::ensure_dir(tree, &parent);
            if let Some(siblings) = tree.directories.get_mut(&parent) {
                siblings.push(FileEntry::directory(title_from_path(path), path));
            }
        }
    }
}

impl DirectoryAccess for FakeDirectoryAccess {
    fn list_directory(&self, path: &str) -> Result<Vec<FileEntry>, DirectoryError> {
        let mut tree = self.tree.borrow_mut();
        tree.list_calls.push(path.to_string());
        if tree.denied.contains(path) {
            return Err(DirectoryError::PermissionDenied(path.to_string()));
        }
        tree.directories
            .get(path)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(path.to_string()))
    }

    fn parent_of(&self, path: &str) -> Result<String, DirectoryError> {
        lexical_parent(path).ok_or_else(|| DirectoryError::NoParent(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_dir_creates_ancestors() {
        let fake = FakeDirectoryAccess::new();
        fake.add_dir("/home/user/docs");

        let root = fake.list_directory("/").unwrap();
        assert_eq!(root.len(), 1);
        assert_eq!(root[0].name, "home");
        assert!(root[0].is_dir);

        let user = fake.list_directory("/home/user").unwrap();
        assert_eq!(user[0].path, "/home/user/docs");
    }

    #[test]
    fn test_add_file() {
        let fake = FakeDirectoryAccess::new();
        fake.add_file("/tmp", "a.txt", 10, 100);

        let entries = fake.list_directory("/tmp").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "/tmp/a.txt");
        assert_eq!(entries[0].size, Some(10));
    }

    #[test]
    fn test_missing_and_denied() {
        let fake = FakeDirectoryAccess::new();
        fake.add_dir("/secret").deny("/secret");

        assert!(matches!(
            fake.list_directory("/nope"),
            Err(DirectoryError::NotFound(_))
        ));
        assert!(matches!(
            fake.list_directory("/secret"),
            Err(DirectoryError::PermissionDenied(_))
        ));
        assert_eq!(fake.list_calls(), vec!["/nope", "/secret"]);
    }

    #[test]
    fn test_clones_share_tree() {
        let fake = FakeDirectoryAccess::new();
        let handle = fake.clone();
        handle.add_dir("/shared");
        assert!(fake.list_directory("/shared").is_ok());
    }

    #[test]
    fn test_parent_of_windows_path() {
        let fake = FakeDirectoryAccess::new();
        assert_eq!(fake.parent_of("C:\\test").unwrap(), "C:\\");
        assert!(matches!(
            fake.parent_of("C:\\"),
            Err(DirectoryError::NoParent(_))
        ));
    }
}
