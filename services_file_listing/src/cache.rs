//! Listing cache and load cycle

use crate::sort::sort_entries;
use crate::state::{FileListingState, FileStatePatch, ListingKey, SortKey, SortOrder};
use core_types::PanelId;
use fs_view::{is_root, title_from_path, DirectoryAccess, DirectoryError, FileEntry};
use services_tab_registry::TabRegistry;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from listing loads
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListingError {
    #[error("Failed to load {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: DirectoryError,
    },
}

/// Handle for one in-flight load
///
/// Obtained from [`FileListingCache::begin_load`] and consumed by
/// [`FileListingCache::complete_load`].
#[derive(Debug, PartialEq, Eq)]
pub struct LoadTicket {
    key: ListingKey,
    path: String,
    generation: u64,
}

impl LoadTicket {
    pub fn key(&self) -> ListingKey {
        self.key
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Result of completing a load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The listing was written to the cache
    Applied { entries: usize },
    /// A newer load began or the key was evicted; nothing was written
    Stale,
}

/// Per-(panel, tab) listing cache
#[derive(Debug, Default)]
pub struct FileListingCache {
    states: HashMap<ListingKey, FileListingState>,
    /// Generation of the newest in-flight load per key
    pending: HashMap<ListingKey, u64>,
    next_generation: u64,
}

impl FileListingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached state, if any
    pub fn get(&self, key: ListingKey) -> Option<&FileListingState> {
        self.states.get(&key)
    }

    /// Returns the cached state or the default state for absent keys
    pub fn state(&self, key: ListingKey) -> FileListingState {
        self.states.get(&key).cloned().unwrap_or_default()
    }

    pub fn contains(&self, key: ListingKey) -> bool {
        self.states.contains_key(&key)
    }

    /// Number of cached listings
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn entry(&mut self, key: ListingKey) -> &mut FileListingState {
        self.states.entry(key).or_default()
    }

    /// Shallow-merges `patch` into the state for `key`
    pub fn set_file_state(&mut self, key: ListingKey, patch: FileStatePatch) {
        patch.apply(self.entry(key));
    }

    pub fn set_selected_index(&mut self, key: ListingKey, index: Option<usize>) {
        self.entry(key).selected_index = index;
    }

    pub fn set_sort_key(&mut self, key: ListingKey, sort_key: SortKey) {
        self.entry(key).sort_key = sort_key;
        debug!(key = %key, ?sort_key, "sort key set");
    }

    pub fn set_sort_order(&mut self, key: ListingKey, order: SortOrder) {
        self.entry(key).sort_order = order;
        debug!(key = %key, ?order, "sort order set");
    }

    /// Column-header toggle
    ///
    /// Re-selecting the current key flips the order; choosing another key
    /// switches to it in ascending order.
    pub fn toggle_sort(&mut self, key: ListingKey, sort_key: SortKey) {
        let state = self.entry(key);
        if state.sort_key == sort_key {
            state.sort_order = state.sort_order.toggled();
        } else {
            state.sort_key = sort_key;
            state.sort_order = SortOrder::Asc;
        }
        debug!(key = %key, sort_key = ?state.sort_key, order = ?state.sort_order, "sort toggled");
    }

    /// Returns the listing for `key` in its current sort order
    pub fn sorted_files(&self, key: ListingKey) -> Vec<FileEntry> {
        match self.states.get(&key) {
            Some(state) => sort_entries(&state.files, state.sort_key, state.sort_order),
            None => Vec::new(),
        }
    }

    /// Returns the entry under the selection, in sorted order
    pub fn selected_entry(&self, key: ListingKey) -> Option<FileEntry> {
        let index = self.states.get(&key)?.selected_index?;
        self.sorted_files(key).into_iter().nth(index)
    }

    /// Registers a new load for `key`, superseding any in-flight one
    pub fn begin_load(&mut self, key: ListingKey, path: impl Into<String>) -> LoadTicket {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.pending.insert(key, generation);
        LoadTicket {
            key,
            path: path.into(),
            generation,
        }
    }

    /// Applies the response to a load
    ///
    /// On success the listing (with a `..` entry when `parent` is known)
    /// replaces the cached state, selection is cleared and sort resets to
    /// name ascending. The tab title is updated before the cache is written.
    /// On failure the cached state is left as it was.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<FileEntry>, DirectoryError>,
        parent: Option<String>,
        tabs: &mut TabRegistry,
    ) -> Result<LoadOutcome, ListingError> {
        let LoadTicket {
            key,
            path,
            generation,
        } = ticket;

        if self.pending.get(&key) != Some(&generation) {
            warn!(key = %key, path = %path, "discarding stale load");
            return Ok(LoadOutcome::Stale);
        }
        self.pending.remove(&key);

        let entries = match result {
            Ok(entries) => entries,
            Err(source) => {
                warn!(key = %key, path = %path, error = %source, "directory load failed");
                return Err(ListingError::Load { path, source });
            }
        };

        let mut files = Vec::with_capacity(entries.len() + 1);
        if let Some(parent) = parent {
            files.push(FileEntry::parent_link(parent));
        }
        files.extend(entries);
        let count = files.len();

        tabs.update_tab(key.panel, key.tab, Some(&title_from_path(&path)), None);
        self.states.insert(
            key,
            FileListingState {
                current_dir: path.clone(),
                files,
                selected_index: None,
                sort_key: SortKey::default(),
                sort_order: SortOrder::default(),
            },
        );
        debug!(key = %key, path = %path, entries = count, "listing loaded");
        Ok(LoadOutcome::Applied { entries: count })
    }

    /// Lists `path` through `access` and applies the result
    ///
    /// Parent resolution is skipped for filesystem roots; a failed parent
    /// lookup just omits the `..` entry.
    pub fn load_directory(
        &mut self,
        key: ListingKey,
        path: &str,
        access: &dyn DirectoryAccess,
        tabs: &mut TabRegistry,
    ) -> Result<LoadOutcome, ListingError> {
        let ticket = self.begin_load(key, path);
        let result = access.list_directory(path);
        let parent = if result.is_ok() && !is_root(path) {
            access.parent_of(path).ok()
        } else {
            None
        };
        self.complete_load(ticket, result, parent, tabs)
    }

    /// Drops the listing for `key` and invalidates its in-flight load
    pub fn evict(&mut self, key: ListingKey) {
        self.states.remove(&key);
        self.pending.remove(&key);
        debug!(key = %key, "listing evicted");
    }

    /// Drops every listing owned by `panel`
    pub fn evict_panel(&mut self, panel: PanelId) {
        self.states.retain(|key, _| key.panel != panel);
        self.pending.retain(|key, _| key.panel != panel);
        debug!(panel = %panel, "panel listings evicted");
    }
}
