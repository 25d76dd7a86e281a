//! Listing state types

use core_types::{PanelId, TabId};
use fs_view::FileEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite key addressing one cached listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingKey {
    pub panel: PanelId,
    pub tab: TabId,
}

impl ListingKey {
    pub fn new(panel: PanelId, tab: TabId) -> Self {
        Self { panel, tab }
    }
}

impl fmt::Display for ListingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.panel, self.tab)
    }
}

/// Field a listing is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    #[serde(rename = "file_type")]
    Type,
    Size,
    Modified,
}

/// Direction of the primary sort comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Returns the opposite order
    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Cached view of one tab's directory
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileListingState {
    /// Directory the entries belong to (empty until the first load)
    pub current_dir: String,
    /// Raw entries, `..` first when present
    pub files: Vec<FileEntry>,
    /// Index into the sorted view; `None` means nothing is selected
    pub selected_index: Option<usize>,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl FileListingState {
    /// Returns the synthetic `..` entry, if the listing has one
    pub fn parent_entry(&self) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.is_parent_link())
    }
}

/// Partial update for [`FileListingState`]
///
/// Unset fields are left untouched by
/// [`FileListingCache::set_file_state`](crate::FileListingCache::set_file_state).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStatePatch {
    pub current_dir: Option<String>,
    pub files: Option<Vec<FileEntry>>,
    pub selected_index: Option<Option<usize>>,
    pub sort_key: Option<SortKey>,
    pub sort_order: Option<SortOrder>,
}

impl FileStatePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_dir(mut self, dir: impl Into<String>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn files(mut self, files: Vec<FileEntry>) -> Self {
        self.files = Some(files);
        self
    }

    /// Sets the selection (`None` clears it)
    pub fn selected_index(mut self, index: Option<usize>) -> Self {
        self.selected_index = Some(index);
        self
    }

    pub fn sort_key(mut self, key: SortKey) -> Self {
        self.sort_key = Some(key);
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    /// Applies the set fields to `state`
    pub fn apply(self, state: &mut FileListingState) {
        if let Some(dir) = self.current_dir {
            state.current_dir = dir;
        }
        if let Some(files) = self.files {
            state.files = files;
        }
        if let Some(index) = self.selected_index {
            state.selected_index = index;
        }
        if let Some(key) = self.sort_key {
            state.sort_key = key;
        }
        if let Some(order) = self.sort_order {
            state.sort_order = order;
        }
    }
}
