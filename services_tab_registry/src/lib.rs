//! # Tab Registry Service
//!
//! Owns the ordered tab list of every panel.
//!
//! ## Invariants
//!
//! - Within one panel's list, at most one tab is active; after `add_tab` or a
//!   `close_tab` that leaves tabs behind, exactly one is.
//! - Operations on unknown panels or tabs are silent no-ops.
//!
//! `switch_tab` is a trusted-caller API: it does not check that the tab
//! exists. Switching to a dead id leaves the panel with no active tab.

use core_types::{PanelId, TabId};
use fs_view::{platform_default_root, title_from_path};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// One open directory context within a panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Unique tab identifier
    pub id: TabId,
    /// Absolute directory path
    pub path: String,
    /// Display title (final path segment)
    pub title: String,
    /// Whether this is the panel's active tab
    pub is_active: bool,
}

/// Tab registry
///
/// Tabs are stored per panel, in display order.
#[derive(Debug, Clone)]
pub struct TabRegistry {
    tabs: HashMap<PanelId, Vec<Tab>>,
    default_root: String,
}

impl TabRegistry {
    /// Creates a registry using the platform default root for empty paths
    pub fn new() -> Self {
        Self::with_default_root(platform_default_root())
    }

    /// Creates a registry with a custom default root
    pub fn with_default_root(default_root: impl Into<String>) -> Self {
        Self {
            tabs: HashMap::new(),
            default_root: default_root.into(),
        }
    }

    /// Returns the directory used when a tab is opened without a path
    pub fn default_root(&self) -> &str {
        &self.default_root
    }

    /// Adds a tab to `panel` and makes it active
    ///
    /// An empty `path` opens the default root. Every other tab of the panel
    /// is deactivated. Returns the new tab's id.
    pub fn add_tab(&mut self, panel: PanelId, path: &str) -> TabId {
        let path = if path.is_empty() {
            self.default_root.clone()
        } else {
            path.to_string()
        };

        let tab = Tab {
            id: TabId::new(),
            title: title_from_path(&path),
            path,
            is_active: true,
        };
        let id = tab.id;

        let tabs = self.tabs.entry(panel).or_default();
        for existing in tabs.iter_mut() {
            existing.is_active = false;
        }
        debug!(panel = %panel, tab = %id, path = %tab.path, "tab added");
        tabs.push(tab);
        id
    }

    /// Closes a tab
    ///
    /// If the closed tab was active, its predecessor becomes active; if it
    /// had none, the new first tab does; an emptied list has no active tab.
    /// Closing an unknown tab does nothing.
    pub fn close_tab(&mut self, panel: PanelId, tab: TabId) {
        let Some(tabs) = self.tabs.get_mut(&panel) else {
            return;
        };
        let Some(index) = tabs.iter().position(|t| t.id == tab) else {
            return;
        };

        let removed = tabs.remove(index);
        if removed.is_active && !tabs.is_empty() {
            let next = index.saturating_sub(1);
            for (i, t) in tabs.iter_mut().enumerate() {
                t.is_active = i == next;
            }
        }
        debug!(panel = %panel, tab = %tab, remaining = tabs.len(), "tab closed");
    }

    /// Makes `tab` the only active tab of `panel`
    ///
    /// Does not validate `tab`: an unknown id deactivates every tab.
    pub fn switch_tab(&mut self, panel: PanelId, tab: TabId) {
        if let Some(tabs) = self.tabs.get_mut(&panel) {
            for t in tabs.iter_mut() {
                t.is_active = t.id == tab;
            }
        }
    }

    /// Updates a tab's title and/or path
    ///
    /// `None` fields are left unchanged.
    pub fn update_tab(
        &mut self,
        panel: PanelId,
        tab: TabId,
        title: Option<&str>,
        path: Option<&str>,
    ) {
        let Some(target) = self
            .tabs
            .get_mut(&panel)
            .and_then(|tabs| tabs.iter_mut().find(|t| t.id == tab))
        else {
            return;
        };
        if let Some(title) = title {
            target.title = title.to_string();
        }
        if let Some(path) = path {
            target.path = path.to_string();
        }
    }

    /// Returns the tabs of `panel` in display order (empty if unknown)
    pub fn tabs_by_panel(&self, panel: PanelId) -> &[Tab] {
        self.tabs.get(&panel).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the active tab of `panel`
    pub fn active_tab(&self, panel: PanelId) -> Option<&Tab> {
        self.tabs_by_panel(panel).iter().find(|t| t.is_active)
    }

    /// Looks up a tab by id
    pub fn tab(&self, panel: PanelId, tab: TabId) -> Option<&Tab> {
        self.tabs_by_panel(panel).iter().find(|t| t.id == tab)
    }

    /// Returns the number of tabs in `panel`
    pub fn tab_count(&self, panel: PanelId) -> usize {
        self.tabs_by_panel(panel).len()
    }

    /// Closes every tab of `panel`, returning the closed ids in order
    pub fn remove_panel(&mut self, panel: PanelId) -> Vec<TabId> {
        self.tabs
            .remove(&panel)
            .map(|tabs| tabs.into_iter().map(|t| t.id).collect())
            .unwrap_or_default()
    }
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new()
    }
}
