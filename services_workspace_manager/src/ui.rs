//! Sidebar state

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidebarSide {
    Left,
    Right,
}

impl SidebarSide {
    pub fn name(&self) -> &'static str {
        match self {
            SidebarSide::Left => "left",
            SidebarSide::Right => "right",
        }
    }

    /// Tab a sidebar shows before the user picks one
    pub fn default_tab(&self) -> &'static str {
        match self {
            SidebarSide::Left => "explorer",
            SidebarSide::Right => "config",
        }
    }
}

impl fmt::Display for SidebarSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sidebar {
    pub visible: bool,
    /// Name of the sidebar tab shown (`explorer`, `search`, `config`, ...)
    pub active_tab: String,
}

impl Sidebar {
    /// Hidden sidebar on its default tab
    pub fn new(side: SidebarSide) -> Self {
        Self {
            visible: false,
            active_tab: side.default_tab().to_string(),
        }
    }
}

/// Chrome state outside the panel grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub left: Sidebar,
    pub right: Sidebar,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            left: Sidebar::new(SidebarSide::Left),
            right: Sidebar::new(SidebarSide::Right),
        }
    }

    pub fn sidebar(&self, side: SidebarSide) -> &Sidebar {
        match side {
            SidebarSide::Left => &self.left,
            SidebarSide::Right => &self.right,
        }
    }

    pub fn sidebar_mut(&mut self, side: SidebarSide) -> &mut Sidebar {
        match side {
            SidebarSide::Left => &mut self.left,
            SidebarSide::Right => &mut self.right,
        }
    }

    /// Flips a sidebar's visibility, returning the new value
    pub fn toggle_sidebar(&mut self, side: SidebarSide) -> bool {
        let sidebar = self.sidebar_mut(side);
        sidebar.visible = !sidebar.visible;
        sidebar.visible
    }

    /// Shows `tab` in a sidebar, making the sidebar visible
    pub fn set_sidebar_tab(&mut self, side: SidebarSide, tab: impl Into<String>) {
        let sidebar = self.sidebar_mut(side);
        sidebar.active_tab = tab.into();
        sidebar.visible = true;
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
