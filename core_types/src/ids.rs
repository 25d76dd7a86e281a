//! Unique identifiers for layout entities

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a panel
///
/// Panels are the tiles of the grid layout. Each panel owns its own tab list
/// and its own set of cached directory listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelId(Uuid);

impl PanelId {
    /// Creates a new random panel ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a panel ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PanelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel:{}", self.0)
    }
}

/// Unique identifier for a tab
///
/// A tab is one open directory context. Tab IDs are unique across panels,
/// but a tab is only ever addressed together with its owning panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(Uuid);

impl TabId {
    /// Creates a new random tab ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a tab ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab:{}", self.0)
    }
}
