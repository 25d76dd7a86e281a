//! # Panel Grid Service
//!
//! Places panels on a sparse `(row, column)` grid and tracks the active one.
//!
//! ## Philosophy
//!
//! - **Grid, not tree**: Panels are addressed by cell; there are no split ratios
//! - **Deterministic placement**: [`PanelGrid::next_available_position`] fills gaps
//!   row-major before growing, and grows toward a square
//! - **Adjacency is exact**: Directional focus looks one cell away and never skips gaps
//!
//! ## Trusted callers
//!
//! [`PanelGrid::set_active_panel`] and [`PanelGrid::add_panel`] do not
//! validate their input. Orchestration code is expected to pass live ids and
//! free cells; stale ids from UI races are accepted silently.

pub mod placement;

pub use placement::next_available_position;

use core_types::{Direction, GridPosition, PanelId, TabId};
use serde::{Deserialize, Serialize};
use services_file_listing::{FileListingCache, ListingKey};
use services_tab_registry::TabRegistry;
use tracing::{debug, info};

/// One tile of the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub id: PanelId,
    pub position: GridPosition,
    /// Mirror of the registry's active tab for this panel
    pub active_tab_id: Option<TabId>,
}

/// Panel grid
///
/// Panels are kept in creation order.
#[derive(Debug, Clone, Default)]
pub struct PanelGrid {
    panels: Vec<Panel>,
    active_panel: Option<PanelId>,
}

impl PanelGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a panel at `position` with one tab on `initial_dir`
    ///
    /// An empty `initial_dir` opens the registry's default root. The new
    /// panel becomes the active panel.
    pub fn add_panel(
        &mut self,
        position: GridPosition,
        initial_dir: &str,
        tabs: &mut TabRegistry,
    ) -> PanelId {
        let id = PanelId::new();
        let tab = tabs.add_tab(id, initial_dir);
        self.panels.push(Panel {
            id,
            position,
            active_tab_id: Some(tab),
        });
        self.active_panel = Some(id);
        info!(panel = %id, position = %position, "panel added");
        id
    }

    /// Removes a panel with all of its tabs and their listings
    ///
    /// The active panel falls back to the first remaining panel, or to none
    /// when the grid is empty.
    pub fn remove_panel(
        &mut self,
        id: PanelId,
        tabs: &mut TabRegistry,
        listings: &mut FileListingCache,
    ) {
        for tab in tabs.remove_panel(id) {
            listings.evict(ListingKey::new(id, tab));
        }
        listings.evict_panel(id);

        let before = self.panels.len();
        self.panels.retain(|p| p.id != id);
        self.active_panel = self.panels.first().map(|p| p.id);
        if self.panels.len() != before {
            info!(panel = %id, remaining = self.panels.len(), "panel removed");
        }
    }

    /// Sets the active panel without checking that it exists
    pub fn set_active_panel(&mut self, id: PanelId) {
        self.active_panel = Some(id);
        debug!(panel = %id, "active panel set");
    }

    pub fn active_panel_id(&self) -> Option<PanelId> {
        self.active_panel
    }

    /// Returns the active panel, if the active id is live
    pub fn active_panel(&self) -> Option<&Panel> {
        self.active_panel.and_then(|id| self.panel(id))
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    /// Returns the panel occupying `position`
    ///
    /// When positions collide the earliest panel wins.
    pub fn panel_at(&self, position: GridPosition) -> Option<&Panel> {
        self.panels.iter().find(|p| p.position == position)
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Records `tab` as the panel's active tab
    pub fn set_panel_active_tab(&mut self, panel: PanelId, tab: Option<TabId>) {
        if let Some(p) = self.panels.iter_mut().find(|p| p.id == panel) {
            p.active_tab_id = tab;
        }
    }

    /// Next free cell for a new panel
    pub fn next_available_position(&self) -> GridPosition {
        next_available_position(self.panels.iter().map(|p| p.position))
    }

    /// Cell directly below the active panel, if it is free
    ///
    /// Returns the origin for an empty grid and `None` when the cell is
    /// taken or there is no live active panel.
    pub fn row_target(&self) -> Option<GridPosition> {
        self.adjacent_free_cell(Direction::Down)
    }

    /// Cell directly right of the active panel, if it is free
    pub fn column_target(&self) -> Option<GridPosition> {
        self.adjacent_free_cell(Direction::Right)
    }

    fn adjacent_free_cell(&self, direction: Direction) -> Option<GridPosition> {
        if self.panels.is_empty() {
            return Some(GridPosition::ORIGIN);
        }
        let target = self.active_panel()?.position.shifted(direction)?;
        match self.panel_at(target) {
            Some(_) => None,
            None => Some(target),
        }
    }

    /// Panel one cell away from the active panel in `direction`
    pub fn neighbor(&self, direction: Direction) -> Option<&Panel> {
        let target = self.active_panel()?.position.shifted(direction)?;
        self.panel_at(target)
    }

    /// Moves focus to the neighbor in `direction`
    ///
    /// Returns whether the active panel changed.
    pub fn focus_direction(&mut self, direction: Direction) -> bool {
        let Some(next) = self.neighbor(direction).map(|p| p.id) else {
            return false;
        };
        self.active_panel = Some(next);
        debug!(panel = %next, direction = %direction, "focus moved");
        true
    }
}
