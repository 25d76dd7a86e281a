//! Orchestration actions
//!
//! Every user intent that touches more than one store goes through here, so
//! the grid, the tab registry and the listing cache never drift apart.

use crate::navigation::NavIntent;
use crate::ui::SidebarSide;
use crate::{PromptPurpose, Workspace, WorkspaceError};
use core_types::{Direction, GridPosition, PanelId, TabId};
use serde::{Deserialize, Serialize};
use services_command_palette::PaletteMode;
use services_file_listing::{ListingKey, LoadOutcome, SortKey, SortOrder};
use services_focus_manager::ModalKind;
use tracing::{debug, info, warn};

/// A workspace action
///
/// Key bindings and palette commands resolve to one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "arg", rename_all = "snake_case")]
pub enum WorkspaceAction {
    ToggleSidebar(SidebarSide),
    OpenCommandPalette(PaletteMode),
    CloseCommandPalette,
    /// Ask for a path and open it in a new tab
    PromptOpenFolder { initial: String },
    /// Open a tab in the active panel (empty path: default root)
    OpenTab(String),
    CloseActiveTab,
    CloseTab(ListingKey),
    CreatePanel,
    AddRowPanel,
    AddColumnPanel,
    /// Close a panel (`None`: the active one)
    ClosePanel(Option<PanelId>),
    FocusPanel(Direction),
    ToggleSort(SortKey),
}

impl Workspace {
    /// Runs an action
    pub fn dispatch(&mut self, action: WorkspaceAction) -> Result<(), WorkspaceError> {
        debug!(?action, "dispatch");
        match action {
            WorkspaceAction::ToggleSidebar(side) => {
                self.toggle_sidebar(side);
                Ok(())
            }
            WorkspaceAction::OpenCommandPalette(mode) => {
                self.open_command_palette(mode);
                Ok(())
            }
            WorkspaceAction::CloseCommandPalette => {
                self.close_command_palette();
                Ok(())
            }
            WorkspaceAction::PromptOpenFolder { initial } => {
                self.open_folder_prompt(&initial);
                Ok(())
            }
            WorkspaceAction::OpenTab(path) => self.open_tab(&path).map(|_| ()),
            WorkspaceAction::CloseActiveTab => {
                let key = self.active_key()?;
                self.close_tab(key);
                Ok(())
            }
            WorkspaceAction::CloseTab(key) => {
                self.close_tab(key);
                Ok(())
            }
            WorkspaceAction::CreatePanel => self.create_panel().map(|_| ()),
            WorkspaceAction::AddRowPanel => self.add_row_panel().map(|_| ()),
            WorkspaceAction::AddColumnPanel => self.add_column_panel().map(|_| ()),
            WorkspaceAction::ClosePanel(panel) => self.close_panel(panel),
            WorkspaceAction::FocusPanel(direction) => {
                self.focus_panel(direction);
                Ok(())
            }
            WorkspaceAction::ToggleSort(sort_key) => {
                let key = self.active_key()?;
                self.toggle_sort(key, sort_key);
                Ok(())
            }
        }
    }

    /// Opens `path` in a new tab of the active panel
    ///
    /// The tab is created even if the directory cannot be read; it then
    /// shows an empty listing and an error toast is raised.
    pub fn open_tab(&mut self, path: &str) -> Result<TabId, WorkspaceError> {
        let panel = self
            .grid
            .active_panel()
            .map(|p| p.id)
            .ok_or(WorkspaceError::NoActivePanel)?;

        let tab = self.tabs.add_tab(panel, path);
        self.grid.set_panel_active_tab(panel, Some(tab));
        let resolved = self
            .tabs
            .tab(panel, tab)
            .map(|t| t.path.clone())
            .unwrap_or_default();

        let result = self.load(ListingKey::new(panel, tab), &resolved);
        self.refresh_commands();
        result.map(|_| tab)
    }

    /// Loads `path` into an existing tab
    ///
    /// The tab's title and path follow the directory only when the load
    /// succeeds. Unknown tabs are ignored.
    pub fn move_directory(&mut self, key: ListingKey, path: &str) -> Result<(), WorkspaceError> {
        if self.tabs.tab(key.panel, key.tab).is_none() {
            debug!(key = %key, "move on unknown tab ignored");
            return Ok(());
        }

        if let LoadOutcome::Applied { .. } = self.load(key, path)? {
            self.tabs.update_tab(key.panel, key.tab, None, Some(path));
            self.refresh_commands();
        }
        Ok(())
    }

    /// Closes a tab and drops its listing
    pub fn close_tab(&mut self, key: ListingKey) {
        self.tabs.close_tab(key.panel, key.tab);
        self.listings.evict(key);
        self.sync_active_tab(key.panel);
        self.refresh_commands();
    }

    pub fn switch_tab(&mut self, key: ListingKey) {
        self.tabs.switch_tab(key.panel, key.tab);
        self.sync_active_tab(key.panel);
        self.refresh_commands();
    }

    /// Sets sort key and order of a listing
    pub fn set_sort(&mut self, key: ListingKey, sort_key: SortKey, order: SortOrder) {
        self.listings.set_sort_key(key, sort_key);
        self.listings.set_sort_order(key, order);
    }

    /// Column-header sort: the same key flips the order, another key sorts
    /// ascending
    pub fn toggle_sort(&mut self, key: ListingKey, sort_key: SortKey) {
        self.listings.toggle_sort(key, sort_key);
    }

    /// Adds a panel at the next free grid cell
    ///
    /// The panel opens the default root. It is kept even when that directory
    /// cannot be listed; the error is still returned.
    pub fn create_panel(&mut self) -> Result<PanelId, WorkspaceError> {
        let position = self.grid.next_available_position();
        self.spawn_panel(position)
    }

    /// Adds a panel below the active one
    ///
    /// Returns `Ok(None)` when that cell is taken.
    pub fn add_row_panel(&mut self) -> Result<Option<PanelId>, WorkspaceError> {
        match self.grid.row_target() {
            Some(position) => self.spawn_panel(position).map(Some),
            None => Ok(None),
        }
    }

    /// Adds a panel right of the active one
    ///
    /// Returns `Ok(None)` when that cell is taken.
    pub fn add_column_panel(&mut self) -> Result<Option<PanelId>, WorkspaceError> {
        match self.grid.column_target() {
            Some(position) => self.spawn_panel(position).map(Some),
            None => Ok(None),
        }
    }

    fn spawn_panel(&mut self, position: GridPosition) -> Result<PanelId, WorkspaceError> {
        let root = self.settings.default_root.clone();
        let panel = self.grid.add_panel(position, &root, &mut self.tabs);
        self.focus.set_panel_scope(true);

        let result = match self.tabs.active_tab(panel).map(|t| (t.id, t.path.clone())) {
            Some((tab, path)) => self.load(ListingKey::new(panel, tab), &path).map(|_| ()),
            None => Ok(()),
        };
        self.refresh_commands();
        result.map(|_| panel)
    }

    /// Closes a panel with all its tabs (`None`: the active panel)
    pub fn close_panel(&mut self, panel: Option<PanelId>) -> Result<(), WorkspaceError> {
        let id = match panel {
            Some(id) => id,
            None => self
                .grid
                .active_panel_id()
                .ok_or(WorkspaceError::NoActivePanel)?,
        };
        self.grid.remove_panel(id, &mut self.tabs, &mut self.listings);
        self.focus.set_panel_scope(!self.grid.is_empty());
        self.refresh_commands();
        Ok(())
    }

    /// Moves focus to the adjacent panel, if any
    pub fn focus_panel(&mut self, direction: Direction) -> bool {
        let moved = self.grid.focus_direction(direction);
        if moved {
            self.refresh_commands();
        }
        moved
    }

    pub fn set_active_panel(&mut self, panel: PanelId) {
        self.grid.set_active_panel(panel);
        self.refresh_commands();
    }

    pub fn toggle_sidebar(&mut self, side: SidebarSide) -> bool {
        let visible = self.ui.toggle_sidebar(side);
        info!(side = %side, visible, "sidebar toggled");
        visible
    }

    pub fn set_sidebar_tab(&mut self, side: SidebarSide, tab: &str) {
        self.ui.set_sidebar_tab(side, tab);
    }

    /// Shows the palette in `mode`
    ///
    /// Asking for the mode the open palette is already in closes it.
    pub fn open_command_palette(&mut self, mode: PaletteMode) {
        if self.palette_visible() && self.palette.mode() == mode {
            self.close_command_palette();
            return;
        }
        self.palette.set_query(mode.initial_query());
        self.focus.push_modal(ModalKind::CommandPalette);
    }

    pub fn close_command_palette(&mut self) {
        self.close_modal(ModalKind::CommandPalette);
        self.palette.set_query("");
    }

    /// Runs the highlighted palette entry
    ///
    /// In command mode this dispatches the selected command; in search mode
    /// a directory match is opened in the active tab and a file match just
    /// closes the palette. With no search result picked yet the palette
    /// stays open and nothing happens.
    pub fn execute_palette_selection(&mut self) -> Result<(), WorkspaceError> {
        match self.palette.mode() {
            PaletteMode::Command => {
                let action = self.palette.selected_action().cloned();
                self.close_command_palette();
                match action {
                    Some(action) => self.dispatch(action),
                    None => Ok(()),
                }
            }
            PaletteMode::Search => {
                let Some(index) = self.palette.selected_index() else {
                    return Ok(());
                };
                let entry = self.palette_file_matches().into_iter().nth(index);
                self.close_command_palette();
                match entry {
                    Some(entry) if entry.is_dir => {
                        let key = self.active_key()?;
                        self.move_directory(key, &entry.path)
                    }
                    _ => Ok(()),
                }
            }
        }
    }

    /// Opens the "Open Folder" prompt prefilled with `initial`
    pub fn open_folder_prompt(&mut self, initial: &str) {
        self.palette
            .open_prompt("Open Folder", initial, PromptPurpose::OpenFolder);
        self.prompt_input = initial.to_string();
        self.focus.push_modal(ModalKind::Prompt);
    }

    pub fn set_prompt_input(&mut self, input: impl Into<String>) {
        self.prompt_input = input.into();
    }

    /// Resolves the open prompt with `input`
    ///
    /// Paths may start with an `@alias`.
    pub fn submit_prompt(&mut self, input: &str) -> Result<(), WorkspaceError> {
        let (purpose, value) = self
            .palette
            .resolve_prompt(input)
            .ok_or(WorkspaceError::NoPrompt)?;
        self.close_prompt_modal();

        match purpose {
            PromptPurpose::OpenFolder => {
                let path = self.settings.expand(value.trim());
                self.open_tab(&path).map(|_| ())
            }
        }
    }

    pub fn cancel_prompt(&mut self) {
        self.palette.cancel_prompt();
        self.close_prompt_modal();
    }

    /// Closes `kind` if it is open; closing a modal that is not open is a no-op
    fn close_modal(&mut self, kind: ModalKind) {
        if !self.focus.is_open(kind) {
            return;
        }
        if let Err(err) = self.focus.close_modal(kind) {
            warn!(?kind, error = %err, "focus stack out of sync");
        }
    }

    fn close_prompt_modal(&mut self) {
        self.close_modal(ModalKind::Prompt);
        self.prompt_input.clear();
    }

    /// Applies a navigation intent to the active listing
    ///
    /// `Activate` opens the selected directory, `Parent` follows the `..`
    /// entry; both are no-ops when there is nothing to open.
    pub fn navigate(&mut self, intent: NavIntent) -> Result<(), WorkspaceError> {
        let key = self.active_key()?;
        match intent {
            NavIntent::Activate => match self.listings.selected_entry(key) {
                Some(entry) if entry.is_dir => self.move_directory(key, &entry.path),
                _ => Ok(()),
            },
            NavIntent::Parent => {
                let parent = self
                    .listings
                    .get(key)
                    .and_then(|state| state.parent_entry())
                    .map(|entry| entry.path.clone());
                match parent {
                    Some(path) => self.move_directory(key, &path),
                    None => Ok(()),
                }
            }
            _ => {
                let Some(state) = self.listings.get(key) else {
                    return Ok(());
                };
                if let Some(selection) =
                    self.navigator
                        .selection_after(intent, state.selected_index, state.files.len())
                {
                    self.listings.set_selected_index(key, selection);
                }
                Ok(())
            }
        }
    }
}
