//! # Workspace Manager Service
//!
//! The orchestration layer of Tilepane: one [`Workspace`] owns every store
//! and turns user input into store mutations.
//!
//! ## Philosophy
//!
//! - **Stores are values**: The panel grid, tab registry and listing cache are
//!   owned here and handed to each other by reference; there are no globals
//! - **Actions are data**: Keys, palette entries and clicks all become a
//!   [`WorkspaceAction`] before anything changes
//! - **Input routing is explicit**: The focus stack decides whether a key is a
//!   command, a listing move, or belongs to a modal
//! - **Failures are visible**: A directory that cannot be read raises a toast
//!   and leaves the listing as it was
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A renderer (pane chrome, icons and layout pixels live in the host)
//! - A file system (listing goes through [`DirectoryAccess`])
//! - Persistence of the panel layout across restarts

pub mod actions;
pub mod commands;
pub mod keybindings;
pub mod navigation;
pub mod ui;

pub use actions::WorkspaceAction;
pub use commands::default_commands;
pub use keybindings::{KeyBindingProfile, KeyCombo};
pub use navigation::{NavIntent, NavigationController};
pub use ui::{Sidebar, SidebarSide, UiState};

use core_types::PanelId;
use fs_view::{DirectoryAccess, FileEntry};
use input_types::{EventTarget, KeyCode, KeyEvent};
use serde::{Deserialize, Serialize};
use services_command_palette::{CommandPalette, PaletteMode};
use services_file_listing::{FileListingCache, ListingError, ListingKey, LoadOutcome};
use services_focus_manager::{FocusError, FocusManager, ModalKind, Route};
use services_notification::ToastQueue;
use services_panel_grid::PanelGrid;
use services_settings::WorkspaceSettings;
use services_tab_registry::{Tab, TabRegistry};
use thiserror::Error;
use tracing::{debug, warn};

/// Workspace errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("No active panel")]
    NoActivePanel,

    #[error("No active tab in {0}")]
    NoActiveTab(PanelId),

    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error("No prompt is open")]
    NoPrompt,

    #[error("Focus error: {0}")]
    FocusError(String),
}

impl From<FocusError> for WorkspaceError {
    fn from(err: FocusError) -> Self {
        WorkspaceError::FocusError(err.to_string())
    }
}

/// What a palette prompt was opened for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptPurpose {
    /// Open the entered path in a new tab
    OpenFolder,
}

/// Result of feeding a key event to the workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key triggered an action
    Handled,
    /// Nothing listens to this key in the current scope
    Ignored,
    /// The key triggered an action that failed
    Failed(WorkspaceError),
}

/// The workspace
///
/// Owns the stores, the input router and the directory access backend.
pub struct Workspace {
    settings: WorkspaceSettings,
    grid: PanelGrid,
    tabs: TabRegistry,
    listings: FileListingCache,
    focus: FocusManager,
    palette: CommandPalette<WorkspaceAction, PromptPurpose>,
    notifications: ToastQueue,
    keybindings: KeyBindingProfile,
    ui: UiState,
    navigator: NavigationController,
    prompt_input: String,
    access: Box<dyn DirectoryAccess>,
}

impl Workspace {
    /// Creates an empty workspace
    ///
    /// No panel exists yet; the host usually calls
    /// [`Workspace::create_panel`] right away.
    pub fn new(settings: WorkspaceSettings, access: impl DirectoryAccess + 'static) -> Self {
        let mut focus = FocusManager::new();
        let keybindings = KeyBindingProfile::default_profile();
        for combo in keybindings.palette_combos() {
            focus.register_global(combo.code, combo.modifiers);
        }
        focus.set_panel_scope(false);

        let mut workspace = Self {
            tabs: TabRegistry::with_default_root(settings.default_root.clone()),
            navigator: NavigationController::new(settings.page_size),
            settings,
            grid: PanelGrid::new(),
            listings: FileListingCache::new(),
            focus,
            palette: CommandPalette::new(),
            notifications: ToastQueue::new(),
            keybindings,
            ui: UiState::default(),
            prompt_input: String::new(),
            access: Box::new(access),
        };
        workspace.refresh_commands();
        workspace
    }

    pub fn settings(&self) -> &WorkspaceSettings {
        &self.settings
    }

    pub fn grid(&self) -> &PanelGrid {
        &self.grid
    }

    pub fn tabs(&self) -> &TabRegistry {
        &self.tabs
    }

    pub fn listings(&self) -> &FileListingCache {
        &self.listings
    }

    pub fn focus(&self) -> &FocusManager {
        &self.focus
    }

    pub fn palette(&self) -> &CommandPalette<WorkspaceAction, PromptPurpose> {
        &self.palette
    }

    pub fn notifications(&self) -> &ToastQueue {
        &self.notifications
    }

    pub fn keybindings(&self) -> &KeyBindingProfile {
        &self.keybindings
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn navigator(&self) -> &NavigationController {
        &self.navigator
    }

    /// Text currently typed into the prompt
    pub fn prompt_input(&self) -> &str {
        &self.prompt_input
    }

    /// Replaces the keybinding profile
    ///
    /// Palette shortcuts of the new profile become global keys; those of the
    /// old profile stay registered.
    pub fn set_keybindings(&mut self, profile: KeyBindingProfile) {
        for combo in profile.palette_combos() {
            self.focus.register_global(combo.code, combo.modifiers);
        }
        self.keybindings = profile;
        self.refresh_commands();
    }

    /// Listing key of the active tab in the active panel
    pub fn active_key(&self) -> Result<ListingKey, WorkspaceError> {
        let panel = self
            .grid
            .active_panel()
            .ok_or(WorkspaceError::NoActivePanel)?;
        let tab = self
            .tabs
            .active_tab(panel.id)
            .ok_or(WorkspaceError::NoActiveTab(panel.id))?;
        Ok(ListingKey::new(panel.id, tab.id))
    }

    /// Active tab of the active panel
    pub fn active_tab(&self) -> Option<&Tab> {
        let panel = self.grid.active_panel()?;
        self.tabs.active_tab(panel.id)
    }

    pub fn palette_visible(&self) -> bool {
        self.focus.is_open(ModalKind::CommandPalette)
    }

    pub fn prompt_visible(&self) -> bool {
        self.focus.is_open(ModalKind::Prompt)
    }

    /// Sets the palette query; a leading `>` switches to command mode
    pub fn set_palette_query(&mut self, query: impl Into<String>) {
        self.palette.set_query(query);
    }

    /// Entries of the active listing whose name contains the search text
    ///
    /// Matching is case-insensitive and follows the listing's sort order.
    pub fn palette_file_matches(&self) -> Vec<FileEntry> {
        let Ok(key) = self.active_key() else {
            return Vec::new();
        };
        let needle = self.palette.search_text().to_lowercase();
        self.listings
            .sorted_files(key)
            .into_iter()
            .filter(|entry| entry.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Advances the notification clock and drops expired toasts
    pub fn tick(&mut self, now_ms: u64) {
        self.notifications.set_time(now_ms);
    }

    /// Feeds a key event through the input router
    pub fn handle_key(&mut self, event: &KeyEvent, target: EventTarget) -> KeyOutcome {
        let route = self.focus.route(event, target);
        debug!(key = %event.code, modifiers = %event.modifiers, ?route, "key routed");

        let result = match route {
            Route::Ignored => return KeyOutcome::Ignored,
            Route::Command => match self.keybindings.get_action(event).cloned() {
                Some(action) => self.dispatch(action),
                None => return KeyOutcome::Ignored,
            },
            Route::Listing => match self.navigator.intent_for(event) {
                Some(intent) => self.navigate(intent),
                None => return KeyOutcome::Ignored,
            },
            Route::Modal(ModalKind::CommandPalette) => match self.palette_key(event) {
                Some(result) => result,
                None => return KeyOutcome::Ignored,
            },
            Route::Modal(ModalKind::Prompt) => match event.code {
                KeyCode::Escape => {
                    self.cancel_prompt();
                    Ok(())
                }
                KeyCode::Enter => {
                    let input = self.prompt_input.clone();
                    self.submit_prompt(&input)
                }
                _ => return KeyOutcome::Ignored,
            },
        };

        match result {
            Ok(()) => KeyOutcome::Handled,
            Err(err) => KeyOutcome::Failed(err),
        }
    }

    fn palette_key(&mut self, event: &KeyEvent) -> Option<Result<(), WorkspaceError>> {
        let count = match self.palette.mode() {
            PaletteMode::Command => self.palette.filtered().len(),
            PaletteMode::Search => self.palette_file_matches().len(),
        };
        match event.code {
            KeyCode::Escape => {
                self.close_command_palette();
                Some(Ok(()))
            }
            KeyCode::Down => {
                self.palette.select_next_in(count);
                Some(Ok(()))
            }
            KeyCode::Up => {
                self.palette.select_prev_in(count);
                Some(Ok(()))
            }
            KeyCode::Enter
                if self.palette.mode() == PaletteMode::Search
                    && self.palette.selected_index().is_none() =>
            {
                None
            }
            KeyCode::Enter => Some(self.execute_palette_selection()),
            _ => None,
        }
    }

    /// Loads `path` into `key` and reports failures as an error toast
    fn load(&mut self, key: ListingKey, path: &str) -> Result<LoadOutcome, WorkspaceError> {
        match self
            .listings
            .load_directory(key, path, &*self.access, &mut self.tabs)
        {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                warn!(key = %key, path = %path, error = %err, "load failed");
                self.notifications.error(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Mirrors the registry's active tab onto the panel
    fn sync_active_tab(&mut self, panel: PanelId) {
        let active = self.tabs.active_tab(panel).map(|t| t.id);
        self.grid.set_panel_active_tab(panel, active);
    }

    /// Rebuilds the palette commands from the current ids
    pub fn refresh_commands(&mut self) {
        let commands = default_commands(self);
        self.palette.register_commands(commands);
    }
}
