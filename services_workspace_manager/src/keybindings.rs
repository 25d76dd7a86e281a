//! # Keybindings
//!
//! Modifier-qualified shortcuts for workspace commands.
//!
//! ## Philosophy
//!
//! - **Declared, not inferred**: Every shortcut is an entry in a profile
//! - **Modifiers, not modes**: Panel-level commands are told apart from listing
//!   navigation by their modifier combination
//! - **Persistent storage**: Profiles round-trip through JSON
//!
//! Listing navigation keys (arrows, Home/End, Enter, ...) are not bound here;
//! see [`crate::navigation`].

use crate::actions::WorkspaceAction;
use crate::ui::SidebarSide;
use core_types::Direction;
use input_types::{KeyCode, KeyEvent, Modifiers};
use serde::{Deserialize, Serialize};
use services_command_palette::PaletteMode;
use std::collections::HashMap;
use std::fmt;

/// A key plus the modifiers held with it
///
/// Code and modifiers are stored normalized, so a Ctrl binding also fires
/// for Meta and letter case does not matter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            code: code.normalized(),
            modifiers: modifiers.normalized(),
        }
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }

    /// True when `event` normalizes to this combo
    pub fn matches(&self, event: &KeyEvent) -> bool {
        *self == Self::from_event(event)
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{}+{}", self.modifiers, self.code)
        }
    }
}

/// Named set of shortcuts
#[derive(Debug, Clone)]
pub struct KeyBindingProfile {
    /// Profile name
    pub name: String,
    bindings: HashMap<KeyCombo, WorkspaceAction>,
}

impl Serialize for KeyBindingProfile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut bindings_vec: Vec<(&KeyCombo, &WorkspaceAction)> = self.bindings.iter().collect();
        bindings_vec.sort_by_key(|(combo, _)| combo.to_string());

        let mut state = serializer.serialize_struct("KeyBindingProfile", 2)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("bindings", &bindings_vec)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for KeyBindingProfile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            name: String,
            bindings: Vec<(KeyCombo, WorkspaceAction)>,
        }

        let helper = Helper::deserialize(deserializer)?;
        let mut profile = KeyBindingProfile::new(helper.name);
        for (combo, action) in helper.bindings {
            profile.bind(combo, action);
        }
        Ok(profile)
    }
}

impl KeyBindingProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: HashMap::new(),
        }
    }

    /// Binds `combo`, replacing any earlier action for it
    pub fn bind(&mut self, combo: KeyCombo, action: WorkspaceAction) {
        let combo = KeyCombo::new(combo.code, combo.modifiers);
        self.bindings.insert(combo, action);
    }

    /// Drops the binding for `combo`, returning its action
    pub fn unbind(&mut self, combo: &KeyCombo) -> Option<WorkspaceAction> {
        self.bindings.remove(&KeyCombo::new(combo.code, combo.modifiers))
    }

    /// Action bound to the combo `event` produces
    pub fn get_action(&self, event: &KeyEvent) -> Option<&WorkspaceAction> {
        self.bindings.get(&KeyCombo::from_event(event))
    }

    pub fn bindings(&self) -> &HashMap<KeyCombo, WorkspaceAction> {
        &self.bindings
    }

    /// Combos bound to actions that open the command palette
    pub fn palette_combos(&self) -> impl Iterator<Item = &KeyCombo> {
        self.bindings
            .iter()
            .filter(|(_, action)| matches!(action, WorkspaceAction::OpenCommandPalette(_)))
            .map(|(combo, _)| combo)
    }

    /// Display label of the shortcut bound to `action`
    ///
    /// With several combos bound to one action, the shortest label wins.
    pub fn label_for(&self, action: &WorkspaceAction) -> Option<String> {
        self.bindings
            .iter()
            .filter(|(_, bound)| *bound == action)
            .map(|(combo, _)| combo.to_string())
            .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Create a default profile with the standard shortcuts
    pub fn default_profile() -> Self {
        let ctrl = Modifiers::CTRL;
        let ctrl_alt = Modifiers::CTRL.with(Modifiers::ALT);
        let ctrl_shift = Modifiers::CTRL.with(Modifiers::SHIFT);

        let mut profile = Self::new("default");

        profile.bind(
            KeyCombo::new(KeyCode::Char('b'), ctrl),
            WorkspaceAction::ToggleSidebar(SidebarSide::Left),
        );
        profile.bind(
            KeyCombo::new(KeyCode::Char('b'), ctrl_alt),
            WorkspaceAction::ToggleSidebar(SidebarSide::Right),
        );
        profile.bind(
            KeyCombo::new(KeyCode::Char('p'), ctrl),
            WorkspaceAction::OpenCommandPalette(PaletteMode::Search),
        );
        profile.bind(
            KeyCombo::new(KeyCode::Char('p'), ctrl_shift),
            WorkspaceAction::OpenCommandPalette(PaletteMode::Command),
        );
        profile.bind(KeyCombo::new(KeyCode::Char('n'), ctrl), WorkspaceAction::CreatePanel);
        profile.bind(
            KeyCombo::new(KeyCode::Char('\\'), ctrl),
            WorkspaceAction::AddColumnPanel,
        );
        profile.bind(
            KeyCombo::new(KeyCode::Char('\\'), ctrl_shift),
            WorkspaceAction::AddRowPanel,
        );
        profile.bind(
            KeyCombo::new(KeyCode::Char('w'), ctrl_shift),
            WorkspaceAction::ClosePanel(None),
        );
        profile.bind(
            KeyCombo::new(KeyCode::Char('t'), ctrl),
            WorkspaceAction::OpenTab(String::new()),
        );
        profile.bind(KeyCombo::new(KeyCode::Char('w'), ctrl), WorkspaceAction::CloseActiveTab);

        for (code, direction) in [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
        ] {
            profile.bind(
                KeyCombo::new(code, ctrl_alt),
                WorkspaceAction::FocusPanel(direction),
            );
        }

        profile
    }

    /// Pretty JSON, bindings sorted by label
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for KeyBindingProfile {
    fn default() -> Self {
        Self::default_profile()
    }
}
