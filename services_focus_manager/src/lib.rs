//! # Focus Manager Service
//!
//! Decides which layer of the workspace receives a key event.
//!
//! ## Philosophy
//!
//! - **Explicit scopes**: Input scope is a stack, not a set of boolean flags
//! - **Stack-based**: `Global` is always at the bottom, `Panel` sits above it
//!   while panels exist, modals are pushed on top
//! - **Global bindings pierce modals**: Keys registered with
//!   [`FocusManager::register_global`] route to commands even under a modal
//! - **Auditable**: Modal transitions are recorded
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A widget focus chain (no tab order between controls)
//! - A keymap (the workspace maps keys to actions)

use input_types::{EventTarget, KeyCode, KeyEvent, Modifiers};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Focus manager error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FocusError {
    #[error("No modal is open")]
    NoModal,

    #[error("Modal not open: {0:?}")]
    ModalNotOpen(ModalKind),
}

/// Kind of modal overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModalKind {
    CommandPalette,
    Prompt,
}

/// One layer of the input stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputScope {
    Global,
    Panel,
    Modal(ModalKind),
}

/// Where a key event should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The topmost modal consumes the event
    Modal(ModalKind),
    /// Look the event up in the command keymap
    Command,
    /// Listing navigation in the active panel
    Listing,
    /// Nobody handles the event
    Ignored,
}

/// Modal transition for audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusEvent {
    Opened { kind: ModalKind, sequence: u64 },
    Closed { kind: ModalKind, sequence: u64 },
}

/// Focus manager
///
/// Index 0 of the stack is always [`InputScope::Global`].
#[derive(Debug, Clone)]
pub struct FocusManager {
    stack: Vec<InputScope>,
    global_keys: Vec<(KeyCode, Modifiers)>,
    audit_trail: Vec<FocusEvent>,
    next_sequence: u64,
}

impl FocusManager {
    /// Creates a manager with the global and panel scopes
    pub fn new() -> Self {
        Self {
            stack: vec![InputScope::Global, InputScope::Panel],
            global_keys: Vec::new(),
            audit_trail: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Marks a key combination as global
    pub fn register_global(&mut self, code: KeyCode, modifiers: Modifiers) {
        let combo = (code.normalized(), modifiers.normalized());
        if !self.global_keys.contains(&combo) {
            self.global_keys.push(combo);
        }
    }

    pub fn is_global(&self, event: &KeyEvent) -> bool {
        self.global_keys
            .contains(&(event.code.normalized(), event.modifiers.normalized()))
    }

    /// Returns the topmost scope
    pub fn top(&self) -> InputScope {
        self.stack.last().copied().unwrap_or(InputScope::Global)
    }

    pub fn modal_active(&self) -> bool {
        self.active_modal().is_some()
    }

    /// Returns the topmost modal
    pub fn active_modal(&self) -> Option<ModalKind> {
        match self.top() {
            InputScope::Modal(kind) => Some(kind),
            _ => None,
        }
    }

    /// Checks whether `kind` is open anywhere on the stack
    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.stack.contains(&InputScope::Modal(kind))
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Opens a modal on top of the stack
    ///
    /// Opening the modal that is already on top is a no-op.
    pub fn push_modal(&mut self, kind: ModalKind) {
        if self.active_modal() == Some(kind) {
            return;
        }
        self.stack.push(InputScope::Modal(kind));
        let sequence = self.next_sequence();
        self.audit_trail.push(FocusEvent::Opened { kind, sequence });
        debug!(?kind, depth = self.stack.len(), "modal opened");
    }

    /// Closes the topmost modal
    pub fn pop_modal(&mut self) -> Result<ModalKind, FocusError> {
        let kind = self.active_modal().ok_or(FocusError::NoModal)?;
        self.stack.pop();
        self.record_close(kind);
        Ok(kind)
    }

    /// Closes the topmost instance of `kind`, wherever it is
    pub fn close_modal(&mut self, kind: ModalKind) -> Result<(), FocusError> {
        let pos = self
            .stack
            .iter()
            .rposition(|s| *s == InputScope::Modal(kind))
            .ok_or(FocusError::ModalNotOpen(kind))?;
        self.stack.remove(pos);
        self.record_close(kind);
        Ok(())
    }

    /// Adds or removes the panel scope
    ///
    /// Without it, listing navigation keys are ignored.
    pub fn set_panel_scope(&mut self, present: bool) {
        let pos = self.stack.iter().position(|s| *s == InputScope::Panel);
        match (present, pos) {
            (true, None) => self.stack.insert(1, InputScope::Panel),
            (false, Some(pos)) => {
                self.stack.remove(pos);
            }
            _ => {}
        }
    }

    pub fn has_panel_scope(&self) -> bool {
        self.stack.contains(&InputScope::Panel)
    }

    /// Routes a key event
    ///
    /// Released keys are ignored. Global combinations always route to
    /// commands. Under a modal everything else goes to the modal. Otherwise
    /// Ctrl/Meta combinations are commands, navigation keys go to the listing
    /// unless typed into a text input, and other modified keys are commands.
    pub fn route(&self, event: &KeyEvent, target: EventTarget) -> Route {
        if !event.is_actionable() {
            return Route::Ignored;
        }
        if self.is_global(event) {
            return Route::Command;
        }
        if let Some(kind) = self.active_modal() {
            return Route::Modal(kind);
        }

        let modifiers = event.modifiers.normalized();
        if modifiers.is_ctrl() {
            return Route::Command;
        }
        if event.code.is_navigation() {
            if target.is_text_input() || !self.has_panel_scope() {
                return Route::Ignored;
            }
            return Route::Listing;
        }
        if modifiers.is_empty() {
            Route::Ignored
        } else {
            Route::Command
        }
    }

    /// Returns the audit trail
    pub fn audit_trail(&self) -> &[FocusEvent] {
        &self.audit_trail
    }

    fn record_close(&mut self, kind: ModalKind) {
        let sequence = self.next_sequence();
        self.audit_trail.push(FocusEvent::Closed { kind, sequence });
        debug!(?kind, depth = self.stack.len(), "modal closed");
    }

    fn next_sequence(&mut self) -> u64 {
        let seq = self.next_sequence;
        self.next_sequence += 1;
        seq
    }
}

impl Default for FocusManager {
    fn default() -> Self {
        Self::new()
    }
}
