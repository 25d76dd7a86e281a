//! Keyboard navigation of the active listing
//!
//! Selection indices address the sorted view of the listing. The controller
//! is stateless: it reads the current selection and entry count and computes
//! the next selection.

use input_types::{KeyCode, KeyEvent, Modifiers};
use serde::{Deserialize, Serialize};

/// What a navigation key asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavIntent {
    Next,
    Previous,
    First,
    Last,
    PageForward,
    PageBackward,
    /// Open the selected directory
    Activate,
    /// Open the `..` entry
    Parent,
    ClearSelection,
}

fn signed(current: Option<usize>) -> i64 {
    current.map_or(-1, |i| i as i64)
}

/// Selection after moving forward one entry, wrapping at the end
pub fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return current;
    }
    Some((signed(current) + 1).rem_euclid(len as i64) as usize)
}

/// Selection after moving back one entry, wrapping at the start
///
/// With no selection this computes `(-1 - 1 + len) % len`, the
/// second-to-last entry.
pub fn previous_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return current;
    }
    let n = len as i64;
    Some((signed(current) - 1 + n).rem_euclid(n) as usize)
}

/// Moves the selection by `delta` and clamps it into the listing
pub fn clamped_index(current: Option<usize>, delta: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return current;
    }
    Some((signed(current) + delta).clamp(0, len as i64 - 1) as usize)
}

/// Translates keys into intents and intents into selections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationController {
    page_size: usize,
}

impl NavigationController {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Maps a key event to an intent
    ///
    /// Alt+Up opens the parent and Alt+Down activates; other modifiers
    /// disqualify the key.
    pub fn intent_for(&self, event: &KeyEvent) -> Option<NavIntent> {
        if !event.is_actionable() {
            return None;
        }
        let modifiers = event.modifiers.normalized();

        if modifiers == Modifiers::ALT {
            return match event.code {
                KeyCode::Up => Some(NavIntent::Parent),
                KeyCode::Down => Some(NavIntent::Activate),
                _ => None,
            };
        }
        if !modifiers.is_empty() {
            return None;
        }

        match event.code {
            KeyCode::Down => Some(NavIntent::Next),
            KeyCode::Up => Some(NavIntent::Previous),
            KeyCode::Home => Some(NavIntent::First),
            KeyCode::End => Some(NavIntent::Last),
            KeyCode::PageDown => Some(NavIntent::PageForward),
            KeyCode::PageUp => Some(NavIntent::PageBackward),
            KeyCode::Enter => Some(NavIntent::Activate),
            KeyCode::Backspace => Some(NavIntent::Parent),
            KeyCode::Escape => Some(NavIntent::ClearSelection),
            _ => None,
        }
    }

    /// Computes the selection an intent leads to
    ///
    /// Returns `None` for intents that do not move the selection
    /// (`Activate`, `Parent`) and for moves within an empty listing.
    pub fn selection_after(
        &self,
        intent: NavIntent,
        current: Option<usize>,
        len: usize,
    ) -> Option<Option<usize>> {
        if intent == NavIntent::ClearSelection {
            return Some(None);
        }
        if len == 0 {
            return None;
        }
        let page = self.page_size as i64;
        match intent {
            NavIntent::Next => Some(next_index(current, len)),
            NavIntent::Previous => Some(previous_index(current, len)),
            NavIntent::First => Some(Some(0)),
            NavIntent::Last => Some(Some(len - 1)),
            NavIntent::PageForward => Some(clamped_index(current, page, len)),
            NavIntent::PageBackward => Some(clamped_index(current, -page, len)),
            NavIntent::Activate | NavIntent::Parent | NavIntent::ClearSelection => None,
        }
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(services_settings::DEFAULT_PAGE_SIZE)
    }
}
