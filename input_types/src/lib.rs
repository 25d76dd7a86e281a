//! # Input Types
//!
//! Keyboard event types consumed by the Tilepane input router.
//!
//! ## Philosophy
//!
//! - **Logical keys**: A key is either a named key or the character it types
//! - **Targets are explicit**: Every event says whether it landed in a text field
//! - **Testable**: Events are plain values and can be injected in tests
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - Raw hardware scan codes
//! - Pointer or touch input (clicks reach the core as actions, not events)
//! - A keyboard layout table

use serde::{Deserialize, Serialize};
use std::fmt;

/// One keyboard state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyEvent {
    pub fn new(code: KeyCode, modifiers: Modifiers, state: KeyState) -> Self {
        Self {
            code,
            modifiers,
            state,
        }
    }

    pub fn pressed(code: KeyCode, modifiers: Modifiers) -> Self {
        Self::new(code, modifiers, KeyState::Pressed)
    }

    /// Key press without modifiers
    pub fn plain(code: KeyCode) -> Self {
        Self::pressed(code, Modifiers::NONE)
    }

    pub fn released(code: KeyCode, modifiers: Modifiers) -> Self {
        Self::new(code, modifiers, KeyState::Released)
    }

    pub fn repeat(code: KeyCode, modifiers: Modifiers) -> Self {
        Self::new(code, modifiers, KeyState::Repeat)
    }

    /// Returns true for press and auto-repeat events
    ///
    /// Navigation reacts to both, so holding an arrow key keeps moving.
    pub fn is_actionable(&self) -> bool {
        matches!(self.state, KeyState::Pressed | KeyState::Repeat)
    }

    pub fn is_released(&self) -> bool {
        self.state == KeyState::Released
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyState {
    Pressed,
    Released,
    Repeat,
}

/// Logical key
///
/// Printable keys carry their character; letters should be lowercase
/// (see [`KeyCode::normalized`]). Shift is reported through [`Modifiers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Char(char),
    Escape,
    Tab,
    Enter,
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
}

impl KeyCode {
    /// Character key, lowercased
    pub fn char(c: char) -> Self {
        KeyCode::Char(c.to_ascii_lowercase())
    }

    /// Lowercases character keys so `P` and `p` compare equal
    pub fn normalized(&self) -> Self {
        match *self {
            KeyCode::Char(c) => KeyCode::char(c),
            other => other,
        }
    }

    /// Returns true for keys that drive listing navigation
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            KeyCode::Up
                | KeyCode::Down
                | KeyCode::Home
                | KeyCode::End
                | KeyCode::PageUp
                | KeyCode::PageDown
                | KeyCode::Enter
                | KeyCode::Backspace
                | KeyCode::Escape
        )
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Held modifier keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    /// Command on macOS, Super/Windows elsewhere
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };
    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Union of two modifier sets
    pub const fn with(self, other: Modifiers) -> Self {
        Self {
            ctrl: self.ctrl || other.ctrl,
            alt: self.alt || other.alt,
            shift: self.shift || other.shift,
            meta: self.meta || other.meta,
        }
    }

    pub fn is_ctrl(&self) -> bool {
        self.ctrl
    }

    pub fn is_alt(&self) -> bool {
        self.alt
    }

    pub fn is_shift(&self) -> bool {
        self.shift
    }

    pub fn is_meta(&self) -> bool {
        self.meta
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    /// Folds Meta into Ctrl
    ///
    /// Shortcuts are declared with Ctrl; on macOS the same shortcut arrives as Meta.
    pub fn normalized(&self) -> Self {
        Self {
            ctrl: self.ctrl || self.meta,
            meta: false,
            ..*self
        }
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.ctrl, "Ctrl"),
            (self.alt, "Alt"),
            (self.shift, "Shift"),
            (self.meta, "Meta"),
        ];
        let held: Vec<_> = names
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| *name)
            .collect();
        if held.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&held.join("+"))
        }
    }
}

/// Where a key event landed
///
/// Typing into an address bar or the palette input must not move the listing
/// selection, so the presentation layer tags each event with its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EventTarget {
    /// A text input element (address bar, rename field, palette input)
    TextInput,
    /// Anything else (file list, panel chrome, window)
    #[default]
    Other,
}

impl EventTarget {
    pub fn is_text_input(&self) -> bool {
        matches!(self, EventTarget::TextInput)
    }
}
