//! # Command Palette Service
//!
//! The workspace's searchable command list, plus a single-line prompt.
//!
//! ## Philosophy
//!
//! - **Discoverability**: Every workspace command is registered and searchable
//! - **Data, not closures**: A command carries an action value `A`; the owner
//!   decides what executing it means
//! - **Replace, don't append**: [`CommandPalette::register_commands`] swaps the
//!   whole list, so re-registering after a layout change never duplicates
//! - **Deterministic**: The palette is a pure view over command descriptors
//!
//! ## Modes
//!
//! A query whose trimmed text starts with `>` is in [`PaletteMode::Command`];
//! anything else is [`PaletteMode::Search`], where the owner matches files.
//!
//! ## Example
//!
//! ```
//! use services_command_palette::{Command, CommandDescriptor, CommandPalette};
//!
//! let mut palette: CommandPalette<&str, ()> = CommandPalette::new();
//! palette.register_commands(vec![Command::new(
//!     CommandDescriptor::new("create-panel", "Create Panel"),
//!     "create",
//! )]);
//!
//! palette.set_query(">panel");
//! assert_eq!(palette.selected_action(), Some(&"create"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Unique identifier for a command
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandId(String);

impl CommandId {
    /// Creates a new command ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Command descriptor with metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Unique command identifier
    pub id: CommandId,
    /// Human-readable title
    pub title: String,
    /// Search keywords
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Display form of the shortcut, e.g. `Ctrl+B`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keybinding: Option<String>,
}

impl CommandDescriptor {
    /// Creates a new command descriptor
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: CommandId::new(id),
            title: title.into(),
            keywords: Vec::new(),
            keybinding: None,
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_keybinding(mut self, keybinding: impl Into<String>) -> Self {
        self.keybinding = Some(keybinding.into());
        self
    }

    /// Checks if this command matches the given query
    ///
    /// Case-insensitive substring match over title, keywords and id.
    pub fn matches(&self, query: &str) -> bool {
        let query_lower = query.to_lowercase();

        self.title.to_lowercase().contains(&query_lower)
            || self
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(&query_lower))
            || self.id.as_str().to_lowercase().contains(&query_lower)
    }

    /// Calculates a relevance score for the given query (higher is better)
    pub fn relevance_score(&self, query: &str) -> u32 {
        let query_lower = query.to_lowercase();
        let title = self.title.to_lowercase();
        let mut score = 0u32;

        if title == query_lower {
            score += 1000;
        } else if title.starts_with(&query_lower) {
            score += 500;
        } else if title.contains(&query_lower) {
            score += 100;
        }

        for keyword in &self.keywords {
            let keyword = keyword.to_lowercase();
            if keyword == query_lower {
                score += 300;
            } else if keyword.starts_with(&query_lower) {
                score += 150;
            } else if keyword.contains(&query_lower) {
                score += 50;
            }
        }

        if self.id.as_str().contains(&query_lower) {
            score += 10;
        }

        score
    }
}

/// A registered command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<A> {
    pub descriptor: CommandDescriptor,
    pub action: A,
}

impl<A> Command<A> {
    pub fn new(descriptor: CommandDescriptor, action: A) -> Self {
        Self { descriptor, action }
    }

    pub fn id(&self) -> &CommandId {
        &self.descriptor.id
    }
}

/// What the palette input is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaletteMode {
    /// Match entries of the active listing
    Search,
    /// Match registered commands
    Command,
}

impl PaletteMode {
    /// Query text the palette opens with
    pub fn initial_query(&self) -> &'static str {
        match self {
            PaletteMode::Search => "",
            PaletteMode::Command => ">",
        }
    }
}

/// Pending single-line input request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PalettePrompt<P> {
    pub title: String,
    pub initial_value: String,
    /// What the entered value is for
    pub purpose: P,
}

/// Command palette service
#[derive(Debug, Clone)]
pub struct CommandPalette<A, P> {
    commands: Vec<Command<A>>,
    query: String,
    /// `None` until a search result is picked; command mode starts at 0
    selected_index: Option<usize>,
    prompt: Option<PalettePrompt<P>>,
}

impl<A, P> CommandPalette<A, P> {
    /// Creates a new command palette
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            query: String::new(),
            selected_index: None,
            prompt: None,
        }
    }

    /// Replaces the registered commands
    pub fn register_commands(&mut self, commands: Vec<Command<A>>) {
        self.commands = commands;
        self.reset_selection();
        debug!(count = self.commands.len(), "commands registered");
    }

    /// Returns all registered commands in registration order
    pub fn commands(&self) -> &[Command<A>] {
        &self.commands
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Sets the query and resets the selection
    ///
    /// Command mode highlights the first command; search mode starts with
    /// nothing selected so Enter does nothing until a result is picked.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        self.selected_index = match self.mode() {
            PaletteMode::Command => Some(0),
            PaletteMode::Search => None,
        };
    }

    pub fn mode(&self) -> PaletteMode {
        if self.query.trim().starts_with('>') {
            PaletteMode::Command
        } else {
            PaletteMode::Search
        }
    }

    /// Query text with the mode prefix removed
    pub fn search_text(&self) -> &str {
        let trimmed = self.query.trim();
        trimmed.strip_prefix('>').unwrap_or(trimmed).trim()
    }

    /// Commands matching the query, most relevant first
    ///
    /// Equally relevant commands keep registration order; an empty query
    /// lists everything in registration order.
    pub fn filtered(&self) -> Vec<&Command<A>> {
        let text = self.search_text();
        if text.is_empty() {
            return self.commands.iter().collect();
        }

        let mut matches: Vec<_> = self
            .commands
            .iter()
            .filter(|c| c.descriptor.matches(text))
            .map(|c| (c.descriptor.relevance_score(text), c))
            .collect();

        matches.sort_by(|a, b| b.0.cmp(&a.0));
        matches.into_iter().map(|(_, c)| c).collect()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Moves the selection forward over the filtered commands
    pub fn select_next(&mut self) {
        let count = self.filtered().len();
        self.select_next_in(count);
    }

    /// Moves the selection backward over the filtered commands
    pub fn select_prev(&mut self) {
        let count = self.filtered().len();
        self.select_prev_in(count);
    }

    /// Moves the selection forward over `count` results, wrapping
    ///
    /// With nothing selected this picks the first result.
    pub fn select_next_in(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(i) => (i + 1) % count,
            None => 0,
        });
    }

    /// Moves the selection backward over `count` results, wrapping
    ///
    /// With nothing selected this picks the last result.
    pub fn select_prev_in(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(i) => (i + count - 1) % count,
            None => count - 1,
        });
    }

    /// Action of the selected filtered command
    pub fn selected_action(&self) -> Option<&A> {
        let index = self.selected_index?;
        self.filtered().get(index).map(|c| &c.action)
    }

    /// Opens a prompt, replacing any pending one
    pub fn open_prompt(&mut self, title: impl Into<String>, initial_value: impl Into<String>, purpose: P) {
        let prompt = PalettePrompt {
            title: title.into(),
            initial_value: initial_value.into(),
            purpose,
        };
        debug!(title = %prompt.title, "prompt opened");
        self.prompt = Some(prompt);
    }

    pub fn prompt(&self) -> Option<&PalettePrompt<P>> {
        self.prompt.as_ref()
    }

    /// Closes the prompt, returning its purpose with the entered value
    pub fn resolve_prompt(&mut self, input: impl Into<String>) -> Option<(P, String)> {
        self.prompt.take().map(|p| (p.purpose, input.into()))
    }

    /// Closes the prompt without a value
    pub fn cancel_prompt(&mut self) -> Option<PalettePrompt<P>> {
        self.prompt.take()
    }
}

impl<A, P> Default for CommandPalette<A, P> {
    fn default() -> Self {
        Self::new()
    }
}
