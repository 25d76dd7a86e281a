//! # Settings Service
//!
//! Workspace settings and path aliases.
//!
//! ## Philosophy
//!
//! - **Typed settings**: One struct, not a key/value bag
//! - **Defaults always work**: Missing fields and unreadable files fall back to
//!   [`WorkspaceSettings::default`]
//! - **Versioned on disk**: The JSON envelope carries a format version
//!
//! ## Aliases
//!
//! An alias maps a short name to a directory. A path starting with `@name`
//! expands to the alias target, so `@documents/reports` opens
//! `{home}/Documents/reports`.

pub mod persistence;

pub use persistence::{
    from_json_bytes, load_or_default, read_settings_file, to_json_bytes, write_settings_file,
    SettingsFile, SettingsError,
};

use fs_view::platform_default_root;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Entries moved per PageUp/PageDown
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Prefix marking an alias reference in a path
pub const ALIAS_PREFIX: char = '@';

/// Names produced by [`default_aliases`], with their subdirectory
const DEFAULT_ALIAS_DIRS: &[(&str, Option<&str>)] = &[
    ("home", None),
    ("documents", Some("Documents")),
    ("downloads", Some("Downloads")),
    ("desktop", Some("Desktop")),
    ("pictures", Some("Pictures")),
    ("music", Some("Music")),
    ("videos", Some("Videos")),
];

/// Workspace settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    /// Directory opened by tabs created without a path
    pub default_root: String,
    /// Entries moved per page step (at least 1)
    pub page_size: usize,
    /// Alias name -> directory (stable ordering via BTreeMap)
    pub aliases: BTreeMap<String, String>,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            default_root: platform_default_root().to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            aliases: BTreeMap::new(),
        }
    }
}

impl WorkspaceSettings {
    /// Default settings with the standard aliases under `home`
    pub fn with_home(home: &str) -> Self {
        Self {
            aliases: default_aliases(home),
            ..Self::default()
        }
    }

    pub fn with_default_root(mut self, root: impl Into<String>) -> Self {
        self.default_root = root.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn set_alias(&mut self, name: impl Into<String>, target: impl Into<String>) {
        self.aliases.insert(name.into(), target.into());
    }

    pub fn remove_alias(&mut self, name: &str) -> bool {
        self.aliases.remove(name).is_some()
    }

    /// Looks up an alias target
    pub fn resolve_alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Rewrites a leading `@name` to the alias target
    ///
    /// Unknown aliases and plain paths are returned unchanged.
    pub fn expand(&self, path: &str) -> String {
        let Some(rest) = path.strip_prefix(ALIAS_PREFIX) else {
            return path.to_string();
        };
        let split = rest.find(['/', '\\']).unwrap_or(rest.len());
        let (name, tail) = rest.split_at(split);

        match self.resolve_alias(name) {
            Some(target) if tail.is_empty() => target.to_string(),
            Some(target) => format!("{}{}", target.trim_end_matches(['/', '\\']), tail),
            None => path.to_string(),
        }
    }
}

/// Builds the standard alias set rooted at `home`
///
/// Backslashes in `home` are normalized to `/`.
pub fn default_aliases(home: &str) -> BTreeMap<String, String> {
    let home = home.replace('\\', "/");
    DEFAULT_ALIAS_DIRS
        .iter()
        .map(|(name, dir)| {
            let target = match dir {
                Some(dir) => format!("{home}/{dir}"),
                None => home.clone(),
            };
            (name.to_string(), target)
        })
        .collect()
}
