//! Settings persistence layer
//!
//! Loads and saves [`WorkspaceSettings`] as versioned JSON.

use crate::WorkspaceSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during persistence operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("Failed to serialize settings: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize settings: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u32),

    #[error("Settings I/O error at {path}: {message}")]
    Io { path: String, message: String },
}

/// On-disk envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsFile {
    /// Version of the settings format (for future migrations)
    pub version: u32,
    #[serde(flatten)]
    pub settings: WorkspaceSettings,
}

impl SettingsFile {
    /// Current version of the settings format
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(settings: WorkspaceSettings) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            settings,
        }
    }
}

/// Serializes settings to JSON bytes
pub fn to_json_bytes(settings: &WorkspaceSettings) -> Result<Vec<u8>, SettingsError> {
    serde_json::to_vec_pretty(&SettingsFile::new(settings.clone()))
        .map_err(|e| SettingsError::SerializationFailed(e.to_string()))
}

/// Deserializes settings from JSON bytes
pub fn from_json_bytes(bytes: &[u8]) -> Result<WorkspaceSettings, SettingsError> {
    let file: SettingsFile = serde_json::from_slice(bytes)
        .map_err(|e| SettingsError::DeserializationFailed(e.to_string()))?;

    if file.version != SettingsFile::CURRENT_VERSION {
        return Err(SettingsError::UnsupportedVersion(file.version));
    }

    let mut settings = file.settings;
    settings.page_size = settings.page_size.max(1);
    Ok(settings)
}

/// Attempts to load settings from bytes, falling back to defaults on error
pub fn load_or_default(bytes: &[u8]) -> WorkspaceSettings {
    from_json_bytes(bytes).unwrap_or_else(|err| {
        warn!(error = %err, "settings unreadable, using defaults");
        WorkspaceSettings::default()
    })
}

fn io_error(path: &Path, err: io::Error) -> SettingsError {
    SettingsError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// Reads settings from `path`
///
/// A missing file yields `Ok(None)`.
pub fn read_settings_file(path: &Path) -> Result<Option<WorkspaceSettings>, SettingsError> {
    match fs::read(path) {
        Ok(bytes) => from_json_bytes(&bytes).map(Some),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_error(path, err)),
    }
}

/// Writes settings to `path`, creating parent directories
pub fn write_settings_file(path: &Path, settings: &WorkspaceSettings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    let bytes = to_json_bytes(settings)?;
    fs::write(path, bytes).map_err(|e| io_error(path, e))?;
    debug!(path = %path.display(), "settings written");
    Ok(())
}
