//! User settings persistence for the Gallery CLI/TUI.
//!
//! Settings live in a small JSON file under the standard configuration
//! directory (`~/.config/gallery/settings.json` on most platforms). The file
//! holds the grid sizing config and the preferred theme. Missing files and
//! unreadable payloads both yield defaults, so a broken settings file never
//! stops the grid from opening.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use gallery_grid::{GridConfig, GridError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::path_processing::env_or_config_path;

/// Environment variable allowing callers to override the settings file path.
pub const SETTINGS_PATH_ENV: &str = "GALLERY_SETTINGS_PATH";

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Error surfaced when reading or writing settings fails.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidGrid(#[from] GridError),
}

/// Persisted setting values.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPayload {
    pub grid: GridConfig,
    /// Canonical identifier of the theme selected for the terminal UI.
    pub preferred_theme: Option<String>,
}

/// Settings store backed by a JSON file.
#[derive(Debug, Default)]
pub struct UserSettings {
    path: PathBuf,
    payload: Mutex<SettingsPayload>,
    persist_to_disk: bool,
}

impl UserSettings {
    /// Loads settings from `GALLERY_SETTINGS_PATH` or the default config path.
    pub fn new() -> Result<Self, SettingsError> {
        Self::load(default_settings_path())
    }

    /// Loads settings from an explicit path.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let payload = load_payload(&path)?;
        Ok(Self {
            path,
            payload: Mutex::new(payload),
            persist_to_disk: true,
        })
    }

    /// In-memory store used when the config directory cannot be accessed.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: Mutex::new(SettingsPayload::default()),
            persist_to_disk: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> SettingsPayload {
        self.lock().clone()
    }

    pub fn grid(&self) -> GridConfig {
        self.lock().grid.clone()
    }

    pub fn preferred_theme(&self) -> Option<String> {
        self.lock().preferred_theme.clone()
    }

    pub fn set_preferred_theme(&self, theme_id: Option<String>) -> Result<(), SettingsError> {
        let mut payload = self.lock();
        payload.preferred_theme = theme_id;
        self.save_locked(&payload)
    }

    /// Replaces the grid config after validating it.
    pub fn set_grid(&self, grid: GridConfig) -> Result<(), SettingsError> {
        grid.validate()?;
        let mut payload = self.lock();
        payload.grid = grid;
        self.save_locked(&payload)
    }

    fn lock(&self) -> MutexGuard<'_, SettingsPayload> {
        self.payload.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn save_locked(&self, payload: &SettingsPayload) -> Result<(), SettingsError> {
        if !self.persist_to_disk {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(payload)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

pub fn default_settings_path() -> PathBuf {
    env_or_config_path(SETTINGS_PATH_ENV, SETTINGS_FILE_NAME)
}

fn load_payload(path: &Path) -> Result<SettingsPayload, SettingsError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(SettingsPayload::default()),
        Err(error) => return Err(SettingsError::Io(error)),
    };
    let mut payload: SettingsPayload = match serde_json::from_str(&data) {
        Ok(payload) => payload,
        Err(error) => {
            warn!(
                path = %path.display(),
                error = %error,
                "Failed to parse settings file; using defaults"
            );
            return Ok(SettingsPayload::default());
        }
    };
    if let Err(error) = payload.grid.validate() {
        warn!(
            path = %path.display(),
            error = %error,
            "Invalid grid settings; using default grid config"
        );
        payload.grid = GridConfig::default();
    }
    Ok(payload)
}
