//! User preferences: where the task data lives, plus window geometry.
//!
//! Every field has a default, so a file written by an older version (or a
//! partial file) loads with the gaps filled in. Writing the result back is
//! how the file picks up new fields.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::json_file;

/// Default location of the task data file.
pub const DEFAULT_TASK_DATA_FILE: &str = "data/taskmasterpro.json";

/// Persisted user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPrefs {
    pub gui_settings: GuiSettings,
    pub task_data_file_path: PathBuf,
}

impl Default for UserPrefs {
    fn default() -> Self {
        Self {
            gui_settings: GuiSettings::default(),
            task_data_file_path: PathBuf::from(DEFAULT_TASK_DATA_FILE),
        }
    }
}

/// Window geometry, passed through untouched by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuiSettings {
    pub window_width: f64,
    pub window_height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_coordinates: Option<WindowCoordinates>,
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            window_width: 740.0,
            window_height: 600.0,
            window_coordinates: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowCoordinates {
    pub x: i32,
    pub y: i32,
}

/// Reads and writes the preferences file.
pub trait UserPrefsStorage {
    fn user_prefs_path(&self) -> &Path;

    fn read_user_prefs(&self) -> Result<UserPrefs, StorageError>;

    fn save_user_prefs(&self, prefs: &UserPrefs) -> Result<(), StorageError>;
}

/// [`UserPrefsStorage`] backed by a JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonUserPrefsStorage {
    path: PathBuf,
}

impl JsonUserPrefsStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl UserPrefsStorage for JsonUserPrefsStorage {
    fn user_prefs_path(&self) -> &Path {
        &self.path
    }

    fn read_user_prefs(&self) -> Result<UserPrefs, StorageError> {
        json_file::read_json(&self.path)
    }

    fn save_user_prefs(&self, prefs: &UserPrefs) -> Result<(), StorageError> {
        json_file::write_json(&self.path, prefs)
    }
}
