//! # taskmaster-storage
//!
//! JSON persistence for task data, user preferences and configuration.
//!
//! Every load distinguishes a missing file ([`StorageError::NotFound`]) from
//! an unusable one ([`StorageError::Corrupt`]); every save is atomic
//! (`.tmp` + rename) and serialized per path.

pub mod config;
pub mod error;
pub mod json_file;
pub mod manager;
pub mod prefs;
pub mod task_book;

pub use config::{read_config, save_config, Config, LogLevel};
pub use error::{CorruptData, StorageError};
pub use manager::StorageManager;
pub use prefs::{GuiSettings, JsonUserPrefsStorage, UserPrefs, UserPrefsStorage};
pub use task_book::{JsonTaskBookStorage, LoadedTaskBook, TaskBookStorage};
