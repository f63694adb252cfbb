//! Configuration loading with default-on-failure semantics.

use std::path::{Path, PathBuf};

use taskmaster_storage::{config::DEFAULT_CONFIG_FILE, read_config, save_config, Config};

/// Load the config at `custom_path` (or `config.json`), falling back to
/// defaults when it is missing or unusable.
///
/// The result is always written back so that missing or unknown fields are
/// normalised on disk. A failed write is logged and otherwise ignored.
/// Returns the config together with the path it was read from.
pub fn init_config(custom_path: Option<&Path>) -> (Config, PathBuf) {
    let path = match custom_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "custom config file specified");
            path.to_path_buf()
        }
        None => PathBuf::from(DEFAULT_CONFIG_FILE),
    };
    tracing::info!(path = %path.display(), "using config file");

    let config = match read_config(&path) {
        Ok(config) => config,
        Err(err) if err.is_not_found() => {
            tracing::info!(path = %path.display(), "creating new config file");
            Config::default()
        }
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "config file could not be loaded; using default config properties"
            );
            Config::default()
        }
    };

    if let Err(err) = save_config(&config, &path) {
        tracing::warn!(path = %path.display(), error = %err, "failed to save config file");
    }
    (config, path)
}
