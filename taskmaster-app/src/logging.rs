//! Diagnostics sink: `tracing` to stderr plus an append-only log file.
//!
//! The log file is rotated at startup when it exceeds 5 MiB. At most 5
//! rotated copies are kept:
//!   taskmasterpro.log → taskmasterpro.log.1 → … → taskmasterpro.log.5

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use taskmaster_storage::Config;

use crate::paths::LOG_FILE;

/// Maximum log file size before rotation (5 MiB).
pub const MAX_LOG_BYTES: u64 = 5 * 1024 * 1024;

/// Maximum number of rotated backup files to keep.
pub const MAX_ROTATED_FILES: usize = 5;

/// Install the global subscriber, appending to `log_path`.
///
/// `RUST_LOG` wins over the level in `config`. Never fails: if the log file
/// cannot be opened, output goes to stderr only; if a subscriber is already
/// installed, this is a no-op.
pub fn init_logging(log_path: &Path, config: &Config) {
    use tracing_subscriber::fmt::writer::MakeWriterExt;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_directive()));

    let rotation = rotate_log(log_path, MAX_LOG_BYTES);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path);

    let (installed, file_error) = match file {
        Ok(file) => {
            let writer = io::stderr.and(Mutex::new(file));
            let result = fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .try_init();
            (result.is_ok(), None)
        }
        Err(err) => {
            let result = fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(io::stderr)
                .try_init();
            (result.is_ok(), Some(err))
        }
    };

    if !installed {
        return;
    }
    tracing::info!(level = %config.log_level, "logging initialised");
    if let Some(err) = file_error {
        tracing::warn!(path = %log_path.display(), error = %err, "cannot open log file; logging to stderr only");
    }
    match rotation {
        Ok(true) => tracing::info!(path = %log_path.display(), "log file rotated"),
        Ok(false) => {}
        Err(err) => tracing::warn!(path = %log_path.display(), error = %err, "log rotation failed"),
    }
}

/// Moves an oversized log aside before it is reopened for appending.
///
/// Backups are named after the live file (`taskmasterpro.log.1` is the
/// newest). Whatever sits in the last slot is dropped to make room.
fn rotate_log(log_path: &Path, max_bytes: u64) -> io::Result<bool> {
    match fs::metadata(log_path) {
        Ok(meta) if meta.len() >= max_bytes => {}
        Ok(_) => return Ok(false),
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    }

    let backups: Vec<PathBuf> = (1..=MAX_ROTATED_FILES)
        .map(|n| backup_path(log_path, n))
        .collect();
    if let Some(oldest) = backups.last().filter(|p| p.exists()) {
        fs::remove_file(oldest)?;
    }
    for pair in backups.windows(2).rev() {
        if pair[0].exists() {
            fs::rename(&pair[0], &pair[1])?;
        }
    }
    fs::rename(log_path, &backups[0])?;
    Ok(true)
}

/// `<log>.<n>`, falling back to [`LOG_FILE`] when the path has no file name.
fn backup_path(log_path: &Path, n: usize) -> PathBuf {
    let name = log_path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| LOG_FILE.to_string());
    log_path.with_file_name(format!("{name}.{n}"))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
