//! Locked JSON reads and atomic JSON writes.
//!
//! Write flow: serialize → `<file>.tmp` sibling → `rename`. The `.tmp` is
//! always in the same directory as the target (same filesystem), so a crash
//! mid-write leaves the previous file untouched.
//!
//! Every read and write holds a process-wide lock for its path, so two
//! callers touching the same file never interleave.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{corrupt, io_err, StorageError};

type PathLocks = Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>;

/// Read and deserialize the JSON document at `path`.
///
/// Returns [`StorageError::NotFound`] if absent, [`StorageError::Corrupt`] if
/// the bytes do not parse into `T`, [`StorageError::Io`] for other read failures.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let lock = path_lock(path);
    let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(StorageError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(err) => return Err(io_err(path, err)),
    };
    serde_json::from_slice(&bytes).map_err(|e| corrupt(path, e))
}

/// Atomically replace the file at `path` with `value` as pretty JSON.
///
/// Missing parent directories are created. On failure the previous file, if
/// any, is left as it was.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value)?;

    let lock = path_lock(path);
    let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    }

    let tmp = tmp_path(path);
    fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(path, err));
    }
    tracing::debug!(path = %path.display(), "wrote file");
    Ok(())
}

/// `<path>.tmp`, next to the target.
pub fn tmp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{name}.tmp"))
}

fn path_lock(path: &Path) -> Arc<Mutex<()>> {
    static LOCKS: OnceLock<PathLocks> = OnceLock::new();

    let key = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    let mut locks = LOCKS
        .get_or_init(PathLocks::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    locks.entry(key).or_default().clone()
}
