use std::path::{Path, PathBuf};

/// Log file name, created beside the config file.
pub const LOG_FILE: &str = "taskmasterpro.log";

/// Resolves `path` against the directory containing `owner`.
///
/// Absolute paths are returned unchanged. With the default layout (every file
/// in the working directory) this is the same as resolving against the
/// working directory.
pub fn resolve_beside(owner: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match owner.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(path),
        _ => path.to_path_buf(),
    }
}
