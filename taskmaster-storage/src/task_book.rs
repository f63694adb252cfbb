//! Task data file: every task and employee in one JSON document.
//!
//! ```json
//! {
//!   "tasks": [{ "id": 1, "name": "...", "status": "in_progress", "assignedEmployees": [1, 2] }],
//!   "employees": [{ "id": 1, "name": "...", "phone": "..." }]
//! }
//! ```

use std::path::{Path, PathBuf};

use taskmaster_core::{EntityStore, TaskBook, TaskId};

use crate::error::{corrupt, StorageError};
use crate::json_file;

/// A task book read from disk and validated into a store.
#[derive(Debug, Clone)]
pub struct LoadedTaskBook {
    pub store: EntityStore,
    /// Highest task id in the file; `None` when the file holds no tasks.
    pub max_task_id: Option<TaskId>,
}

impl LoadedTaskBook {
    /// The id new tasks should continue from.
    ///
    /// `None` when the file already holds [`TaskId::MAX`].
    pub fn next_task_id(&self) -> Option<TaskId> {
        match self.max_task_id {
            Some(max) => max.successor(),
            None => Some(taskmaster_core::allocator::FIRST_TASK_ID),
        }
    }
}

/// Reads and writes the task data file.
pub trait TaskBookStorage {
    fn task_book_path(&self) -> &Path;

    /// See [`load_task_book_at`].
    fn read_task_book(&self) -> Result<LoadedTaskBook, StorageError>;

    fn save_task_book(&self, book: &TaskBook) -> Result<(), StorageError>;
}

/// [`TaskBookStorage`] backed by a JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonTaskBookStorage {
    path: PathBuf,
}

impl JsonTaskBookStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TaskBookStorage for JsonTaskBookStorage {
    fn task_book_path(&self) -> &Path {
        &self.path
    }

    fn read_task_book(&self) -> Result<LoadedTaskBook, StorageError> {
        load_task_book_at(&self.path)
    }

    fn save_task_book(&self, book: &TaskBook) -> Result<(), StorageError> {
        save_task_book_at(&self.path, book)
    }
}

/// Load and validate the task book at `path`.
///
/// Structural problems (bad JSON, blank names) and invariant violations
/// (duplicate ids, assignments to unknown employees) both come back as
/// [`StorageError::Corrupt`].
pub fn load_task_book_at(path: &Path) -> Result<LoadedTaskBook, StorageError> {
    let book: TaskBook = json_file::read_json(path)?;
    let max_task_id = book.max_task_id();
    let store = EntityStore::from_book(book).map_err(|e| corrupt(path, e))?;
    tracing::debug!(
        path = %path.display(),
        tasks = store.tasks().count(),
        employees = store.employees().count(),
        "loaded task book"
    );
    Ok(LoadedTaskBook { store, max_task_id })
}

/// Atomically save `book` to `path`.
pub fn save_task_book_at(path: &Path, book: &TaskBook) -> Result<(), StorageError> {
    json_file::write_json(path, book)
}
