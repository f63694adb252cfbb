//! The storage handle the rest of the application holds on to.

use std::path::Path;

use taskmaster_core::TaskBook;

use crate::error::StorageError;
use crate::prefs::{JsonUserPrefsStorage, UserPrefs, UserPrefsStorage};
use crate::task_book::{JsonTaskBookStorage, LoadedTaskBook, TaskBookStorage};

/// Bundles task data and preference storage behind one value.
#[derive(Debug, Clone)]
pub struct StorageManager<B = JsonTaskBookStorage, P = JsonUserPrefsStorage> {
    task_book: B,
    user_prefs: P,
}

impl<B: TaskBookStorage, P: UserPrefsStorage> StorageManager<B, P> {
    pub fn new(task_book: B, user_prefs: P) -> Self {
        Self {
            task_book,
            user_prefs,
        }
    }
}

impl<B: TaskBookStorage, P: UserPrefsStorage> TaskBookStorage for StorageManager<B, P> {
    fn task_book_path(&self) -> &Path {
        self.task_book.task_book_path()
    }

    fn read_task_book(&self) -> Result<LoadedTaskBook, StorageError> {
        self.task_book.read_task_book()
    }

    fn save_task_book(&self, book: &TaskBook) -> Result<(), StorageError> {
        self.task_book.save_task_book(book)
    }
}

impl<B: TaskBookStorage, P: UserPrefsStorage> UserPrefsStorage for StorageManager<B, P> {
    fn user_prefs_path(&self) -> &Path {
        self.user_prefs.user_prefs_path()
    }

    fn read_user_prefs(&self) -> Result<UserPrefs, StorageError> {
        self.user_prefs.read_user_prefs()
    }

    fn save_user_prefs(&self, prefs: &UserPrefs) -> Result<(), StorageError> {
        self.user_prefs.save_user_prefs(prefs)
    }
}
