//! Startup pipeline: config → logging → prefs → task data → sample seeding.
//!
//! Each stage runs exactly once, in order, and degrades to a safe default
//! instead of failing. [`bootstrap`] therefore always returns a ready
//! [`App`]; the only visible symptom of a bad file is a logged warning and
//! sample data in place of the user's.

use std::path::{Path, PathBuf};

use taskmaster_core::{sample, EntityStore, StoreError};
use taskmaster_storage::{
    Config, JsonTaskBookStorage, JsonUserPrefsStorage, StorageError, StorageManager,
    TaskBookStorage, UserPrefs, UserPrefsStorage,
};

use crate::config::init_config;
use crate::logging::init_logging;
use crate::paths::{resolve_beside, LOG_FILE};

/// Application version, logged at startup.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Inputs to [`bootstrap`].
#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    /// Config file to use instead of `config.json`.
    pub config_path: Option<PathBuf>,
    /// Install the global log subscriber (stage 2). Tests usually leave it off.
    pub init_logging: bool,
}

impl BootstrapOptions {
    pub fn with_config(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
            init_logging: false,
        }
    }
}

/// Where the initial task data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// Restored from the task data file.
    Restored,
    /// No task data file existed; sample data was used.
    Missing,
    /// The task data file existed but could not be used; sample data was used.
    Unreadable,
}

impl DataOrigin {
    pub fn is_sample(self) -> bool {
        !matches!(self, DataOrigin::Restored)
    }
}

/// Outcome of the sample seeding stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Real data was restored; nothing to seed.
    Skipped,
    /// Every fixture pair was applied.
    Complete { applied: usize },
    /// Seeding stopped at the first failing pair.
    Partial { error: StoreError },
}

/// Everything the logic and UI layers need, produced by [`bootstrap`].
#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub config_path: PathBuf,
    pub prefs: UserPrefs,
    pub storage: StorageManager,
    pub store: EntityStore,
    pub data_origin: DataOrigin,
    pub seed_outcome: SeedOutcome,
}

impl App {
    /// `true` when the store holds sample data rather than the user's file.
    pub fn is_sample_data(&self) -> bool {
        self.data_origin.is_sample()
    }

    /// Persist the current store to the task data file.
    pub fn save_task_book(&self) -> Result<(), StorageError> {
        self.storage.save_task_book(&self.store.to_book())
    }

    /// Best-effort shutdown: one attempt to save preferences.
    ///
    /// A failure is logged and swallowed so it can never block exit.
    pub fn shutdown(&self) {
        tracing::info!("stopping TaskMasterPro");
        if let Err(err) = self.storage.save_user_prefs(&self.prefs) {
            tracing::error!(
                path = %self.storage.user_prefs_path().display(),
                error = %err,
                "failed to save preferences"
            );
        }
    }
}

/// Run the startup pipeline. Never fails.
pub fn bootstrap(options: BootstrapOptions) -> App {
    // Stage 1: config.
    let (config, config_path) = init_config(options.config_path.as_deref());

    // Stage 2: logging.
    if options.init_logging {
        init_logging(&resolve_beside(&config_path, Path::new(LOG_FILE)), &config);
    }
    tracing::info!(version = VERSION, "initializing TaskMasterPro");

    // Stage 3: preferences.
    let prefs_path = resolve_beside(&config_path, &config.user_prefs_file_path);
    let prefs_storage = JsonUserPrefsStorage::new(prefs_path.clone());
    let prefs = init_prefs(&prefs_storage);

    // Stage 4: task data.
    let data_path = resolve_beside(&prefs_path, &prefs.task_data_file_path);
    let storage = StorageManager::new(JsonTaskBookStorage::new(data_path), prefs_storage);
    let (mut store, data_origin) = init_store(&storage);

    // Stage 5: sample assignments.
    let seed_outcome = if data_origin.is_sample() {
        seed_sample_assignments(&mut store, &sample::SAMPLE_ASSIGNMENTS)
    } else {
        SeedOutcome::Skipped
    };

    // Stage 6: ready.
    tracing::info!(
        tasks = store.tasks().count(),
        employees = store.employees().count(),
        sample = data_origin.is_sample(),
        "bootstrap complete"
    );
    App {
        config,
        config_path,
        prefs,
        storage,
        store,
        data_origin,
        seed_outcome,
    }
}

/// Load preferences, falling back to defaults, and always write them back.
pub fn init_prefs<P: UserPrefsStorage>(storage: &P) -> UserPrefs {
    let path = storage.user_prefs_path();
    tracing::info!(path = %path.display(), "using preference file");

    let prefs = match storage.read_user_prefs() {
        Ok(prefs) => prefs,
        Err(err) if err.is_not_found() => {
            tracing::info!(path = %path.display(), "creating new preference file");
            UserPrefs::default()
        }
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "preference file could not be loaded; using default preferences"
            );
            UserPrefs::default()
        }
    };

    if let Err(err) = storage.save_user_prefs(&prefs) {
        tracing::warn!(path = %path.display(), error = %err, "failed to save preference file");
    }
    prefs
}

/// Restore the store from task data, or fall back to the sample dataset.
///
/// On success the allocator continues above the restored high-water mark.
pub fn init_store<S: TaskBookStorage>(storage: &S) -> (EntityStore, DataOrigin) {
    let path = storage.task_book_path();
    tracing::info!(path = %path.display(), "using data file");

    match storage.read_task_book() {
        Ok(loaded) => {
            let next = loaded.next_task_id();
            let mut store = loaded.store;
            match next {
                Some(next) => store.reset_allocator(next),
                None => tracing::warn!(
                    path = %path.display(),
                    "data file holds the largest task id; new tasks cannot be added"
                ),
            }
            (store, DataOrigin::Restored)
        }
        Err(err) if err.is_not_found() => {
            tracing::info!(
                path = %path.display(),
                "no data file; starting with sample data"
            );
            (sample_store(), DataOrigin::Missing)
        }
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "data file could not be loaded; starting with sample data"
            );
            (sample_store(), DataOrigin::Unreadable)
        }
    }
}

/// Apply the demo assignment fixture. Stops at, and logs, the first failure.
pub fn seed_sample_assignments(store: &mut EntityStore, pairs: &[(u32, u32)]) -> SeedOutcome {
    match sample::apply_assignments(store, pairs) {
        Ok(applied) => SeedOutcome::Complete { applied },
        Err(error) => {
            tracing::warn!(error = %error, "error with generating sample data");
            SeedOutcome::Partial { error }
        }
    }
}

fn sample_store() -> EntityStore {
    // Empty store if the fixed sample ever stops validating.
    EntityStore::from_book(sample::sample_task_book()).unwrap_or_else(|err| {
        tracing::error!(error = %err, "sample data is invalid; starting empty");
        EntityStore::new()
    })
}
