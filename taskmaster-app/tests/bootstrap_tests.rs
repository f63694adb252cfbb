//! End-to-end startup and shutdown against a scratch directory.
//!
//! Every test points `--config` into its own `TempDir`, so config, prefs and
//! task data all land there.

use std::fs;
use std::path::PathBuf;

use assert_fs::prelude::*;
use predicates::prelude::predicate;
use taskmaster_app::{bootstrap, BootstrapOptions, DataOrigin, SeedOutcome};
use taskmaster_core::{sample, EmployeeId, TaskId, TaskName, TaskStatus};
use taskmaster_storage::{LogLevel, TaskBookStorage, UserPrefsStorage};

fn options(dir: &assert_fs::TempDir) -> BootstrapOptions {
    BootstrapOptions::with_config(dir.path().join("config.json"))
}

// ---------------------------------------------------------------------------
// 1. First run
// ---------------------------------------------------------------------------

#[test]
fn first_run_uses_seeded_sample_data() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let app = bootstrap(options(&dir));

    assert!(app.is_sample_data());
    assert_eq!(app.data_origin, DataOrigin::Missing);
    assert_eq!(
        app.seed_outcome,
        SeedOutcome::Complete {
            applied: sample::SAMPLE_ASSIGNMENTS.len()
        }
    );
    let snapshot = app.store.snapshot();
    assert!(!snapshot.tasks().is_empty());
    assert!(snapshot.assignment_count() >= 1);
    assert!(snapshot.task(TaskId(1)).unwrap().is_assigned(EmployeeId(1)));
}

#[test]
fn first_run_writes_config_and_prefs() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    bootstrap(options(&dir));

    dir.child("config.json").assert(predicate::path::exists());
    dir.child("config.json")
        .assert(predicate::str::contains("\"userPrefsFilePath\""));
    dir.child("preferences.json")
        .assert(predicate::str::contains("\"taskDataFilePath\""));
    // Sample data is not persisted until something saves it.
    dir.child("data/taskmasterpro.json")
        .assert(predicate::path::missing());
}

// ---------------------------------------------------------------------------
// 2. Corrupt inputs never stop startup
// ---------------------------------------------------------------------------

#[test]
fn corrupt_task_data_falls_back_to_sample() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("data").create_dir_all().expect("mkdir");
    dir.child("data/taskmasterpro.json")
        .write_str("{\"tasks\": \"nope\"")
        .expect("write");

    let app = bootstrap(options(&dir));
    assert_eq!(app.data_origin, DataOrigin::Unreadable);
    assert!(app.is_sample_data());
    assert!(matches!(app.seed_outcome, SeedOutcome::Complete { .. }));

    // The corrupt file is left for the user to inspect.
    dir.child("data/taskmasterpro.json")
        .assert(predicate::str::contains("nope"));
}

#[test]
fn corrupt_config_and_prefs_are_replaced_with_defaults() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("config.json").write_str("]]").expect("write config");
    dir.child("preferences.json")
        .write_str("{\"guiSettings\": \"wide\"}")
        .expect("write prefs");

    let app = bootstrap(options(&dir));
    assert_eq!(app.config.log_level, LogLevel::Info);
    assert!(app.is_sample_data());

    let raw = fs::read_to_string(dir.path().join("preferences.json")).expect("read prefs");
    let prefs: serde_json::Value = serde_json::from_str(&raw).expect("healed prefs parse");
    assert_eq!(prefs["guiSettings"]["windowWidth"], 740.0);
}

// ---------------------------------------------------------------------------
// 3. Restore
// ---------------------------------------------------------------------------

#[test]
fn saved_state_is_restored_on_next_start() {
    let dir = assert_fs::TempDir::new().expect("tempdir");

    let mut first = bootstrap(options(&dir));
    let added = first
        .store
        .add_task(
            TaskName::parse("Renew certificates").unwrap(),
            TaskStatus::Pending,
            [EmployeeId(4)],
        )
        .expect("add")
        .id();
    first.save_task_book().expect("save");
    first.shutdown();

    let mut second = bootstrap(options(&dir));
    assert_eq!(second.data_origin, DataOrigin::Restored);
    assert!(!second.is_sample_data());
    assert_eq!(second.seed_outcome, SeedOutcome::Skipped);
    assert_eq!(second.store.to_book(), first.store.to_book());

    let next = second
        .store
        .add_task(TaskName::parse("Next").unwrap(), TaskStatus::Pending, [])
        .expect("add")
        .id();
    assert_eq!(Some(next), added.successor());
}

#[test]
fn custom_paths_in_config_and_prefs_are_followed() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("config.json")
        .write_str(r#"{"logLevel":"WARNING","userPrefsFilePath":"settings/prefs.json"}"#)
        .expect("write config");
    dir.child("settings").create_dir_all().expect("mkdir");
    dir.child("settings/prefs.json")
        .write_str(r#"{"taskDataFilePath":"../store/book.json"}"#)
        .expect("write prefs");

    let app = bootstrap(options(&dir));
    assert_eq!(app.config.log_level, LogLevel::Warn);
    assert_eq!(
        app.prefs.task_data_file_path,
        PathBuf::from("../store/book.json")
    );
    app.save_task_book().expect("save");
    assert!(app.storage.task_book_path().exists());
    dir.child("store/book.json").assert(predicate::path::exists());
}

// ---------------------------------------------------------------------------
// 4. Shutdown
// ---------------------------------------------------------------------------

#[test]
fn shutdown_saves_prefs() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let mut app = bootstrap(options(&dir));
    app.prefs.gui_settings.window_width = 1111.0;
    app.shutdown();

    let prefs = app.storage.read_user_prefs().expect("read prefs");
    assert_eq!(prefs.gui_settings.window_width, 1111.0);
}

#[test]
fn shutdown_failure_is_swallowed() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let app = bootstrap(options(&dir));

    // Replace the prefs file with a non-empty directory so the rename fails.
    let prefs_path = app.storage.user_prefs_path().to_path_buf();
    fs::remove_file(&prefs_path).expect("remove prefs");
    fs::create_dir_all(prefs_path.join("blocker")).expect("block prefs path");

    app.shutdown();
    assert!(prefs_path.is_dir());
}
