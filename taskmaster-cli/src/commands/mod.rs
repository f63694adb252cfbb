pub mod assign;
pub mod list;
pub mod task;

use anyhow::Result;
use colored::Colorize;
use taskmaster_app::App;
use taskmaster_core::EntityStore;

/// Run a store mutation, then persist the task data.
///
/// A failed save is reported but does not fail the command: the change
/// already happened in memory and the next successful save carries it.
pub fn mutate(app: &mut App, f: impl FnOnce(&mut EntityStore) -> Result<()>) -> Result<()> {
    f(&mut app.store)?;

    if let Err(err) = app.save_task_book() {
        tracing::warn!(error = %err, "failed to save task data");
        eprintln!("{} task data was not saved: {err}", "warning:".yellow().bold());
    }
    Ok(())
}
