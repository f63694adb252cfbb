//! `taskmaster add-task`, `taskmaster status` and `taskmaster remove-task`

use anyhow::{Context, Result};
use clap::Args;

use taskmaster_core::{EmployeeId, EntityStore, TaskId, TaskName};

use super::super::TaskStatusArg;

#[derive(Args, Debug)]
pub struct AddTaskArgs {
    /// Task name; surrounding whitespace is trimmed.
    pub name: String,

    /// Initial status: pending | in-progress | completed. Defaults to in-progress.
    #[arg(long, short = 's', value_name = "STATUS")]
    pub status: Option<TaskStatusArg>,

    /// Employee ids to assign straight away.
    #[arg(long = "assign", short = 'a', value_name = "EMPLOYEE", num_args = 1..)]
    pub assign: Vec<u32>,
}

impl AddTaskArgs {
    pub fn run(self, store: &mut EntityStore) -> Result<()> {
        let name = TaskName::parse(self.name).context("cannot add task")?;
        let status = self.status.unwrap_or_default().into();
        let task = store
            .add_task(name, status, self.assign.into_iter().map(EmployeeId))
            .context("cannot add task")?;

        println!("✓ Added task {} '{}' [{}]", task.id(), task.name(), task.status());
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Task id.
    pub task: u32,

    /// New status: pending | in-progress | completed.
    pub status: TaskStatusArg,
}

impl StatusArgs {
    pub fn run(self, store: &mut EntityStore) -> Result<()> {
        let id = TaskId(self.task);
        store
            .set_status(id, self.status.into())
            .with_context(|| format!("cannot change status of task {id}"))?;

        println!("✓ Task {id} is now {}", self.status);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct RemoveTaskArgs {
    /// Task id.
    pub task: u32,
}

impl RemoveTaskArgs {
    pub fn run(self, store: &mut EntityStore) -> Result<()> {
        let id = TaskId(self.task);
        let task = store
            .remove_task(id)
            .with_context(|| format!("cannot remove task {id}"))?;

        println!("✓ Removed task {id} '{}'", task.name());
        Ok(())
    }
}
