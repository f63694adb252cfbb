//! `taskmaster assign`, `taskmaster unassign` and `taskmaster remove-employee`

use anyhow::{Context, Result};
use clap::Args;

use taskmaster_core::{EmployeeId, EntityStore, TaskId};

#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Task id.
    pub task: u32,

    /// Employee id.
    pub employee: u32,
}

impl AssignArgs {
    pub fn assign(self, store: &mut EntityStore) -> Result<()> {
        let (task, employee) = (TaskId(self.task), EmployeeId(self.employee));
        store
            .assign(task, employee)
            .with_context(|| format!("cannot assign employee {employee} to task {task}"))?;

        println!("✓ Assigned employee {employee} to task {task}");
        Ok(())
    }

    pub fn unassign(self, store: &mut EntityStore) -> Result<()> {
        let (task, employee) = (TaskId(self.task), EmployeeId(self.employee));
        let removed = store
            .unassign(task, employee)
            .with_context(|| format!("cannot unassign employee {employee} from task {task}"))?;

        if removed {
            println!("✓ Unassigned employee {employee} from task {task}");
        } else {
            println!("Employee {employee} was not assigned to task {task}");
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct RemoveEmployeeArgs {
    /// Employee id.
    pub employee: u32,
}

impl RemoveEmployeeArgs {
    pub fn run(self, store: &mut EntityStore) -> Result<()> {
        let id = EmployeeId(self.employee);
        let dropped = store.tasks_assigned_to(id).count();
        let employee = store
            .remove_employee(id)
            .with_context(|| format!("cannot remove employee {id}"))?;

        println!(
            "✓ Removed employee {id} '{}' ({dropped} assignment(s) dropped)",
            employee.name()
        );
        Ok(())
    }
}
