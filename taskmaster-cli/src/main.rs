//! TaskMaster: task tracking with employee assignment.
//!
//! # Usage
//!
//! ```text
//! taskmaster [--config <path>] list [--json]
//! taskmaster [--config <path>] add-task <name> [--status pending|in-progress|completed] [--assign <id>...]
//! taskmaster [--config <path>] assign <task> <employee>
//! taskmaster [--config <path>] unassign <task> <employee>
//! taskmaster [--config <path>] status <task> <status>
//! taskmaster [--config <path>] remove-task <task>
//! taskmaster [--config <path>] remove-employee <employee>
//! ```
//!
//! Every invocation bootstraps (config → prefs → task data), runs one
//! command, saves task data if the command changed anything, then saves
//! preferences on the way out.

mod commands;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    assign::{AssignArgs, RemoveEmployeeArgs},
    list::ListArgs,
    task::{AddTaskArgs, RemoveTaskArgs, StatusArgs},
};
use taskmaster_app::{bootstrap, BootstrapOptions};
use taskmaster_core::TaskStatus;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "taskmaster",
    version,
    about = "Track tasks and the employees assigned to them",
    long_about = None,
)]
struct Cli {
    /// Config file to use instead of ./config.json.
    #[arg(long, short = 'c', global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show every task and employee.
    List(ListArgs),

    /// Create a task with the next free id.
    AddTask(AddTaskArgs),

    /// Assign an employee to a task.
    Assign(AssignArgs),

    /// Remove an employee from a task.
    Unassign(AssignArgs),

    /// Change a task's status.
    Status(StatusArgs),

    /// Delete a task.
    RemoveTask(RemoveTaskArgs),

    /// Delete an employee and drop them from every task.
    RemoveEmployee(RemoveEmployeeArgs),
}

// ---------------------------------------------------------------------------
// Shared TaskStatus argument, parsed from CLI strings
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `TaskStatus` from CLI args.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskStatusArg(pub TaskStatus);

impl FromStr for TaskStatusArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "pending" => Ok(Self(TaskStatus::Pending)),
            "in-progress" => Ok(Self(TaskStatus::InProgress)),
            "completed" | "done" => Ok(Self(TaskStatus::Completed)),
            other => Err(format!(
                "unknown status '{other}'; expected: pending, in-progress, completed"
            )),
        }
    }
}

impl fmt::Display for TaskStatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<TaskStatusArg> for TaskStatus {
    fn from(s: TaskStatusArg) -> Self {
        s.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut app = bootstrap(BootstrapOptions {
        config_path: cli.config,
        init_logging: true,
    });

    let result = match cli.command.unwrap_or(Commands::List(ListArgs::default())) {
        Commands::List(args) => args.run(&app),
        Commands::AddTask(args) => commands::mutate(&mut app, |store| args.run(store)),
        Commands::Assign(args) => commands::mutate(&mut app, |store| args.assign(store)),
        Commands::Unassign(args) => commands::mutate(&mut app, |store| args.unassign(store)),
        Commands::Status(args) => commands::mutate(&mut app, |store| args.run(store)),
        Commands::RemoveTask(args) => commands::mutate(&mut app, |store| args.run(store)),
        Commands::RemoveEmployee(args) => commands::mutate(&mut app, |store| args.run(store)),
    };

    app.shutdown();
    result
}
