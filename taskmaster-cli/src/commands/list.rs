//! `taskmaster list [--json]`

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use taskmaster_app::{App, DataOrigin};
use taskmaster_core::{Snapshot, Task, TaskStatus};
use taskmaster_storage::TaskBookStorage;

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Print the store as JSON instead of tables.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "TASK")]
    name: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "ASSIGNED")]
    assigned: String,
}

#[derive(Tabled)]
struct EmployeeRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "EMPLOYEE")]
    name: String,
    #[tabled(rename = "TASKS")]
    tasks: usize,
}

impl ListArgs {
    pub fn run(self, app: &App) -> Result<()> {
        let snapshot = app.store.snapshot();
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&snapshot).context("failed to serialize task data")?
            );
            return Ok(());
        }

        println!(
            "TaskMasterPro v{} | {} tasks | {} employees",
            taskmaster_app::VERSION,
            snapshot.tasks().len(),
            snapshot.employees().len(),
        );
        let data_file = app.storage.task_book_path().display();
        match app.data_origin {
            DataOrigin::Restored => {}
            DataOrigin::Missing => println!(
                "{}",
                format!("Showing sample data; {data_file} will be created on the first change.")
                    .bright_black()
            ),
            DataOrigin::Unreadable => println!(
                "{} {}",
                "warning:".yellow().bold(),
                format!(
                    "Showing sample data; {data_file} could not be read and will be replaced on the first change."
                )
            ),
        }
        print_tasks(&snapshot);
        print_employees(&snapshot);
        Ok(())
    }
}

fn print_tasks(snapshot: &Snapshot) {
    if snapshot.tasks().is_empty() {
        println!("No tasks.");
        return;
    }
    let rows: Vec<TaskRow> = snapshot
        .tasks()
        .iter()
        .map(|task| TaskRow {
            id: task.id().0,
            name: task.name().to_string(),
            status: status_label(task.status()),
            assigned: assignee_names(snapshot, task),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn print_employees(snapshot: &Snapshot) {
    if snapshot.employees().is_empty() {
        println!("No employees.");
        return;
    }
    let rows: Vec<EmployeeRow> = snapshot
        .employees()
        .iter()
        .map(|employee| EmployeeRow {
            id: employee.id().0,
            name: employee.name().to_string(),
            tasks: snapshot
                .tasks()
                .iter()
                .filter(|t| t.is_assigned(employee.id()))
                .count(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn assignee_names(snapshot: &Snapshot, task: &Task) -> String {
    if task.assigned_employees().is_empty() {
        return "-".to_string();
    }
    task.assigned_employees()
        .iter()
        .map(|id| match snapshot.employee(*id) {
            Some(employee) => format!("{} ({id})", employee.name()),
            None => format!("#{id}"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn status_label(status: TaskStatus) -> String {
    let label = status.to_string();
    match status {
        TaskStatus::Pending => label.yellow().to_string(),
        TaskStatus::InProgress => label.cyan().to_string(),
        TaskStatus::Completed => label.green().to_string(),
    }
}
