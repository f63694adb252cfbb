//! Starter dataset used when no usable task data exists on disk.

use crate::error::StoreError;
use crate::store::EntityStore;
use crate::types::{Employee, EmployeeId, Task, TaskBook, TaskId, TaskName, TaskStatus};

/// Demo assignment graph applied on top of [`sample_task_book`], as
/// `(task, employee)` pairs in application order.
pub const SAMPLE_ASSIGNMENTS: [(u32, u32); 8] =
    [(1, 1), (1, 2), (1, 3), (2, 3), (2, 4), (2, 5), (3, 5), (3, 6)];

const SAMPLE_EMPLOYEES: [(&str, &str, &str); 6] = [
    ("Alex Yeoh", "87438807", "alexyeoh@example.com"),
    ("Bernice Yu", "99272758", "berniceyu@example.com"),
    ("Charlotte Oliveiro", "93210283", "charlotte@example.com"),
    ("David Li", "91031282", "lidavid@example.com"),
    ("Irfan Ibrahim", "92492021", "irfan@example.com"),
    ("Roy Balakrishnan", "92624417", "royb@example.com"),
];

const SAMPLE_TASKS: [&str; 3] = [
    "Prepare quarterly report",
    "Onboard new hires",
    "Migrate customer database",
];

/// Six employees and three unassigned tasks, ids starting at 1.
pub fn sample_task_book() -> TaskBook {
    let employees = (1u32..)
        .zip(SAMPLE_EMPLOYEES)
        .map(|(id, (name, phone, email))| {
            Employee::new(EmployeeId(id), name)
                .with_attribute("phone", phone)
                .with_attribute("email", email)
        })
        .collect();
    let tasks = (1u32..)
        .zip(SAMPLE_TASKS)
        .filter_map(|(id, name)| {
            TaskName::parse(name)
                .ok()
                .map(|name| Task::new(TaskId(id), name, TaskStatus::default(), []))
        })
        .collect();
    TaskBook { tasks, employees }
}

/// Applies `pairs` in order, stopping at the first failure.
///
/// Returns how many pairs were applied. On error the store keeps the
/// assignments made before the failing pair.
pub fn apply_assignments(
    store: &mut EntityStore,
    pairs: &[(u32, u32)],
) -> Result<usize, StoreError> {
    for &(task, employee) in pairs {
        store.assign(TaskId(task), EmployeeId(employee))?;
    }
    Ok(pairs.len())
}
