//! Error types for taskmaster-core.

use thiserror::Error;

use crate::types::{EmployeeId, TaskId};

/// Domain errors returned by [`EntityStore`](crate::store::EntityStore) mutations.
///
/// These are never swallowed inside the store; whatever issued the command
/// decides how to report them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No task with this id is held by the store.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    /// No employee with this id is held by the store.
    #[error("employee {0} not found")]
    EmployeeNotFound(EmployeeId),

    /// A task refers to an employee the store does not know about.
    #[error("task refers to unknown employee {0}")]
    UnknownEmployee(EmployeeId),

    /// A task with this id is already held.
    #[error("a task with id {0} already exists")]
    DuplicateTask(TaskId),

    /// An employee with this id is already held.
    #[error("an employee with id {0} already exists")]
    DuplicateEmployee(EmployeeId),

    /// The allocator has handed out [`TaskId::MAX`]; no new ids are left.
    #[error("no task ids left to allocate")]
    IdsExhausted,

    /// Task names must contain at least one non-whitespace character.
    #[error("task name must not be blank")]
    InvalidName,
}
