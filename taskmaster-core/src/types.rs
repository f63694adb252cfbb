//! Domain types for tasks and employees.
//!
//! Entities only expose read accessors publicly. Mutation of assignment and
//! status state is crate-private so that every change flows through
//! [`EntityStore`](crate::store::EntityStore).

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StoreError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Identifier of a task. Unique within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u32);

impl TaskId {
    /// Largest representable id.
    pub const MAX: TaskId = TaskId(u32::MAX);

    /// The id after this one, or `None` past [`TaskId::MAX`].
    pub fn successor(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for TaskId {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

/// Identifier of an employee. Unique within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub u32);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for EmployeeId {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

/// A non-blank task label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskName(String);

impl TaskName {
    /// Validates `name`. Surrounding whitespace is trimmed.
    pub fn parse(name: impl Into<String>) -> Result<Self, StoreError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(StoreError::InvalidName);
        }
        if trimmed.len() == name.len() {
            Ok(Self(name))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskName {
    type Error = StoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<TaskName> for String {
    fn from(name: TaskName) -> Self {
        name.0
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Progress of a task.
///
/// Older data files stored a single boolean; see [`TaskStatus::from_legacy_flag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    #[default]
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Maps the legacy boolean flag: `false` is in progress, `true` is completed.
    pub fn from_legacy_flag(done: bool) -> Self {
        if done {
            TaskStatus::Completed
        } else {
            TaskStatus::InProgress
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "Pending"),
            TaskStatus::InProgress => write!(f, "In Progress"),
            TaskStatus::Completed => write!(f, "Completed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// A unit of work and the employees assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TaskRecord")]
pub struct Task {
    id: TaskId,
    name: TaskName,
    status: TaskStatus,
    assigned_employees: BTreeSet<EmployeeId>,
}

impl Task {
    /// Builds a task with an explicit id.
    ///
    /// This is the restore/import path: the id is not checked against any
    /// allocator. Uniqueness is enforced when the task is inserted into a store.
    pub fn new(
        id: TaskId,
        name: TaskName,
        status: TaskStatus,
        assigned_employees: impl IntoIterator<Item = EmployeeId>,
    ) -> Self {
        Self {
            id,
            name,
            status,
            assigned_employees: assigned_employees.into_iter().collect(),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &TaskName {
        &self.name
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn assigned_employees(&self) -> &BTreeSet<EmployeeId> {
        &self.assigned_employees
    }

    pub fn is_assigned(&self, employee: EmployeeId) -> bool {
        self.assigned_employees.contains(&employee)
    }

    /// Returns `true` if the employee was newly added.
    pub(crate) fn assign(&mut self, employee: EmployeeId) -> bool {
        self.assigned_employees.insert(employee)
    }

    /// Returns `true` if the employee was present.
    pub(crate) fn unassign(&mut self, employee: EmployeeId) -> bool {
        self.assigned_employees.remove(&employee)
    }

    pub(crate) fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }
}

/// Accepts both the current and the legacy on-disk task shapes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: TaskId,
    name: TaskName,
    #[serde(default)]
    status: Option<StatusCompat>,
    #[serde(default)]
    assigned_employees: Option<AssignedCompat>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatusCompat {
    Named(TaskStatus),
    Legacy(bool),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AssignedCompat {
    Set(BTreeSet<EmployeeId>),
    Delimited(String),
}

impl TryFrom<TaskRecord> for Task {
    type Error = String;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let status = match record.status {
            Some(StatusCompat::Named(status)) => status,
            Some(StatusCompat::Legacy(flag)) => TaskStatus::from_legacy_flag(flag),
            None => TaskStatus::default(),
        };
        let assigned_employees = match record.assigned_employees {
            Some(AssignedCompat::Set(set)) => set,
            Some(AssignedCompat::Delimited(text)) => parse_delimited_ids(&text)?,
            None => BTreeSet::new(),
        };
        Ok(Task {
            id: record.id,
            name: record.name,
            status,
            assigned_employees,
        })
    }
}

/// Parses `"1 2, 3"` style employee lists. An empty string is an empty set.
fn parse_delimited_ids(text: &str) -> Result<BTreeSet<EmployeeId>, String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<u32>()
                .map(EmployeeId)
                .map_err(|_| format!("invalid employee id '{token}' in assignedEmployees"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Employee
// ---------------------------------------------------------------------------

/// A person tasks can be assigned to.
///
/// Only the id matters to the store; every other field is carried through
/// unchanged when the employee is loaded and saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl Employee {
    pub fn new(id: EmployeeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attributes: Map::new(),
        }
    }

    /// Attaches an opaque attribute (phone, email, ...).
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

// ---------------------------------------------------------------------------
// Task book
// ---------------------------------------------------------------------------

/// The persistable form of a store: every task and every employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaskBook {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub employees: Vec<Employee>,
}

impl TaskBook {
    /// Largest task id in the book, if any.
    pub fn max_task_id(&self) -> Option<TaskId> {
        self.tasks.iter().map(Task::id).max()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
