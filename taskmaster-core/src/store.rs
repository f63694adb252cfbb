//! In-memory aggregate of tasks and employees.
//!
//! [`EntityStore`] is the single owner of both collections and the only
//! place assignment state changes, so the invariants below are checked at one
//! choke point:
//!
//! - task ids are unique, whether they came from the allocator or were
//!   supplied explicitly;
//! - employee ids are unique;
//! - every id in a task's assignment set names an employee the store holds.
//!
//! Collections are keyed by id, so iteration order (and therefore the saved
//! file) is deterministic.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::allocator::IdAllocator;
use crate::error::StoreError;
use crate::types::{Employee, EmployeeId, Task, TaskBook, TaskId, TaskName, TaskStatus};

// ---------------------------------------------------------------------------
// EntityStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    tasks: BTreeMap<TaskId, Task>,
    employees: BTreeMap<EmployeeId, Employee>,
    allocator: IdAllocator,
}

impl EntityStore {
    /// An empty store whose allocator starts at the first id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted data, validating every record.
    ///
    /// The allocator ends up one past the highest restored task id.
    pub fn from_book(book: TaskBook) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for employee in book.employees {
            store.add_employee(employee)?;
        }
        for task in book.tasks {
            store.insert_task(task)?;
        }
        Ok(store)
    }

    /// The persistable form of the store, ordered by id.
    pub fn to_book(&self) -> TaskBook {
        TaskBook {
            tasks: self.tasks.values().cloned().collect(),
            employees: self.employees.values().cloned().collect(),
        }
    }

    // -- identity -----------------------------------------------------------

    /// The id the next [`add_task`](Self::add_task) will use.
    pub fn next_task_id(&self) -> TaskId {
        self.allocator.next()
    }

    /// Forces the allocator to `next`. See [`IdAllocator::reset`].
    pub fn reset_allocator(&mut self, next: TaskId) {
        self.allocator.reset(next);
    }

    // -- tasks --------------------------------------------------------------

    /// Creates a task with a freshly allocated id.
    ///
    /// Initial assignees are checked before an id is consumed. A collision
    /// can only happen after the allocator was reset below a held id; the
    /// colliding id is still consumed so the next call can succeed. Once
    /// [`TaskId::MAX`] has been handed out every call fails with
    /// [`StoreError::IdsExhausted`].
    pub fn add_task(
        &mut self,
        name: TaskName,
        status: TaskStatus,
        assigned: impl IntoIterator<Item = EmployeeId>,
    ) -> Result<&Task, StoreError> {
        let assigned: BTreeSet<EmployeeId> = assigned.into_iter().collect();
        self.check_known(&assigned)?;

        let id = self.allocator.allocate().ok_or(StoreError::IdsExhausted)?;
        if self.tasks.contains_key(&id) {
            return Err(StoreError::DuplicateTask(id));
        }
        Ok(&*self
            .tasks
            .entry(id)
            .or_insert_with(|| Task::new(id, name, status, assigned)))
    }

    /// Inserts a task that already carries an id (restore or import).
    ///
    /// The allocator is raised past the id so later allocations cannot
    /// collide with it.
    pub fn insert_task(&mut self, task: Task) -> Result<&Task, StoreError> {
        self.check_known(task.assigned_employees())?;
        let id = task.id();
        if self.tasks.contains_key(&id) {
            return Err(StoreError::DuplicateTask(id));
        }
        self.allocator.reserve(id);
        Ok(&*self.tasks.entry(id).or_insert(task))
    }

    pub fn remove_task(&mut self, id: TaskId) -> Result<Task, StoreError> {
        self.tasks.remove(&id).ok_or(StoreError::TaskNotFound(id))
    }

    pub fn set_status(&mut self, id: TaskId, status: TaskStatus) -> Result<(), StoreError> {
        self.task_mut(id)?.set_status(status);
        Ok(())
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Tasks that have `employee` in their assignment set.
    pub fn tasks_assigned_to(&self, employee: EmployeeId) -> impl Iterator<Item = &Task> {
        self.tasks.values().filter(move |t| t.is_assigned(employee))
    }

    // -- employees ----------------------------------------------------------

    pub fn add_employee(&mut self, employee: Employee) -> Result<&Employee, StoreError> {
        let id = employee.id();
        if self.employees.contains_key(&id) {
            return Err(StoreError::DuplicateEmployee(id));
        }
        Ok(&*self.employees.entry(id).or_insert(employee))
    }

    /// Removes the employee and drops the id from every assignment set.
    pub fn remove_employee(&mut self, id: EmployeeId) -> Result<Employee, StoreError> {
        let employee = self
            .employees
            .remove(&id)
            .ok_or(StoreError::EmployeeNotFound(id))?;
        for task in self.tasks.values_mut() {
            task.unassign(id);
        }
        Ok(employee)
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.get(&id)
    }

    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    // -- assignment ---------------------------------------------------------

    /// Adds `employee` to the task's assignment set. Assigning twice is a no-op.
    pub fn assign(&mut self, task: TaskId, employee: EmployeeId) -> Result<(), StoreError> {
        if !self.tasks.contains_key(&task) {
            return Err(StoreError::TaskNotFound(task));
        }
        if !self.employees.contains_key(&employee) {
            return Err(StoreError::EmployeeNotFound(employee));
        }
        self.task_mut(task)?.assign(employee);
        Ok(())
    }

    /// Removes `employee` from the task's assignment set.
    ///
    /// Returns `false` when the employee was not assigned; that is not an error.
    pub fn unassign(&mut self, task: TaskId, employee: EmployeeId) -> Result<bool, StoreError> {
        Ok(self.task_mut(task)?.unassign(employee))
    }

    // -- views --------------------------------------------------------------

    /// An owned, immutable copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tasks: self.tasks.values().cloned().collect(),
            employees: self.employees.values().cloned().collect(),
            next_task_id: self.allocator.next(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.employees.is_empty()
    }

    fn task_mut(&mut self, id: TaskId) -> Result<&mut Task, StoreError> {
        self.tasks.get_mut(&id).ok_or(StoreError::TaskNotFound(id))
    }

    fn check_known(&self, ids: &BTreeSet<EmployeeId>) -> Result<(), StoreError> {
        match ids.iter().find(|id| !self.employees.contains_key(id)) {
            Some(unknown) => Err(StoreError::UnknownEmployee(*unknown)),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Read-only view of a store at the moment it was taken.
///
/// Owns its data, so later store mutations never show through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    tasks: Vec<Task>,
    employees: Vec<Employee>,
    next_task_id: TaskId,
}

impl Snapshot {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn next_task_id(&self) -> TaskId {
        self.next_task_id
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id() == id)
    }

    /// Number of (task, employee) assignment pairs.
    pub fn assignment_count(&self) -> usize {
        self.tasks.iter().map(|t| t.assigned_employees().len()).sum()
    }
}

// ---------------------------------------------------------------------------
// SharedStore
// ---------------------------------------------------------------------------

/// A store behind one coarse lock, for callers that share it across threads.
///
/// Id allocation and the matching insertion happen under the same guard.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<EntityStore>>,
}

impl SharedStore {
    pub fn new(store: EntityStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut EntityStore) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.with(|store| store.snapshot())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> TaskName {
        TaskName::parse(s).expect("valid name")
    }

    fn store_with_employees(ids: &[u32]) -> EntityStore {
        let mut store = EntityStore::new();
        for id in ids {
            store
                .add_employee(Employee::new(EmployeeId(*id), format!("employee {id}")))
                .expect("add employee");
        }
        store
    }

    #[test]
    fn add_task_ids_are_distinct() {
        let mut store = EntityStore::new();
        let ids: Vec<TaskId> = (0..50)
            .map(|i| {
                store
                    .add_task(name(&format!("task {i}")), TaskStatus::Pending, [])
                    .expect("add")
                    .id()
            })
            .collect();
        let unique: BTreeSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        assert_eq!(store.next_task_id(), TaskId(51));
    }

    #[test]
    fn add_task_with_unknown_assignee_keeps_allocator() {
        let mut store = store_with_employees(&[1]);
        let err = store
            .add_task(name("x"), TaskStatus::Pending, [EmployeeId(1), EmployeeId(9)])
            .unwrap_err();
        assert_eq!(err, StoreError::UnknownEmployee(EmployeeId(9)));
        assert_eq!(store.next_task_id(), TaskId(1));
    }

    #[test]
    fn add_task_after_backwards_reset_reports_duplicate() {
        let mut store = EntityStore::new();
        store.add_task(name("a"), TaskStatus::Pending, []).unwrap();
        store.reset_allocator(TaskId(1));
        let err = store.add_task(name("b"), TaskStatus::Pending, []).unwrap_err();
        assert_eq!(err, StoreError::DuplicateTask(TaskId(1)));
        let id = store.add_task(name("b"), TaskStatus::Pending, []).unwrap().id();
        assert_eq!(id, TaskId(2));
    }

    #[test]
    fn restored_max_id_reports_exhaustion_not_duplicates() {
        let book = TaskBook {
            tasks: vec![Task::new(TaskId::MAX, name("last"), TaskStatus::Pending, [])],
            employees: vec![],
        };
        let mut store = EntityStore::from_book(book).unwrap();
        for _ in 0..3 {
            assert_eq!(
                store.add_task(name("more"), TaskStatus::Pending, []).unwrap_err(),
                StoreError::IdsExhausted
            );
        }
        assert_eq!(store.tasks().count(), 1);

        // A reset below the held range lets allocation resume.
        store.reset_allocator(TaskId(1));
        let id = store.add_task(name("more"), TaskStatus::Pending, []).unwrap().id();
        assert_eq!(id, TaskId(1));
    }

    #[test]
    fn allocating_the_last_id_succeeds_once() {
        let mut store = EntityStore::new();
        store.reset_allocator(TaskId::MAX);
        let id = store.add_task(name("edge"), TaskStatus::Pending, []).unwrap().id();
        assert_eq!(id, TaskId::MAX);
        assert_eq!(
            store.add_task(name("over"), TaskStatus::Pending, []).unwrap_err(),
            StoreError::IdsExhausted
        );
    }

    #[test]
    fn insert_task_rejects_duplicate_ids() {
        let mut store = EntityStore::new();
        let t = Task::new(TaskId(5), name("a"), TaskStatus::Pending, []);
        store.insert_task(t.clone()).unwrap();
        assert_eq!(store.insert_task(t).unwrap_err(), StoreError::DuplicateTask(TaskId(5)));
    }

    #[test]
    fn insert_task_raises_allocator_past_explicit_id() {
        let mut store = EntityStore::new();
        store
            .insert_task(Task::new(TaskId(7), name("imported"), TaskStatus::Pending, []))
            .unwrap();
        let fresh = store.add_task(name("new"), TaskStatus::Pending, []).unwrap();
        assert_eq!(fresh.id(), TaskId(8));
    }

    #[test]
    fn assign_is_idempotent() {
        let mut store = store_with_employees(&[1, 2]);
        let t = store.add_task(name("a"), TaskStatus::Pending, []).unwrap().id();
        store.assign(t, EmployeeId(2)).unwrap();
        let before = store.task(t).unwrap().assigned_employees().clone();
        store.assign(t, EmployeeId(2)).unwrap();
        assert_eq!(store.task(t).unwrap().assigned_employees(), &before);
    }

    #[test]
    fn assign_reports_missing_entities() {
        let mut store = store_with_employees(&[1]);
        let t = store.add_task(name("a"), TaskStatus::Pending, []).unwrap().id();
        assert_eq!(
            store.assign(TaskId(99), EmployeeId(1)),
            Err(StoreError::TaskNotFound(TaskId(99)))
        );
        assert_eq!(
            store.assign(t, EmployeeId(42)),
            Err(StoreError::EmployeeNotFound(EmployeeId(42)))
        );
    }

    #[test]
    fn unassign_absent_employee_is_noop() {
        let mut store = store_with_employees(&[1]);
        let t = store.add_task(name("a"), TaskStatus::Pending, []).unwrap().id();
        assert_eq!(store.unassign(t, EmployeeId(1)), Ok(false));
        store.assign(t, EmployeeId(1)).unwrap();
        assert_eq!(store.unassign(t, EmployeeId(1)), Ok(true));
        assert!(store.task(t).unwrap().assigned_employees().is_empty());
        assert_eq!(
            store.unassign(TaskId(3), EmployeeId(1)),
            Err(StoreError::TaskNotFound(TaskId(3)))
        );
    }

    #[test]
    fn remove_employee_cascades() {
        let mut store = store_with_employees(&[1, 2]);
        let a = store.add_task(name("a"), TaskStatus::Pending, []).unwrap().id();
        let b = store.add_task(name("b"), TaskStatus::Pending, []).unwrap().id();
        store.assign(a, EmployeeId(1)).unwrap();
        store.assign(b, EmployeeId(1)).unwrap();
        store.assign(b, EmployeeId(2)).unwrap();

        store.remove_employee(EmployeeId(1)).unwrap();

        assert!(!store.task(a).unwrap().is_assigned(EmployeeId(1)));
        assert!(!store.task(b).unwrap().is_assigned(EmployeeId(1)));
        assert!(store.task(b).unwrap().is_assigned(EmployeeId(2)));
        assert_eq!(store.tasks_assigned_to(EmployeeId(1)).count(), 0);
        assert_eq!(
            store.assign(a, EmployeeId(1)),
            Err(StoreError::EmployeeNotFound(EmployeeId(1)))
        );
    }

    #[test]
    fn set_status_and_remove_task() {
        let mut store = EntityStore::new();
        let t = store.add_task(name("a"), TaskStatus::Pending, []).unwrap().id();
        store.set_status(t, TaskStatus::Completed).unwrap();
        assert_eq!(store.task(t).unwrap().status(), TaskStatus::Completed);

        let removed = store.remove_task(t).unwrap();
        assert_eq!(removed.id(), t);
        assert_eq!(store.remove_task(t), Err(StoreError::TaskNotFound(t)));
        assert_eq!(
            store.set_status(t, TaskStatus::Pending),
            Err(StoreError::TaskNotFound(t))
        );
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutation() {
        let mut store = store_with_employees(&[1]);
        let t = store.add_task(name("a"), TaskStatus::Pending, []).unwrap().id();
        let snap = store.snapshot();

        store.assign(t, EmployeeId(1)).unwrap();
        store.add_task(name("b"), TaskStatus::Pending, []).unwrap();

        assert_eq!(snap.tasks().len(), 1);
        assert!(snap.task(t).unwrap().assigned_employees().is_empty());
        assert_eq!(snap.next_task_id(), TaskId(2));
        assert_eq!(snap.assignment_count(), 0);
    }

    #[test]
    fn from_book_validates_references() {
        let book = TaskBook {
            tasks: vec![Task::new(TaskId(1), name("a"), TaskStatus::Pending, [EmployeeId(4)])],
            employees: vec![],
        };
        assert_eq!(
            EntityStore::from_book(book).unwrap_err(),
            StoreError::UnknownEmployee(EmployeeId(4))
        );
    }

    #[test]
    fn from_book_rejects_duplicate_employees() {
        let book = TaskBook {
            tasks: vec![],
            employees: vec![Employee::new(EmployeeId(1), "a"), Employee::new(EmployeeId(1), "b")],
        };
        assert_eq!(
            EntityStore::from_book(book).unwrap_err(),
            StoreError::DuplicateEmployee(EmployeeId(1))
        );
    }

    #[test]
    fn from_book_then_to_book_is_ordered() {
        let book = TaskBook {
            tasks: vec![
                Task::new(TaskId(9), name("late"), TaskStatus::Completed, []),
                Task::new(TaskId(3), name("early"), TaskStatus::Pending, [EmployeeId(2)]),
            ],
            employees: vec![Employee::new(EmployeeId(2), "b")],
        };
        let store = EntityStore::from_book(book).unwrap();
        assert_eq!(store.next_task_id(), TaskId(10));
        let ids: Vec<_> = store.to_book().tasks.iter().map(Task::id).collect();
        assert_eq!(ids, vec![TaskId(3), TaskId(9)]);
    }

    #[test]
    fn shared_store_allocates_under_one_lock() {
        let shared = SharedStore::new(EntityStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    (0..25)
                        .map(|j| {
                            shared.with(|s| {
                                s.add_task(name(&format!("t{i}-{j}")), TaskStatus::Pending, [])
                                    .map(Task::id)
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()
                })
            })
            .collect();

        let mut all = BTreeSet::new();
        for handle in handles {
            for id in handle.join().expect("thread").expect("add") {
                assert!(all.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(all.len(), 200);
        assert_eq!(shared.snapshot().tasks().len(), 200);
    }
}
