//! TaskMaster core library: domain types, id allocation, the entity store.
//!
//! - [`types`]: ids, tasks, employees, the persistable [`TaskBook`]
//! - [`allocator`]: [`IdAllocator`]
//! - [`store`]: [`EntityStore`], [`Snapshot`], [`SharedStore`]
//! - [`sample`]: starter dataset and demo assignments
//! - [`error`]: [`StoreError`]

pub mod allocator;
pub mod error;
pub mod sample;
pub mod store;
pub mod types;

pub use allocator::IdAllocator;
pub use error::StoreError;
pub use store::{EntityStore, SharedStore, Snapshot};
pub use types::{Employee, EmployeeId, Task, TaskBook, TaskId, TaskName, TaskStatus};
