//! Monotonic task id allocation.

use crate::types::TaskId;

/// First id handed out by a fresh allocator.
pub const FIRST_TASK_ID: TaskId = TaskId(1);

/// Hands out task ids for the new-task path.
///
/// Reading and advancing are separate steps: [`next`](Self::next) never
/// consumes an id, so callers either pair it with [`advance`](Self::advance)
/// or use [`allocate`](Self::allocate), which does both. The counter only
/// moves backwards through [`reset`](Self::reset).
///
/// Advancing past [`TaskId::MAX`] leaves the allocator exhausted: `next`
/// keeps reporting `MAX` and `allocate` returns `None` until a `reset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: TaskId,
    exhausted: bool,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::starting_at(FIRST_TASK_ID)
    }

    pub fn starting_at(next: TaskId) -> Self {
        Self {
            next,
            exhausted: false,
        }
    }

    /// The id the next allocation will receive.
    pub fn next(&self) -> TaskId {
        self.next
    }

    /// `true` once `MAX` has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Moves past the current id.
    pub fn advance(&mut self) {
        match self.next.successor() {
            Some(next) => self.next = next,
            None => self.exhausted = true,
        }
    }

    /// Sets the counter to `next` unconditionally, even below the current value.
    ///
    /// Used when restoring persisted data: callers pass the restored
    /// high-water mark plus one.
    pub fn reset(&mut self, next: TaskId) {
        self.next = next;
        self.exhausted = false;
    }

    /// Returns the current id and advances past it.
    pub fn allocate(&mut self) -> Option<TaskId> {
        if self.exhausted {
            return None;
        }
        let id = self.next;
        self.advance();
        Some(id)
    }

    /// Raises the counter so that `id` can never be handed out. Never lowers it.
    pub(crate) fn reserve(&mut self, id: TaskId) {
        if self.exhausted || id < self.next {
            return;
        }
        self.next = id;
        self.advance();
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_does_not_consume() {
        let alloc = IdAllocator::new();
        assert_eq!(alloc.next(), TaskId(1));
        assert_eq!(alloc.next(), TaskId(1));
    }

    #[test]
    fn reset_then_next_returns_reset_value_until_advance() {
        let mut alloc = IdAllocator::starting_at(TaskId(40));
        alloc.reset(TaskId(7));
        assert_eq!(alloc.next(), TaskId(7));
        assert_eq!(alloc.next(), TaskId(7));
        alloc.advance();
        assert_eq!(alloc.next(), TaskId(8));
    }

    #[test]
    fn allocate_reads_then_advances() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.allocate(), Some(TaskId(1)));
        assert_eq!(alloc.allocate(), Some(TaskId(2)));
        assert_eq!(alloc.next(), TaskId(3));
    }

    #[test]
    fn reserve_only_moves_forward() {
        let mut alloc = IdAllocator::starting_at(TaskId(10));
        alloc.reserve(TaskId(3));
        assert_eq!(alloc.next(), TaskId(10));
        alloc.reserve(TaskId(10));
        assert_eq!(alloc.next(), TaskId(11));
        alloc.reserve(TaskId(25));
        assert_eq!(alloc.next(), TaskId(26));
    }

    #[test]
    fn independent_allocators_do_not_share_state() {
        let mut a = IdAllocator::new();
        let b = IdAllocator::new();
        a.advance();
        assert_eq!(a.next(), TaskId(2));
        assert_eq!(b.next(), TaskId(1));
    }

    #[test]
    fn allocating_max_exhausts_until_reset() {
        let mut alloc = IdAllocator::starting_at(TaskId(u32::MAX - 1));
        assert_eq!(alloc.allocate(), Some(TaskId(u32::MAX - 1)));
        assert_eq!(alloc.allocate(), Some(TaskId::MAX));
        assert!(alloc.is_exhausted());
        assert_eq!(alloc.allocate(), None);
        assert_eq!(alloc.allocate(), None);

        alloc.reset(TaskId(5));
        assert_eq!(alloc.allocate(), Some(TaskId(5)));
    }

    #[test]
    fn reserving_max_exhausts() {
        let mut alloc = IdAllocator::new();
        alloc.reserve(TaskId::MAX);
        assert!(alloc.is_exhausted());
        assert_eq!(alloc.allocate(), None);
    }
}
