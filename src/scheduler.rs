//! Deferred work: the `schedule(task, delay)` seam and a deterministic clock.
//!
//! The controller never sleeps or touches wall-clock time. Anything that must
//! happen later (the 300 ms hide, stagger delays, typewriter ticks) is handed
//! to a [`Scheduler`]. In a browser the host backs it with `setTimeout`; in
//! tests and the CLI a [`VirtualClock`] holds the queue and releases tasks as
//! time is advanced explicitly.

use tracing::trace;

/// Handle for a scheduled task.
pub type TimerId = u64;

/// Something that can run a task after a delay.
///
/// Tasks are fire-and-forget: there is no cancellation, so a task must be
/// safe to run after the state it was scheduled for has been superseded.
pub trait Scheduler<T> {
    /// Current time in milliseconds since page load.
    fn now_ms(&self) -> u64;

    /// Queues `task` to run `delay_ms` from now.
    fn schedule(&mut self, delay_ms: u64, task: T) -> TimerId;
}

/// A task waiting in the virtual clock's queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask<T> {
    /// Handle returned by `schedule`
    pub id: TimerId,
    /// Absolute due time (ms)
    pub due_at: u64,
    /// Insertion order, breaks ties between equal due times
    pub order: u64,
    /// The payload
    pub task: T,
}

/// Deterministic scheduler driven by explicit time advancement.
///
/// Due tasks are released in `(due_at, order)` order, so two tasks scheduled
/// for the same instant run in the order they were scheduled.
#[derive(Debug, Clone)]
pub struct VirtualClock<T> {
    now_ms: u64,
    next_id: TimerId,
    next_order: u64,
    queue: Vec<ScheduledTask<T>>,
}

impl<T> Default for VirtualClock<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> VirtualClock<T> {
    /// Creates a clock at t = 0 with an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            next_order: 0,
            queue: Vec::new(),
        }
    }

    /// Number of queued tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queued tasks, in no particular order.
    #[must_use]
    pub fn pending_tasks(&self) -> &[ScheduledTask<T>] {
        &self.queue
    }

    /// Due time of the earliest queued task.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.queue.iter().map(|task| task.due_at).min()
    }

    /// Moves time forward by `delta_ms` without running anything.
    ///
    /// Returns the new time. Use [`VirtualClock::pop_due`] afterwards to
    /// collect the tasks that became due.
    pub fn advance(&mut self, delta_ms: u64) -> u64 {
        self.now_ms = self.now_ms.saturating_add(delta_ms);
        self.now_ms
    }

    /// Moves time to `target_ms`; never moves backwards.
    pub fn advance_to(&mut self, target_ms: u64) -> u64 {
        self.now_ms = self.now_ms.max(target_ms);
        self.now_ms
    }

    /// Removes and returns the next task due at or before the current time.
    pub fn pop_due(&mut self) -> Option<ScheduledTask<T>> {
        let index = self.next_index(Some(self.now_ms))?;
        Some(self.queue.remove(index))
    }

    /// Removes and returns the earliest task regardless of due time,
    /// advancing the clock to its due time.
    pub fn pop_next(&mut self) -> Option<ScheduledTask<T>> {
        let index = self.next_index(None)?;
        let task = self.queue.remove(index);
        self.now_ms = self.now_ms.max(task.due_at);
        Some(task)
    }

    fn next_index(&self, due_limit: Option<u64>) -> Option<usize> {
        self.queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.map_or(true, |limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(index, _)| index)
    }
}

impl<T> Scheduler<T> for VirtualClock<T> {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn schedule(&mut self, delay_ms: u64, task: T) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        let order = self.next_order;
        self.next_order += 1;
        let due_at = self.now_ms.saturating_add(delay_ms);

        trace!(id, due_at, "scheduled task");
        self.queue.push(ScheduledTask {
            id,
            due_at,
            order,
            task,
        });
        id
    }
}
