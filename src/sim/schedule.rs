//! Deferred task queue
//!
//! Components queue work to run after a delay; the owner drains whatever
//! is due at the start of its update. Tasks cannot be cancelled, only
//! dropped together with their owner.

/// A task waiting for its due time
#[derive(Debug, Clone, PartialEq)]
pub struct Scheduled<T> {
    pub due: f32,
    pub task: T,
}

/// Queue of delayed tasks keyed by absolute due time
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    queue: Vec<Scheduled<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queue `task` to run `delay` seconds after `now`
    pub fn schedule(&mut self, now: f32, delay: f32, task: T) {
        let due = now + delay.max(0.0);
        // Stable insert keeps FIFO order among equal due times
        let idx = self.queue.partition_point(|s| s.due <= due);
        self.queue.insert(idx, Scheduled { due, task });
    }

    /// Remove and return every task due at or before `now`, earliest first
    pub fn drain_due(&mut self, now: f32) -> Vec<T> {
        let split = self.queue.partition_point(|s| s.due <= now);
        self.queue.drain(..split).map(|s| s.task).collect()
    }

    /// Pending tasks in due order
    pub fn pending(&self) -> impl Iterator<Item = &Scheduled<T>> {
        self.queue.iter()
    }

    /// Due time of the next task
    pub fn next_due(&self) -> Option<f32> {
        self.queue.first().map(|s| s.due)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop all pending tasks
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
