//! Fixed-delay task queue driven by an injected clock.
//!
//! Coordinators push tasks with a due time and drain the due ones from their
//! `poll()` method. Nothing here owns a thread or a timer: the host decides
//! when to poll (once per frame in the GUI, after advancing a manual clock in
//! tests).

use std::time::Duration;

/// Tasks waiting for their due time, fired in due-time order.
///
/// Tasks with equal due times fire in the order they were scheduled.
#[derive(Debug)]
pub struct DeferredQueue<T> {
    entries: Vec<Entry<T>>,
    next_seq: u64,
}

#[derive(Debug)]
struct Entry<T> {
    due: Duration,
    seq: u64,
    task: T,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// Schedules `task` to become due at `due`.
    pub fn schedule(&mut self, due: Duration, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { due, seq, task });
    }

    /// Removes and returns every task due at or before `now`.
    pub fn take_due(&mut self, now: Duration) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|entry| entry.due <= now);
        self.entries = pending;

        due.sort_by_key(|entry| (entry.due, entry.seq));
        due.into_iter().map(|entry| entry.task).collect()
    }

    /// Earliest due time among pending tasks.
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.iter().map(|entry| entry.due).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
