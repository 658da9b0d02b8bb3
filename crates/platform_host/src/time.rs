//! One-shot timeout contracts and a manually advanced scheduler.

use std::{
    cell::RefCell,
    collections::BTreeMap,
    fmt,
    rc::Rc,
    time::Duration,
};

/// Host service that runs a task once after a delay on the UI event loop.
pub trait TimeoutScheduler {
    /// Schedules `task` to run once after `delay`.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimeoutHandle;
}

/// Handle for one pending timeout.
///
/// [`TimeoutHandle::clear`] or dropping the handle cancels the timeout if it has not fired yet.
#[must_use = "dropping a timeout handle cancels the timeout"]
pub struct TimeoutHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimeoutHandle {
    /// Wraps the host-specific cancel operation.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Returns a handle that cancels nothing.
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    /// Cancels the timeout.
    pub fn clear(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimeoutHandle {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for TimeoutHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeoutHandle")
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

#[derive(Default)]
struct ManualClock {
    now_ms: u64,
    next_seq: u64,
    // Keyed by (due time, scheduling order) so equal deadlines fire first-in first-out.
    pending: BTreeMap<(u64, u64), Box<dyn FnOnce()>>,
}

#[derive(Clone, Default)]
/// Deterministic scheduler driven by [`ManualScheduler::advance`].
pub struct ManualScheduler {
    clock: Rc<RefCell<ManualClock>>,
}

impl ManualScheduler {
    /// Milliseconds elapsed since the scheduler was created.
    pub fn now_ms(&self) -> u64 {
        self.clock.borrow().now_ms
    }

    /// Number of timeouts that have neither fired nor been cancelled.
    pub fn pending_count(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// Advances virtual time by `by`, running every timeout that becomes due in deadline order.
    pub fn advance(&self, by: Duration) {
        let target = self.now_ms().saturating_add(duration_ms(by));
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let due = clock
                    .pending
                    .first_key_value()
                    .map(|(key, _)| *key)
                    .filter(|(due_ms, _)| *due_ms <= target);
                due.and_then(|key| {
                    clock.now_ms = key.0;
                    clock.pending.remove(&key)
                })
            };
            // The clock borrow is released before running so tasks may schedule or cancel.
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.clock.borrow_mut().now_ms = target;
    }
}

impl TimeoutScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimeoutHandle {
        let key = {
            let mut clock = self.clock.borrow_mut();
            let key = (clock.now_ms.saturating_add(duration_ms(delay)), clock.next_seq);
            clock.next_seq += 1;
            clock.pending.insert(key, task);
            key
        };
        let clock = Rc::downgrade(&self.clock);
        TimeoutHandle::new(move || {
            if let Some(clock) = clock.upgrade() {
                // Dropping the task outside the borrow keeps re-entrant drops safe.
                let removed = clock.borrow_mut().pending.remove(&key);
                drop(removed);
            }
        })
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now_ms", &self.now_ms())
            .field("pending", &self.pending_count())
            .finish()
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
