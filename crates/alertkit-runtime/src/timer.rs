#![forbid(unsafe_code)]

//! Cancellable deferred callbacks on an injected clock.
//!
//! [`TimerQueue`] is a single-threaded pump: the host calls [`run_due`] once
//! per update pass and every callback whose deadline has passed fires, in
//! deadline order. [`schedule`] returns a [`TimerHandle`] that cancels the
//! entry when dropped, so an owner being torn down takes its pending
//! callbacks with it instead of leaving a dangling write.
//!
//! # Invariants
//!
//! 1. A callback fires at most once, and never before its deadline.
//! 2. Cancellation (explicit or via handle drop) is a no-op once the
//!    callback has fired.
//! 3. Callbacks run outside the queue's borrow: they may schedule or cancel
//!    other timers freely.
//!
//! [`run_due`]: TimerQueue::run_due
//! [`schedule`]: TimerQueue::schedule

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::trace;
use web_time::Instant;

use crate::time::Clock;

struct Entry {
    id: u64,
    deadline: Instant,
    callback: Box<dyn FnOnce()>,
}

struct Inner {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Deferred-callback queue. Clones share the same queue and clock.
pub struct TimerQueue {
    clock: Rc<dyn Clock>,
    inner: Rc<RefCell<Inner>>,
}

impl Clone for TimerQueue {
    fn clone(&self) -> Self {
        Self {
            clock: Rc::clone(&self.clock),
            inner: Rc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("pending", &self.len())
            .finish()
    }
}

impl TimerQueue {
    /// Create a queue driven by the given clock.
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Rc::new(clock),
            inner: Rc::new(RefCell::new(Inner {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Current instant on the queue's clock.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Schedule `callback` to fire once `delay` has elapsed.
    ///
    /// The callback stays pending until a [`run_due`](Self::run_due) pass at
    /// or after the deadline, or until the returned handle is cancelled or
    /// dropped.
    #[must_use]
    pub fn schedule(&self, delay: Duration, callback: impl FnOnce() + 'static) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push(Entry {
            id,
            deadline: self.clock.now() + delay,
            callback: Box::new(callback),
        });
        trace!(id, delay_ms = delay.as_millis() as u64, "timer scheduled");
        TimerHandle {
            id,
            queue: Rc::downgrade(&self.inner),
        }
    }

    /// Fire every callback whose deadline has passed, in deadline order.
    /// Returns the number fired.
    ///
    /// The queue's borrow is released while each callback runs, so callbacks
    /// may schedule further timers; newly scheduled zero-delay timers fire
    /// within the same pass.
    pub fn run_due(&self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;
        loop {
            let entry = {
                let mut inner = self.inner.borrow_mut();
                let due = inner
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.deadline <= now)
                    .min_by_key(|(_, e)| (e.deadline, e.id))
                    .map(|(i, _)| i);
                match due {
                    Some(i) => inner.entries.remove(i),
                    None => break,
                }
            };
            trace!(id = entry.id, "timer fired");
            (entry.callback)();
            fired += 1;
        }
        fired
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Whether no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }
}

/// Handle to a scheduled timer. Cancels the timer when dropped.
pub struct TimerHandle {
    id: u64,
    queue: Weak<RefCell<Inner>>,
}

impl TimerHandle {
    /// Cancel the timer if it has not fired yet.
    pub fn cancel(&self) {
        if let Some(queue) = self.queue.upgrade() {
            let mut inner = queue.borrow_mut();
            let before = inner.entries.len();
            inner.entries.retain(|e| e.id != self.id);
            if inner.entries.len() != before {
                trace!(id = self.id, "timer cancelled");
            }
        }
    }

    /// Whether the timer is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.queue
            .upgrade()
            .is_some_and(|queue| queue.borrow().entries.iter().any(|e| e.id == self.id))
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("id", &self.id)
            .field("pending", &self.is_pending())
            .finish()
    }
}
