#![forbid(unsafe_code)]

//! Injectable time sources.
//!
//! The overlay never reads the platform clock directly; it asks a [`Clock`].
//! [`MonotonicClock`] is the production source (backed by `web-time`, so
//! wasm targets work). [`ManualClock`] is advanced explicitly, which makes
//! animation and dismissal timing assertable without wall-clock sleeps.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

/// A monotonic time source.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Platform monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Deterministic clock advanced explicitly by the caller.
///
/// Clones share the same timeline: advancing one advances all.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a clock frozen at an arbitrary starting instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Move time forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    /// Total time advanced since creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.elapsed.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_starts_frozen() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new();
        let start = clock.now();
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now() - start, Duration::from_millis(250));
    }

    #[test]
    fn manual_clock_clones_share_timeline() {
        let a = ManualClock::new();
        let b = a.clone();
        a.advance(Duration::from_secs(1));
        assert_eq!(b.elapsed(), Duration::from_secs(1));
        assert_eq!(a.now(), b.now());
    }

    #[test]
    fn monotonic_clock_is_monotonic() {
        let clock = MonotonicClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
