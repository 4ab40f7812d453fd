#![forbid(unsafe_code)]

//! Easing and transition timelines.
//!
//! The controller records when a phase transition started; hosts that want
//! interpolated opacity or slide offsets build a [`Timeline`] from that
//! instant and sample it with the current clock reading. No wall-clock state
//! lives here, so sampling is deterministic under a manual clock.

use std::time::Duration;

use web_time::Instant;

/// Easing curve applied to a timeline's linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Smoothstep ease-in-out.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Apply the curve to `t`, clamping to `[0.0, 1.0]`.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// A fixed-duration transition starting at a known instant.
#[derive(Debug, Clone, Copy)]
pub struct Timeline {
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl Timeline {
    /// Create a timeline with the default easing.
    pub fn new(start: Instant, duration: Duration) -> Self {
        Self {
            start,
            duration,
            easing: Easing::default(),
        }
    }

    /// Override the easing curve.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Eased progress in `[0.0, 1.0]` at `now`. A zero-duration timeline is
    /// complete immediately.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        let linear = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.easing.apply(linear)
    }

    /// Whether the transition has run its full duration at `now`.
    #[must_use]
    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}
