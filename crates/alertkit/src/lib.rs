#![forbid(unsafe_code)]

//! Animated modal alert overlays with host-driven presentation.
//!
//! Facade crate re-exporting the alertkit public surface:
//!
//! - [`AlertOverlay`] — the presentation state machine: title, content,
//!   one confirm action, and a timed appear/dismiss lifecycle.
//! - [`AlertHost`] — glue that turns a host-owned boolean flag into
//!   mount/unmount of the overlay instance.
//! - [`Observable`] / [`TimerQueue`] — the reactive and timing substrate.
//!
//! # Example
//!
//! ```
//! use alertkit::{
//!     AlertHost, AlertOverlay, DEFAULT_ANIMATION_DURATION, ManualClock, OverlayPhase,
//!     TimerQueue,
//! };
//!
//! let clock = ManualClock::new();
//! let timers = TimerQueue::new(clock.clone());
//!
//! let mut host: AlertHost<(), String> = AlertHost::new(timers.clone(), |presented, timers| {
//!     AlertOverlay::plain("Saved", presented, "OK", || "All changes saved.".into(), timers)
//! });
//!
//! host.present();
//! host.sync(); // mounts hidden
//! host.sync(); // entry transition starts
//! assert_eq!(host.overlay().unwrap().phase(), OverlayPhase::Appearing);
//!
//! host.overlay().unwrap().confirm(); // no action supplied: dismisses
//! clock.advance(DEFAULT_ANIMATION_DURATION);
//! timers.run_due(); // deferred flag write lands
//! host.sync();
//! assert!(!host.is_mounted());
//! ```

pub use alertkit_overlay::{
    AlertHost, AlertOverlay, BackdropConfig, DEFAULT_ANIMATION_DURATION, Easing, MountPolicy,
    OverlayPhase, Timeline,
};
pub use alertkit_runtime::{
    Binding, Clock, ManualClock, MonotonicClock, Observable, Subscription, TimerHandle,
    TimerQueue,
};
