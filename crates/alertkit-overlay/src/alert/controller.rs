#![forbid(unsafe_code)]

//! The alert overlay presentation controller.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use alertkit_runtime::{Binding, Observable, Subscription, TimerHandle, TimerQueue};
use tracing::{debug, trace};
use web_time::Instant;

use super::animation::Timeline;
use super::backdrop::BackdropConfig;

/// Length of both the appear and dismiss transitions.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(500);

/// Internal animation phase, distinct from the host-owned presented flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayPhase {
    /// Initial rendering state, held for exactly one host update pass so the
    /// entry animation has a defined starting point.
    #[default]
    Hidden,
    /// Entry transition started; the overlay is (becoming) visible.
    Appearing,
    /// Exit transition started; removal has been requested.
    Dismissing,
}

/// Action and content, bound to a payload or not. Exactly one shape exists
/// per overlay, so "both populated" and "neither populated" cannot occur.
enum AlertBody<T, M> {
    Plain {
        action: Option<Box<dyn Fn()>>,
        content: Box<dyn Fn() -> M>,
    },
    Presenting {
        payload: T,
        action: Box<dyn Fn(&T)>,
        content: Box<dyn Fn(&T) -> M>,
    },
}

/// Modal alert overlay controller.
///
/// Owns the show/hide state machine and the dismissal timing. The host owns
/// the instance's lifetime: the overlay never destroys itself, it only
/// requests destruction by writing `false` to the presented flag after its
/// exit animation has had time to play.
///
/// Invariants:
/// - [`OverlayPhase::Appearing`] is entered exactly once per instance, and
///   [`OverlayPhase::Dismissing`] at most once; `Hidden` is never revisited.
/// - Only the overlay writes `false` to the presented flag, and only via a
///   deferred timer owned by the instance.
///
/// Failure modes:
/// - Dropping the overlay with a dismissal pending cancels the deferred
///   flag write; the flag keeps its value.
/// - Repeated `confirm()` calls re-invoke the action every time; callers
///   needing at-most-once semantics debounce themselves.
pub struct AlertOverlay<T, M> {
    title: String,
    confirm_text: String,
    body: AlertBody<T, M>,
    phase: Observable<OverlayPhase>,
    presented: Observable<bool>,
    timers: TimerQueue,
    duration: Duration,
    backdrop: BackdropConfig,
    phase_changed_at: Cell<Option<Instant>>,
    dismiss_timer: RefCell<Option<TimerHandle>>,
}

impl<M> AlertOverlay<(), M> {
    /// Create an overlay whose action and content take no arguments.
    ///
    /// Without a confirm action (see [`confirm_action`](Self::confirm_action)),
    /// confirming simply dismisses the alert.
    pub fn plain(
        title: impl Into<String>,
        presented: Observable<bool>,
        confirm_text: impl Into<String>,
        content: impl Fn() -> M + 'static,
        timers: TimerQueue,
    ) -> Self {
        Self::with_body(
            title,
            presented,
            confirm_text,
            AlertBody::Plain {
                action: None,
                content: Box::new(content),
            },
            timers,
        )
    }

    /// Set the plain confirm action. Confirming runs it, then dismisses.
    pub fn confirm_action(mut self, action: impl Fn() + 'static) -> Self {
        if let AlertBody::Plain {
            action: slot,
            ..
        } = &mut self.body
        {
            *slot = Some(Box::new(action));
        }
        self
    }
}

impl<T, M> AlertOverlay<T, M> {
    /// Create an overlay whose action and content are bound to `payload`.
    ///
    /// Confirming invokes `action(&payload)` and leaves the phase untouched;
    /// the caller decides when to close by flipping the presented flag.
    pub fn presenting(
        title: impl Into<String>,
        presented: Observable<bool>,
        payload: T,
        confirm_text: impl Into<String>,
        action: impl Fn(&T) + 'static,
        content: impl Fn(&T) -> M + 'static,
        timers: TimerQueue,
    ) -> Self {
        Self::with_body(
            title,
            presented,
            confirm_text,
            AlertBody::Presenting {
                payload,
                action: Box::new(action),
                content: Box::new(content),
            },
            timers,
        )
    }

    fn with_body(
        title: impl Into<String>,
        presented: Observable<bool>,
        confirm_text: impl Into<String>,
        body: AlertBody<T, M>,
        timers: TimerQueue,
    ) -> Self {
        Self {
            title: title.into(),
            confirm_text: confirm_text.into(),
            body,
            phase: Observable::new(OverlayPhase::Hidden),
            presented,
            timers,
            duration: DEFAULT_ANIMATION_DURATION,
            backdrop: BackdropConfig::default(),
            phase_changed_at: Cell::new(None),
            dismiss_timer: RefCell::new(None),
        }
    }

    /// Override the transition duration (applies to appear and dismiss).
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Override the overlay's backdrop.
    pub fn backdrop(mut self, backdrop: BackdropConfig) -> Self {
        self.backdrop = backdrop;
        self
    }

    /// Start the entry transition: `Hidden → Appearing`.
    ///
    /// Driven by the host on the update pass after construction, so the
    /// hidden starting state has been rendered at least once. Fires exactly
    /// once; later calls are ignored.
    pub fn on_mount(&self) {
        if self.phase.get() != OverlayPhase::Hidden {
            return;
        }
        debug!(title = %self.title, "alert appearing");
        self.phase_changed_at.set(Some(self.timers.now()));
        self.phase.set(OverlayPhase::Appearing);
    }

    /// Activate the confirm control.
    ///
    /// Payload path: invokes the bound action with the payload and returns;
    /// the phase is untouched and the caller closes the alert by flipping
    /// the presented flag when it sees fit. Plain path: invokes the action
    /// if one was supplied, then requests dismissal. No debouncing is
    /// performed on either path.
    pub fn confirm(&self) {
        let dismiss = match &self.body {
            AlertBody::Presenting {
                payload, action, ..
            } => {
                trace!("confirm: payload action");
                action(payload);
                false
            }
            AlertBody::Plain { action, .. } => {
                trace!("confirm: plain action");
                if let Some(action) = action {
                    action();
                }
                true
            }
        };
        if dismiss {
            self.request_dismiss();
        }
    }

    /// Start the exit transition: `Appearing → Dismissing`.
    ///
    /// The phase flips synchronously so a renderer can start reversing the
    /// transition immediately. The presented flag is written `false` only
    /// after the transition duration, via a timer owned by this instance;
    /// dropping the instance cancels it. Calls in any other phase are
    /// no-ops.
    pub fn request_dismiss(&self) {
        if self.phase.get() != OverlayPhase::Appearing {
            return;
        }
        debug!(
            title = %self.title,
            delay_ms = self.duration.as_millis() as u64,
            "alert dismissing; removal deferred"
        );
        self.phase_changed_at.set(Some(self.timers.now()));
        self.phase.set(OverlayPhase::Dismissing);

        let presented = self.presented.clone();
        let handle = self
            .timers
            .schedule(self.duration, move || presented.set(false));
        *self.dismiss_timer.borrow_mut() = Some(handle);
    }

    /// Dismiss without running the confirm action.
    ///
    /// Defined in the state machine but not wired into any default control.
    #[cfg(feature = "cancel-action")]
    pub fn cancel(&self) {
        self.request_dismiss();
    }

    /// Produce the content body: the bound producer applied to the payload,
    /// or the plain producer invoked with no arguments.
    pub fn render_content(&self) -> M {
        match &self.body {
            AlertBody::Plain { content, .. } => content(),
            AlertBody::Presenting {
                payload, content, ..
            } => content(payload),
        }
    }

    /// Title text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Label of the confirm control.
    pub fn confirm_text(&self) -> &str {
        &self.confirm_text
    }

    /// Payload, if this overlay was built with one.
    pub fn payload(&self) -> Option<&T> {
        match &self.body {
            AlertBody::Plain { .. } => None,
            AlertBody::Presenting { payload, .. } => Some(payload),
        }
    }

    /// Current animation phase.
    pub fn phase(&self) -> OverlayPhase {
        self.phase.get()
    }

    /// Observe phase transitions. The callback fires on every transition
    /// until the guard is dropped.
    #[must_use]
    pub fn observe_phase(&self, callback: impl Fn(&OverlayPhase) + 'static) -> Subscription {
        self.phase.subscribe(callback)
    }

    /// Read-only view of the phase, for render code that should not hold
    /// the overlay itself. Stays readable after the overlay is dropped.
    pub fn phase_binding(&self) -> Binding<OverlayPhase> {
        Binding::new(&self.phase)
    }

    /// The overlay's backdrop configuration.
    pub fn backdrop_config(&self) -> BackdropConfig {
        self.backdrop
    }

    /// Effective backdrop opacity at `now`: the configured opacity scaled
    /// by how visible the card is, so the dim layer and the card enter and
    /// exit together.
    pub fn backdrop_opacity(&self, now: Instant) -> f32 {
        self.backdrop.opacity * self.visible_fraction(now)
    }

    /// Timeline of the transition currently in flight, if any.
    pub fn timeline(&self) -> Option<Timeline> {
        self.phase_changed_at
            .get()
            .map(|start| Timeline::new(start, self.duration))
    }

    /// How visible the alert card is at `now`, in `[0.0, 1.0]`: ramps up
    /// while appearing, down while dismissing.
    pub fn visible_fraction(&self, now: Instant) -> f32 {
        let Some(timeline) = self.timeline() else {
            return 0.0;
        };
        match self.phase.get() {
            OverlayPhase::Hidden => 0.0,
            OverlayPhase::Appearing => timeline.progress(now),
            OverlayPhase::Dismissing => 1.0 - timeline.progress(now),
        }
    }
}

impl<T, M> std::fmt::Debug for AlertOverlay<T, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertOverlay")
            .field("title", &self.title)
            .field("confirm_text", &self.confirm_text)
            .field("phase", &self.phase.get())
            .field("has_payload", &self.payload().is_some())
            .field("duration", &self.duration)
            .finish()
    }
}
