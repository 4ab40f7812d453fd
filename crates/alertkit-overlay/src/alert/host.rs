#![forbid(unsafe_code)]

//! Host glue: flag-driven mounting and unmounting of an alert overlay.
//!
//! The host owns the presented flag and the overlay's lifetime. `sync()` is
//! called once per update pass and reconciles the two: flag up and nothing
//! mounted → construct the overlay (phase `Hidden` for that one pass); flag
//! up and still hidden → start the entry transition; flag down → drop the
//! instance. Dropping cancels any pending dismiss timer, so a deferred flag
//! write can never land on a torn-down instance.

use alertkit_runtime::{Binding, Observable, TimerQueue};
use tracing::trace;

use super::backdrop::BackdropConfig;
use super::controller::{AlertOverlay, OverlayPhase};

/// How the host treats the mount boundary.
///
/// Defaults suppress the host's own ambient transition (only the overlay's
/// internal animation plays) and keep the host backdrop layer transparent
/// (only the overlay's dimming is visible).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountPolicy {
    /// Suppress any host-level cross-fade on the pass the flag becomes true.
    pub suppress_mount_transition: bool,
    /// Backdrop the host applies behind the overlay.
    pub host_backdrop: BackdropConfig,
}

impl Default for MountPolicy {
    fn default() -> Self {
        Self {
            suppress_mount_transition: true,
            host_backdrop: BackdropConfig::transparent(),
        }
    }
}

impl MountPolicy {
    /// Set whether the host's own mount transition is suppressed.
    pub fn suppress_mount_transition(mut self, suppress: bool) -> Self {
        self.suppress_mount_transition = suppress;
        self
    }

    /// Set the host backdrop layer.
    pub fn host_backdrop(mut self, backdrop: BackdropConfig) -> Self {
        self.host_backdrop = backdrop;
        self
    }
}

type Factory<T, M> = Box<dyn Fn(Observable<bool>, TimerQueue) -> AlertOverlay<T, M>>;

/// Conditional-mount boundary keyed off a presented flag.
///
/// Carries no state beyond the flag, the mounted slot, and the policy; all
/// presentation behavior lives in the overlay itself.
pub struct AlertHost<T, M> {
    presented: Observable<bool>,
    timers: TimerQueue,
    factory: Factory<T, M>,
    overlay: Option<AlertOverlay<T, M>>,
    policy: MountPolicy,
}

impl<T, M> AlertHost<T, M> {
    /// Create a host around a factory that builds the overlay instance.
    ///
    /// The factory receives the host's flag cell and timer queue so the
    /// overlay writes its removal request back to the same flag.
    pub fn new(
        timers: TimerQueue,
        factory: impl Fn(Observable<bool>, TimerQueue) -> AlertOverlay<T, M> + 'static,
    ) -> Self {
        Self {
            presented: Observable::new(false),
            timers,
            factory: Box::new(factory),
            overlay: None,
            policy: MountPolicy::default(),
        }
    }

    /// Override the mount policy.
    pub fn policy(mut self, policy: MountPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The host-owned presented flag.
    pub fn presented(&self) -> &Observable<bool> {
        &self.presented
    }

    /// Raise the presented flag; the overlay mounts on the next `sync()`.
    pub fn present(&self) {
        self.presented.set(true);
    }

    /// Read-only view of the presented flag.
    pub fn visibility(&self) -> Binding<bool> {
        Binding::new(&self.presented)
    }

    /// The mounted overlay, if any.
    pub fn overlay(&self) -> Option<&AlertOverlay<T, M>> {
        self.overlay.as_ref()
    }

    /// Whether an overlay instance currently exists.
    pub fn is_mounted(&self) -> bool {
        self.overlay.is_some()
    }

    /// The active mount policy.
    pub fn mount_policy(&self) -> MountPolicy {
        self.policy
    }

    /// Reconcile the flag with the mounted instance. Called once per host
    /// update pass; cheap when nothing changed.
    ///
    /// A construction pass leaves the overlay `Hidden`; the following pass
    /// starts the entry transition. Dropping the flag while the overlay is
    /// still `Appearing` destroys the instance without an exit animation —
    /// that is the host's prerogative, and the overlay does not guard
    /// against it.
    pub fn sync(&mut self) {
        if self.presented.get() {
            match &self.overlay {
                None => {
                    trace!("alert mounted");
                    self.overlay =
                        Some((self.factory)(self.presented.clone(), self.timers.clone()));
                }
                Some(overlay) if overlay.phase() == OverlayPhase::Hidden => {
                    overlay.on_mount();
                }
                Some(_) => {}
            }
        } else if self.overlay.take().is_some() {
            trace!("alert unmounted");
        }
    }
}

impl<T, M> std::fmt::Debug for AlertHost<T, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertHost")
            .field("presented", &self.presented.get())
            .field("mounted", &self.overlay.is_some())
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alertkit_runtime::ManualClock;
    use crate::alert::DEFAULT_ANIMATION_DURATION;

    fn plain_host() -> (AlertHost<(), String>, TimerQueue, ManualClock) {
        let clock = ManualClock::new();
        let timers = TimerQueue::new(clock.clone());
        let host = AlertHost::new(timers.clone(), |presented, timers| {
            AlertOverlay::plain("Title", presented, "OK", || "Hi".to_string(), timers)
        });
        (host, timers, clock)
    }

    #[test]
    fn stays_unmounted_while_flag_down() {
        let (mut host, _timers, _clock) = plain_host();
        host.sync();
        host.sync();
        assert!(!host.is_mounted());
        assert!(!host.visibility().get());
    }

    #[test]
    fn mounts_hidden_then_appears_on_next_pass() {
        let (mut host, _timers, _clock) = plain_host();
        host.present();

        host.sync();
        assert_eq!(host.overlay().unwrap().phase(), OverlayPhase::Hidden);

        host.sync();
        assert_eq!(host.overlay().unwrap().phase(), OverlayPhase::Appearing);
    }

    #[test]
    fn dismissal_round_trip_unmounts_after_delay() {
        let (mut host, timers, clock) = plain_host();
        host.present();
        host.sync();
        host.sync();

        host.overlay().unwrap().confirm();
        assert_eq!(host.overlay().unwrap().phase(), OverlayPhase::Dismissing);
        assert!(host.presented().get());

        clock.advance(DEFAULT_ANIMATION_DURATION);
        timers.run_due();
        assert!(!host.presented().get());

        host.sync();
        assert!(!host.is_mounted());
    }

    #[test]
    fn host_may_drop_flag_mid_appearance() {
        let (mut host, timers, _clock) = plain_host();
        host.present();
        host.sync();
        host.sync();

        // Bypasses request_dismiss: no exit animation, instance just goes.
        host.presented().set(false);
        host.sync();
        assert!(!host.is_mounted());
        assert!(timers.is_empty());
    }

    #[test]
    fn unmount_cancels_pending_dismiss_timer() {
        let (mut host, timers, clock) = plain_host();
        host.present();
        host.sync();
        host.sync();
        host.overlay().unwrap().request_dismiss();
        assert_eq!(timers.len(), 1);

        host.presented().set(false);
        host.sync();
        assert!(timers.is_empty());

        clock.advance(DEFAULT_ANIMATION_DURATION);
        assert_eq!(timers.run_due(), 0);
    }

    #[test]
    fn remount_after_dismissal_gets_fresh_instance() {
        let (mut host, timers, clock) = plain_host();
        host.present();
        host.sync();
        host.sync();
        host.overlay().unwrap().request_dismiss();
        clock.advance(DEFAULT_ANIMATION_DURATION);
        timers.run_due();
        host.sync();
        assert!(!host.is_mounted());

        host.present();
        host.sync();
        assert_eq!(host.overlay().unwrap().phase(), OverlayPhase::Hidden);
        host.sync();
        assert_eq!(host.overlay().unwrap().phase(), OverlayPhase::Appearing);
    }

    #[test]
    fn default_policy_is_transparent_and_suppressed() {
        let (host, _timers, _clock) = plain_host();
        let policy = host.mount_policy();
        assert!(policy.suppress_mount_transition);
        assert_eq!(policy.host_backdrop.opacity, 0.0);
    }

    #[test]
    fn policy_override() {
        let (host, _timers, _clock) = plain_host();
        let host = host.policy(
            MountPolicy::default()
                .suppress_mount_transition(false)
                .host_backdrop(BackdropConfig::default()),
        );
        assert!(!host.mount_policy().suppress_mount_transition);
        assert!(host.mount_policy().host_backdrop.opacity > 0.0);
    }
}
