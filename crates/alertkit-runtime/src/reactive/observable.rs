#![forbid(unsafe_code)]

//! Shared, version-tracked value cell with change notification.

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Holds a subscriber callback alive. Stored strongly by [`Subscription`],
/// weakly by the observable, so dropping the subscription detaches it.
struct Slot<T> {
    callback: Box<dyn Fn(&T)>,
}

struct Inner<T> {
    value: T,
    version: u64,
    subscribers: Vec<Weak<Slot<T>>>,
}

/// A shared, observable value.
///
/// Clones share the same underlying cell. `set` with an unchanged value is a
/// no-op: no version bump, no notifications.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Mutation counter. Starts at 0 and increments on every effective `set`.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Set a new value, notifying subscribers if it differs from the current
    /// one.
    ///
    /// The cell's borrow is released before callbacks run, so subscribers may
    /// read (or set) the observable reentrantly.
    pub fn set(&self, value: T) {
        let live = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value.clone();
            inner.version += 1;
            inner.subscribers.retain(|slot| slot.strong_count() > 0);
            inner
                .subscribers
                .iter()
                .filter_map(Weak::upgrade)
                .collect::<Vec<_>>()
        };
        for slot in live {
            (slot.callback)(&value);
        }
    }

    /// Subscribe to value changes. The callback fires after every effective
    /// `set`, in registration order, until the returned guard is dropped.
    #[must_use]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let slot = Rc::new(Slot {
            callback: Box::new(callback),
        });
        self.inner.borrow_mut().subscribers.push(Rc::downgrade(&slot));
        Subscription { _slot: slot }
    }

    /// Number of currently attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|slot| slot.strong_count() > 0)
            .count()
    }
}

/// RAII subscription guard. Dropping it detaches the callback; the
/// observable prunes the dead entry lazily on the next notification.
pub struct Subscription {
    _slot: Rc<dyn Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn get_returns_initial_value() {
        let obs = Observable::new(7);
        assert_eq!(obs.get(), 7);
        assert_eq!(obs.version(), 0);
    }

    #[test]
    fn set_updates_value_and_version() {
        let obs = Observable::new(1);
        obs.set(2);
        assert_eq!(obs.get(), 2);
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn set_equal_value_is_noop() {
        let obs = Observable::new(5);
        let fired = Rc::new(Cell::new(0));
        let f = Rc::clone(&fired);
        let _sub = obs.subscribe(move |_| f.set(f.get() + 1));

        obs.set(5);
        assert_eq!(obs.version(), 0);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn subscribers_notified_with_new_value() {
        let obs = Observable::new(0);
        let seen = Rc::new(Cell::new(0));
        let s = Rc::clone(&seen);
        let _sub = obs.subscribe(move |v| s.set(*v));

        obs.set(42);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn subscribers_notified_in_registration_order() {
        let obs = Observable::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));

        let o1 = Rc::clone(&order);
        let _sub1 = obs.subscribe(move |_| o1.borrow_mut().push(1));
        let o2 = Rc::clone(&order);
        let _sub2 = obs.subscribe(move |_| o2.borrow_mut().push(2));

        obs.set(1);
        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn dropped_subscription_stops_notifications() {
        let obs = Observable::new(0);
        let fired = Rc::new(Cell::new(0));
        let f = Rc::clone(&fired);
        let sub = obs.subscribe(move |_| f.set(f.get() + 1));

        obs.set(1);
        assert_eq!(fired.get(), 1);

        drop(sub);
        obs.set(2);
        assert_eq!(fired.get(), 1);
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[test]
    fn clones_share_state() {
        let a = Observable::new(String::from("x"));
        let b = a.clone();
        b.set(String::from("y"));
        assert_eq!(a.get(), "y");
        assert_eq!(a.version(), b.version());
    }

    #[test]
    fn reentrant_read_inside_callback() {
        let obs = Observable::new(0);
        let seen = Rc::new(Cell::new(0));
        let s = Rc::clone(&seen);
        let o = obs.clone();
        let _sub = obs.subscribe(move |_| s.set(o.get()));

        obs.set(9);
        assert_eq!(seen.get(), 9);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn version_counts_effective_sets(values in proptest::collection::vec(0i32..4, 0..50)) {
                let obs = Observable::new(0);
                let mut expected_version = 0u64;
                let mut current = 0;
                for v in values {
                    if v != current {
                        expected_version += 1;
                        current = v;
                    }
                    obs.set(v);
                }
                prop_assert_eq!(obs.version(), expected_version);
                prop_assert_eq!(obs.get(), current);
            }
        }
    }
}
