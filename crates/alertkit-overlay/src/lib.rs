#![forbid(unsafe_code)]

//! Animated alert overlay controller.
//!
//! An [`AlertOverlay`] presents a title, a caller-supplied content body, and
//! a single confirming action over an existing view tree, animating in and
//! out without the caller managing timing. The host owns an
//! `Observable<bool>` "is presented" flag; [`AlertHost`] turns that flag
//! into mount/unmount of the overlay instance and the overlay requests its
//! own removal by writing `false` back after its exit animation has had time
//! to play.

pub mod alert;

pub use alert::animation::{Easing, Timeline};
pub use alert::backdrop::BackdropConfig;
pub use alert::host::{AlertHost, MountPolicy};
pub use alert::{AlertOverlay, DEFAULT_ANIMATION_DURATION, OverlayPhase};
