#![forbid(unsafe_code)]

//! Alert overlay: presentation state machine, host glue, and animations.
//!
//! # Lifecycle
//!
//! An overlay instance moves through three phases:
//!
//! ```text
//! Hidden ──on_mount()──► Appearing ──request_dismiss()──► Dismissing
//!                                                              │
//!                                        deferred presented.set(false)
//! ```
//!
//! `Hidden` exists for exactly one host update pass so the entry animation
//! has a rendered starting point. `Dismissing` is entered synchronously so a
//! renderer can start reversing the transition immediately; the host-owned
//! flag flips only after the animation duration, so the instance is not
//! destroyed mid-animation.
//!
//! # Payload duality
//!
//! [`AlertOverlay::plain`] builds an overlay whose action and content take
//! no arguments; [`AlertOverlay::presenting`] binds both to a typed payload
//! supplied at construction. Exactly one of the two shapes exists per
//! instance, by construction.

pub mod animation;
pub mod backdrop;
mod controller;
pub mod host;

pub use controller::{AlertOverlay, DEFAULT_ANIMATION_DURATION, OverlayPhase};
