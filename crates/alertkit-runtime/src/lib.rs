#![forbid(unsafe_code)]

//! Single-threaded reactive cells and deterministic timers for alertkit.
//!
//! This crate is the substrate the overlay controller is built on:
//!
//! - [`reactive::Observable`]: a shared, version-tracked value cell with
//!   change notification. The host-owned "is presented" flag is an
//!   `Observable<bool>`.
//! - [`reactive::Binding`]: the read-only face of a cell, for code that
//!   must never write it.
//! - [`time::Clock`]: injectable time source. [`time::MonotonicClock`] reads
//!   the platform clock (via `web-time`, so wasm targets work);
//!   [`time::ManualClock`] is advanced explicitly for deterministic tests
//!   and replay.
//! - [`timer::TimerQueue`]: explicit, cancellable deferred callbacks, pumped
//!   by the host once per update pass.
//!
//! Everything here assumes a single UI thread; sharing is `Rc`-based and
//! nothing is `Send`.

pub mod reactive;
pub mod time;
pub mod timer;

pub use reactive::{Binding, Observable, Subscription};
pub use time::{Clock, ManualClock, MonotonicClock};
pub use timer::{TimerHandle, TimerQueue};
