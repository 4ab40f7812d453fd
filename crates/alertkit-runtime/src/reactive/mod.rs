#![forbid(unsafe_code)]

//! Reactive cells for alertkit.
//!
//! [`Observable`] is the single shared-state primitive here: the host's
//! presented flag and the overlay's animation phase are both observables.
//! [`Subscription`] keeps a change callback attached for as long as it is
//! held, and [`Binding`] is the read-only face of a cell for code that must
//! never write it.
//!
//! All sharing is `Rc`-based and single-threaded. A cell notifies only on
//! effective changes: writing the value it already holds does nothing, and
//! detached subscribers are pruned lazily on the next notification. The
//! detailed cell semantics are documented on [`Observable`] itself.

pub mod binding;
pub mod observable;

pub use binding::Binding;
pub use observable::{Observable, Subscription};
