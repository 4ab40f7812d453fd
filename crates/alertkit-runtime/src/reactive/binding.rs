#![forbid(unsafe_code)]

//! Read-only views over [`Observable`] cells.
//!
//! The presented flag has exactly two writers — the host raises it, the
//! overlay's deferred timer lowers it. Everything else (render code, status
//! lines) should only ever read it. A [`Binding`] wraps a cell with the
//! setter left out, so a live read-only view can be handed across a seam
//! without granting mutation.

use super::observable::Observable;

/// Read-only handle to an [`Observable`] cell.
///
/// Reads always see the cell's current value. Clones share the source, and
/// the binding keeps the cell alive even after every writer is gone.
pub struct Binding<T> {
    source: Observable<T>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<T: std::fmt::Debug + Clone + PartialEq + 'static> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.get())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Binding<T> {
    /// Create a read-only view of `source`.
    pub fn new(source: &Observable<T>) -> Self {
        Self {
            source: source.clone(),
        }
    }

    /// Get a clone of the cell's current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.source.get()
    }

    /// Borrow the cell's current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.source.with(f)
    }
}
