//! Errors surfaced by emit operations and bounded queues.

use core::fmt;

use thiserror::Error;

/// Failure reported by an emit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmitError {
  /// At least one destination queue was full; delivery to that destination
  /// was dropped, deliveries to the remaining destinations stand.
  #[error("a destination queue was full")]
  Full,
  /// The loop behind this handle has been destroyed.
  #[error("the event loop is gone")]
  Closed,
}

/// Error returned when a bounded queue rejects an element because it is
/// full. Carries the rejected element back to the caller.
pub struct QueueFull<T>(pub T);

impl<T> QueueFull<T> {
  /// Consumes the error and returns the rejected element.
  pub fn into_inner(self) -> T {
    self.0
  }
}

impl<T> fmt::Debug for QueueFull<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("QueueFull").finish()
  }
}
