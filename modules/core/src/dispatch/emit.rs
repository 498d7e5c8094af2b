use crate::error::EmitError;

/// Emit facade constrained to the owner's declared emit set.
///
/// The `wiring!` macro implements this trait on a handle for exactly the
/// event types the handle's owner declared; emitting anything else is a
/// missing-impl compile error rather than a runtime check.
pub trait Emit<E> {
  /// Routes one event to every consumer the topology derived for it.
  ///
  /// # Errors
  ///
  /// Returns [`EmitError::Full`] when a bounded destination rejected the
  /// event, and [`EmitError::Closed`] when the loop behind a weak handle is
  /// gone.
  fn emit(&mut self, event: E) -> Result<(), EmitError>;
}
