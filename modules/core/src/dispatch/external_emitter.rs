use core::marker::PhantomData;
use std::sync::Weak;

use crate::{error::EmitError, wiring::RemoteRoute};

/// Weak emit handle for a declared external producer.
///
/// Holds a weak reference to the loop's shared state and upgrades it for
/// the duration of a single emit. Once the loop is destroyed the handle
/// reports invalid and every emit fails with [`EmitError::Closed`] instead
/// of touching freed state.
pub struct ExternalEmitter<P, C> {
  shared:    Weak<C>,
  _producer: PhantomData<P>,
}

impl<P, C> ExternalEmitter<P, C> {
  /// Binds a handle to a loop's shared state.
  #[must_use]
  pub fn new(shared: Weak<C>) -> Self {
    Self { shared, _producer: PhantomData }
  }

  /// `true` while the loop behind this handle is alive.
  #[must_use]
  pub fn is_valid(&self) -> bool {
    self.shared.strong_count() > 0
  }

  /// Routes through the loop if it is still alive.
  ///
  /// # Errors
  ///
  /// Returns [`EmitError::Closed`] when the loop has been destroyed, and
  /// forwards any routing failure otherwise.
  #[doc(hidden)]
  pub fn emit_via<E>(&self, event: E) -> Result<(), EmitError>
  where
    C: RemoteRoute<E>,
  {
    match self.shared.upgrade() {
      | Some(shared) => shared.route_remote(event),
      | None => Err(EmitError::Closed),
    }
  }
}

impl<P, C> Clone for ExternalEmitter<P, C> {
  fn clone(&self) -> Self {
    Self { shared: self.shared.clone(), _producer: PhantomData }
  }
}
