//! Shared ownership of a wired loop.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
  dispatch::{Emit, ExternalEmitter},
  error::EmitError,
  wiring::{HasShared, LoopControl, RegisteredProducer, RemoteRoute, SharedState},
};

/// Copyable shared-ownership handle to a wired loop.
///
/// Cloning shares the loop. When the last clone drops, the loop's `Drop`
/// stops it and the shared state's strong count reaches zero, so every
/// outstanding [`ExternalEmitter`] observes the loss. Emits through this
/// handle take the cross-thread path and do not contend with a driver
/// holding the loop via [`SharedLoop::with`].
pub struct SharedLoop<L: HasShared> {
  inner:  Arc<Mutex<L>>,
  shared: Arc<L::Shared>,
}

impl<L: HasShared> SharedLoop<L> {
  /// Wraps a loop into shared ownership.
  #[must_use]
  pub fn new(inner: L) -> Self {
    let shared = Arc::clone(inner.shared());
    Self { inner: Arc::new(Mutex::new(inner)), shared }
  }

  /// Runs `f` with exclusive access to the wrapped loop, e.g. to drive a
  /// polling strategy.
  pub fn with<T>(&self, f: impl FnOnce(&mut L) -> T) -> T {
    let mut inner = self.inner.lock();
    f(&mut *inner)
  }

  /// Returns a weak emit handle for the registered external producer `P`.
  ///
  /// The handle stays safe to use after every [`SharedLoop`] clone has
  /// dropped; it then reports invalid and rejects emits.
  #[must_use]
  pub fn emitter<P>(&self) -> ExternalEmitter<P, L::Shared>
  where
    L::Shared: RegisteredProducer<P>,
  {
    ExternalEmitter::new(Arc::downgrade(&self.shared))
  }
}

impl<L: HasShared + LoopControl> SharedLoop<L>
where
  L::Shared: SharedState,
{
  /// Starts the wrapped loop.
  ///
  /// # Errors
  ///
  /// Propagates the OS error when a worker thread cannot be spawned.
  pub fn start(&self) -> std::io::Result<()> {
    self.inner.lock().start()
  }

  /// Stops the wrapped loop.
  ///
  /// The running flag is cleared and a parked driver woken before the loop
  /// mutex is taken, so a driver blocked inside [`SharedLoop::with`]
  /// unwinds its run loop and releases the lock first.
  pub fn stop(&self) {
    self.shared.request_stop();
    self.inner.lock().stop();
  }
}

impl<L: HasShared> SharedLoop<L>
where
  L::Shared: SharedState,
{
  /// Whether the wrapped loop is running. Lock-free.
  #[must_use]
  pub fn is_running(&self) -> bool {
    self.shared.is_running()
  }
}

impl<L: HasShared> Clone for SharedLoop<L> {
  fn clone(&self) -> Self {
    Self { inner: Arc::clone(&self.inner), shared: Arc::clone(&self.shared) }
  }
}

impl<L: HasShared, E> Emit<E> for SharedLoop<L>
where
  L::Shared: RemoteRoute<E>,
{
  fn emit(&mut self, event: E) -> Result<(), EmitError> {
    self.shared.route_remote(event)
  }
}
