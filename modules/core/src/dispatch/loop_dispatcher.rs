use core::marker::PhantomData;

use crate::wiring::Wired;

/// Emit handle passed to loop-hosted receivers.
///
/// Borrows the loop's local mailbox ring mutably for the duration of one
/// dispatch, so loop-origin emits take the synchronization-free path. `O`
/// is the owning receiver type; the `wiring!` macro implements
/// [`Emit`](crate::Emit) on this handle for exactly the events `O`
/// declared.
pub struct LoopDispatcher<'a, O, C: Wired> {
  local:  &'a mut C::Local,
  shared: &'a C,
  _owner: PhantomData<O>,
}

impl<'a, O, C: Wired> LoopDispatcher<'a, O, C> {
  /// Binds a dispatcher to the loop's mailbox for one dispatch.
  #[must_use]
  pub fn new(local: &'a mut C::Local, shared: &'a C) -> Self {
    Self { local, shared, _owner: PhantomData }
  }

  /// Splits the handle into its routing parts.
  #[doc(hidden)]
  pub fn parts(&mut self) -> (&mut C::Local, &C) {
    (&mut *self.local, self.shared)
  }
}
