use core::marker::PhantomData;

/// Emit handle passed to thread-hosted receivers.
///
/// Emits from a worker thread always take the cross-thread path: the
/// remote mailbox side for loop-hosted consumers, a direct inbox push for
/// thread-hosted ones. `O` is the owning receiver type; the `wiring!`
/// macro implements [`Emit`](crate::Emit) on this handle for exactly the
/// events `O` declared.
pub struct ThreadDispatcher<'a, O, C> {
  shared: &'a C,
  _owner: PhantomData<O>,
}

impl<'a, O, C> ThreadDispatcher<'a, O, C> {
  /// Binds a dispatcher to the loop's shared state.
  #[must_use]
  pub fn new(shared: &'a C) -> Self {
    Self { shared, _owner: PhantomData }
  }

  /// The shared state this handle routes through.
  #[doc(hidden)]
  #[must_use]
  pub fn shared(&self) -> &C {
    self.shared
  }
}
