use crate::wiring::Pollable;

/// Spin-then-park driver: polls non-blocking until `spin_limit` consecutive
/// polls come up empty, then parks once on the mailbox condition variable.
/// A successful dispatch resets the counter.
pub struct Hybrid<'a, L: Pollable> {
  event_loop:  &'a mut L,
  spin_limit:  usize,
  empty_polls: usize,
}

impl<'a, L: Pollable> Hybrid<'a, L> {
  /// Spin limit used by [`Hybrid::with_default_limit`].
  pub const DEFAULT_SPIN_LIMIT: usize = 1000;

  /// Binds the strategy to a loop with the given spin limit.
  #[must_use]
  pub fn new(event_loop: &'a mut L, spin_limit: usize) -> Self {
    Self { event_loop, spin_limit, empty_polls: 0 }
  }

  /// Binds the strategy to a loop with [`Hybrid::DEFAULT_SPIN_LIMIT`].
  #[must_use]
  pub fn with_default_limit(event_loop: &'a mut L) -> Self {
    Self::new(event_loop, Self::DEFAULT_SPIN_LIMIT)
  }

  /// Dispatches at most one event; parks after `spin_limit` consecutive
  /// empty polls. `true` when an event was dispatched.
  pub fn poll(&mut self) -> bool {
    if self.event_loop.poll_once() {
      self.empty_polls = 0;
      return true;
    }
    self.empty_polls += 1;
    if self.empty_polls <= self.spin_limit {
      return false;
    }
    self.empty_polls = 0;
    self.event_loop.poll_park()
  }

  /// Polls until the loop stops.
  pub fn run(&mut self) {
    while self.event_loop.is_running() {
      self.poll();
    }
  }

  /// Polls until the loop stops or `pred` returns `false`.
  pub fn run_while(&mut self, mut pred: impl FnMut() -> bool) {
    while self.event_loop.is_running() && pred() {
      self.poll();
    }
  }
}
