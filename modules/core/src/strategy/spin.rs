use crate::wiring::Pollable;

/// Non-blocking driver: polls as fast as the loop allows, burning CPU when
/// idle. Lowest latency of the four strategies.
pub struct Spin<'a, L: Pollable> {
  event_loop: &'a mut L,
}

impl<'a, L: Pollable> Spin<'a, L> {
  /// Binds the strategy to a loop.
  #[must_use]
  pub fn new(event_loop: &'a mut L) -> Self {
    Self { event_loop }
  }

  /// Dispatches at most one event; `true` when one was dispatched.
  pub fn poll(&mut self) -> bool {
    self.event_loop.poll_once()
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
