use crate::wiring::Pollable;

/// Parking driver: blocks on the mailbox condition variable when idle.
/// Zero CPU while idle, woken by the first remote event or by stop.
pub struct Wait<'a, L: Pollable> {
  event_loop: &'a mut L,
}

impl<'a, L: Pollable> Wait<'a, L> {
  /// Binds the strategy to a loop.
  #[must_use]
  pub fn new(event_loop: &'a mut L) -> Self {
    Self { event_loop }
  }

  /// Dispatches the next event, parking until one arrives; `false` only
  /// once the loop has stopped.
  pub fn poll(&mut self) -> bool {
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
