use crate::wiring::Pollable;

/// Cooperative driver: yields the thread to the OS whenever a poll comes up
/// empty. Trades latency for CPU time on busy hosts.
pub struct Yield<'a, L: Pollable> {
  event_loop: &'a mut L,
}

impl<'a, L: Pollable> Yield<'a, L> {
  /// Binds the strategy to a loop.
  #[must_use]
  pub fn new(event_loop: &'a mut L) -> Self {
    Self { event_loop }
  }

  /// Dispatches at most one event, yielding on an empty poll; `true` when
  /// one was dispatched.
  pub fn poll(&mut self) -> bool {
    let dispatched = self.event_loop.poll_once();
    if !dispatched {
      std::thread::yield_now();
    }
    dispatched
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
