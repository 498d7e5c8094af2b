
use core::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::{error::QueueFull, queue::ring::RingBuffer};

/// Pause hints issued per empty spin iteration before rechecking.
const SPIN_PAUSES: usize = 32;

/// Mutex-guarded bounded inbox for thread-hosted receivers with several
/// producing peers.
///
/// An atomic has-data flag mirrors "non-empty" so consumers can skip the
/// mutex when the inbox is trivially empty; the flag is cleared under the
/// mutex when a pop drains the last element. Blocking pops spin on the flag
/// with batched pause hints rather than parking.
pub struct MpscInbox<T, const CAP: usize> {
  ring:     Mutex<RingBuffer<T, CAP>>,
  has_data: AtomicBool,
  stopped:  AtomicBool,
}

impl<T, const CAP: usize> MpscInbox<T, CAP> {
  /// Creates an empty inbox.
  #[must_use]
  pub fn new() -> Self {
    Self { ring: Mutex::new(RingBuffer::new()), has_data: AtomicBool::new(false), stopped: AtomicBool::new(false) }
  }

  /// Appends `value` at the tail.
  ///
  /// # Errors
  ///
  /// Returns the value inside [`QueueFull`] when the inbox already holds
  /// `CAP` elements.
  pub fn push(&self, value: T) -> Result<(), QueueFull<T>> {
    let mut ring = self.ring.lock();
    ring.push(value)?;
    self.has_data.store(true, Ordering::Release);
    Ok(())
  }

  /// Removes and returns the oldest element, or `None` when empty. Exits
  /// without locking when the has-data hint is clear.
  pub fn try_pop(&self) -> Option<T> {
    if !self.has_data.load(Ordering::Acquire) {
      return None;
    }
    let mut ring = self.ring.lock();
    let value = ring.try_pop();
    if ring.is_empty() {
      self.has_data.store(false, Ordering::Release);
    }
    value
  }

  /// Busy-waits on the has-data hint for the next element. Returns `None`
  /// once the inbox is stopped and drained.
  pub fn pop_spin(&self) -> Option<T> {
    loop {
      if let Some(value) = self.try_pop() {
        return Some(value);
      }
      if self.stopped.load(Ordering::Acquire) {
        return self.try_pop();
      }
      for _ in 0..SPIN_PAUSES {
        core::hint::spin_loop();
      }
    }
  }

  /// Signals any spinning consumer to finish. Idempotent.
  pub fn stop(&self) {
    self.stopped.store(true, Ordering::Release);
  }

  /// Re-arms the inbox after a stop so a relaunched consumer can block again.
  pub fn clear_stop(&self) {
    self.stopped.store(false, Ordering::Release);
  }

  /// Whether [`MpscInbox::stop`] has been called since the last re-arm.
  #[must_use]
  pub fn is_stopped(&self) -> bool {
    self.stopped.load(Ordering::Acquire)
  }

  /// Number of queued elements.
  #[must_use]
  pub fn len(&self) -> usize {
    self.ring.lock().len()
  }

  /// Whether the inbox holds no elements.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Fixed capacity.
  #[must_use]
  pub const fn capacity(&self) -> usize {
    CAP
  }
}

impl<T, const CAP: usize> Default for MpscInbox<T, CAP> {
  fn default() -> Self {
    Self::new()
  }
}
