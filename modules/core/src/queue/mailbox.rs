#[cfg(test)]
mod tests;

use core::sync::atomic::{AtomicBool, Ordering};
use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};

use crate::queue::ring::RingBuffer;

/// Cross-thread side of a loop mailbox.
///
/// Producers off the loop thread enqueue under the mutex and signal the
/// condition variable only when the consumer has parked; a spinning consumer
/// observes `has_remote` without taking the lock. `has_remote` is cleared
/// only once the queue fully drains into the local ring.
pub struct RemoteQueue<T> {
  queue:      Mutex<VecDeque<T>>,
  available:  Condvar,
  has_remote: AtomicBool,
  parked:     AtomicBool,
  stopped:    AtomicBool,
}

impl<T> RemoteQueue<T> {
  /// Creates an empty queue.
  #[must_use]
  pub fn new() -> Self {
    Self {
      queue:      Mutex::new(VecDeque::new()),
      available:  Condvar::new(),
      has_remote: AtomicBool::new(false),
      parked:     AtomicBool::new(false),
      stopped:    AtomicBool::new(false),
    }
  }

  /// Enqueues from off the loop thread, waking the consumer if it parked.
  pub fn push(&self, value: T) {
    let mut queue = self.queue.lock();
    queue.push_back(value);
    drop(queue);
    self.has_remote.store(true, Ordering::Release);
    if self.parked.load(Ordering::Acquire) {
      self.available.notify_one();
    }
  }

  /// Moves queued elements into `local` until it fills or the queue drains.
  /// A remainder stays queued with `has_remote` still set.
  pub fn drain_into<const CAP: usize>(&self, local: &mut RingBuffer<T, CAP>) {
    if !self.has_remote.load(Ordering::Acquire) {
      return;
    }
    let mut queue = self.queue.lock();
    while let Some(value) = queue.pop_front() {
      if let Err(rejected) = local.push(value) {
        queue.push_front(rejected.into_inner());
        return;
      }
    }
    self.has_remote.store(false, Ordering::Release);
  }

  /// Parks the loop thread until an element arrives or the queue stops,
  /// then drains into `local`. Returns `false` when woken by stop with
  /// nothing queued.
  pub fn park_and_drain<const CAP: usize>(&self, local: &mut RingBuffer<T, CAP>) -> bool {
    let mut queue = self.queue.lock();
    self.parked.store(true, Ordering::Release);
    while queue.is_empty() && !self.stopped.load(Ordering::Acquire) {
      self.available.wait(&mut queue);
    }
    self.parked.store(false, Ordering::Release);
    if queue.is_empty() {
      return false;
    }
    while let Some(value) = queue.pop_front() {
      if let Err(rejected) = local.push(value) {
        queue.push_front(rejected.into_inner());
        return true;
      }
    }
    self.has_remote.store(false, Ordering::Release);
    true
  }

  /// Signals the queue to stop and wakes a parked consumer. Idempotent.
  pub fn stop(&self) {
    let queue = self.queue.lock();
    self.stopped.store(true, Ordering::Release);
    drop(queue);
    self.available.notify_all();
  }

  /// Re-arms the queue after a stop.
  pub fn clear_stop(&self) {
    self.stopped.store(false, Ordering::Release);
  }

  /// Whether [`RemoteQueue::stop`] has been called since the last re-arm.
  #[must_use]
  pub fn is_stopped(&self) -> bool {
    self.stopped.load(Ordering::Acquire)
  }

  /// Whether undrained remote elements may be queued.
  #[must_use]
  pub fn has_remote(&self) -> bool {
    self.has_remote.load(Ordering::Acquire)
  }

  /// Number of queued elements.
  #[must_use]
  pub fn len(&self) -> usize {
    self.queue.lock().len()
  }

  /// Whether the queue holds no elements.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl<T> Default for RemoteQueue<T> {
  fn default() -> Self {
    Self::new()
  }
}

/// Borrowed dual-queue view a loop drives for one poll step.
///
/// The local ring belongs to the loop value and is touched only by the loop
/// thread; the remote queue is shared. Pops come from the local ring first;
/// when it runs dry the remote side is bulk-drained under one lock.
pub struct Mailbox<'a, T, const CAP: usize> {
  local:  &'a mut RingBuffer<T, CAP>,
  remote: &'a RemoteQueue<T>,
}

impl<'a, T, const CAP: usize> Mailbox<'a, T, CAP> {
  /// Binds the two mailbox sides for one poll step.
  #[must_use]
  pub fn new(local: &'a mut RingBuffer<T, CAP>, remote: &'a RemoteQueue<T>) -> Self {
    Self { local, remote }
  }

  /// Pops the next event, draining the remote side when the local ring runs
  /// dry. Returns `None` when both sides are empty.
  pub fn try_pop(&mut self) -> Option<T> {
    if let Some(value) = self.local.try_pop() {
      return Some(value);
    }
    self.remote.drain_into(self.local);
    self.local.try_pop()
  }

  /// Like [`Mailbox::try_pop`], but parks on the remote side when idle.
  /// Returns `None` only after the mailbox has been stopped.
  pub fn wait_pop(&mut self) -> Option<T> {
    if let Some(value) = self.try_pop() {
      return Some(value);
    }
    loop {
      if !self.remote.park_and_drain(self.local) {
        return None;
      }
      if let Some(value) = self.local.try_pop() {
        return Some(value);
      }
    }
  }
}
