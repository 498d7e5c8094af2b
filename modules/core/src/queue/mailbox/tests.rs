use std::{sync::Arc, thread, time::Duration};

use super::{Mailbox, RemoteQueue};
use crate::queue::ring::RingBuffer;

#[test]
fn local_side_is_popped_before_the_remote_side() {
  let mut local: RingBuffer<u32, 8> = RingBuffer::new();
  let remote: RemoteQueue<u32> = RemoteQueue::new();

  local.push(1).unwrap();
  remote.push(2);

  let mut mailbox = Mailbox::new(&mut local, &remote);
  assert_eq!(mailbox.try_pop(), Some(1));
  assert_eq!(mailbox.try_pop(), Some(2));
  assert_eq!(mailbox.try_pop(), None);
}

#[test]
fn remote_drain_preserves_order() {
  let mut local: RingBuffer<u32, 8> = RingBuffer::new();
  let remote: RemoteQueue<u32> = RemoteQueue::new();
  for value in 1..=5 {
    remote.push(value);
  }

  let mut mailbox = Mailbox::new(&mut local, &remote);
  for value in 1..=5 {
    assert_eq!(mailbox.try_pop(), Some(value));
  }
  assert_eq!(mailbox.try_pop(), None);
  assert!(!remote.has_remote());
}

#[test]
fn drain_leaves_a_remainder_when_the_local_ring_fills() {
  let mut local: RingBuffer<u32, 2> = RingBuffer::new();
  let remote: RemoteQueue<u32> = RemoteQueue::new();
  for value in 1..=5 {
    remote.push(value);
  }

  remote.drain_into(&mut local);
  assert_eq!(local.len(), 2);
  assert_eq!(remote.len(), 3);
  assert!(remote.has_remote());

  // Repeated polling still surfaces every element in order.
  let mut mailbox = Mailbox::new(&mut local, &remote);
  for value in 1..=5 {
    assert_eq!(mailbox.try_pop(), Some(value));
  }
  assert_eq!(mailbox.try_pop(), None);
  assert!(!remote.has_remote());
}

#[test]
fn wait_pop_wakes_on_a_remote_push() {
  let remote: Arc<RemoteQueue<u32>> = Arc::new(RemoteQueue::new());
  let consumer = {
    let remote = Arc::clone(&remote);
    thread::spawn(move || {
      let mut local: RingBuffer<u32, 8> = RingBuffer::new();
      Mailbox::new(&mut local, &remote).wait_pop()
    })
  };

  thread::sleep(Duration::from_millis(10));
  remote.push(42);
  assert_eq!(consumer.join().unwrap(), Some(42));
}

#[test]
fn wait_pop_returns_none_once_stopped() {
  let remote: Arc<RemoteQueue<u32>> = Arc::new(RemoteQueue::new());
  let consumer = {
    let remote = Arc::clone(&remote);
    thread::spawn(move || {
      let mut local: RingBuffer<u32, 8> = RingBuffer::new();
      Mailbox::new(&mut local, &remote).wait_pop()
    })
  };

  thread::sleep(Duration::from_millis(10));
  remote.stop();
  assert_eq!(consumer.join().unwrap(), None);
}

#[test]
fn stop_before_wait_returns_immediately() {
  let mut local: RingBuffer<u32, 8> = RingBuffer::new();
  let remote: RemoteQueue<u32> = RemoteQueue::new();
  remote.stop();
  assert!(remote.is_stopped());

  assert_eq!(Mailbox::new(&mut local, &remote).wait_pop(), None);
  remote.clear_stop();
  assert!(!remote.is_stopped());
}

#[test]
fn queued_elements_win_over_a_pending_stop() {
  let mut local: RingBuffer<u32, 8> = RingBuffer::new();
  let remote: RemoteQueue<u32> = RemoteQueue::new();
  remote.push(9);
  remote.stop();

  assert_eq!(Mailbox::new(&mut local, &remote).wait_pop(), Some(9));
}
