use super::RingBuffer;

#[test]
fn fifo_ordering_is_preserved() {
  let mut ring: RingBuffer<u32, 8> = RingBuffer::new();
  ring.push(1).unwrap();
  ring.push(2).unwrap();
  ring.push(3).unwrap();

  assert_eq!(ring.try_pop(), Some(1));
  assert_eq!(ring.try_pop(), Some(2));
  assert_eq!(ring.try_pop(), Some(3));
  assert_eq!(ring.try_pop(), None);
}

#[test]
fn full_ring_rejects_and_returns_the_value() {
  let mut ring: RingBuffer<u32, 2> = RingBuffer::new();
  ring.push(1).unwrap();
  ring.push(2).unwrap();

  let rejected = ring.push(3).unwrap_err();
  assert_eq!(rejected.into_inner(), 3);
  assert_eq!(ring.len(), 2);
}

#[test]
fn len_tracks_push_and_pop_operations() {
  let mut ring: RingBuffer<u32, 4> = RingBuffer::new();
  assert!(ring.is_empty());
  assert_eq!(ring.capacity(), 4);

  ring.push(10).unwrap();
  ring.push(20).unwrap();
  assert_eq!(ring.len(), 2);

  ring.try_pop();
  assert_eq!(ring.len(), 1);
  ring.try_pop();
  assert!(ring.is_empty());
}

#[test]
fn indices_wrap_cleanly_past_capacity() {
  let mut ring: RingBuffer<usize, 4> = RingBuffer::new();
  for round in 0..64 {
    ring.push(round).unwrap();
    ring.push(round + 1000).unwrap();
    assert_eq!(ring.try_pop(), Some(round));
    assert_eq!(ring.try_pop(), Some(round + 1000));
  }
  assert!(ring.is_empty());
}
