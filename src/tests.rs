use super::crate_version;

#[test]
fn crate_version_matches_manifest() {
  assert_eq!(crate_version(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn reexported_ring_is_usable() {
  let mut ring: crate::RingBuffer<u32, 4> = crate::RingBuffer::new();
  ring.push(7).unwrap();
  assert_eq!(ring.try_pop(), Some(7));
}
