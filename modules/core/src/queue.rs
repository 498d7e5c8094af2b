//! Bounded queues backing the dispatch paths: the loop-local ring, the two
//! inbox flavors selected per thread-hosted receiver, and the dual mailbox.

mod mailbox;
mod mpsc;
mod ring;
mod spsc;

pub use mailbox::{Mailbox, RemoteQueue};
pub use mpsc::MpscInbox;
pub use ring::RingBuffer;
pub use spsc::SpscInbox;
