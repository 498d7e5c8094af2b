#![deny(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(clippy::missing_safety_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]

//! Runtime kernel for statically wired, type-directed in-process event
//! dispatch.
//!
//! A fixed set of receivers is declared at build time by the `wiring!` macro
//! from `hardwire-macros-rs`; the macro analyzes the declared topology and
//! generates a loop type whose routing is resolved entirely at compile time.
//! This crate supplies everything the generated code plugs into: the bounded
//! queues (local ring, lock-free inbox, mutex-guarded inbox, dual mailbox),
//! the dispatcher handle types, the shared-ownership wrapper, the polling
//! strategies that drive a loop thread, and the trait seams between the two
//! crates.

mod dispatch;
mod error;
mod host;
mod queue;
mod shared_loop;
mod strategy;
mod wiring;

pub use dispatch::{Emit, ExternalEmitter, LoopDispatcher, OnEvent, ThreadDispatcher};
pub use error::{EmitError, QueueFull};
pub use host::ThreadHost;
pub use parking_lot::MutexGuard;
pub use queue::{Mailbox, MpscInbox, RemoteQueue, RingBuffer, SpscInbox};
pub use shared_loop::SharedLoop;
pub use strategy::{Hybrid, Spin, Wait, Yield};
pub use wiring::{
  HasShared, InboxKind, Inspect, LocalRoute, LoopControl, Pollable, RegisteredProducer, RemoteRoute, SharedState, Wired,
};

/// Support surface for macro-generated code; not part of the public API.
#[doc(hidden)]
pub mod __private {
  pub use parking_lot;
  pub use tracing;
}
