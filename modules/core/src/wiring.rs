//! Trait seams between the runtime kernel and macro-generated loop types.
//!
//! The `wiring!` macro implements these traits on the types it generates;
//! the kernel's handles, strategies and the shared-ownership wrapper are
//! generic over them.

use core::ops::Deref;
use std::sync::Arc;

use crate::error::EmitError;

/// Associated types a generated shared-state type exposes to the handle
/// machinery.
pub trait Wired {
  /// Local mailbox ring owned by the loop value.
  type Local;
}

/// Loop-origin routing for one event type: push to the local mailbox side
/// if any loop-hosted receiver consumes it, push to each consuming
/// thread-hosted inbox.
pub trait LocalRoute<E>: Wired {
  /// Routes `event` from the loop thread to every consumer.
  ///
  /// # Errors
  ///
  /// Returns [`EmitError::Full`] when a destination rejected the event;
  /// deliveries to the remaining destinations stand.
  fn route_local(&self, local: &mut Self::Local, event: E) -> Result<(), EmitError>;
}

/// Cross-thread routing for one event type: push to the remote mailbox side
/// if any loop-hosted receiver consumes it, push to each consuming
/// thread-hosted inbox.
pub trait RemoteRoute<E> {
  /// Routes `event` from off the loop thread to every consumer.
  ///
  /// # Errors
  ///
  /// Returns [`EmitError::Full`] when a destination rejected the event;
  /// deliveries to the remaining destinations stand.
  fn route_remote(&self, event: E) -> Result<(), EmitError>;
}

/// Run-state surface of a generated shared-state type.
pub trait SharedState {
  /// Whether the owning loop is between `start` and `stop`.
  fn is_running(&self) -> bool;
  /// Clears the running flag and wakes a parked loop driver, without
  /// touching the workers. A full `stop` still joins them afterwards.
  fn request_stop(&self);
}

/// Marker implemented by a generated shared-state type for each external
/// producer registered with the loop. An emitter request for an
/// unregistered producer fails this bound at compile time.
pub trait RegisteredProducer<P> {}

/// Access to the shared-state `Arc` of a generated loop.
pub trait HasShared {
  /// The generated shared-state type.
  type Shared;
  /// Borrows the loop's shared-state handle.
  fn shared(&self) -> &Arc<Self::Shared>;
}

/// Start/stop surface of a generated loop.
pub trait LoopControl {
  /// Launches the thread-hosted workers in declaration order. Idempotent.
  ///
  /// # Errors
  ///
  /// Propagates the OS error when a worker thread cannot be spawned;
  /// workers launched before the failure keep running.
  fn start(&mut self) -> std::io::Result<()>;
  /// Stops the mailbox and every inbox, then joins the workers in
  /// declaration order. Idempotent.
  fn stop(&mut self);
  /// Whether the loop is between `start` and `stop`.
  fn is_running(&self) -> bool;
}

/// Single-step polling surface driven by the strategies.
pub trait Pollable {
  /// Dispatches at most one mailbox event; `true` when one was dispatched.
  fn poll_once(&mut self) -> bool;
  /// Like [`Pollable::poll_once`], but parks when idle; `false` only once
  /// the mailbox has been stopped.
  fn poll_park(&mut self) -> bool;
  /// Whether the loop is between `start` and `stop`.
  fn is_running(&self) -> bool;
}

/// Typed access to a live receiver for tests and inspection.
pub trait Inspect<R> {
  /// Borrow shape: a plain reference for loop-hosted receivers, a mutex
  /// guard for thread-hosted ones.
  type Handle<'a>: Deref<Target = R>
  where
    Self: 'a;

  /// Borrows the hosted receiver.
  fn inspect(&self) -> Self::Handle<'_>;
}

/// Inbox implementation selected for a thread-hosted receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboxKind {
  /// Lock-free inbox; the topology proved at most one producing peer.
  SingleProducer,
  /// Mutex-guarded inbox; the topology found several producing peers.
  MultiProducer,
}
