//! Worker-side hosting for thread-hosted receivers.

use std::{sync::Arc, thread::JoinHandle};

use parking_lot::{Mutex, MutexGuard};

/// Owns a thread-hosted receiver and its worker thread.
///
/// The receiver sits behind a mutex the worker locks once per dispatched
/// event; inspection from the loop side is therefore uncontended whenever
/// the worker is idle. The inbox the worker drains lives in the loop's
/// shared state, not here.
pub struct ThreadHost<R> {
  receiver: Arc<Mutex<R>>,
  worker:   Option<JoinHandle<()>>,
}

impl<R> ThreadHost<R> {
  /// Hosts `receiver` with no worker attached yet.
  #[must_use]
  pub fn new(receiver: R) -> Self {
    Self { receiver: Arc::new(Mutex::new(receiver)), worker: None }
  }

  /// Shared handle to the hosted receiver for a worker thread.
  #[must_use]
  pub fn receiver(&self) -> Arc<Mutex<R>> {
    Arc::clone(&self.receiver)
  }

  /// Locks the hosted receiver for inspection.
  pub fn lock(&self) -> MutexGuard<'_, R> {
    self.receiver.lock()
  }

  /// Records the spawned worker so `join` can collect it.
  pub fn attach(&mut self, worker: JoinHandle<()>) {
    self.worker = Some(worker);
  }

  /// Joins the worker if one is attached.
  pub fn join(&mut self) {
    if let Some(worker) = self.worker.take() {
      if worker.join().is_err() {
        tracing::error!("worker thread panicked");
      }
    }
  }
}
