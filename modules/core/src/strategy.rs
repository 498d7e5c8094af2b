//! Drivers for the loop thread.
//!
//! Each strategy borrows the loop mutably, exposes a single-step `poll`
//! returning whether an event was dispatched, and `run` / `run_while`
//! drivers that keep polling while the loop is running.

mod hybrid;
mod spin;
mod wait;
mod yielding;

pub use hybrid::Hybrid;
pub use spin::Spin;
pub use wait::Wait;
pub use yielding::Yield;
