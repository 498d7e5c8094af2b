#![deny(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]

//! Facade crate for the hardwire event-dispatch workspace.
//!
//! The runtime kernel lives in `hardwire-core-rs` and the `wiring!` macro in
//! `hardwire-macros-rs`; this crate re-exports both surfaces as a single
//! prelude. Code generated by [`wiring!`] refers to the kernel through
//! `::hardwire_core_rs` paths, so a crate that invokes the macro keeps a
//! direct dependency on `hardwire-core-rs` alongside this facade.

#[cfg(test)]
mod tests;

pub use hardwire_core_rs::*;
pub use hardwire_macros_rs::wiring;

/// Returns the semantic version of the workspace.
#[must_use]
pub const fn crate_version() -> &'static str {
  env!("CARGO_PKG_VERSION")
}
