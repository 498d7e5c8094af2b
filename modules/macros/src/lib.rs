#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]

//! Build-time wiring for the hardwire event dispatcher.
//!
//! The [`wiring!`] macro takes the declared receiver and producer set,
//! analyzes the topology during expansion, and generates a loop type whose
//! routing, envelope enums, and inbox selection are fixed at compile time.

mod expand;
mod parse;
mod topology;

use proc_macro::TokenStream;
use syn::parse_macro_input;

use crate::parse::LoopDef;

/// Declares a statically wired event loop.
///
/// Each `receiver` names a field, its type, the event types it consumes
/// (`receives`), the event types it may produce (`emits`), and whether it
/// runs on the loop thread (`mode: loop`, the default) or on a dedicated
/// thread (`mode: thread`). Each `producer` declares an external emitter
/// with an `emits` set and no `receives`. Capacities are compile-time
/// powers of two: `mailbox_capacity` for the loop mailbox, `inbox_capacity`
/// per thread-hosted receiver.
///
/// ```ignore
/// hardwire_macros_rs::wiring! {
///   pub loop SensorLoop {
///     receiver window: Window {
///       receives: [Sample],
///       emits: [Alarm],
///     },
///     receiver siren: Siren {
///       mode: thread,
///       receives: [Alarm],
///     },
///     producer probe: Probe {
///       emits: [Sample],
///     },
///   }
/// }
/// ```
///
/// Receiver behavior is supplied by implementing
/// `hardwire_core_rs::OnEvent<Event, Dispatcher>` for every declared
/// received event, with the dispatcher alias the macro generates for the
/// receiver (here `SensorLoopWindowDispatcher` and
/// `SensorLoopSirenDispatcher`). Wiring mistakes — a received event without
/// an `on_event`, an emit outside the declared set, a duplicate receiver
/// type, an emitter request for an unregistered producer — surface as
/// compile errors.
#[proc_macro]
pub fn wiring(input: TokenStream) -> TokenStream {
  let def = parse_macro_input!(input as LoopDef);
  expand::expand(&def).unwrap_or_else(syn::Error::into_compile_error).into()
}
