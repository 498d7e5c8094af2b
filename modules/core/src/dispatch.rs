//! Emit facades: the behavior trait receivers implement and the three
//! handle shapes emits travel through.

mod emit;
mod external_emitter;
mod loop_dispatcher;
mod on_event;
mod thread_dispatcher;

pub use emit::Emit;
pub use external_emitter::ExternalEmitter;
pub use loop_dispatcher::LoopDispatcher;
pub use on_event::OnEvent;
pub use thread_dispatcher::ThreadDispatcher;
