/// Behavior a receiver supplies for one declared received event type.
///
/// `D` is the dispatcher handle generated for the receiver's host; emits
/// through it re-enter a queue, never a synchronous call, so event chains
/// cannot grow the stack.
pub trait OnEvent<E, D> {
  /// Handles one event; `dispatcher` emits into the owning loop.
  fn on_event(&mut self, event: E, dispatcher: &mut D);
}
