//! Typed event dispatch with immediate delivery.
//!
//! Handlers bind to a concrete event type and run in bind order when that
//! type is emitted. A handler returning `true` marks the event handled and
//! stops the walk, so earlier handlers shadow later ones.

use std::any::{type_name, Any, TypeId};

use rustc_hash::FxHashMap;
use tracing::trace;

/// Handler for events of type `E`. Returns `true` once the event is handled.
pub type EventHandler<E> = Box<dyn FnMut(&E) -> bool>;

/// Trait representing a type-erased handler list
trait AnyChannel {
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn handler_count(&self) -> usize;
}

/// Handlers for events of a specific type
struct Channel<E: 'static> {
    handlers: Vec<EventHandler<E>>,
}

impl<E: 'static> AnyChannel for Channel<E> {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
    fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

/// Immediate-mode event dispatcher
pub struct EventDispatcher {
    channels: FxHashMap<TypeId, Box<dyn AnyChannel>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            channels: FxHashMap::default(),
        }
    }

    /// Bind a handler to events of type `E`. Handlers run in bind order.
    pub fn bind<E: 'static>(&mut self, handler: impl FnMut(&E) -> bool + 'static) {
        let channel = self
            .channels
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Channel::<E> { handlers: Vec::new() }));
        let channel = channel
            .as_any_mut()
            .downcast_mut::<Channel<E>>()
            .unwrap();
        channel.handlers.push(Box::new(handler));
    }

    /// Deliver `event` to its handlers right now, stopping at the first one
    /// that returns `true`. Returns whether any handler claimed it.
    pub fn emit<E: 'static>(&mut self, event: &E) -> bool {
        let Some(channel) = self.channels.get_mut(&TypeId::of::<E>()) else {
            return false;
        };
        let channel = channel
            .as_any_mut()
            .downcast_mut::<Channel<E>>()
            .unwrap();
        let handled = channel.handlers.iter_mut().any(|handler| handler(event));
        trace!(event = type_name::<E>(), handled, "event emitted");
        handled
    }

    /// Drop every handler bound to `E`.
    pub fn clear<E: 'static>(&mut self) {
        self.channels.remove(&TypeId::of::<E>());
    }

    /// Drop every handler of every type.
    pub fn clear_all(&mut self) {
        self.channels.clear();
    }

    /// Handlers currently bound to `E`.
    pub fn handler_count<E: 'static>(&self) -> usize {
        self.channels
            .get(&TypeId::of::<E>())
            .map(|channel| channel.handler_count())
            .unwrap_or(0)
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
