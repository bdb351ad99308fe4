//! Listener registry and the dispatch state machine

use std::collections::HashMap;

use crate::{Document, NodeId};

use super::event::{Event, EventPhase};

/// Handle identifying one listener registration, for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ListenerFn = Box<dyn FnMut(&mut Event)>;

struct Registration {
    id: ListenerId,
    event_type: String,
    capture: bool,
    callback: ListenerFn,
}

#[derive(Clone, Copy)]
enum InvokeMode {
    Capture,
    Bubble,
    Both,
}

/// Per-node listener registrations plus the dispatch engine.
///
/// Listeners for one node are kept in a single vector in registration order;
/// the (event-type, use-capture) key is matched at invocation time, so
/// at-target invocation order is exactly registration order and a listener
/// registered twice fires twice.
#[derive(Default)]
pub struct EventRegistry {
    listeners: HashMap<NodeId, Vec<Registration>>,
    next_id: u64,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `(event_type, use_capture)` on `node`.
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        use_capture: bool,
        callback: impl FnMut(&mut Event) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.entry(node).or_default().push(Registration {
            id,
            event_type: event_type.to_string(),
            capture: use_capture,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove one registration. The (type, capture) pair must match the
    /// registration being removed; unknown ids are ignored.
    pub fn remove_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        use_capture: bool,
        id: ListenerId,
    ) {
        if let Some(list) = self.listeners.get_mut(&node) {
            list.retain(|r| {
                !(r.id == id && r.event_type == event_type && r.capture == use_capture)
            });
            if list.is_empty() {
                self.listeners.remove(&node);
            }
        }
    }

    /// Number of registrations on a node.
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners.get(&node).map(Vec::len).unwrap_or(0)
    }

    /// Dispatch an event at `target`, propagating capture → target → bubble.
    ///
    /// Returns `true` unless `prevent_default` was called on a cancelable
    /// event. `stop_propagation` halts the remainder of the phase loop it
    /// was called in; the following phases still run (the per-phase-only
    /// stop is the contract here, narrower than the W3C whole-dispatch
    /// halt).
    pub fn dispatch(&mut self, doc: &Document, target: NodeId, event: &mut Event) -> bool {
        event.begin_dispatch(target);
        tracing::debug!(event_type = event.event_type(), target = target.0, "dispatching event");

        // Nearest-first; walked in reverse for the capturing descent.
        let chain = doc.ancestors(target);

        for &ancestor in chain.iter().rev() {
            event.set_phase(EventPhase::Capturing, ancestor);
            self.invoke(ancestor, event, InvokeMode::Capture);
            if event.propagation_stopped() {
                break;
            }
        }
        event.end_phase();

        event.set_phase(EventPhase::AtTarget, target);
        self.invoke(target, event, InvokeMode::Both);
        event.end_phase();

        if event.bubbles() {
            for &ancestor in chain.iter() {
                event.set_phase(EventPhase::Bubbling, ancestor);
                self.invoke(ancestor, event, InvokeMode::Bubble);
                if event.propagation_stopped() {
                    break;
                }
            }
            event.end_phase();
        }

        event.end_dispatch();
        !event.default_prevented()
    }

    fn invoke(&mut self, node: NodeId, event: &mut Event, mode: InvokeMode) {
        let Some(list) = self.listeners.get_mut(&node) else {
            return;
        };
        for reg in list.iter_mut() {
            if reg.event_type != event.event_type() {
                continue;
            }
            let wanted = match mode {
                InvokeMode::Capture => reg.capture,
                InvokeMode::Bubble => !reg.capture,
                InvokeMode::Both => true,
            };
            if wanted {
                (reg.callback)(event);
            }
        }
    }
}
