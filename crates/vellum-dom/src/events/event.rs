//! Event values
//!
//! One event type for all families; family-specific state lives in the
//! [`EventPayload`] tagged variant rather than a subtype hierarchy.

use crate::error::{DomError, DomResult};
use crate::NodeId;

use super::names;

/// Propagation phase of an event mid-dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    Capturing,
    AtTarget,
    Bubbling,
}

/// Mouse-specific event state.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseData {
    pub screen_x: i32,
    pub screen_y: i32,
    pub client_x: i32,
    pub client_y: i32,
    pub ctrl_key: bool,
    pub alt_key: bool,
    pub shift_key: bool,
    pub meta_key: bool,
    pub button: u16,
    pub related_target: Option<NodeId>,
}

/// How an attribute changed, for `DOMAttrModified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrChange {
    Modification,
    Addition,
    Removal,
}

/// Family-specific payload.
#[derive(Debug, Clone)]
pub enum EventPayload {
    Generic,
    Ui {
        detail: i32,
    },
    Mouse(MouseData),
    Mutation {
        related: Option<NodeId>,
        prev_value: Option<String>,
        new_value: Option<String>,
        attr_name: Option<String>,
        attr_change: Option<AttrChange>,
    },
}

/// A dispatchable event.
///
/// Mutable (re-initializable) only until its first dispatch; the
/// cancellation flags are settable only through [`Event::stop_propagation`]
/// and [`Event::prevent_default`].
#[derive(Debug, Clone)]
pub struct Event {
    event_type: String,
    bubbles: bool,
    cancelable: bool,
    payload: EventPayload,
    target: NodeId,
    current_target: NodeId,
    phase: Option<EventPhase>,
    default_prevented: bool,
    propagation_stopped: bool,
    dispatched: bool,
}

impl Event {
    /// Create a generic event.
    pub fn new(event_type: &str, bubbles: bool, cancelable: bool) -> Self {
        Self::with_payload(event_type, bubbles, cancelable, EventPayload::Generic)
    }

    /// Create an event with a family-specific payload.
    pub fn with_payload(
        event_type: &str,
        bubbles: bool,
        cancelable: bool,
        payload: EventPayload,
    ) -> Self {
        Self {
            event_type: event_type.to_string(),
            bubbles,
            cancelable,
            payload,
            target: NodeId::NONE,
            current_target: NodeId::NONE,
            phase: None,
            default_prevented: false,
            propagation_stopped: false,
            dispatched: false,
        }
    }

    // ---- convenience constructors per event family ----------------------

    /// Generic ("HTMLEvents") event.
    pub fn html(event_type: &str, bubbles: bool, cancelable: bool) -> Self {
        Self::new(event_type, bubbles, cancelable)
    }

    /// UI event with a detail count.
    pub fn ui(event_type: &str, bubbles: bool, cancelable: bool, detail: i32) -> Self {
        Self::with_payload(event_type, bubbles, cancelable, EventPayload::Ui { detail })
    }

    /// Mouse event; mouse events bubble and are cancelable.
    pub fn mouse(event_type: &str, data: MouseData) -> Self {
        Self::with_payload(event_type, true, true, EventPayload::Mouse(data))
    }

    /// A `click` event.
    pub fn click(data: MouseData) -> Self {
        Self::mouse(names::CLICK, data)
    }

    /// `DOMNodeInserted`, with the new parent as related node.
    pub fn node_inserted(parent: NodeId) -> Self {
        Self::mutation(names::DOM_NODE_INSERTED, Some(parent), None, None, None, None)
    }

    /// `DOMNodeRemoved`, with the old parent as related node.
    pub fn node_removed(parent: NodeId) -> Self {
        Self::mutation(names::DOM_NODE_REMOVED, Some(parent), None, None, None, None)
    }

    /// `DOMAttrModified`.
    pub fn attr_modified(
        attr_name: &str,
        prev_value: Option<&str>,
        new_value: Option<&str>,
        change: AttrChange,
    ) -> Self {
        Self::mutation(
            names::DOM_ATTR_MODIFIED,
            None,
            prev_value.map(str::to_string),
            new_value.map(str::to_string),
            Some(attr_name.to_string()),
            Some(change),
        )
    }

    /// `DOMCharacterDataModified`.
    pub fn char_data_modified(prev_value: &str, new_value: &str) -> Self {
        Self::mutation(
            names::DOM_CHARACTER_DATA_MODIFIED,
            None,
            Some(prev_value.to_string()),
            Some(new_value.to_string()),
            None,
            None,
        )
    }

    /// `DOMSubtreeModified`.
    pub fn subtree_modified() -> Self {
        Self::mutation(names::DOM_SUBTREE_MODIFIED, None, None, None, None, None)
    }

    fn mutation(
        event_type: &str,
        related: Option<NodeId>,
        prev_value: Option<String>,
        new_value: Option<String>,
        attr_name: Option<String>,
        attr_change: Option<AttrChange>,
    ) -> Self {
        Self::with_payload(
            event_type,
            true,
            false,
            EventPayload::Mutation {
                related,
                prev_value,
                new_value,
                attr_name,
                attr_change,
            },
        )
    }

    // ---- state ----------------------------------------------------------

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// Node dispatch started at (NONE before dispatch).
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Node whose listeners are currently firing.
    pub fn current_target(&self) -> NodeId {
        self.current_target
    }

    pub fn phase(&self) -> Option<EventPhase> {
        self.phase
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Re-initialize type and flags. Legal only before dispatch begins.
    pub fn init(&mut self, event_type: &str, bubbles: bool, cancelable: bool) -> DomResult<()> {
        if self.dispatched {
            return Err(DomError::InvalidState(
                "event cannot be re-initialized after dispatch".into(),
            ));
        }
        self.event_type = event_type.to_string();
        self.bubbles = bubbles;
        self.cancelable = cancelable;
        Ok(())
    }

    /// Halt the remaining listener invocations of the current phase loop.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Cancel the default action. Has no effect on non-cancelable events.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    // ---- dispatch-internal hooks ----------------------------------------

    pub(crate) fn begin_dispatch(&mut self, target: NodeId) {
        self.dispatched = true;
        self.target = target;
        self.default_prevented = false;
        self.propagation_stopped = false;
    }

    pub(crate) fn set_phase(&mut self, phase: EventPhase, current_target: NodeId) {
        self.phase = Some(phase);
        self.current_target = current_target;
    }

    pub(crate) fn end_phase(&mut self) {
        self.propagation_stopped = false;
    }

    pub(crate) fn end_dispatch(&mut self) {
        self.phase = None;
        self.current_target = NodeId::NONE;
    }

    pub(crate) fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prevent_default_requires_cancelable() {
        let mut ev = Event::new("change", true, false);
        ev.prevent_default();
        assert!(!ev.default_prevented());

        let mut ev = Event::new("submit", true, true);
        ev.prevent_default();
        assert!(ev.default_prevented());
    }

    #[test]
    fn test_init_locked_after_dispatch() {
        let mut ev = Event::new("load", false, false);
        ev.init("unload", true, false).unwrap();
        assert_eq!(ev.event_type(), "unload");

        ev.begin_dispatch(NodeId(1));
        let err = ev.init("load", false, false).unwrap_err();
        assert_eq!(err.code(), 11);
    }

    #[test]
    fn test_mutation_constructor_shape() {
        let ev = Event::attr_modified("class", Some("a"), Some("b"), AttrChange::Modification);
        assert_eq!(ev.event_type(), names::DOM_ATTR_MODIFIED);
        assert!(ev.bubbles());
        assert!(!ev.cancelable());
        match ev.payload() {
            EventPayload::Mutation {
                prev_value,
                new_value,
                attr_name,
                ..
            } => {
                assert_eq!(prev_value.as_deref(), Some("a"));
                assert_eq!(new_value.as_deref(), Some("b"));
                assert_eq!(attr_name.as_deref(), Some("class"));
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }
}
