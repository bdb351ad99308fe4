//! Event type name constants

/// Event family (module) names used by `create_event`-style factories.
pub mod groups {
    pub const HTML_EVENTS: &str = "HTMLEvents";
    pub const UI_EVENTS: &str = "UIEvents";
    pub const MOUSE_EVENTS: &str = "MouseEvents";
    pub const MUTATION_EVENTS: &str = "MutationEvents";
}

// Generic ("HTMLEvents") sub-events
pub const LOAD: &str = "load";
pub const UNLOAD: &str = "unload";
pub const ABORT: &str = "abort";
pub const ERROR: &str = "error";
pub const SELECT: &str = "select";
pub const CHANGE: &str = "change";
pub const SUBMIT: &str = "submit";
pub const RESET: &str = "reset";

// UI sub-events
pub const FOCUS: &str = "focus";
pub const BLUR: &str = "blur";
pub const RESIZE: &str = "resize";
pub const SCROLL: &str = "scroll";

// Mouse sub-events
pub const CLICK: &str = "click";
pub const MOUSEDOWN: &str = "mousedown";
pub const MOUSEUP: &str = "mouseup";
pub const MOUSEOVER: &str = "mouseover";
pub const MOUSEMOVE: &str = "mousemove";
pub const MOUSEOUT: &str = "mouseout";

// Mutation sub-events
pub const DOM_SUBTREE_MODIFIED: &str = "DOMSubtreeModified";
pub const DOM_NODE_INSERTED: &str = "DOMNodeInserted";
pub const DOM_NODE_REMOVED: &str = "DOMNodeRemoved";
pub const DOM_NODE_INSERTED_INTO_DOCUMENT: &str = "DOMNodeInsertedIntoDocument";
pub const DOM_NODE_REMOVED_FROM_DOCUMENT: &str = "DOMNodeRemovedFromDocument";
pub const DOM_ATTR_MODIFIED: &str = "DOMAttrModified";
pub const DOM_CHARACTER_DATA_MODIFIED: &str = "DOMCharacterDataModified";

/// The family a well-known event type belongs to, if any.
pub fn group_of(event_type: &str) -> Option<&'static str> {
    match event_type {
        LOAD | UNLOAD | ABORT | ERROR | SELECT | CHANGE | SUBMIT | RESET => {
            Some(groups::HTML_EVENTS)
        }
        FOCUS | BLUR | RESIZE | SCROLL => Some(groups::UI_EVENTS),
        CLICK | MOUSEDOWN | MOUSEUP | MOUSEOVER | MOUSEMOVE | MOUSEOUT => {
            Some(groups::MOUSE_EVENTS)
        }
        DOM_SUBTREE_MODIFIED
        | DOM_NODE_INSERTED
        | DOM_NODE_REMOVED
        | DOM_NODE_INSERTED_INTO_DOCUMENT
        | DOM_NODE_REMOVED_FROM_DOCUMENT
        | DOM_ATTR_MODIFIED
        | DOM_CHARACTER_DATA_MODIFIED => Some(groups::MUTATION_EVENTS),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_lookup() {
        assert_eq!(group_of(CLICK), Some(groups::MOUSE_EVENTS));
        assert_eq!(group_of(CHANGE), Some(groups::HTML_EVENTS));
        assert_eq!(group_of(DOM_ATTR_MODIFIED), Some(groups::MUTATION_EVENTS));
        assert_eq!(group_of("made-up"), None);
    }
}
