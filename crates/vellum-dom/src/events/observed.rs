//! Observed tree mutations
//!
//! Wrappers that perform a tree mutation and fire the matching mutation
//! events through a registry. `DOMNodeRemoved` fires before the node is
//! detached, `DOMNodeInserted` after linking; both are followed by
//! `DOMSubtreeModified` on the parent.

use crate::error::DomResult;
use crate::events::{Event, EventRegistry};
use crate::{Document, NodeId};

/// Append a child and notify listeners.
pub fn append_child(
    doc: &mut Document,
    registry: &mut EventRegistry,
    parent: NodeId,
    child: NodeId,
) -> DomResult<NodeId> {
    insert_before(doc, registry, parent, child, None)
}

/// Insert a child and notify listeners.
pub fn insert_before(
    doc: &mut Document,
    registry: &mut EventRegistry,
    parent: NodeId,
    new_child: NodeId,
    ref_child: Option<NodeId>,
) -> DomResult<NodeId> {
    let inserted = doc.insert_before(parent, new_child, ref_child)?;
    registry.dispatch(doc, inserted, &mut Event::node_inserted(parent));
    registry.dispatch(doc, parent, &mut Event::subtree_modified());
    Ok(inserted)
}

/// Remove a child and notify listeners.
pub fn remove_child(
    doc: &mut Document,
    registry: &mut EventRegistry,
    parent: NodeId,
    child: NodeId,
) -> DomResult<NodeId> {
    // Fired while the node is still in the tree so the event can bubble
    // through its old ancestors.
    if doc
        .children(parent)
        .iter()
        .any(|&c| c == child)
    {
        registry.dispatch(doc, child, &mut Event::node_removed(parent));
    }
    let removed = doc.remove_child(parent, child)?;
    registry.dispatch(doc, parent, &mut Event::subtree_modified());
    Ok(removed)
}

/// Set an attribute and notify listeners with the old and new values.
pub fn set_attribute(
    doc: &mut Document,
    registry: &mut EventRegistry,
    element: NodeId,
    name: &str,
    value: &str,
) -> DomResult<()> {
    use crate::events::AttrChange;

    let prev = doc.set_attribute(element, name, value)?;
    let change = if prev.is_some() {
        AttrChange::Modification
    } else {
        AttrChange::Addition
    };
    let mut ev = Event::attr_modified(name, prev.as_deref(), Some(value), change);
    registry.dispatch(doc, element, &mut ev);
    Ok(())
}

/// Remove an attribute and notify listeners if it was present.
pub fn remove_attribute(
    doc: &mut Document,
    registry: &mut EventRegistry,
    element: NodeId,
    name: &str,
) -> DomResult<()> {
    use crate::events::AttrChange;

    let prev = doc.remove_attribute(element, name)?;
    if let Some(prev) = prev {
        let mut ev = Event::attr_modified(name, Some(&prev), None, AttrChange::Removal);
        registry.dispatch(doc, element, &mut ev);
    }
    Ok(())
}

/// Replace the content of a text, CDATA or comment node and notify listeners.
pub fn set_character_data(
    doc: &mut Document,
    registry: &mut EventRegistry,
    node: NodeId,
    content: &str,
) -> DomResult<()> {
    use crate::error::DomError;
    use crate::node::NodeData;

    let data = doc
        .get_mut(node)
        .ok_or_else(|| DomError::NotFound(format!("no node #{} in this document", node.0)))?;
    let slot = match &mut data.data {
        NodeData::Text(s) | NodeData::Cdata(s) | NodeData::Comment(s) => s,
        _ => {
            return Err(DomError::NotSupported(
                "node does not carry character data".into(),
            ));
        }
    };
    let prev = std::mem::replace(slot, content.to_string());
    let mut ev = Event::char_data_modified(&prev, content);
    registry.dispatch(doc, node, &mut ev);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::events::names;

    #[test]
    fn test_insert_fires_node_inserted_and_subtree_modified() {
        let mut doc = Document::new();
        let root = doc.create_element("root");
        doc.append_child(Document::ROOT, root).unwrap();
        let child = doc.create_element("child");

        let mut reg = EventRegistry::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let log = Rc::clone(&log);
            reg.add_event_listener(root, names::DOM_NODE_INSERTED, false, move |ev| {
                log.borrow_mut().push(format!("inserted:{:?}", ev.target()));
            });
        }
        {
            let log = Rc::clone(&log);
            reg.add_event_listener(root, names::DOM_SUBTREE_MODIFIED, false, move |_| {
                log.borrow_mut().push("subtree".to_string());
            });
        }

        append_child(&mut doc, &mut reg, root, child).unwrap();
        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert!(log[0].starts_with("inserted:"));
        assert_eq!(log[1], "subtree");
    }

    #[test]
    fn test_removed_event_bubbles_through_old_ancestors() {
        let mut doc = Document::new();
        let root = doc.create_element("root");
        let child = doc.create_element("child");
        doc.append_child(Document::ROOT, root).unwrap();
        doc.append_child(root, child).unwrap();

        let mut reg = EventRegistry::new();
        let seen = Rc::new(RefCell::new(false));
        {
            let seen = Rc::clone(&seen);
            reg.add_event_listener(root, names::DOM_NODE_REMOVED, false, move |_| {
                *seen.borrow_mut() = true;
            });
        }

        remove_child(&mut doc, &mut reg, root, child).unwrap();
        assert!(*seen.borrow());
        assert!(doc.children(root).is_empty());
    }

    #[test]
    fn test_attr_modified_carries_values() {
        let mut doc = Document::new();
        let root = doc.create_element("root");
        doc.append_child(Document::ROOT, root).unwrap();

        let mut reg = EventRegistry::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let log = Rc::clone(&log);
            reg.add_event_listener(root, names::DOM_ATTR_MODIFIED, false, move |ev| {
                if let crate::events::EventPayload::Mutation {
                    prev_value,
                    new_value,
                    ..
                } = ev.payload()
                {
                    log.borrow_mut()
                        .push((prev_value.clone(), new_value.clone()));
                }
            });
        }

        set_attribute(&mut doc, &mut reg, root, "class", "a").unwrap();
        set_attribute(&mut doc, &mut reg, root, "class", "b").unwrap();

        let log = log.borrow();
        assert_eq!(log[0], (None, Some("a".to_string())));
        assert_eq!(log[1], (Some("a".to_string()), Some("b".to_string())));
    }
}
