//! Comprehensive tests for vellum-dom
//!
//! Exercises the tree, event and media invariants together the way an
//! editor layer drives them.

use std::cell::RefCell;
use std::rc::Rc;

use vellum_dom::events::{names, Event, EventRegistry, MouseData};
use vellum_dom::media::MediaList;
use vellum_dom::{Document, DomError, NodeId};

fn build_tree() -> (Document, NodeId, NodeId, NodeId) {
    let mut doc = Document::new();
    let root = doc.create_element("root");
    let mid = doc.create_element("mid");
    let target = doc.create_element("target");
    doc.append_child(Document::ROOT, root).unwrap();
    doc.append_child(root, mid).unwrap();
    doc.append_child(mid, target).unwrap();
    (doc, root, mid, target)
}

#[test]
fn test_cycle_prevention_is_load_bearing() {
    let (mut doc, root, mid, target) = build_tree();

    // Every ancestor of the insertion point is rejected as a child.
    for ancestor in [root, mid] {
        let err = doc.append_child(target, ancestor).unwrap_err();
        assert!(matches!(err, DomError::HierarchyRequest(_)));
    }

    // The failed attempts left the tree intact.
    assert_eq!(doc.parent(mid), Some(root));
    assert_eq!(doc.parent(target), Some(mid));
    assert_eq!(doc.children(target).len(), 0);
}

#[test]
fn test_event_order_with_listeners_everywhere() {
    let (doc, root, mid, target) = build_tree();
    let mut reg = EventRegistry::new();
    let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    let mut listen = |node: NodeId, capture: bool, label: &str| {
        let log = Rc::clone(&log);
        let label = label.to_string();
        reg.add_event_listener(node, names::CLICK, capture, move |_| {
            log.borrow_mut().push(label.clone());
        });
    };
    listen(root, true, "root-capture");
    listen(root, false, "root-bubble");
    listen(mid, true, "mid-capture");
    listen(mid, false, "mid-bubble");
    listen(target, true, "target-capture");
    listen(target, false, "target-bubble");

    let mut ev = Event::click(MouseData::default());
    let not_canceled = reg.dispatch(&doc, target, &mut ev);

    assert!(not_canceled);
    // Capture listeners on the target fire in the at-target phase, in
    // registration order alongside the non-capture ones.
    assert_eq!(
        *log.borrow(),
        vec![
            "root-capture",
            "mid-capture",
            "target-capture",
            "target-bubble",
            "mid-bubble",
            "root-bubble",
        ]
    );
}

#[test]
fn test_stop_propagation_in_capture_still_reaches_target() {
    // Pins the per-phase-only stop behavior: a stop in the capturing loop
    // ends that loop but at-target and bubbling still run.
    let (doc, root, mid, target) = build_tree();
    let mut reg = EventRegistry::new();
    let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

    {
        let log = Rc::clone(&log);
        reg.add_event_listener(mid, names::CLICK, true, move |ev| {
            log.borrow_mut().push("mid-capture");
            ev.stop_propagation();
        });
    }
    for (node, capture, label) in [
        (root, true, "root-capture"),
        (target, false, "target"),
        (mid, false, "mid-bubble"),
        (root, false, "root-bubble"),
    ] {
        let log = Rc::clone(&log);
        reg.add_event_listener(node, names::CLICK, capture, move |_| {
            log.borrow_mut().push(label);
        });
    }

    let mut ev = Event::click(MouseData::default());
    reg.dispatch(&doc, target, &mut ev);

    assert_eq!(
        *log.borrow(),
        vec![
            "root-capture",
            "mid-capture",
            "target",
            "mid-bubble",
            "root-bubble"
        ]
    );
}

#[test]
fn test_medialist_dedup_property() {
    let mut list = MediaList::new();
    list.append_medium("screen").unwrap();
    list.append_medium("print").unwrap();
    list.append_medium("screen").unwrap();

    let media: Vec<_> = list.iter().map(str::to_string).collect();
    assert_eq!(media, vec!["print", "screen"]);
}

#[test]
fn test_adopted_node_can_join_the_new_tree() {
    let mut foreign = Document::new();
    let f_root = foreign.create_element("widget");
    let f_text = foreign.create_text("payload");
    foreign.append_child(Document::ROOT, f_root).unwrap();
    foreign.append_child(f_root, f_text).unwrap();

    let (mut doc, _root, _mid, target) = build_tree();
    let adopted = doc.adopt(&mut foreign, f_root).unwrap();
    doc.append_child(target, adopted).unwrap();

    assert_eq!(doc.text_content(target), "payload");
    assert_eq!(doc.node_name(adopted), Some("widget"));
}
