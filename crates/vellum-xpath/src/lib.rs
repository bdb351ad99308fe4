//! Vellum XPath - navigator cursor over the document tree
//!
//! [`Navigator`] adapts the arena tree to the cursor interface a generic
//! path evaluator expects: move-to operations that return `false` and leave
//! the cursor in place when the move is impossible, identity comparison,
//! and document-order position comparison. Attributes are addressable
//! positions even though they are not tree children.

use std::cmp::Ordering;

use vellum_dom::{Document, Node, NodeId, NodeKind};

/// Node classification as seen from the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKind {
    /// The document node
    Root,
    Element,
    Attribute,
    Text,
    Cdata,
    Comment,
    ProcessingInstruction,
    DocumentType,
    DocumentFragment,
}

/// Where a navigator currently points. Attributes live on their owning
/// element rather than in the child sequence, so they get their own arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Node(NodeId),
    Attribute { owner: NodeId, index: usize },
}

/// A movable cursor over one document.
///
/// Every `move_to_*` operation either succeeds and returns `true`, or
/// returns `false` without moving the cursor. Cloning yields an independent
/// cursor at the same position over the same document.
#[derive(Clone)]
pub struct Navigator<'d> {
    doc: &'d Document,
    position: Position,
}

impl<'d> Navigator<'d> {
    /// A navigator positioned on the document node.
    pub fn new(doc: &'d Document) -> Self {
        Self {
            doc,
            position: Position::Node(Document::ROOT),
        }
    }

    /// A navigator positioned on a specific node. `None` if the id does
    /// not belong to this document's arena.
    pub fn at(doc: &'d Document, node: NodeId) -> Option<Self> {
        doc.get(node)?;
        Some(Self {
            doc,
            position: Position::Node(node),
        })
    }

    /// The document this navigator traverses.
    pub fn document(&self) -> &'d Document {
        self.doc
    }

    /// The node under the cursor, or `None` when positioned on an attribute.
    pub fn node(&self) -> Option<NodeId> {
        match self.position {
            Position::Node(id) => Some(id),
            Position::Attribute { .. } => None,
        }
    }

    // ---- classification --------------------------------------------------

    /// Classify the current position.
    pub fn kind(&self) -> NavKind {
        match self.position {
            Position::Attribute { .. } => NavKind::Attribute,
            Position::Node(id) => match self.doc.get(id).map(Node::kind) {
                Some(NodeKind::Document) => NavKind::Root,
                Some(NodeKind::Element) => NavKind::Element,
                Some(NodeKind::Attribute) => NavKind::Attribute,
                Some(NodeKind::Text) => NavKind::Text,
                Some(NodeKind::Cdata) => NavKind::Cdata,
                Some(NodeKind::Comment) => NavKind::Comment,
                Some(NodeKind::ProcessingInstruction) => NavKind::ProcessingInstruction,
                Some(NodeKind::DocumentType) => NavKind::DocumentType,
                Some(NodeKind::DocumentFragment) | None => NavKind::DocumentFragment,
            },
        }
    }

    /// Name of the current position (tag name, attribute name, PI target,
    /// `#text` and friends for the unnamed kinds).
    pub fn name(&self) -> &'d str {
        match self.position {
            Position::Node(id) => self.doc.node_name(id).unwrap_or(""),
            Position::Attribute { owner, index } => self
                .attr(owner, index)
                .map(|a| a.name.as_str())
                .unwrap_or(""),
        }
    }

    /// Text value of the current position. Elements and the root yield
    /// their concatenated descendant text; attributes their value; other
    /// kinds their own value.
    pub fn value(&self) -> String {
        match self.position {
            Position::Node(id) => self.doc.text_content(id),
            Position::Attribute { owner, index } => self
                .attr(owner, index)
                .map(|a| a.value.clone())
                .unwrap_or_default(),
        }
    }

    fn attr(&self, owner: NodeId, index: usize) -> Option<&'d vellum_dom::Attr> {
        self.doc.get(owner)?.as_element()?.attrs.get(index)
    }

    // ---- moves -----------------------------------------------------------

    /// Move to the parent. From an attribute this moves to the owning
    /// element.
    pub fn move_to_parent(&mut self) -> bool {
        match self.position {
            Position::Attribute { owner, .. } => {
                self.position = Position::Node(owner);
                true
            }
            Position::Node(id) => match self.doc.parent(id) {
                Some(parent) => {
                    self.position = Position::Node(parent);
                    true
                }
                None => false,
            },
        }
    }

    /// Move to the first child of the current node.
    pub fn move_to_first_child(&mut self) -> bool {
        let Position::Node(id) = self.position else {
            return false;
        };
        match self.doc.first_child(id) {
            Some(child) => {
                self.position = Position::Node(child);
                true
            }
            None => false,
        }
    }

    /// Move to the next sibling. Attributes have no siblings on this axis;
    /// use [`Navigator::move_to_next_attribute`] instead.
    pub fn move_to_next(&mut self) -> bool {
        let Position::Node(id) = self.position else {
            return false;
        };
        match self.doc.next_sibling(id) {
            Some(next) => {
                self.position = Position::Node(next);
                true
            }
            None => false,
        }
    }

    /// Move to the previous sibling.
    pub fn move_to_previous(&mut self) -> bool {
        let Position::Node(id) = self.position else {
            return false;
        };
        match self.doc.prev_sibling(id) {
            Some(prev) => {
                self.position = Position::Node(prev);
                true
            }
            None => false,
        }
    }

    /// Move to the first attribute of the current element.
    pub fn move_to_first_attribute(&mut self) -> bool {
        let Position::Node(id) = self.position else {
            return false;
        };
        let has_attrs = self
            .doc
            .get(id)
            .and_then(Node::as_element)
            .is_some_and(|e| !e.attrs.is_empty());
        if has_attrs {
            self.position = Position::Attribute { owner: id, index: 0 };
        }
        has_attrs
    }

    /// Move to the next attribute of the same element.
    pub fn move_to_next_attribute(&mut self) -> bool {
        let Position::Attribute { owner, index } = self.position else {
            return false;
        };
        if self.attr(owner, index + 1).is_some() {
            self.position = Position::Attribute {
                owner,
                index: index + 1,
            };
            true
        } else {
            false
        }
    }

    /// Move to the document node.
    pub fn move_to_root(&mut self) -> bool {
        self.position = Position::Node(Document::ROOT);
        true
    }

    /// Move to the first element whose `id` attribute matches.
    pub fn move_to_id(&mut self, id_value: &str) -> bool {
        match self.doc.get_element_by_id(id_value) {
            Some(found) => {
                tracing::trace!(id = id_value, "navigator moved to id");
                self.position = Position::Node(found);
                true
            }
            None => false,
        }
    }

    /// Adopt another navigator's position. Succeeds only when both cursors
    /// traverse the same document.
    pub fn move_to(&mut self, other: &Navigator<'d>) -> bool {
        if !std::ptr::eq(self.doc, other.doc) {
            return false;
        }
        self.position = other.position;
        true
    }

    // ---- identity and order ----------------------------------------------

    /// Two navigators are at the same position iff they traverse the same
    /// document and reference the same underlying node (or the same
    /// attribute slot).
    pub fn is_same_position(&self, other: &Navigator<'_>) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.position == other.position
    }

    /// Compare two positions in document order. Attributes sort after
    /// their owning element and before its children. `None` when the
    /// navigators traverse different documents or disjoint subtrees.
    pub fn compare_position(&self, other: &Navigator<'_>) -> Option<Ordering> {
        if !std::ptr::eq(self.doc, other.doc) {
            return None;
        }
        let (a_top, a_path, a_attr) = self.order_key()?;
        let (b_top, b_path, b_attr) = other.order_key()?;
        // Disjoint subtrees (e.g. one side detached) have different tops.
        if a_top != b_top {
            return None;
        }
        Some((a_path, a_attr).cmp(&(b_path, b_attr)))
    }

    /// Key for document-order comparison: the topmost ancestor plus the
    /// chain of child indices leading down to the node, plus the attribute
    /// slot when applicable. Attribute keys sort after the owner's key and
    /// before any child's key.
    fn order_key(&self) -> Option<(NodeId, Vec<u32>, Option<usize>)> {
        let (node, attr) = match self.position {
            Position::Node(id) => (id, None),
            Position::Attribute { owner, index } => (owner, Some(index)),
        };
        let mut path = Vec::new();
        let mut cursor = node;
        while let Some(parent) = self.doc.parent(cursor) {
            let pos = self
                .doc
                .children(parent)
                .iter()
                .position(|&c| c == cursor)?;
            path.push(pos as u32);
            cursor = parent;
        }
        path.reverse();
        Some((cursor, path, attr))
    }
}

impl std::fmt::Debug for Navigator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("position", &self.position)
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        // <root><a id="first" lang="en">alpha</a><b>beta</b></root>
        let mut doc = Document::new();
        let root = doc.create_element("root");
        let a = doc.create_element("a");
        let b = doc.create_element("b");
        let ta = doc.create_text("alpha");
        let tb = doc.create_text("beta");
        doc.append_child(Document::ROOT, root).unwrap();
        doc.append_child(root, a).unwrap();
        doc.append_child(root, b).unwrap();
        doc.append_child(a, ta).unwrap();
        doc.append_child(b, tb).unwrap();
        doc.set_attribute(a, "id", "first").unwrap();
        doc.set_attribute(a, "lang", "en").unwrap();
        (doc, root, a, b)
    }

    #[test]
    fn test_tree_traversal() {
        let (doc, _root, a, b) = sample();
        let mut nav = Navigator::new(&doc);
        assert_eq!(nav.kind(), NavKind::Root);

        assert!(nav.move_to_first_child());
        assert_eq!(nav.name(), "root");
        assert!(nav.move_to_first_child());
        assert_eq!(nav.node(), Some(a));
        assert!(nav.move_to_next());
        assert_eq!(nav.node(), Some(b));
        assert!(!nav.move_to_next());
        assert!(nav.move_to_previous());
        assert_eq!(nav.node(), Some(a));

        assert!(nav.move_to_parent());
        assert_eq!(nav.name(), "root");
        assert!(nav.move_to_parent());
        assert_eq!(nav.kind(), NavKind::Root);
        assert!(!nav.move_to_parent());
    }

    #[test]
    fn test_attribute_axis() {
        let (doc, _root, a, _b) = sample();
        let mut nav = Navigator::at(&doc, a).unwrap();

        assert!(nav.move_to_first_attribute());
        assert_eq!(nav.kind(), NavKind::Attribute);
        assert_eq!(nav.name(), "id");
        assert_eq!(nav.value(), "first");
        assert!(nav.move_to_next_attribute());
        assert_eq!(nav.name(), "lang");
        assert_eq!(nav.value(), "en");
        assert!(!nav.move_to_next_attribute());

        // Parent of an attribute is its owning element.
        assert!(nav.move_to_parent());
        assert_eq!(nav.node(), Some(a));
    }

    #[test]
    fn test_no_attributes_no_move() {
        let (doc, _root, _a, b) = sample();
        let mut nav = Navigator::at(&doc, b).unwrap();
        assert!(!nav.move_to_first_attribute());
        assert_eq!(nav.node(), Some(b));
    }

    #[test]
    fn test_element_value_is_descendant_text() {
        let (doc, root, a, _b) = sample();
        assert_eq!(Navigator::at(&doc, root).unwrap().value(), "alphabeta");
        assert_eq!(Navigator::at(&doc, a).unwrap().value(), "alpha");
        assert_eq!(Navigator::new(&doc).value(), "alphabeta");
    }

    #[test]
    fn test_move_to_id() {
        let (doc, _root, a, _b) = sample();
        let mut nav = Navigator::new(&doc);
        assert!(nav.move_to_id("first"));
        assert_eq!(nav.node(), Some(a));
        assert!(!nav.move_to_id("absent"));
        assert_eq!(nav.node(), Some(a));
    }

    #[test]
    fn test_same_position_identity() {
        let (doc, _root, a, b) = sample();
        let nav_a = Navigator::at(&doc, a).unwrap();
        let nav_b = Navigator::at(&doc, b).unwrap();
        let clone = nav_a.clone();

        assert!(nav_a.is_same_position(&clone));
        assert!(!nav_a.is_same_position(&nav_b));

        let mut attr1 = nav_a.clone();
        let mut attr2 = nav_a.clone();
        attr1.move_to_first_attribute();
        attr2.move_to_first_attribute();
        assert!(attr1.is_same_position(&attr2));
        attr2.move_to_next_attribute();
        assert!(!attr1.is_same_position(&attr2));
    }

    #[test]
    fn test_move_to_requires_same_document() {
        let (doc, _root, a, _b) = sample();
        let (other_doc, _, other_a, _) = sample();

        let from = Navigator::at(&doc, a).unwrap();
        let mut foreign = Navigator::at(&other_doc, other_a).unwrap();
        assert!(!foreign.move_to(&from));
        assert_eq!(foreign.node(), Some(other_a));

        let mut local = Navigator::new(&doc);
        assert!(local.move_to(&from));
        assert!(local.is_same_position(&from));
    }

    #[test]
    fn test_compare_position_document_order() {
        let (doc, root, a, b) = sample();
        let nav_root = Navigator::at(&doc, root).unwrap();
        let nav_a = Navigator::at(&doc, a).unwrap();
        let nav_b = Navigator::at(&doc, b).unwrap();

        assert_eq!(nav_root.compare_position(&nav_a), Some(Ordering::Less));
        assert_eq!(nav_a.compare_position(&nav_b), Some(Ordering::Less));
        assert_eq!(nav_b.compare_position(&nav_a), Some(Ordering::Greater));
        assert_eq!(nav_a.compare_position(&nav_a.clone()), Some(Ordering::Equal));
    }

    #[test]
    fn test_attributes_order_between_element_and_children() {
        let (doc, _root, a, _b) = sample();
        let nav_a = Navigator::at(&doc, a).unwrap();
        let mut nav_attr = nav_a.clone();
        nav_attr.move_to_first_attribute();
        let mut nav_text = nav_a.clone();
        nav_text.move_to_first_child();

        assert_eq!(nav_a.compare_position(&nav_attr), Some(Ordering::Less));
        assert_eq!(nav_attr.compare_position(&nav_text), Some(Ordering::Less));

        let mut nav_attr2 = nav_attr.clone();
        nav_attr2.move_to_next_attribute();
        assert_eq!(nav_attr.compare_position(&nav_attr2), Some(Ordering::Less));
    }

    #[test]
    fn test_compare_position_across_documents_is_none() {
        let (doc, _root, a, _b) = sample();
        let (other_doc, _, other_a, _) = sample();
        let nav = Navigator::at(&doc, a).unwrap();
        let foreign = Navigator::at(&other_doc, other_a).unwrap();
        assert_eq!(nav.compare_position(&foreign), None);
        assert!(!nav.is_same_position(&foreign));
    }

    #[test]
    fn test_detached_subtrees_are_unordered() {
        let mut doc = Document::new();
        let root = doc.create_element("root");
        doc.append_child(Document::ROOT, root).unwrap();
        let stray = doc.create_element("stray");

        let attached = Navigator::at(&doc, root).unwrap();
        let detached = Navigator::at(&doc, stray).unwrap();
        assert_eq!(attached.compare_position(&detached), None);
    }
}
