//! Document - arena-owning root of the node tree
//!
//! Every node lives in the document's arena and is addressed by [`NodeId`].
//! Factory methods create detached nodes owned by this document; a node
//! created by one document can only enter another through an explicit
//! [`Document::adopt`].

use crate::node::{ElementData, Node, NodeData, NodeKind};
use crate::NodeId;

/// An XML document: the node arena plus document-level metadata.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    xml_version: String,
    standalone: Option<bool>,
    xml_encoding: Option<String>,
}

impl Document {
    /// The document node itself. Always present, always index 0.
    pub const ROOT: NodeId = NodeId(0);

    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
            xml_version: "1.0".to_string(),
            standalone: None,
            xml_encoding: None,
        }
    }

    pub(crate) fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    // ---- factories ------------------------------------------------------

    /// Create a detached element node.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.alloc(NodeData::Element(ElementData::new(name)))
    }

    /// Create a detached attribute node.
    pub fn create_attribute(&mut self, name: &str, value: &str) -> NodeId {
        self.alloc(NodeData::Attribute {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(NodeData::Text(content.to_string()))
    }

    /// Create a detached CDATA section.
    pub fn create_cdata(&mut self, content: &str) -> NodeId {
        self.alloc(NodeData::Cdata(content.to_string()))
    }

    /// Create a detached comment node.
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.alloc(NodeData::Comment(content.to_string()))
    }

    /// Create a detached processing instruction.
    pub fn create_processing_instruction(&mut self, target: &str, data: &str) -> NodeId {
        self.alloc(NodeData::ProcessingInstruction {
            target: target.to_string(),
            data: data.to_string(),
        })
    }

    /// Create a detached document fragment.
    pub fn create_document_fragment(&mut self) -> NodeId {
        self.alloc(NodeData::DocumentFragment)
    }

    /// Create a detached doctype node (name/public-id/system-id only).
    pub fn create_document_type(
        &mut self,
        name: &str,
        public_id: &str,
        system_id: &str,
    ) -> NodeId {
        self.alloc(NodeData::DocumentType {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        })
    }

    // ---- node access ----------------------------------------------------

    /// Get a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.index())
    }

    /// Get a mutable node by id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes allocated in the arena (including detached ones).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ---- navigation -----------------------------------------------------

    /// Parent of a node, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent.checked())
    }

    /// Child sequence of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Live view over a node's children.
    pub fn child_nodes(&self, id: NodeId) -> NodeList {
        NodeList { parent: id }
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Previous sibling, derived from position in the parent's sequence.
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|&c| c == id)?;
        if pos == 0 {
            None
        } else {
            Some(siblings[pos - 1])
        }
    }

    /// Next sibling, derived from position in the parent's sequence.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    /// The document element (single element child of the document node).
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(Self::ROOT)
            .iter()
            .copied()
            .find(|&c| self.get(c).is_some_and(Node::is_element))
    }

    /// The doctype node attached to the document, if any.
    pub fn doctype(&self) -> Option<NodeId> {
        self.children(Self::ROOT)
            .iter()
            .copied()
            .find(|&c| self.get(c).is_some_and(|n| n.kind() == NodeKind::DocumentType))
    }

    /// Whether `ancestor` is `node` itself or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = node;
        while cursor.is_some() {
            if cursor == ancestor {
                return true;
            }
            cursor = self.get(cursor).map(|n| n.parent).unwrap_or(NodeId::NONE);
        }
        false
    }

    /// Ancestors of a node, nearest first, ending at the document node.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.parent(id);
        while let Some(p) = cursor {
            out.push(p);
            cursor = self.parent(p);
        }
        out
    }

    /// Pre-order iterator over the descendants of `root` (excluding `root`).
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(root).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    // ---- derived values -------------------------------------------------

    /// The DOM node name for a node (`#text`, `#comment`, tag name, ...).
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        let node = self.get(id)?;
        Some(match &node.data {
            NodeData::Document => "#document",
            NodeData::DocumentType { name, .. } => name,
            NodeData::Element(e) => &e.name,
            NodeData::Attribute { name, .. } => name,
            NodeData::Text(_) => "#text",
            NodeData::Cdata(_) => "#cdata-section",
            NodeData::Comment(_) => "#comment",
            NodeData::ProcessingInstruction { target, .. } => target,
            NodeData::DocumentFragment => "#document-fragment",
        })
    }

    /// The node's own value (text content, attribute value, PI data).
    pub fn node_value(&self, id: NodeId) -> Option<&str> {
        let node = self.get(id)?;
        match &node.data {
            NodeData::Text(s) | NodeData::Cdata(s) | NodeData::Comment(s) => Some(s),
            NodeData::Attribute { value, .. } => Some(value),
            NodeData::ProcessingInstruction { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Concatenated descendant text (text + CDATA) of a node. For nodes
    /// with an own value this returns that value instead.
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(v) = self.node_value(id) {
            return v.to_string();
        }
        let mut out = String::new();
        for desc in self.descendants(id) {
            if let Some(text) = self.get(desc).and_then(Node::as_text) {
                out.push_str(text);
            }
        }
        out
    }

    /// First element in document order whose `id` attribute matches.
    pub fn get_element_by_id(&self, id_value: &str) -> Option<NodeId> {
        self.descendants(Self::ROOT).find(|&n| {
            self.get(n)
                .and_then(Node::as_element)
                .and_then(ElementData::id)
                == Some(id_value)
        })
    }

    /// Attribute value on an element node.
    pub fn attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.get(element)?.as_element()?.attr(name)
    }

    // ---- document metadata ----------------------------------------------

    /// XML version from the declaration (default "1.0").
    pub fn xml_version(&self) -> &str {
        &self.xml_version
    }

    pub fn set_xml_version(&mut self, version: &str) {
        self.xml_version = version.to_string();
    }

    /// Standalone flag from the declaration, if declared.
    pub fn standalone(&self) -> Option<bool> {
        self.standalone
    }

    pub fn set_standalone(&mut self, standalone: Option<bool>) {
        self.standalone = standalone;
    }

    /// Encoding named in the XML declaration, if declared.
    pub fn xml_encoding(&self) -> Option<&str> {
        self.xml_encoding.as_deref()
    }

    pub fn set_xml_encoding(&mut self, encoding: Option<&str>) {
        self.xml_encoding = encoding.map(str::to_string);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order descendant iterator.
pub struct Descendants<'d> {
    doc: &'d Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let children = self.doc.children(id);
        for &child in children.iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}

/// A live view over a node's children. Resolves against the current tree
/// state on every call, never a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct NodeList {
    parent: NodeId,
}

impl NodeList {
    /// Current child count.
    pub fn len(&self, doc: &Document) -> usize {
        doc.children(self.parent).len()
    }

    pub fn is_empty(&self, doc: &Document) -> bool {
        self.len(doc) == 0
    }

    /// Child at `index`, if present.
    pub fn item(&self, doc: &Document, index: usize) -> Option<NodeId> {
        doc.children(self.parent).get(index).copied()
    }

    /// Iterate the current children.
    pub fn iter<'d>(&self, doc: &'d Document) -> impl Iterator<Item = NodeId> + 'd {
        doc.children(self.parent).iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_root() {
        let doc = Document::new();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get(Document::ROOT).unwrap().kind(), NodeKind::Document);
        assert_eq!(doc.node_name(Document::ROOT), Some("#document"));
    }

    #[test]
    fn test_factories_create_detached_nodes() {
        let mut doc = Document::new();
        let el = doc.create_element("div");
        let text = doc.create_text("hi");

        assert!(doc.parent(el).is_none());
        assert!(doc.parent(text).is_none());
        assert_eq!(doc.node_name(el), Some("div"));
        assert_eq!(doc.node_value(text), Some("hi"));
    }

    #[test]
    fn test_sibling_links_derive_from_position() {
        let mut doc = Document::new();
        let root = doc.create_element("root");
        let a = doc.create_element("a");
        let b = doc.create_element("b");
        doc.append_child(Document::ROOT, root).unwrap();
        doc.append_child(root, a).unwrap();
        doc.append_child(root, b).unwrap();

        assert_eq!(doc.next_sibling(a), Some(b));
        assert_eq!(doc.prev_sibling(b), Some(a));
        assert_eq!(doc.prev_sibling(a), None);
        assert_eq!(doc.next_sibling(b), None);

        doc.remove_child(root, a).unwrap();
        assert_eq!(doc.prev_sibling(b), None);
    }

    #[test]
    fn test_node_list_is_live() {
        let mut doc = Document::new();
        let root = doc.create_element("root");
        doc.append_child(Document::ROOT, root).unwrap();
        let list = doc.child_nodes(root);
        assert_eq!(list.len(&doc), 0);

        let child = doc.create_element("child");
        doc.append_child(root, child).unwrap();
        assert_eq!(list.len(&doc), 1);
        assert_eq!(list.item(&doc, 0), Some(child));
    }

    #[test]
    fn test_text_content_concatenates_descendants() {
        let mut doc = Document::new();
        let root = doc.create_element("p");
        let b = doc.create_element("b");
        let t1 = doc.create_text("Hello ");
        let t2 = doc.create_text("world");
        doc.append_child(Document::ROOT, root).unwrap();
        doc.append_child(root, t1).unwrap();
        doc.append_child(root, b).unwrap();
        doc.append_child(b, t2).unwrap();

        assert_eq!(doc.text_content(root), "Hello world");
        assert_eq!(doc.text_content(t1), "Hello ");
    }

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::new();
        let root = doc.create_element("root");
        let target = doc.create_element("div");
        doc.append_child(Document::ROOT, root).unwrap();
        doc.append_child(root, target).unwrap();
        doc.set_attribute(target, "id", "needle").unwrap();

        assert_eq!(doc.get_element_by_id("needle"), Some(target));
        assert_eq!(doc.get_element_by_id("missing"), None);
    }
}
