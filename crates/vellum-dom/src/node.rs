//! DOM node representation
//!
//! A node is a tagged variant over the nine node kinds plus the shared
//! tree-navigation fields. The parent link is a non-owning back-reference;
//! ownership always flows from the document arena down through `children`.

use crate::NodeId;

/// The kind tag of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    DocumentType,
    Element,
    Attribute,
    Text,
    Cdata,
    Comment,
    ProcessingInstruction,
    DocumentFragment,
}

/// A node in the document arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub(crate) parent: NodeId,
    /// Ordered child sequence. Sibling links are derived from position in
    /// this sequence, never stored separately.
    pub(crate) children: Vec<NodeId>,
    /// Node-specific payload
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            children: Vec::new(),
            data,
        }
    }

    /// The node-kind tag.
    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Document => NodeKind::Document,
            NodeData::DocumentType { .. } => NodeKind::DocumentType,
            NodeData::Element(_) => NodeKind::Element,
            NodeData::Attribute { .. } => NodeKind::Attribute,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Cdata(_) => NodeKind::Cdata,
            NodeData::Comment(_) => NodeKind::Comment,
            NodeData::ProcessingInstruction { .. } => NodeKind::ProcessingInstruction,
            NodeData::DocumentFragment => NodeKind::DocumentFragment,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is a text node
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text or CDATA node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) | NodeData::Cdata(t) => Some(t),
            _ => None,
        }
    }

    /// Whether this kind of node may carry children.
    pub fn can_contain_children(&self) -> bool {
        matches!(
            self.data,
            NodeData::Document | NodeData::Element(_) | NodeData::DocumentFragment
        )
    }
}

/// Node-specific data.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE: name, public id, system id (no internal-subset modeling)
    DocumentType {
        name: String,
        public_id: String,
        system_id: String,
    },
    /// Element
    Element(ElementData),
    /// Standalone attribute node
    Attribute { name: String, value: String },
    /// Text content
    Text(String),
    /// CDATA section
    Cdata(String),
    /// Comment
    Comment(String),
    /// Processing instruction
    ProcessingInstruction { target: String, data: String },
    /// Lightweight container for building subtrees
    DocumentFragment,
}

/// Element-specific data.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Tag name
    pub name: String,
    /// Attributes, in set order
    pub attrs: Vec<Attr>,
}

impl ElementData {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attrs: Vec::new(),
        }
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Whether the attribute is present
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Set an attribute, replacing any existing value in place.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        for attr in self.attrs.iter_mut() {
            if attr.name == name {
                attr.value = value.to_string();
                return;
            }
        }
        self.attrs.push(Attr {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self.attrs.iter().position(|a| a.name == name)?;
        Some(self.attrs.remove(idx).value)
    }

    /// The `id` attribute, if any
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Whitespace-separated `class` attribute members
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut elem = ElementData::new("div");
        elem.set_attr("class", "a");
        elem.set_attr("id", "x");
        elem.set_attr("class", "b");

        assert_eq!(elem.attrs.len(), 2);
        assert_eq!(elem.attr("class"), Some("b"));
        // Replacement keeps the original position
        assert_eq!(elem.attrs[0].name, "class");
    }

    #[test]
    fn test_classes_iterator() {
        let mut elem = ElementData::new("p");
        elem.set_attr("class", "intro  lead");
        let classes: Vec<_> = elem.classes().collect();
        assert_eq!(classes, vec!["intro", "lead"]);
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(Node::new(NodeData::Document).kind(), NodeKind::Document);
        assert_eq!(
            Node::new(NodeData::Text("hi".into())).kind(),
            NodeKind::Text
        );
        assert!(Node::new(NodeData::DocumentFragment).can_contain_children());
        assert!(!Node::new(NodeData::Comment(String::new())).can_contain_children());
    }
}
