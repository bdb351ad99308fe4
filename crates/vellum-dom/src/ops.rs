//! Tree mutation operations
//!
//! appendChild/insertBefore/removeChild/replaceChild with structural
//! validation, plus cloneNode, adopt and normalize. Cycle prevention is
//! enforced here: a node is never linked under its own subtree.

use crate::error::{DomError, DomResult};
use crate::node::{Node, NodeData, NodeKind};
use crate::{Document, NodeId};

impl Document {
    fn ensure(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id)
            .ok_or_else(|| DomError::NotFound(format!("no node #{} in this document", id.0)))
    }

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `new_child` into `parent` before `ref_child` (append when
    /// `ref_child` is `None`). Inserting a document fragment inserts its
    /// children and leaves the fragment empty.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        ref_child: Option<NodeId>,
    ) -> DomResult<NodeId> {
        self.ensure(parent)?;
        self.ensure(new_child)?;

        if !self.nodes[parent.index()].can_contain_children() {
            return Err(DomError::HierarchyRequest(format!(
                "{:?} nodes cannot contain children",
                self.nodes[parent.index()].kind()
            )));
        }
        if self.is_inclusive_ancestor(new_child, parent) {
            return Err(DomError::HierarchyRequest(
                "a node cannot be inserted into its own subtree".into(),
            ));
        }

        if self.nodes[new_child.index()].kind() == NodeKind::DocumentFragment {
            let kids = self.children(new_child).to_vec();
            for kid in kids {
                self.insert_before(parent, kid, ref_child)?;
            }
            return Ok(new_child);
        }

        self.validate_insertion(parent, new_child, None)?;

        if let Some(old_parent) = self.parent(new_child) {
            self.remove_child(old_parent, new_child)?;
        }

        let pos = match ref_child {
            Some(r) => self
                .children(parent)
                .iter()
                .position(|&c| c == r)
                .ok_or_else(|| {
                    DomError::NotFound("reference node is not a child of parent".into())
                })?,
            None => self.children(parent).len(),
        };
        self.nodes[parent.index()].children.insert(pos, new_child);
        self.nodes[new_child.index()].parent = parent;
        Ok(new_child)
    }

    /// Remove `child` from `parent`. Removing a node that is not a child of
    /// `parent` is a `NotFound` error, never a silent no-op.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.ensure(parent)?;
        self.ensure(child)?;
        let pos = self
            .children(parent)
            .iter()
            .position(|&c| c == child)
            .ok_or_else(|| DomError::NotFound("node to remove is not a child of parent".into()))?;
        self.nodes[parent.index()].children.remove(pos);
        self.nodes[child.index()].parent = NodeId::NONE;
        Ok(child)
    }

    /// Replace `old_child` with `new_child`, returning the removed node.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> DomResult<NodeId> {
        self.ensure(parent)?;
        self.ensure(new_child)?;
        let pos = self
            .children(parent)
            .iter()
            .position(|&c| c == old_child)
            .ok_or_else(|| DomError::NotFound("node to replace is not a child of parent".into()))?;
        if self.is_inclusive_ancestor(new_child, parent) {
            return Err(DomError::HierarchyRequest(
                "a node cannot be inserted into its own subtree".into(),
            ));
        }

        if self.nodes[new_child.index()].kind() == NodeKind::DocumentFragment {
            let kids = self.children(new_child).to_vec();
            self.remove_child(parent, old_child)?;
            let mut insert_at = pos;
            for kid in kids {
                self.remove_child(new_child, kid)?;
                self.validate_insertion(parent, kid, None)?;
                self.nodes[parent.index()].children.insert(insert_at, kid);
                self.nodes[kid.index()].parent = parent;
                insert_at += 1;
            }
            return Ok(old_child);
        }

        self.validate_insertion(parent, new_child, Some(old_child))?;

        if let Some(old_parent) = self.parent(new_child) {
            self.remove_child(old_parent, new_child)?;
        }
        // Position may have shifted if new_child was an earlier sibling.
        let pos = self
            .children(parent)
            .iter()
            .position(|&c| c == old_child)
            .ok_or_else(|| DomError::NotFound("node to replace is not a child of parent".into()))?;
        self.nodes[parent.index()].children[pos] = new_child;
        self.nodes[new_child.index()].parent = parent;
        self.nodes[old_child.index()].parent = NodeId::NONE;
        Ok(old_child)
    }

    /// Structural checks shared by insert and replace. `ignoring` excludes a
    /// child about to be replaced from the document-level uniqueness counts.
    fn validate_insertion(
        &self,
        parent: NodeId,
        child: NodeId,
        ignoring: Option<NodeId>,
    ) -> DomResult<()> {
        let child_kind = self.nodes[child.index()].kind();
        let parent_kind = self.nodes[parent.index()].kind();

        match child_kind {
            NodeKind::Document => {
                return Err(DomError::HierarchyRequest(
                    "a document node cannot be a child".into(),
                ));
            }
            NodeKind::Attribute => {
                return Err(DomError::HierarchyRequest(
                    "attribute nodes do not participate in the child tree".into(),
                ));
            }
            NodeKind::DocumentType if parent_kind != NodeKind::Document => {
                return Err(DomError::HierarchyRequest(
                    "a doctype may only be a child of the document".into(),
                ));
            }
            NodeKind::Text | NodeKind::Cdata if parent_kind == NodeKind::Document => {
                return Err(DomError::HierarchyRequest(
                    "character data may not appear directly under the document".into(),
                ));
            }
            _ => {}
        }

        if parent_kind == NodeKind::Document {
            let counts = |kind: NodeKind| {
                self.children(parent)
                    .iter()
                    .any(|&c| Some(c) != ignoring && self.nodes[c.index()].kind() == kind)
            };
            if child_kind == NodeKind::Element && counts(NodeKind::Element) {
                return Err(DomError::HierarchyRequest(
                    "document already has a document element".into(),
                ));
            }
            if child_kind == NodeKind::DocumentType && counts(NodeKind::DocumentType) {
                return Err(DomError::HierarchyRequest(
                    "document already has a doctype".into(),
                ));
            }
        }
        Ok(())
    }

    /// Clone a node. With `deep` the whole subtree is cloned; the clone is
    /// detached either way.
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> DomResult<NodeId> {
        let node = self.ensure(id)?;
        if matches!(node.data, NodeData::Document) {
            return Err(DomError::NotSupported(
                "cloning the document node is not supported".into(),
            ));
        }
        let data = node.data.clone();
        let new_id = self.alloc(data);
        if deep {
            let children = self.children(id).to_vec();
            for child in children {
                let cloned = self.clone_node(child, true)?;
                self.nodes[new_id.index()].children.push(cloned);
                self.nodes[cloned.index()].parent = new_id;
            }
        }
        Ok(new_id)
    }

    /// Adopt a subtree from another document. The subtree is detached from
    /// `source` and rebuilt in this document; the returned id is owned here
    /// and detached, ready for insertion.
    pub fn adopt(&mut self, source: &mut Document, id: NodeId) -> DomResult<NodeId> {
        let node = source.ensure(id)?;
        if matches!(node.data, NodeData::Document) {
            return Err(DomError::NotSupported(
                "adopting a document node is not supported".into(),
            ));
        }
        if let Some(parent) = source.parent(id) {
            source.remove_child(parent, id)?;
        }
        let adopted = self.import_subtree(source, id);
        tracing::debug!(source_id = id.0, new_id = adopted.0, "adopted foreign subtree");
        Ok(adopted)
    }

    fn import_subtree(&mut self, source: &Document, id: NodeId) -> NodeId {
        let data = source.nodes[id.index()].data.clone();
        let new_id = self.alloc(data);
        for &child in source.children(id) {
            let imported = self.import_subtree(source, child);
            self.nodes[new_id.index()].children.push(imported);
            self.nodes[imported.index()].parent = new_id;
        }
        new_id
    }

    /// Merge adjacent text children and drop empty text nodes, recursively.
    pub fn normalize(&mut self, id: NodeId) -> DomResult<()> {
        self.ensure(id)?;
        let children = self.children(id).to_vec();
        for child in children {
            self.normalize(child)?;
        }

        let mut i = 0;
        while i < self.children(id).len() {
            let current = self.children(id)[i];
            if !matches!(self.nodes[current.index()].data, NodeData::Text(_)) {
                i += 1;
                continue;
            }
            if self.node_value(current).unwrap_or("").is_empty() {
                self.remove_child(id, current)?;
                continue;
            }
            while i + 1 < self.children(id).len() {
                let next = self.children(id)[i + 1];
                if !matches!(self.nodes[next.index()].data, NodeData::Text(_)) {
                    break;
                }
                let tail = self.node_value(next).unwrap_or("").to_string();
                if let NodeData::Text(head) = &mut self.nodes[current.index()].data {
                    head.push_str(&tail);
                }
                self.remove_child(id, next)?;
            }
            i += 1;
        }
        Ok(())
    }

    /// Set an attribute on an element, returning the previous value.
    pub fn set_attribute(
        &mut self,
        element: NodeId,
        name: &str,
        value: &str,
    ) -> DomResult<Option<String>> {
        validate_name(name)?;
        let node = self
            .get_mut(element)
            .ok_or_else(|| DomError::NotFound(format!("no node #{} in this document", element.0)))?;
        let elem = node.as_element_mut().ok_or_else(|| {
            DomError::NotSupported("set_attribute target is not an element".into())
        })?;
        let prev = elem.attr(name).map(str::to_string);
        elem.set_attr(name, value);
        Ok(prev)
    }

    /// Remove an attribute from an element, returning the removed value.
    pub fn remove_attribute(&mut self, element: NodeId, name: &str) -> DomResult<Option<String>> {
        let node = self
            .get_mut(element)
            .ok_or_else(|| DomError::NotFound(format!("no node #{} in this document", element.0)))?;
        let elem = node.as_element_mut().ok_or_else(|| {
            DomError::NotSupported("remove_attribute target is not an element".into())
        })?;
        Ok(elem.remove_attr(name))
    }
}

fn validate_name(name: &str) -> DomResult<()> {
    let illegal = |c: char| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '\'' | '&' | '/');
    if name.is_empty() || name.chars().any(illegal) {
        return Err(DomError::InvalidCharacter(format!("illegal name '{name}'")));
    }
    Ok(())
}
