//! Query surface over the document tree

use vellum_dom::{Document, NodeId};

use crate::{SelectorError, SelectorGroup};

/// First element under `root` (in document pre-order) matching the selector
/// text, or `None`. The walk stops at the first hit.
pub fn query_selector(
    doc: &Document,
    root: NodeId,
    selectors: &str,
) -> Result<Option<NodeId>, SelectorError> {
    let group = SelectorGroup::parse(selectors)?;
    Ok(group.query_first(doc, root))
}

/// All elements under `root` matching the selector text, in document order.
/// Returns an empty list (never an error) when nothing matches.
pub fn query_selector_all(
    doc: &Document,
    root: NodeId,
    selectors: &str,
) -> Result<Vec<NodeId>, SelectorError> {
    let group = SelectorGroup::parse(selectors)?;
    Ok(group.query_all(doc, root))
}

impl SelectorGroup {
    /// First matching descendant of `root`, short-circuiting.
    pub fn query_first(&self, doc: &Document, root: NodeId) -> Option<NodeId> {
        doc.descendants(root)
            .find(|&node| self.match_element(doc, node).is_some())
    }

    /// Every matching descendant of `root`, in document order.
    pub fn query_all(&self, doc: &Document, root: NodeId) -> Vec<NodeId> {
        doc.descendants(root)
            .filter(|&node| self.match_element(doc, node).is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> (Document, NodeId) {
        // <root><ul id="list"><li class="a"/><li class="b"/></ul><p class="a"/></root>
        let mut doc = Document::new();
        let root = doc.create_element("root");
        let ul = doc.create_element("ul");
        let li1 = doc.create_element("li");
        let li2 = doc.create_element("li");
        let p = doc.create_element("p");
        doc.append_child(Document::ROOT, root).unwrap();
        doc.append_child(root, ul).unwrap();
        doc.append_child(ul, li1).unwrap();
        doc.append_child(ul, li2).unwrap();
        doc.append_child(root, p).unwrap();
        doc.set_attribute(ul, "id", "list").unwrap();
        doc.set_attribute(li1, "class", "a").unwrap();
        doc.set_attribute(li2, "class", "b").unwrap();
        doc.set_attribute(p, "class", "a").unwrap();
        (doc, root)
    }

    #[test]
    fn test_query_selector_returns_first_in_document_order() {
        let (doc, root) = sample_doc();
        let first = query_selector(&doc, root, ".a").unwrap().unwrap();
        assert_eq!(doc.node_name(first), Some("li"));
    }

    #[test]
    fn test_query_selector_all_collects_in_document_order() {
        let (doc, root) = sample_doc();
        let all = query_selector_all(&doc, root, ".a").unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(doc.node_name(all[0]), Some("li"));
        assert_eq!(doc.node_name(all[1]), Some("p"));
    }

    #[test]
    fn test_first_hit_agrees_with_all() {
        let (doc, root) = sample_doc();
        for selectors in ["li", ".a", "#list li", "ul > li.b", "p, li"] {
            let first = query_selector(&doc, root, selectors).unwrap();
            let all = query_selector_all(&doc, root, selectors).unwrap();
            assert_eq!(first, all.first().copied(), "selector {selectors}");
        }
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let (doc, root) = sample_doc();
        assert_eq!(query_selector(&doc, root, "article").unwrap(), None);
        assert!(query_selector_all(&doc, root, "article").unwrap().is_empty());
    }

    #[test]
    fn test_queries_work_from_subtree_roots() {
        let (doc, root) = sample_doc();
        let ul = query_selector(&doc, root, "#list").unwrap().unwrap();
        let within = query_selector_all(&doc, ul, ".a").unwrap();
        assert_eq!(within.len(), 1);
        assert_eq!(doc.node_name(within[0]), Some("li"));
    }

    #[test]
    fn test_malformed_selector_surfaces_error() {
        let (doc, root) = sample_doc();
        assert!(query_selector(&doc, root, "[oops").is_err());
    }
}
