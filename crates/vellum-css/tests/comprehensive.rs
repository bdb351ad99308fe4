//! Comprehensive tests for vellum-css
//!
//! Selector determinism and grouped-alternative behavior over a larger tree.

use vellum_css::{query_selector, query_selector_all, SelectorGroup};
use vellum_dom::{Document, NodeId};

fn catalogue() -> (Document, NodeId) {
    // <catalogue>
    //   <section id="fiction"><book class="novel"/><book class="novel long"/></section>
    //   <section id="science"><book class="reference"/></section>
    // </catalogue>
    let mut doc = Document::new();
    let catalogue = doc.create_element("catalogue");
    doc.append_child(Document::ROOT, catalogue).unwrap();

    let fiction = doc.create_element("section");
    doc.append_child(catalogue, fiction).unwrap();
    doc.set_attribute(fiction, "id", "fiction").unwrap();
    let science = doc.create_element("section");
    doc.append_child(catalogue, science).unwrap();
    doc.set_attribute(science, "id", "science").unwrap();

    for (parent, class) in [
        (fiction, "novel"),
        (fiction, "novel long"),
        (science, "reference"),
    ] {
        let book = doc.create_element("book");
        doc.append_child(parent, book).unwrap();
        doc.set_attribute(book, "class", class).unwrap();
    }
    (doc, catalogue)
}

#[test]
fn test_query_selector_matches_head_of_query_all() {
    let (doc, root) = catalogue();
    for selectors in [
        "book",
        ".novel",
        "#fiction .long",
        "section > book",
        "book + book",
        "[class~=reference]",
        "missing",
    ] {
        let first = query_selector(&doc, root, selectors).unwrap();
        let all = query_selector_all(&doc, root, selectors).unwrap();
        assert_eq!(first, all.first().copied(), "selector {selectors}");
        assert_eq!(first.is_none(), all.is_empty(), "selector {selectors}");
    }
}

#[test]
fn test_alternative_index_reports_which_arm_matched() {
    let (doc, root) = catalogue();
    let group = SelectorGroup::parse("article, .reference, book").unwrap();

    let reference = query_selector(&doc, root, ".reference").unwrap().unwrap();
    assert_eq!(group.match_element(&doc, reference), Some(1));

    let novel = query_selector(&doc, root, ".novel").unwrap().unwrap();
    assert_eq!(group.match_element(&doc, novel), Some(2));
}

#[test]
fn test_parsed_group_is_reusable() {
    let (doc, root) = catalogue();
    let group = SelectorGroup::parse("section book").unwrap();
    assert_eq!(group.query_all(&doc, root).len(), 3);
    assert_eq!(group.text(), "section book");

    // Matching never mutates the group; a second pass agrees with the first.
    assert_eq!(group.query_all(&doc, root).len(), 3);
}

#[test]
fn test_non_elements_never_match() {
    let mut doc = Document::new();
    let root = doc.create_element("root");
    let text = doc.create_text("book");
    let comment = doc.create_comment("book");
    doc.append_child(Document::ROOT, root).unwrap();
    doc.append_child(root, text).unwrap();
    doc.append_child(root, comment).unwrap();

    let group = SelectorGroup::parse("*").unwrap();
    assert!(group.match_element(&doc, text).is_none());
    assert!(group.match_element(&doc, comment).is_none());
    assert!(group.query_all(&doc, root).is_empty());
}
