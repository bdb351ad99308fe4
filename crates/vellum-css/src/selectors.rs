//! Parsed selector representation and tree matching
//!
//! A [`SelectorGroup`] is immutable once parsed. Matching walks a compound
//! chain right-to-left: the rightmost compound must match the candidate
//! element, then each combinator moves the anchor left through the tree.

use vellum_dom::{Document, Node, NodeId};

use crate::parser;
use crate::SelectorError;

/// One or more comma-separated selector alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorGroup {
    pub(crate) selectors: Vec<ComplexSelector>,
    text: String,
}

/// A chain of compound selectors joined by combinators, stored
/// left-to-right. The combinator paired with a compound links it to the
/// compound on its left; the leftmost entry's combinator is unused.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ComplexSelector {
    pub(crate) parts: Vec<(Combinator, CompoundSelector)>,
}

/// How two compounds in a chain relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace: any ancestor
    Descendant,
    /// `>`: parent
    Child,
    /// `+`: immediately preceding element sibling
    NextSibling,
    /// `~`: any preceding element sibling
    SubsequentSibling,
}

/// A sequence of simple selectors applying to one element.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector {
    pub components: Vec<SimpleSelector>,
}

/// A single test against one element.
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleSelector {
    /// Universal selector `*`
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// ID selector `#id`
    Id(String),
    /// Class selector `.class`
    Class(String),
    /// Attribute selector `[attr]`, `[attr=value]`, etc.
    Attribute(AttributeSelector),
}

/// Attribute presence/value test.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// `[attr=value]` - exact match
    Exact(String),
    /// `[attr~=value]` - whitespace-separated list contains
    Includes(String),
    /// `[attr|=value]` - exact or hyphen-prefixed
    DashMatch(String),
    /// `[attr^=value]` - starts with
    Prefix(String),
    /// `[attr$=value]` - ends with
    Suffix(String),
    /// `[attr*=value]` - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match (&self.matcher, value) {
            (None, Some(_)) => true,
            (_, None) => false,
            (Some(matcher), Some(val)) => match matcher {
                AttributeMatcher::Exact(expected) => val == expected,
                AttributeMatcher::Includes(expected) => {
                    val.split_whitespace().any(|w| w == expected)
                }
                AttributeMatcher::DashMatch(expected) => {
                    val == expected || val.strip_prefix(expected.as_str()).is_some_and(|rest| rest.starts_with('-'))
                }
                AttributeMatcher::Prefix(expected) => val.starts_with(expected),
                AttributeMatcher::Suffix(expected) => val.ends_with(expected),
                AttributeMatcher::Substring(expected) => val.contains(expected.as_str()),
            },
        }
    }
}

impl SelectorGroup {
    /// Parse selector text into an immutable group.
    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        let selectors = parser::parse_group(text)?;
        Ok(Self {
            selectors,
            text: text.to_string(),
        })
    }

    /// The original selector text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of comma-separated alternatives.
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Match a node against the group. Returns the index of the first
    /// alternative that matches, so callers can disambiguate specificity.
    pub fn match_element(&self, doc: &Document, node: NodeId) -> Option<usize> {
        if !doc.get(node).is_some_and(Node::is_element) {
            return None;
        }
        self.selectors
            .iter()
            .position(|complex| match_complex(doc, node, &complex.parts))
    }
}

fn match_complex(doc: &Document, node: NodeId, parts: &[(Combinator, CompoundSelector)]) -> bool {
    let Some(((combinator, compound), rest)) = parts.split_last().map(|(l, r)| ((&l.0, &l.1), r))
    else {
        return true;
    };
    if !match_compound(doc, node, compound) {
        return false;
    }
    if rest.is_empty() {
        return true;
    }
    match combinator {
        Combinator::Descendant => {
            let mut cursor = doc.parent(node);
            while let Some(ancestor) = cursor {
                if match_complex(doc, ancestor, rest) {
                    return true;
                }
                cursor = doc.parent(ancestor);
            }
            false
        }
        Combinator::Child => doc
            .parent(node)
            .is_some_and(|parent| match_complex(doc, parent, rest)),
        Combinator::NextSibling => {
            prev_element_sibling(doc, node).is_some_and(|prev| match_complex(doc, prev, rest))
        }
        Combinator::SubsequentSibling => {
            let mut cursor = prev_element_sibling(doc, node);
            while let Some(prev) = cursor {
                if match_complex(doc, prev, rest) {
                    return true;
                }
                cursor = prev_element_sibling(doc, prev);
            }
            false
        }
    }
}

fn match_compound(doc: &Document, node: NodeId, compound: &CompoundSelector) -> bool {
    compound
        .components
        .iter()
        .all(|simple| match_simple(doc, node, simple))
}

fn match_simple(doc: &Document, node: NodeId, simple: &SimpleSelector) -> bool {
    let Some(elem) = doc.get(node).and_then(Node::as_element) else {
        return false;
    };
    match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(tag) => elem.name == *tag,
        SimpleSelector::Id(id) => elem.id() == Some(id),
        SimpleSelector::Class(class) => elem.classes().any(|c| c == class),
        SimpleSelector::Attribute(attr) => attr.matches(elem.attr(&attr.name)),
    }
}

fn prev_element_sibling(doc: &Document, node: NodeId) -> Option<NodeId> {
    let mut cursor = doc.prev_sibling(node);
    while let Some(prev) = cursor {
        if doc.get(prev).is_some_and(Node::is_element) {
            return Some(prev);
        }
        cursor = doc.prev_sibling(prev);
    }
    None
}
