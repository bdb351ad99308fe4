//! Vellum CSS - selector engine
//!
//! Parses selector text into an immutable [`SelectorGroup`] and matches it
//! against the document tree. Query entry points walk the tree in document
//! (pre)order: [`query_selector`] short-circuits at the first hit,
//! [`query_selector_all`] collects every match.

mod parser;
mod query;
mod selectors;

pub use query::{query_selector, query_selector_all};
pub use selectors::{
    AttributeMatcher, AttributeSelector, Combinator, CompoundSelector, SelectorGroup,
    SimpleSelector,
};

use thiserror::Error;
use vellum_dom::DomError;

/// Malformed selector text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid selector '{text}': {reason}")]
pub struct SelectorError {
    pub text: String,
    pub reason: String,
}

impl From<SelectorError> for DomError {
    fn from(err: SelectorError) -> Self {
        DomError::Syntax(err.to_string())
    }
}
