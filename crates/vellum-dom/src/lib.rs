//! Vellum DOM - Document Object Model
//!
//! In-memory node tree with structural validation, capture/bubble event
//! dispatch, and the MediaList/StyleSheet registry. The tree is arena-based:
//! a [`Document`] owns every node it creates and hands out [`NodeId`] indices
//! instead of pointers, so parent back-references can never form ownership
//! cycles.

mod document;
mod error;
mod node;
mod ops;

pub mod events;
pub mod media;

pub use document::{Descendants, Document, NodeList};
pub use error::{DomError, DomResult};
pub use node::{Attr, ElementData, Node, NodeData, NodeKind};

/// Node identifier (index into the owning document's arena).
///
/// A `NodeId` is only meaningful against the [`Document`] that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node" (unlinked parent, absent related target).
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this id refers to a node at all.
    #[inline]
    pub fn is_some(self) -> bool {
        self != Self::NONE
    }

    /// Whether this is the "no node" sentinel.
    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Convert to `Option`, mapping the sentinel to `None`.
    #[inline]
    pub fn checked(self) -> Option<NodeId> {
        if self.is_some() { Some(self) } else { None }
    }
}
