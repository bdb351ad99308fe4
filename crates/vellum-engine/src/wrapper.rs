//! Script-wrapper cache
//!
//! Extension point for a scripting bridge: each native node gets exactly
//! one script-visible wrapper, created on first request and returned on
//! every later one. The cache is owned by the bridge and passed around
//! explicitly, never ambient state.

use std::collections::HashMap;

use vellum_dom::NodeId;

/// One wrapper per node identity, created lazily.
#[derive(Debug)]
pub struct WrapperCache<W> {
    wrappers: HashMap<NodeId, W>,
}

impl<W> Default for WrapperCache<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> WrapperCache<W> {
    pub fn new() -> Self {
        Self {
            wrappers: HashMap::new(),
        }
    }

    /// The wrapper for `node`, creating it on first request. Idempotent:
    /// later calls return the wrapper made by the first, and `create` is
    /// not run again.
    pub fn get_or_create(&mut self, node: NodeId, create: impl FnOnce(NodeId) -> W) -> &mut W {
        self.wrappers.entry(node).or_insert_with(|| {
            tracing::trace!(?node, "creating wrapper");
            create(node)
        })
    }

    /// The wrapper for `node`, if one was already created.
    pub fn get(&self, node: NodeId) -> Option<&W> {
        self.wrappers.get(&node)
    }

    /// Drop the wrapper for a node (e.g. when the bridge releases it).
    pub fn remove(&mut self, node: NodeId) -> Option<W> {
        self.wrappers.remove(&node)
    }

    pub fn len(&self) -> usize {
        self.wrappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wrappers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_dom::Document;

    #[test]
    fn test_wrapper_created_exactly_once() {
        let mut doc = Document::new();
        let node = doc.create_element("div");
        let mut cache: WrapperCache<String> = WrapperCache::new();
        let mut creations = 0;

        for _ in 0..3 {
            let wrapper = cache.get_or_create(node, |id| {
                creations += 1;
                format!("wrapper-{:?}", id)
            });
            assert!(wrapper.starts_with("wrapper-"));
        }
        assert_eq!(creations, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_nodes_get_distinct_wrappers() {
        let mut doc = Document::new();
        let a = doc.create_element("a");
        let b = doc.create_element("b");
        let mut cache: WrapperCache<u32> = WrapperCache::new();

        *cache.get_or_create(a, |_| 1) += 10;
        cache.get_or_create(b, |_| 2);
        assert_eq!(cache.get(a), Some(&11));
        assert_eq!(cache.get(b), Some(&2));

        assert_eq!(cache.remove(a), Some(11));
        assert_eq!(cache.get(a), None);
    }
}
