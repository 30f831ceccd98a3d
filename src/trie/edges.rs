// Copyright (c) 2025 Prefix Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Edge maps: the per-node mapping from one key element to its child.
//!
//! Two backings are provided. [`OrderedEdges`] keeps children in element
//! order, [`HashedEdges`] trades ordering for constant-time lookup. Both
//! behave identically for membership and linking.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

use fnv::FnvBuildHasher;
use hashbrown::HashMap;

use super::node::NodeId;

/// Mapping from a key element to the child node reached by that element.
///
/// Each element appears at most once per map. A missing entry means
/// "no such edge", which is distinct from an edge whose child is not terminal.
pub trait EdgeMap: Default {
    /// The key element labelling each edge.
    type Element;

    /// Returns the child linked under `element`, if any. Never creates.
    fn child(&self, element: &Self::Element) -> Option<NodeId>;

    /// Links `element` to `child`, returning the previously linked child.
    fn link(&mut self, element: Self::Element, child: NodeId) -> Option<NodeId>;

    /// Number of outgoing edges.
    fn len(&self) -> usize;

    /// Whether the node has no outgoing edges.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every edge.
    fn clear(&mut self);

    /// Visits every edge in the backing's iteration order.
    fn for_each_child<F>(&self, f: F)
    where
        F: FnMut(&Self::Element, NodeId);
}

/// Edge map backed by a B-tree; children are visited in ascending element order.
#[derive(Clone, PartialEq, Eq)]
pub struct OrderedEdges<E> {
    edges: BTreeMap<E, NodeId>,
}

impl<E> Default for OrderedEdges<E> {
    fn default() -> Self {
        Self {
            edges: BTreeMap::new(),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for OrderedEdges<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.edges.iter()).finish()
    }
}

impl<E: Ord> EdgeMap for OrderedEdges<E> {
    type Element = E;

    fn child(&self, element: &E) -> Option<NodeId> {
        self.edges.get(element).copied()
    }

    fn link(&mut self, element: E, child: NodeId) -> Option<NodeId> {
        self.edges.insert(element, child)
    }

    fn len(&self) -> usize {
        self.edges.len()
    }

    fn clear(&mut self) {
        self.edges.clear();
    }

    fn for_each_child<F>(&self, mut f: F)
    where
        F: FnMut(&E, NodeId),
    {
        for (element, &child) in &self.edges {
            f(element, child);
        }
    }
}

/// Edge map backed by a hashbrown table with the FNV hasher.
///
/// FNV is fast for the short keys edges carry (a single element). Iteration
/// order is unspecified.
#[derive(Clone)]
pub struct HashedEdges<E> {
    edges: HashMap<E, NodeId, FnvBuildHasher>,
}

impl<E> Default for HashedEdges<E> {
    fn default() -> Self {
        Self {
            edges: HashMap::with_hasher(FnvBuildHasher::default()),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for HashedEdges<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.edges.iter()).finish()
    }
}

impl<E: Hash + Eq> EdgeMap for HashedEdges<E> {
    type Element = E;

    fn child(&self, element: &E) -> Option<NodeId> {
        self.edges.get(element).copied()
    }

    fn link(&mut self, element: E, child: NodeId) -> Option<NodeId> {
        self.edges.insert(element, child)
    }

    fn len(&self) -> usize {
        self.edges.len()
    }

    fn clear(&mut self) {
        self.edges.clear();
    }

    fn for_each_child<F>(&self, mut f: F)
    where
        F: FnMut(&E, NodeId),
    {
        for (element, &child) in &self.edges {
            f(element, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise<M: EdgeMap<Element = char>>() {
        let mut edges = M::default();
        assert!(edges.is_empty());
        assert_eq!(edges.child(&'a'), None);

        assert_eq!(edges.link('a', NodeId::new(1)), None);
        assert_eq!(edges.link('b', NodeId::new(2)), None);
        assert_eq!(edges.len(), 2);
        assert_eq!(edges.child(&'a'), Some(NodeId::new(1)));
        assert_eq!(edges.child(&'c'), None);

        // Relinking reports the displaced child
        assert_eq!(edges.link('a', NodeId::new(3)), Some(NodeId::new(1)));
        assert_eq!(edges.len(), 2);

        edges.clear();
        assert!(edges.is_empty());
        assert_eq!(edges.child(&'b'), None);
    }

    #[test]
    fn test_ordered_edges() {
        exercise::<OrderedEdges<char>>();
    }

    #[test]
    fn test_hashed_edges() {
        exercise::<HashedEdges<char>>();
    }

    #[test]
    fn test_ordered_iteration_is_sorted() {
        let mut edges = OrderedEdges::default();
        for (i, c) in ['q', 'b', 'x', 'a'].into_iter().enumerate() {
            edges.link(c, NodeId::new(i + 1));
        }

        let mut seen = Vec::new();
        edges.for_each_child(|c, _| seen.push(*c));
        assert_eq!(seen, vec!['a', 'b', 'q', 'x']);
    }

    #[test]
    fn test_hashed_iteration_visits_all() {
        let mut edges = HashedEdges::default();
        for i in 0..32u8 {
            edges.link(i, NodeId::new(i as usize + 1));
        }

        let mut seen = Vec::new();
        edges.for_each_child(|e, child| seen.push((*e, child)));
        seen.sort();
        assert_eq!(seen.len(), 32);
        assert_eq!(seen[5], (5, NodeId::new(6)));
    }
}
