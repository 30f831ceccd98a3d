// Copyright (c) 2025 Prefix Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node storage for the prefix trie.
//!
//! Nodes live in a [`NodeArena`] and refer to each other through [`NodeId`]
//! indices. A child is owned by the arena; the parent back-link is an index
//! and can never dangle across a reallocation.

use std::collections::TryReserveError;

use super::edges::EdgeMap;

/// Stable index of a node inside its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root always occupies the first slot.
    pub(crate) const ROOT: NodeId = NodeId(0);

    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

/// A position in the trie reachable by consuming a prefix of some key.
#[derive(Debug, Clone)]
pub(crate) struct Node<V, M> {
    /// Outgoing edges keyed by element
    edges: M,

    /// Stored value; `Some` exactly when an inserted key ends here
    value: Option<V>,

    /// Owning node, `None` for the root
    parent: Option<NodeId>,
}

impl<V, M: Default> Node<V, M> {
    /// Creates an empty, non-terminal node.
    pub(crate) fn new(parent: Option<NodeId>) -> Self {
        Self {
            edges: M::default(),
            value: None,
            parent,
        }
    }
}

impl<V, M> Node<V, M> {
    /// Returns the existing child for `element`. Never creates.
    pub(crate) fn find_child(&self, element: &M::Element) -> Option<NodeId>
    where
        M: EdgeMap,
    {
        self.edges.child(element)
    }

    pub(crate) fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    /// Marks the node terminal with `value`, returning the value it replaced.
    pub(crate) fn mark_terminal(&mut self, value: V) -> Option<V> {
        self.value.replace(value)
    }

    /// Marks the node terminal only if it is not already.
    ///
    /// Returns `true` when the node was newly marked.
    pub(crate) fn mark_if_vacant(&mut self, value: V) -> bool {
        if self.value.is_some() {
            return false;
        }
        self.value = Some(value);
        true
    }

    pub(crate) fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        self.value.as_mut()
    }

    #[cfg(test)]
    pub(crate) fn edges(&self) -> &M {
        &self.edges
    }

    #[cfg(test)]
    pub(crate) fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Logically empty: not terminal and without children.
    pub(crate) fn is_vacant(&self) -> bool
    where
        M: EdgeMap,
    {
        !self.is_terminal() && self.edges.is_empty()
    }
}

/// Owner of every node in a trie. Slot zero is the root.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<V, M> {
    nodes: Vec<Node<V, M>>,
}

impl<V, M: Default> NodeArena<V, M> {
    /// Creates an arena holding only the root.
    ///
    /// Further room is claimed with [`NodeArena::try_reserve`] so that an
    /// oversized request surfaces as an error instead of aborting.
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::new(None)],
        }
    }

    /// Returns the child of `parent` for `element`, creating it if absent.
    ///
    /// Creation and parent linking happen together; callers reserve room
    /// up front with [`NodeArena::try_reserve`] so the push cannot abort
    /// halfway through a path.
    pub(crate) fn child_for(&mut self, parent: NodeId, element: M::Element) -> NodeId
    where
        M: EdgeMap,
    {
        if let Some(child) = self.nodes[parent.index()].find_child(&element) {
            debug_assert_eq!(
                self.nodes[child.index()].parent,
                Some(parent),
                "edge target does not link back to its owner"
            );
            return child;
        }

        let child = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(Some(parent)));
        self.nodes[parent.index()].edges.link(element, child);
        child
    }

    /// Releases every node except a fresh root and shrinks storage toward
    /// `retain` slots.
    pub(crate) fn clear(&mut self, retain: usize) {
        self.nodes.clear();
        self.nodes.shrink_to(retain.max(1));
        self.nodes.push(Node::new(None));
    }
}

impl<V, M> NodeArena<V, M> {
    pub(crate) fn node(&self, id: NodeId) -> &Node<V, M> {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<V, M> {
        &mut self.nodes[id.index()]
    }

    /// Looks up a node by id, tolerating ids that do not belong to this arena.
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<V, M>> {
        self.nodes.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<V, M>> {
        self.nodes.get_mut(id.index())
    }

    pub(crate) fn root(&self) -> &Node<V, M> {
        self.node(NodeId::ROOT)
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Makes room for `additional` new nodes without creating any.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.nodes.try_reserve(additional)
    }

    /// Number of leading key elements whose path already exists.
    pub(crate) fn existing_depth(&self, key: &[M::Element]) -> usize
    where
        M: EdgeMap,
    {
        let mut current = NodeId::ROOT;
        for (depth, element) in key.iter().enumerate() {
            match self.node(current).find_child(element) {
                Some(child) => current = child,
                None => return depth,
            }
        }
        key.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::edges::OrderedEdges;

    type Arena = NodeArena<u32, OrderedEdges<char>>;

    #[test]
    fn test_new_node_is_vacant() {
        let node: Node<u32, OrderedEdges<char>> = Node::new(None);
        assert!(!node.is_terminal());
        assert!(node.is_vacant());
        assert_eq!(node.value(), None);
        assert_eq!(node.parent(), None);
    }

    #[test]
    fn test_mark_terminal_replaces() {
        let mut node: Node<u32, OrderedEdges<char>> = Node::new(None);
        assert_eq!(node.mark_terminal(1), None);
        assert!(node.is_terminal());
        assert_eq!(node.mark_terminal(2), Some(1));
        assert_eq!(node.value(), Some(&2));
    }

    #[test]
    fn test_mark_if_vacant_keeps_first() {
        let mut node: Node<u32, OrderedEdges<char>> = Node::new(None);
        assert!(node.mark_if_vacant(7));
        assert!(!node.mark_if_vacant(8));
        assert_eq!(node.value(), Some(&7));
    }

    #[test]
    fn test_child_for_creates_once() {
        let mut arena = Arena::new();
        let a = arena.child_for(NodeId::ROOT, 'a');
        let again = arena.child_for(NodeId::ROOT, 'a');
        assert_eq!(a, again);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.node(a).parent(), Some(NodeId::ROOT));
        assert_eq!(arena.root().find_child(&'a'), Some(a));
        assert_eq!(arena.root().find_child(&'b'), None);
    }

    #[test]
    fn test_existing_depth() {
        let mut arena = Arena::new();
        let a = arena.child_for(NodeId::ROOT, 'a');
        arena.child_for(a, 'b');

        assert_eq!(arena.existing_depth(&['a', 'b']), 2);
        assert_eq!(arena.existing_depth(&['a', 'b', 'c']), 2);
        assert_eq!(arena.existing_depth(&['x']), 0);
        assert_eq!(arena.existing_depth(&[]), 0);
    }

    #[test]
    fn test_clear_keeps_only_root() {
        let mut arena = Arena::new();
        let a = arena.child_for(NodeId::ROOT, 'a');
        arena.node_mut(a).mark_terminal(3);
        arena.node_mut(NodeId::ROOT).mark_terminal(1);

        arena.clear(4);
        assert_eq!(arena.len(), 1);
        assert!(arena.root().is_vacant());
        assert!(arena.get(a).is_none());
    }

    #[test]
    fn test_clear_releases_storage() {
        let mut arena = Arena::new();
        let mut parent = NodeId::ROOT;
        for _ in 0..4_096 {
            parent = arena.child_for(parent, 'x');
        }
        assert!(arena.capacity() >= 4_097);

        arena.clear(16);
        assert_eq!(arena.len(), 1);
        assert!(arena.capacity() < 4_097);
    }

    #[test]
    fn test_failed_reservation_leaves_arena_unchanged() {
        let mut arena = Arena::new();
        let a = arena.child_for(NodeId::ROOT, 'a');
        arena.node_mut(a).mark_terminal(3);

        assert!(arena.try_reserve(usize::MAX).is_err());
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.node(a).value(), Some(&3));
        assert_eq!(arena.root().find_child(&'a'), Some(a));
    }
}
