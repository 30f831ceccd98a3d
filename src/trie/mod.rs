// Copyright (c) 2025 Prefix Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Generic prefix tree.
//!
//! A [`Trie`] maps key sequences (characters, bytes, or any comparable
//! tokens) to values, sharing common prefixes in a tree of single-element
//! edges. Three insertion policies are supported:
//!
//! - [`Trie::insert`]: insert-if-absent; an existing value is never replaced.
//! - [`Trie::propagate_insert`]: stamps the value on every prefix of the key
//!   that does not already hold one. The first writer of a prefix wins.
//! - [`Trie::propagate_insert_overwrite`]: stamps the value on every prefix
//!   of the key, replacing whatever was there. The last writer wins.
//!
//! Insertions and lookups hand back a [`Handle`]: an opaque reference to the
//! entry plus its reconstructed key. A failed lookup is simply `None`.
//!
//! # Example
//!
//! ```
//! use prefix_trie::trie::CharTrie;
//!
//! let mut trie: CharTrie<u32> = CharTrie::new();
//!
//! let (handle, inserted) = trie.insert_str("cat", 1).unwrap();
//! assert!(inserted);
//! assert_eq!(trie.resolve(&handle), Some((&['c', 'a', 't'][..], &1)));
//!
//! // Insert never overwrites
//! let (again, inserted) = trie.insert_str("cat", 2).unwrap();
//! assert!(!inserted);
//! assert_eq!(again, handle);
//! assert_eq!(trie.get_str("cat"), Some(&1));
//!
//! // Internal path nodes are not entries
//! assert!(trie.find_str("ca").is_none());
//! ```
//!
//! # Storage
//!
//! Nodes are kept in an arena and addressed by index, so handles remain
//! valid while the tree grows. The per-node edge map is pluggable through
//! [`EdgeMap`]: [`OrderedEdges`] (the default) keeps children sorted,
//! [`HashedEdges`] uses a hash table.

mod config;
mod edges;
mod error;
mod handle;
mod node;

#[cfg(test)]
mod tests;

use std::borrow::Borrow;
use std::ffi::CStr;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace, warn};

pub use config::{TrieConfig, MAX_INITIAL_CAPACITY};
pub use edges::{EdgeMap, HashedEdges, OrderedEdges};
pub use error::{TrieError, TrieResult};
pub use handle::Handle;
pub use node::NodeId;

use node::{Node, NodeArena};

/// Trie whose children are kept in element order.
pub type OrderedTrie<E, V> = Trie<E, V, OrderedEdges<E>>;

/// Trie whose children are kept in a hash table.
pub type HashedTrie<E, V> = Trie<E, V, HashedEdges<E>>;

/// Trie keyed by characters, typically fed from `&str`.
pub type CharTrie<V> = Trie<char, V>;

/// Trie keyed by bytes.
pub type ByteTrie<V> = Trie<u8, V>;

/// Source of arena epochs. Every trie and every `clear` draws a fresh one,
/// so handles never resolve against a foreign or rebuilt tree.
static NEXT_EPOCH: AtomicU64 = AtomicU64::new(1);

fn next_epoch() -> u64 {
    NEXT_EPOCH.fetch_add(1, Ordering::Relaxed)
}

/// Copies any iterable of element-like items into an owned key.
fn collect_key<E, K, T>(key: K) -> Vec<E>
where
    E: Clone,
    K: IntoIterator<Item = T>,
    T: Borrow<E>,
{
    key.into_iter()
        .map(|element| Borrow::<E>::borrow(&element).clone())
        .collect()
}

/// Where a path walk ended and whether its last node was newly marked.
struct Descent {
    node: NodeId,
    last_marked: bool,
}

/// A prefix tree mapping sequences of `E` to values of `V`.
///
/// `M` selects the per-node edge map; see [`OrderedEdges`] and
/// [`HashedEdges`].
///
/// Mutation needs `&mut self`, so the tree cannot be changed while any
/// reference obtained from it is alive. Lookups through `&self` may run
/// side by side.
pub struct Trie<E, V, M = OrderedEdges<E>> {
    /// Every node; slot zero is the root (the empty key)
    arena: NodeArena<V, M>,

    /// Number of terminal nodes
    len: usize,

    /// Identifies this generation of the arena for handle checks
    epoch: u64,

    /// Limits applied to insertions
    config: TrieConfig,

    _element: PhantomData<E>,
}

impl<E, V, M> Trie<E, V, M>
where
    E: Clone,
    M: EdgeMap<Element = E>,
{
    /// Creates an empty trie with default configuration.
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    /// Creates an empty trie with the specified configuration.
    ///
    /// If the arena cannot be pre-sized to `initial_capacity`, the trie
    /// starts with room for the root only and grows on demand; a warning is
    /// logged. Use [`Trie::try_with_config`] to treat that as an error.
    ///
    /// # Arguments
    ///
    /// * `config` - Limits and sizing for the trie.
    pub fn with_config(config: TrieConfig) -> Self {
        let mut arena = NodeArena::new();
        if let Err(e) = arena.try_reserve(config.initial_capacity.saturating_sub(1)) {
            warn!(
                initial_capacity = config.initial_capacity,
                error = %e,
                "Could not pre-size trie, growing on demand"
            );
        }
        Self::from_arena(arena, config)
    }

    /// Creates an empty trie, failing if `initial_capacity` nodes cannot be
    /// allocated up front.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::AllocationFailed`] when the reservation fails.
    pub fn try_with_config(config: TrieConfig) -> TrieResult<Self> {
        let mut arena = NodeArena::new();
        arena.try_reserve(config.initial_capacity.saturating_sub(1))?;
        Ok(Self::from_arena(arena, config))
    }

    fn from_arena(arena: NodeArena<V, M>, config: TrieConfig) -> Self {
        debug!(
            max_key_len = ?config.max_key_len,
            max_nodes = ?config.max_nodes,
            initial_capacity = config.initial_capacity,
            "Creating trie"
        );

        Self {
            arena,
            len: 0,
            epoch: next_epoch(),
            config,
            _element: PhantomData,
        }
    }

    /// Inserts `value` under `key` unless the key is already present.
    ///
    /// Missing nodes along the path are created. An existing entry keeps its
    /// value.
    ///
    /// # Returns
    ///
    /// * `Ok((handle, true))` - The key was added.
    /// * `Ok((handle, false))` - The key was already present; `handle` points at it.
    /// * `Err(TrieError)` - The path could not be built. The trie is unchanged.
    pub fn insert<K, T>(&mut self, key: K, value: V) -> TrieResult<(Handle<E>, bool)>
    where
        K: IntoIterator<Item = T>,
        T: Borrow<E>,
    {
        let key = collect_key(key);
        let end = self.descend(&key, |_| false)?.node;

        let inserted = self.arena.node_mut(end).mark_if_vacant(value);
        if inserted {
            self.len += 1;
        }

        trace!(key_len = key.len(), inserted, "insert");
        Ok((self.handle(end, key), inserted))
    }

    /// Inserts `value` at every node along `key`, root and final node
    /// included, that does not already hold a value.
    ///
    /// Nodes that are already terminal keep their value, so the first writer
    /// of any prefix wins.
    ///
    /// # Returns
    ///
    /// The handle of the final node and whether that node was newly marked.
    pub fn propagate_insert<K, T>(&mut self, key: K, value: V) -> TrieResult<(Handle<E>, bool)>
    where
        K: IntoIterator<Item = T>,
        T: Borrow<E>,
        V: Clone,
    {
        let key = collect_key(key);
        let descent = self.descend(&key, |node| {
            if node.is_terminal() {
                return false;
            }
            node.mark_terminal(value.clone());
            true
        })?;

        trace!(
            key_len = key.len(),
            inserted = descent.last_marked,
            "propagate_insert"
        );
        Ok((self.handle(descent.node, key), descent.last_marked))
    }

    /// Stores `value` at every node along `key`, root and final node
    /// included, replacing any value already there.
    ///
    /// # Returns
    ///
    /// The handle of the final node; the flag is always `true`.
    pub fn propagate_insert_overwrite<K, T>(
        &mut self,
        key: K,
        value: V,
    ) -> TrieResult<(Handle<E>, bool)>
    where
        K: IntoIterator<Item = T>,
        T: Borrow<E>,
        V: Clone,
    {
        let key = collect_key(key);
        let descent = self.descend(&key, |node| node.mark_terminal(value.clone()).is_none())?;

        trace!(key_len = key.len(), "propagate_insert_overwrite");
        Ok((self.handle(descent.node, key), true))
    }

    /// Looks up `key`.
    ///
    /// Only keys that were inserted are found; a key that merely lies on
    /// the path of a longer key is not.
    ///
    /// # Returns
    ///
    /// A handle to the entry, or `None` if the key is not present.
    pub fn find<K, T>(&self, key: K) -> Option<Handle<E>>
    where
        K: IntoIterator<Item = T>,
        T: Borrow<E>,
    {
        let key = collect_key(key);
        let found = self.locate(&key);
        trace!(key_len = key.len(), found = found.is_some(), "find");
        found.map(|node| self.handle(node, key))
    }

    /// Returns the value stored under `key`.
    pub fn get<K, T>(&self, key: K) -> Option<&V>
    where
        K: IntoIterator<Item = T>,
        T: Borrow<E>,
    {
        let node = self.locate(key)?;
        self.arena.node(node).value()
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut<K, T>(&mut self, key: K) -> Option<&mut V>
    where
        K: IntoIterator<Item = T>,
        T: Borrow<E>,
    {
        let node = self.locate(key)?;
        self.arena.node_mut(node).value_mut()
    }

    /// Whether `key` has been inserted.
    pub fn contains_key<K, T>(&self, key: K) -> bool
    where
        K: IntoIterator<Item = T>,
        T: Borrow<E>,
    {
        self.locate(key).is_some()
    }

    /// Dereferences a handle into its key and stored value.
    ///
    /// Returns `None` for handles of another trie or of a generation that
    /// has since been cleared.
    pub fn resolve<'a>(&'a self, handle: &'a Handle<E>) -> Option<(&'a [E], &'a V)> {
        let value = self.value(handle)?;
        Some((handle.key(), value))
    }

    /// The value referenced by `handle`.
    pub fn value(&self, handle: &Handle<E>) -> Option<&V> {
        if handle.epoch() != self.epoch {
            return None;
        }
        self.arena.get(handle.node())?.value()
    }

    /// Mutable access to the value referenced by `handle`.
    pub fn value_mut(&mut self, handle: &Handle<E>) -> Option<&mut V> {
        if handle.epoch() != self.epoch {
            return None;
        }
        self.arena.get_mut(handle.node())?.value_mut()
    }

    /// Whether no key is present.
    ///
    /// Holds exactly when the root has no children and is not itself an entry.
    pub fn is_empty(&self) -> bool {
        self.arena.root().is_vacant()
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// The configuration this trie was built with.
    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    /// Removes every entry and releases all nodes but the root.
    ///
    /// Node storage shrinks back to the configured `initial_capacity`.
    /// Handles obtained before the call no longer resolve.
    pub fn clear(&mut self) {
        debug!(
            entries = self.len,
            nodes = self.arena.len(),
            "Clearing trie"
        );
        self.arena.clear(self.config.initial_capacity);
        self.len = 0;
        self.epoch = next_epoch();
    }

    /// Walks `key` from the root, creating missing nodes, and calls `visit`
    /// on every node of the path (root first). `visit` returns whether it
    /// turned a non-terminal node into a terminal one.
    fn descend<F>(&mut self, key: &[E], mut visit: F) -> TrieResult<Descent>
    where
        F: FnMut(&mut Node<V, M>) -> bool,
    {
        self.reserve_path(key)?;

        let mut current = NodeId::ROOT;
        let mut last_marked = visit(self.arena.node_mut(current));
        let mut marked = usize::from(last_marked);

        for element in key {
            current = self.arena.child_for(current, element.clone());
            last_marked = visit(self.arena.node_mut(current));
            marked += usize::from(last_marked);
        }

        self.len += marked;
        Ok(Descent {
            node: current,
            last_marked,
        })
    }

    /// Checks limits and reserves storage for every node `key` still lacks.
    ///
    /// Runs before any node is created so a failure leaves the tree as it was.
    fn reserve_path(&mut self, key: &[E]) -> TrieResult<()> {
        if let Some(max) = self.config.max_key_len {
            if key.len() > max {
                warn!(len = key.len(), max, "Rejecting key longer than limit");
                return Err(TrieError::KeyTooLong {
                    len: key.len(),
                    max,
                });
            }
        }

        let missing = key.len() - self.arena.existing_depth(key);
        if missing == 0 {
            return Ok(());
        }
        self.reserve_nodes(missing)
    }

    /// Checks the node limit and reserves room for `missing` new nodes.
    fn reserve_nodes(&mut self, missing: usize) -> TrieResult<()> {
        if let Some(limit) = self.config.max_nodes {
            let required = self.arena.len().saturating_add(missing);
            if required > limit {
                warn!(required, limit, "Rejecting insertion past node limit");
                return Err(TrieError::NodeLimitExceeded { required, limit });
            }
        }

        self.arena.try_reserve(missing).map_err(|e| {
            warn!(missing, error = %e, "Failed to reserve trie nodes");
            TrieError::from(e)
        })
    }

    /// Finds the terminal node for `key` without building a handle.
    fn locate<K, T>(&self, key: K) -> Option<NodeId>
    where
        K: IntoIterator<Item = T>,
        T: Borrow<E>,
    {
        let mut current = NodeId::ROOT;
        for element in key {
            current = self
                .arena
                .node(current)
                .find_child(Borrow::<E>::borrow(&element))?;
        }

        if self.arena.node(current).is_terminal() {
            Some(current)
        } else {
            None
        }
    }

    fn handle(&self, node: NodeId, key: Vec<E>) -> Handle<E> {
        Handle::new(node, self.epoch, key)
    }

    /// Asserts the structural invariants of the tree.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut stack = vec![NodeId::ROOT];
        let mut reachable = 0;
        let mut terminals = 0;

        while let Some(id) = stack.pop() {
            let node = self.arena.node(id);
            reachable += 1;
            if node.is_terminal() {
                terminals += 1;
            }
            if id != NodeId::ROOT {
                assert!(!node.is_vacant(), "non-root node {id:?} is dead weight");
            }

            node.edges().for_each_child(|_, child| {
                assert_eq!(
                    self.arena.node(child).parent(),
                    Some(id),
                    "child {child:?} does not link back to {id:?}"
                );
                stack.push(child);
            });
        }

        assert_eq!(reachable, self.arena.len(), "unreachable nodes in arena");
        assert_eq!(terminals, self.len, "terminal count disagrees with len");
        assert_eq!(self.is_empty(), self.len == 0);
    }
}

impl<V, M> Trie<char, V, M>
where
    M: EdgeMap<Element = char>,
{
    /// [`Trie::insert`] for a string key.
    pub fn insert_str(&mut self, key: &str, value: V) -> TrieResult<(Handle<char>, bool)> {
        self.insert(key.chars(), value)
    }

    /// [`Trie::propagate_insert`] for a string key.
    pub fn propagate_insert_str(&mut self, key: &str, value: V) -> TrieResult<(Handle<char>, bool)>
    where
        V: Clone,
    {
        self.propagate_insert(key.chars(), value)
    }

    /// [`Trie::propagate_insert_overwrite`] for a string key.
    pub fn propagate_insert_overwrite_str(
        &mut self,
        key: &str,
        value: V,
    ) -> TrieResult<(Handle<char>, bool)>
    where
        V: Clone,
    {
        self.propagate_insert_overwrite(key.chars(), value)
    }

    /// [`Trie::find`] for a string key.
    pub fn find_str(&self, key: &str) -> Option<Handle<char>> {
        self.find(key.chars())
    }

    /// [`Trie::get`] for a string key.
    pub fn get_str(&self, key: &str) -> Option<&V> {
        self.get(key.chars())
    }
}

impl<V, M> Trie<u8, V, M>
where
    M: EdgeMap<Element = u8>,
{
    /// [`Trie::insert`] for a NUL-terminated key; the terminator is not part of the key.
    pub fn insert_cstr(&mut self, key: &CStr, value: V) -> TrieResult<(Handle<u8>, bool)> {
        self.insert(key.to_bytes(), value)
    }

    /// [`Trie::find`] for a NUL-terminated key.
    pub fn find_cstr(&self, key: &CStr) -> Option<Handle<u8>> {
        self.find(key.to_bytes())
    }
}

impl<E, V, M> Default for Trie<E, V, M>
where
    E: Clone,
    M: EdgeMap<Element = E>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, V, M> Clone for Trie<E, V, M>
where
    V: Clone,
    M: Clone,
{
    /// The copy starts its own epoch: handles keep resolving only against
    /// the trie that produced them.
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            len: self.len,
            epoch: next_epoch(),
            config: self.config.clone(),
            _element: PhantomData,
        }
    }
}

impl<E, V, M> fmt::Debug for Trie<E, V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("len", &self.len)
            .field("nodes", &self.arena.len())
            .field("epoch", &self.epoch)
            .field("config", &self.config)
            .finish()
    }
}
