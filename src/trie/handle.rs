// Copyright (c) 2025 Prefix Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Positional handles returned by insertion and lookup.

use std::hash::{Hash, Hasher};

use super::node::NodeId;

/// Opaque reference to an entry of a [`Trie`](super::Trie), together with
/// the full key that reaches it.
///
/// Two handles are equal when they point at the same node of the same trie
/// generation; their keys are not compared. A handle survives later
/// insertions but stops resolving once the trie is cleared.
///
/// The value is read back through [`Trie::resolve`](super::Trie::resolve),
/// [`Trie::value`](super::Trie::value) or [`Trie::value_mut`](super::Trie::value_mut).
#[derive(Debug, Clone)]
pub struct Handle<E> {
    node: NodeId,
    epoch: u64,
    key: Vec<E>,
}

impl<E> Handle<E> {
    pub(crate) fn new(node: NodeId, epoch: u64, key: Vec<E>) -> Self {
        Self { node, epoch, key }
    }

    pub(crate) fn node(&self) -> NodeId {
        self.node
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The key sequence that reaches the referenced entry.
    pub fn key(&self) -> &[E] {
        &self.key
    }

    /// Consumes the handle, returning its key.
    pub fn into_key(self) -> Vec<E> {
        self.key
    }
}

impl Handle<char> {
    /// Rebuilds the key of a character trie as a string.
    pub fn key_string(&self) -> String {
        self.key.iter().collect()
    }
}

impl Handle<u8> {
    /// The key of a byte trie, if it is valid UTF-8.
    pub fn key_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.key).ok()
    }
}

impl<E> PartialEq for Handle<E> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.epoch == other.epoch
    }
}

impl<E> Eq for Handle<E> {}

impl<E> Hash for Handle<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
        self.epoch.hash(state);
    }
}
