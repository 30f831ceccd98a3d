// Copyright (c) 2025 Prefix Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for trie operations.
//!
//! Lookups never fail: a missing key is `None` and an existing key on insert
//! is reported through the `inserted` flag. Only growth of the tree can fail.

use std::collections::TryReserveError;

/// Errors that can occur while growing the trie.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum TrieError {
    /// Node storage for the new path could not be allocated.
    #[error("Failed to allocate trie nodes: {0}")]
    AllocationFailed(#[from] TryReserveError),

    /// The key is longer than the configured maximum.
    #[error("Key of length {len} exceeds maximum key length of {max}")]
    KeyTooLong {
        /// Length of the rejected key.
        len: usize,
        /// The configured maximum.
        max: usize,
    },

    /// Growing the tree would exceed the configured node limit.
    #[error("Insertion requires {required} nodes, limit is {limit}")]
    NodeLimitExceeded {
        /// Node count the insertion would have produced.
        required: usize,
        /// The configured maximum.
        limit: usize,
    },
}

/// Result type for trie operations
pub type TrieResult<T> = Result<T, TrieError>;
