// Copyright (c) 2025 Prefix Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration options for the prefix trie.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigResult, Validate};
use crate::error::config::ConfigError;

/// Largest accepted `initial_capacity`; larger tries grow on demand.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 20;

/// Configuration for a [`Trie`](super::Trie).
///
/// All limits are optional; the default configuration accepts keys of any
/// length and grows without bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieConfig {
    /// Maximum number of elements in an inserted key
    pub max_key_len: Option<usize>,

    /// Maximum number of nodes, root included
    pub max_nodes: Option<usize>,

    /// Number of node slots to allocate up front
    pub initial_capacity: usize,
}

impl TrieConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum key length accepted by insertions.
    ///
    /// # Arguments
    ///
    /// * `max_key_len` - Longest key, in elements. Zero admits only the empty key.
    ///
    /// # Returns
    ///
    /// Self with the updated configuration.
    pub fn with_max_key_len(mut self, max_key_len: usize) -> Self {
        self.max_key_len = Some(max_key_len);
        self
    }

    /// Sets the maximum number of nodes the trie may hold.
    ///
    /// # Arguments
    ///
    /// * `max_nodes` - Node budget, counting the root.
    ///
    /// # Returns
    ///
    /// Self with the updated configuration.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Sets how many node slots are allocated when the trie is created.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self {
            max_key_len: None,
            max_nodes: None,
            initial_capacity: 64,
        }
    }
}

impl Validate for TrieConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(ConfigError::ValidationError(format!(
                "initial_capacity ({}) must be less than or equal to {}",
                self.initial_capacity, MAX_INITIAL_CAPACITY
            )));
        }

        if let Some(max_nodes) = self.max_nodes {
            // The root always exists
            if max_nodes == 0 {
                return Err(ConfigError::ValidationError(
                    "max_nodes must be greater than 0".to_string(),
                ));
            }

            if self.initial_capacity > max_nodes {
                return Err(ConfigError::ValidationError(format!(
                    "initial_capacity ({}) must be less than or equal to max_nodes ({})",
                    self.initial_capacity, max_nodes
                )));
            }
        }

        Ok(())
    }
}
