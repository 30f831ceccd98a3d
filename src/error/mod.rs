// Copyright (c) 2025 Prefix Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error module for the prefix trie crate.
//!
//! Engine errors live with the engine as [`TrieError`]; this module gathers
//! them with configuration and setup failures under [`PrefixTrieError`].

use thiserror::Error;

pub mod config;

pub use crate::trie::TrieError;

/// Result type alias for crate-level operations.
pub type PrefixTrieResult<T> = Result<T, PrefixTrieError>;

/// Crate-wide error enum.
#[derive(Error, Debug)]
pub enum PrefixTrieError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors raised by trie insertion.
    #[error("Trie error: {0}")]
    Trie(#[from] TrieError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}
