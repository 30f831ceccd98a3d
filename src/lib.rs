// Copyright (c) 2025 Prefix Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Prefix Trie Library
//!
//! A generic prefix tree mapping sequences of elements (characters, bytes,
//! or any comparable token) to values, with three insertion policies:
//! insert-if-absent, first-writer-wins propagation along the key path, and
//! last-writer-wins propagation.
//!
//! The engine lives in [`trie`]. The remaining modules provide the layered
//! [`config`] loading, [`logging`] setup, and [`error`] types shared by
//! applications embedding the trie.
//!
//! # Example
//!
//! ```
//! use prefix_trie::trie::CharTrie;
//!
//! let mut routes: CharTrie<&str> = CharTrie::new();
//! routes.propagate_insert_str("/api/users", "users").unwrap();
//! routes.propagate_insert_str("/api/orders", "orders").unwrap();
//!
//! // The first writer claimed every shared prefix
//! assert_eq!(routes.get_str("/api"), Some(&"users"));
//! assert_eq!(routes.get_str("/api/orders"), Some(&"orders"));
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod trie;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

use std::path::Path;

use tracing::warn;

pub use config::{ConfigLoader, LogConfig, Settings, Validate};
pub use error::{PrefixTrieError, PrefixTrieResult};
pub use trie::{Handle, Trie, TrieConfig, TrieError};

use error::config::ConfigError;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Loads [`Settings`] from `config_path` and the environment (prefix
/// [`config::ENV_PREFIX`]), then installs logging as configured. A missing
/// file is not an error: defaults and environment overrides are used and a
/// warning is logged.
///
/// # Returns
///
/// The settings in effect, so callers can build tries with
/// [`Trie::with_config`] from `settings.trie`.
pub fn init(config_path: Option<&Path>) -> PrefixTrieResult<Settings> {
    let (settings, missing) = match ConfigLoader::new(config_path, config::ENV_PREFIX).load() {
        Ok(settings) => (settings, None),
        Err(ConfigError::FileNotFound(path)) => {
            let settings = ConfigLoader::new(None::<&Path>, config::ENV_PREFIX).load()?;
            (settings, Some(path))
        }
        Err(e) => return Err(e.into()),
    };

    logging::init_logging(&settings.log)?;

    if let Some(path) = missing {
        warn!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
    }

    Ok(settings)
}
