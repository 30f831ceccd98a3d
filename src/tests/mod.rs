// Copyright (c) 2025 Prefix Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Crate-level test modules.
//!
//! Engine tests live next to the engine in `trie::tests`; this module holds
//! the configuration and error tests plus shared fixtures and strategies.
