// Copyright (c) 2025 Prefix Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Integration tests for the prefix trie through the public API.

use std::collections::HashSet;
use std::ffi::CString;

use prefix_trie::trie::{ByteTrie, CharTrie, HashedTrie, OrderedTrie, Trie, TrieConfig, TrieError};
use prefix_trie::{ConfigLoader, PrefixTrieError, Settings};

#[test]
fn test_insert_policies_end_to_end() {
    let mut trie: CharTrie<&str> = CharTrie::new();

    trie.insert_str("apple", "fruit").unwrap();
    trie.propagate_insert_str("application", "software").unwrap();
    trie.propagate_insert_overwrite_str("app", "short").unwrap();

    assert_eq!(trie.get_str("apple"), Some(&"fruit"));
    assert_eq!(trie.get_str("application"), Some(&"software"));
    assert_eq!(trie.get_str("applic"), Some(&"software"));
    assert_eq!(trie.get_str("app"), Some(&"short"));
    assert_eq!(trie.get_str("a"), Some(&"short"));
    assert_eq!(trie.get_str(""), Some(&"short"));
    assert_eq!(trie.get_str("appl"), Some(&"software"));
    assert!(trie.find_str("appla").is_none());
}

#[test]
fn test_handles_as_set_members() {
    let mut trie: CharTrie<u32> = CharTrie::new();
    let mut seen = HashSet::new();

    for (i, word) in ["one", "two", "three", "two"].iter().enumerate() {
        let (handle, _) = trie.insert_str(word, i as u32).unwrap();
        seen.insert(handle);
    }

    assert_eq!(seen.len(), 3);
    assert!(seen.contains(&trie.find_str("two").unwrap()));
}

#[test]
fn test_resolve_returns_key_and_value() {
    let mut trie: ByteTrie<&str> = ByteTrie::new();
    let key = CString::new("host").unwrap();
    trie.insert_cstr(&key, "localhost").unwrap();

    let handle = trie.find_cstr(&key).unwrap();
    let (found_key, value) = trie.resolve(&handle).unwrap();
    assert_eq!(found_key, b"host");
    assert_eq!(*value, "localhost");
    assert_eq!(handle.into_key(), b"host".to_vec());
}

#[test]
fn test_ordered_and_hashed_are_interchangeable() {
    let words = ["tea", "ted", "ten", "to", "inn", "in", "i", "a"];

    let mut ordered: OrderedTrie<char, usize> = OrderedTrie::new();
    let mut hashed: HashedTrie<char, usize> = HashedTrie::new();

    for (i, word) in words.iter().enumerate() {
        ordered.propagate_insert(word.chars(), i).unwrap();
        hashed.propagate_insert(word.chars(), i).unwrap();
    }

    assert_eq!(ordered.len(), hashed.len());
    assert_eq!(ordered.node_count(), hashed.node_count());
    for word in words.iter().chain(["t", "te", ""].iter()) {
        assert_eq!(ordered.get(word.chars()), hashed.get(word.chars()));
    }
}

#[test]
fn test_limits_from_settings() {
    let settings = Settings {
        trie: TrieConfig::new().with_max_nodes(3).with_initial_capacity(3),
        ..Settings::default()
    };
    let mut trie: Trie<u8, ()> = Trie::with_config(settings.trie.clone());

    trie.insert(b"ab", ()).unwrap();
    let err = trie.insert(b"b", ()).unwrap_err();
    assert_eq!(
        err,
        TrieError::NodeLimitExceeded {
            required: 4,
            limit: 3
        }
    );
    assert_eq!(trie.len(), 1);

    let wrapped: PrefixTrieError = err.into();
    assert!(wrapped.to_string().contains("limit is 3"));
}

#[test]
fn test_clear_and_reuse() {
    let mut trie: CharTrie<usize> = CharTrie::new();
    for round in 0..3 {
        for i in 0..100 {
            trie.insert_str(&format!("{round}-{i}"), i).unwrap();
        }
        assert_eq!(trie.len(), 100);
        trie.clear();
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
    }
}

#[test]
fn test_init_with_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let settings = prefix_trie::init(Some(missing.as_path())).unwrap();
    assert_eq!(settings, Settings::default());

    // A second subscriber cannot be installed
    assert!(matches!(
        prefix_trie::init(None),
        Err(PrefixTrieError::Logging(_))
    ));
}

#[test]
fn test_loader_from_public_api() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trie.toml");
    ConfigLoader::write_default(&path).unwrap();

    let settings = ConfigLoader::new(Some(&path), "PT_INTEGRATION").load().unwrap();
    let trie: CharTrie<u8> = CharTrie::with_config(settings.trie);
    assert!(trie.is_empty());
}
