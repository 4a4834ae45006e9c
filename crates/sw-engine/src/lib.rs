//! Sensitive-word detection engine.
//!
//! This crate loads a dictionary of forbidden words into a character trie and
//! scans text for them, tolerating configurable interference characters that
//! evasive input inserts between the characters of a word.
//!
//! # Key Features
//!
//! - **Minimal and maximal matching**: report the shortest or the longest
//!   dictionary word starting at each position.
//! - **Interference tolerance**: characters such as spaces or `*` are skipped
//!   while scanning but kept in the reported span.
//! - **One-shot removal**: words can be excluded from exactly the next scan and
//!   restored automatically afterwards.
//! - **Replace and mark**: rewrite text with a replacement or wrap matches in
//!   an HTML-style tag, sharing one detection pass.
//!
//! # Example
//!
//! ```no_run
//! use sw_engine::{MatchType, WordRegistry};
//!
//! let mut registry = WordRegistry::from_words(["工口", "里番"]).unwrap();
//! registry.interference_factor([' ', '*']);
//!
//! assert!(registry.check("我爱工 口漫画"));
//! let cleaned = registry
//!     .replace("我爱工口漫画", Some("*"), Some(true), MatchType::Minimal)
//!     .unwrap();
//! assert_eq!(cleaned, "我爱**漫画");
//! ```

pub mod error;
pub mod interference;
pub mod matcher;
pub mod registry;
pub mod trie;
pub mod wordlist;

pub use error::{Result, SensitiveError};
pub use interference::InterferenceSet;
pub use matcher::{Detection, Match, MatchType, Matcher};
pub use registry::{CustomSource, WordBatch, WordRegistry};
pub use trie::{Trie, TrieNode};
pub use wordlist::WordLines;

pub use sw_config::{DictionaryMode, RemovalMode, SensitiveConfig};
