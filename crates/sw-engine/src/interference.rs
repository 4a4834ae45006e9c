//! Interference characters.
//!
//! Evasive input pads forbidden words with separators ("b a d", "b.a.d").
//! Characters in the set are stepped over while scanning without consuming a
//! trie edge, but stay inside the reported span so the original substring can
//! be located in the source text. Stored dictionary words are never filtered.

use std::collections::HashSet;

/// Set of characters that are invisible to matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterferenceSet {
    chars: HashSet<char>,
}

impl InterferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `ch` is skipped while scanning.
    #[inline]
    pub fn is_interference(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// Merge characters into the set.
    pub fn extend<I: IntoIterator<Item = char>>(&mut self, chars: I) {
        self.chars.extend(chars);
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Members in ascending order.
    pub fn to_sorted_vec(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.chars.iter().copied().collect();
        chars.sort_unstable();
        chars
    }

    /// `s` without its leading interference characters.
    pub fn trim_start<'a>(&self, s: &'a str) -> &'a str {
        s.trim_start_matches(|c| self.is_interference(c))
    }
}

impl FromIterator<char> for InterferenceSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            chars: iter.into_iter().collect(),
        }
    }
}
