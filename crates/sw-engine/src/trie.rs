//! Character trie holding the sensitive-word dictionary.
//!
//! Each edge is one Unicode scalar value; a node flagged `is_end` terminates a
//! dictionary word. Parents own their children exclusively, so the structure is
//! a strict tree with no back-references.

use std::collections::HashMap;
use sw_config::RemovalMode;

/// A node in the word trie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieNode {
    children: HashMap<char, TrieNode>,
    is_end: bool,
}

impl TrieNode {
    /// Child reached by `ch`, if any.
    #[inline]
    pub fn child(&self, ch: char) -> Option<&TrieNode> {
        self.children.get(&ch)
    }

    /// Whether the path from the root to this node spells a dictionary word.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.is_end
    }

    /// Number of outgoing edges.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Node carries no word and leads nowhere.
    fn is_dead(&self) -> bool {
        !self.is_end && self.children.is_empty()
    }

    fn depth(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.depth())
            .max()
            .unwrap_or(0)
    }

    fn count_words(&self) -> usize {
        usize::from(self.is_end)
            + self
                .children
                .values()
                .map(TrieNode::count_words)
                .sum::<usize>()
    }

    fn collect_words(&self, prefix: &mut String, out: &mut Vec<String>) {
        if self.is_end {
            out.push(prefix.clone());
        }
        for (&ch, child) in &self.children {
            prefix.push(ch);
            child.collect_words(prefix, out);
            prefix.pop();
        }
    }
}

/// The dictionary automaton.
///
/// The root never terminates a word; the empty string is not a valid entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trie {
    root: TrieNode,
}

impl Trie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trie from a sequence of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for word in words {
            trie.insert(word.as_ref());
        }
        trie
    }

    /// Root node for traversal.
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Insert a word. Returns `true` if it was not already present.
    ///
    /// Inserting the empty string is a no-op.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }

        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }

        let added = !node.is_end;
        node.is_end = true;
        added
    }

    /// Remove a word using the given strategy.
    pub fn remove(&mut self, word: &str, mode: RemovalMode) -> bool {
        match mode {
            RemovalMode::Exact => self.remove_word(word),
            RemovalMode::LegacyShallow => self.remove_shallow(word),
        }
    }

    /// Remove exactly `word`, pruning trailing nodes left without purpose.
    ///
    /// Prefixes and extensions of `word` that are themselves dictionary words
    /// are kept. Returns `true` if the word was present.
    pub fn remove_word(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let chars: Vec<char> = word.chars().collect();
        remove_path(&mut self.root, &chars)
    }

    /// Historical removal: drop every first-level branch keyed by any
    /// character of `word`.
    ///
    /// This discards unrelated words too and is only reachable through
    /// [`RemovalMode::LegacyShallow`]. Returns `true` if any branch was dropped.
    pub fn remove_shallow(&mut self, word: &str) -> bool {
        let mut removed = false;
        for ch in word.chars() {
            removed |= self.root.children.remove(&ch).is_some();
        }
        removed
    }

    /// Whether `word` is a dictionary entry.
    pub fn contains(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let mut node = &self.root;
        for ch in word.chars() {
            match node.child(ch) {
                Some(next) => node = next,
                None => return false,
            }
        }
        node.is_end
    }

    /// No words stored.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Number of dictionary words.
    pub fn word_count(&self) -> usize {
        self.root.count_words()
    }

    /// Length in characters of the longest root-to-leaf path.
    pub fn max_depth(&self) -> usize {
        self.root.depth()
    }

    /// All dictionary words, sorted.
    pub fn words(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.root.collect_words(&mut String::new(), &mut out);
        out.sort();
        out
    }
}

fn remove_path(node: &mut TrieNode, chars: &[char]) -> bool {
    let Some((&first, rest)) = chars.split_first() else {
        let was_end = node.is_end;
        node.is_end = false;
        return was_end;
    };

    let Some(child) = node.children.get_mut(&first) else {
        return false;
    };

    let removed = remove_path(child, rest);
    if removed && child.is_dead() {
        node.children.remove(&first);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let mut trie = Trie::new();
        assert!(trie.insert("工口"));
        assert!(trie.contains("工口"));
        assert!(!trie.contains("工"));
        assert!(!trie.contains("工口漫"));
    }

    #[test]
    fn test_insert_idempotent() {
        let mut trie = Trie::new();
        assert!(trie.insert("bad"));
        assert!(!trie.insert("bad"));
        assert_eq!(trie.word_count(), 1);
    }

    #[test]
    fn test_insert_empty_is_noop() {
        let mut trie = Trie::new();
        assert!(!trie.insert(""));
        assert!(trie.is_empty());
        assert!(!trie.root().is_end());
    }

    #[test]
    fn test_remove_word_keeps_prefix_word() {
        let mut trie = Trie::from_words(["ab", "abc"]);
        assert!(trie.remove_word("abc"));
        assert!(trie.contains("ab"));
        assert!(!trie.contains("abc"));
        // The 'c' node is pruned, 'b' stays as an end node.
        let b = trie.root().child('a').and_then(|a| a.child('b')).unwrap();
        assert_eq!(b.child_count(), 0);
    }

    #[test]
    fn test_remove_word_keeps_extension_word() {
        let mut trie = Trie::from_words(["ab", "abc"]);
        assert!(trie.remove_word("ab"));
        assert!(!trie.contains("ab"));
        assert!(trie.contains("abc"));
    }

    #[test]
    fn test_remove_word_prunes_whole_branch() {
        let mut trie = Trie::from_words(["xyz", "abc"]);
        assert!(trie.remove_word("xyz"));
        assert!(trie.root().child('x').is_none());
        assert!(trie.contains("abc"));
    }

    #[test]
    fn test_remove_word_leaves_unrelated_first_level() {
        // Historical removal would drop "bat" here because 'b' occurs in "abc".
        let mut trie = Trie::from_words(["abc", "bat"]);
        assert!(trie.remove_word("abc"));
        assert!(trie.contains("bat"));
    }

    #[test]
    fn test_remove_missing_word() {
        let mut trie = Trie::from_words(["abc"]);
        assert!(!trie.remove_word("ab"));
        assert!(!trie.remove_word("abcd"));
        assert!(!trie.remove_word(""));
        assert!(trie.contains("abc"));
    }

    #[test]
    fn test_remove_shallow_drops_first_level_branches() {
        let mut trie = Trie::from_words(["abc", "bat", "zoo"]);
        assert!(trie.remove("abc", RemovalMode::LegacyShallow));
        assert!(!trie.contains("abc"));
        assert!(!trie.contains("bat"));
        assert!(trie.contains("zoo"));
    }

    #[test]
    fn test_word_count_and_depth() {
        let trie = Trie::from_words(["工口", "里番", "性感美女", "性感"]);
        assert_eq!(trie.word_count(), 4);
        assert_eq!(trie.max_depth(), 4);
    }

    #[test]
    fn test_words_sorted() {
        let trie = Trie::from_words(["b", "a", "ab"]);
        assert_eq!(trie.words(), vec!["a", "ab", "b"]);
    }
}
