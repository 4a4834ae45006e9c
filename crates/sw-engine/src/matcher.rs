//! Scanning text against the dictionary.
//!
//! The [`Matcher`] is a read-only view over a trie and an interference set.
//! Every start offset is walked through the trie; interference characters
//! advance the text position without consuming an edge. Once a word is found
//! the scan resumes after its span, so reported matches never overlap.

use crate::{InterferenceSet, Result, SensitiveError, Trie};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Match policy for a start offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Stop at the first word end on the path (shortest match).
    #[default]
    Minimal,
    /// Follow the path as far as the trie allows and keep the longest word.
    Maximal,
}

impl MatchType {
    /// Legacy numeric policy: `1` is minimal, anything else maximal.
    pub fn from_code(code: i64) -> Self {
        if code == 1 {
            MatchType::Minimal
        } else {
            MatchType::Maximal
        }
    }

    pub fn code(self) -> i64 {
        match self {
            MatchType::Minimal => 1,
            MatchType::Maximal => 2,
        }
    }
}

impl From<i32> for MatchType {
    fn from(code: i32) -> Self {
        MatchType::from_code(i64::from(code))
    }
}

impl std::str::FromStr for MatchType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimal" | "min" | "shortest" | "1" => Ok(MatchType::Minimal),
            "maximal" | "max" | "longest" | "2" => Ok(MatchType::Maximal),
            _ => Err(format!("unknown match type: {}", s)),
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Minimal => write!(f, "minimal"),
            MatchType::Maximal => write!(f, "maximal"),
        }
    }
}

/// One located occurrence of a dictionary word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Matched text as it appears in the input, interior interference included.
    pub word: String,

    /// Offset of `word` in the input, in characters.
    pub start: usize,

    /// Length of `word` in characters.
    pub char_len: usize,

    /// Byte range of `word` in the input.
    pub byte_range: Range<usize>,
}

/// Read-only scanner over a dictionary.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    trie: &'a Trie,
    interference: &'a InterferenceSet,
}

impl<'a> Matcher<'a> {
    pub fn new(trie: &'a Trie, interference: &'a InterferenceSet) -> Self {
        Self { trie, interference }
    }

    /// Whether `text` contains any dictionary word.
    ///
    /// Always uses minimal matching and returns at the first hit.
    pub fn check(&self, text: &str) -> bool {
        let chars: Vec<char> = text.chars().collect();
        (0..chars.len()).any(|start| self.walk(&chars, start, MatchType::Minimal).is_some())
    }

    /// Locate non-overlapping occurrences, left to right.
    ///
    /// A `limit` of zero returns every match.
    pub fn find(&self, text: &str, match_type: MatchType, limit: usize) -> Vec<Match> {
        let indexed: Vec<(usize, char)> = text.char_indices().collect();
        let chars: Vec<char> = indexed.iter().map(|&(_, ch)| ch).collect();
        let byte_at = |idx: usize| indexed.get(idx).map_or(text.len(), |&(b, _)| b);

        let mut matches = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let Some(span) = self.walk(&chars, start, match_type) else {
                start += 1;
                continue;
            };

            let end = start + span;
            let scanned = &text[byte_at(start)..byte_at(end)];
            let word = self.interference.trim_start(scanned);
            let lead_chars = span - word.chars().count();
            let byte_start = byte_at(start + lead_chars);

            matches.push(Match {
                word: word.to_string(),
                start: start + lead_chars,
                char_len: span - lead_chars,
                byte_range: byte_start..byte_start + word.len(),
            });

            if limit > 0 && matches.len() == limit {
                break;
            }

            start = end;
        }

        tracing::trace!(
            chars = chars.len(),
            matches = matches.len(),
            match_type = %match_type,
            "scan complete"
        );
        matches
    }

    /// Matched substrings, in scan order.
    pub fn get(&self, text: &str, match_type: MatchType, limit: usize) -> Vec<String> {
        self.find(text, match_type, limit)
            .into_iter()
            .map(|m| m.word)
            .collect()
    }

    /// Run a full detection pass whose result can feed several transforms.
    pub fn detect<'t>(&self, text: &'t str, match_type: MatchType) -> Detection<'t> {
        Detection {
            text,
            matches: self.find(text, match_type, 0),
        }
    }

    /// Replace every occurrence of every detected word.
    pub fn replace(
        &self,
        text: &str,
        replace_char: &str,
        repeat: bool,
        match_type: MatchType,
    ) -> Result<String> {
        if text.is_empty() {
            return Err(SensitiveError::EmptyText);
        }
        Ok(self.detect(text, match_type).replace(replace_char, repeat))
    }

    /// Wrap every occurrence of every detected word in `<tag>`…`</tag>`.
    pub fn mark(&self, text: &str, tag: &str, match_type: MatchType) -> Result<String> {
        if text.is_empty() {
            return Err(SensitiveError::EmptyText);
        }
        Ok(self.detect(text, match_type).mark(tag))
    }

    /// Walk the trie from `start`. Returns the scanned length in characters
    /// of the selected match, interference included.
    fn walk(&self, chars: &[char], start: usize, match_type: MatchType) -> Option<usize> {
        let mut node = self.trie.root();
        let mut matched = None;

        for (offset, &ch) in chars[start..].iter().enumerate() {
            if self.interference.is_interference(ch) {
                continue;
            }

            let Some(next) = node.child(ch) else {
                break;
            };
            node = next;

            if node.is_end() {
                matched = Some(offset + 1);
                if match_type == MatchType::Minimal {
                    break;
                }
            }
        }

        matched
    }
}

/// The matches found in one text by one scan.
///
/// Holding on to a detection lets `replace` and `mark` share a single scan
/// without any cache living on the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection<'t> {
    text: &'t str,
    matches: Vec<Match>,
}

impl<'t> Detection<'t> {
    pub fn text(&self) -> &'t str {
        self.text
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn is_clean(&self) -> bool {
        self.matches.is_empty()
    }

    /// Matched substrings, in scan order.
    pub fn words(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.word.as_str()).collect()
    }

    /// Matched substrings without duplicates, first occurrence first.
    pub fn distinct_words(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.matches
            .iter()
            .map(|m| m.word.as_str())
            .filter(|w| seen.insert(*w))
            .collect()
    }

    /// Replace each literal occurrence of a detected word.
    ///
    /// With `repeat`, the replacement is `replace_char` once per character of
    /// the word; otherwise a single `replace_char`.
    pub fn replace(&self, replace_char: &str, repeat: bool) -> String {
        substitute(self.text, &self.distinct_words(), |word| {
            if repeat {
                replace_char.repeat(word.chars().count())
            } else {
                replace_char.to_string()
            }
        })
    }

    /// Wrap each literal occurrence of a detected word in `<tag>`…`</tag>`.
    pub fn mark(&self, tag: &str) -> String {
        substitute(self.text, &self.distinct_words(), |word| {
            format!("<{tag}>{word}</{tag}>")
        })
    }
}

/// Single left-to-right pass replacing literal occurrences of `words`.
///
/// At each position the longest word that matches wins, and substituted text
/// is never rescanned, so one word inside another is not rewritten twice.
fn substitute<F>(text: &str, words: &[&str], render: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut words: Vec<&str> = words.iter().copied().filter(|w| !w.is_empty()).collect();
    if words.is_empty() {
        return text.to_string();
    }
    words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        match words.iter().find(|w| rest.starts_with(**w)) {
            Some(word) => {
                out.push_str(&render(word));
                rest = &rest[word.len()..];
            }
            None => {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    out
}
