//! Fuzz target for dictionary scanning.
//!
//! Builds a trie from arbitrary words and scans arbitrary text, checking that
//! reported matches always point at real substrings and never overlap.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sw_engine::{InterferenceSet, MatchType, Matcher, Trie};

#[derive(Debug, Arbitrary)]
struct Input {
    words: Vec<String>,
    interference: Vec<char>,
    text: String,
    maximal: bool,
    limit: u8,
}

fuzz_target!(|input: Input| {
    let trie = Trie::from_words(&input.words);
    let interference: InterferenceSet = input.interference.iter().copied().collect();
    let matcher = Matcher::new(&trie, &interference);
    let match_type = if input.maximal {
        MatchType::Maximal
    } else {
        MatchType::Minimal
    };

    let matches = matcher.find(&input.text, match_type, usize::from(input.limit));
    let mut last_end = 0;
    for m in &matches {
        assert_eq!(&input.text[m.byte_range.clone()], m.word);
        assert!(m.byte_range.start >= last_end);
        last_end = m.byte_range.end;
    }
    let first = matcher.find(&input.text, MatchType::Minimal, 1);
    assert_eq!(matcher.check(&input.text), !first.is_empty());

    let detection = matcher.detect(&input.text, match_type);
    let _ = detection.replace("*", true);
    let _ = detection.mark("mark");
});
