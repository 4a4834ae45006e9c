//! Fuzz target for word-list parsing.
//!
//! Tests that line-by-line loading handles arbitrary bytes without panicking
//! and never yields an empty word.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use sw_engine::WordLines;

fuzz_target!(|data: &[u8]| {
    for word in WordLines::new(Cursor::new(data), "fuzz").flatten() {
        assert!(!word.is_empty());
    }
});
