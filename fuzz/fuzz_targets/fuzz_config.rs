//! Fuzz target for engine configuration parsing.
//!
//! Tests that TOML, JSON and YAML config parsing handles arbitrary input
//! without panicking, and that validation accepts or rejects what parses.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sw_config::{validate_config, SensitiveConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let parsed = [
        SensitiveConfig::parse_toml(text),
        SensitiveConfig::parse_json(text),
        SensitiveConfig::parse_yaml(text),
    ];
    for config in parsed.into_iter().flatten() {
        let _ = validate_config(&config);
    }
});
