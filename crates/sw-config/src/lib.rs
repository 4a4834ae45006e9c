//! Sensitive-word engine configuration loading and validation.
//!
//! This crate provides:
//! - A typed [`SensitiveConfig`] with explicit defaults for every option
//! - Loading from TOML, JSON or YAML files
//! - Config and word-list path resolution (CLI → env → XDG → defaults)
//! - Semantic validation with stable error codes

pub mod resolve;
pub mod sensitive;
pub mod validate;

pub use resolve::{resolve_config, ConfigPaths, ConfigSource};
pub use sensitive::{DictionaryMode, RemovalMode, SensitiveConfig};
pub use validate::{validate_config, ValidationError, ValidationResult};

/// Replacement character used when none is configured.
pub const DEFAULT_REPLACE_CHAR: &str = "*";

/// Tag used by `mark` when none is configured.
pub const DEFAULT_MARK_TAG: &str = "mark";

/// Interference factors shipped in the sample configuration.
pub const COMMON_INTERFERENCE_FACTORS: &[char] =
    &[' ', '&', '*', '/', '|', '@', '.', '^', '~', '$'];
