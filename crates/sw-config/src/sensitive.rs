//! Engine configuration.
//!
//! Mirrors the options a host application hands to the engine: where the
//! dictionary comes from, how replacements and marks are rendered, and which
//! characters are treated as interference while scanning.

use crate::validate::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the initial dictionary is loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DictionaryMode {
    /// Word-list file at the resolved default location.
    #[default]
    File,
    /// In-memory list taken from `sensitive_words`.
    Array,
    /// Word-list file at an explicit path.
    Path(PathBuf),
}

impl From<String> for DictionaryMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "file" => DictionaryMode::File,
            "array" => DictionaryMode::Array,
            _ => DictionaryMode::Path(PathBuf::from(value)),
        }
    }
}

impl From<DictionaryMode> for String {
    fn from(mode: DictionaryMode) -> Self {
        match mode {
            DictionaryMode::File => "file".to_string(),
            DictionaryMode::Array => "array".to_string(),
            DictionaryMode::Path(path) => path.display().to_string(),
        }
    }
}

impl std::fmt::Display for DictionaryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DictionaryMode::File => write!(f, "file"),
            DictionaryMode::Array => write!(f, "array"),
            DictionaryMode::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// How `remove` unlinks words from the trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalMode {
    /// Unlink exactly the word's path and prune dead trailing nodes.
    #[default]
    Exact,
    /// Drop every first-level branch keyed by any character of the word.
    ///
    /// Kept for hosts that depend on the historical behavior. It removes
    /// unrelated words sharing a first character with any character of the
    /// removed word.
    LegacyShallow,
}

impl std::fmt::Display for RemovalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemovalMode::Exact => write!(f, "exact"),
            RemovalMode::LegacyShallow => write!(f, "legacy_shallow"),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitiveConfig {
    /// Dictionary source: `"file"`, `"array"` or a word-list path.
    #[serde(default)]
    pub mode: DictionaryMode,

    /// Override for the default word-list location used by `mode = "file"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_file: Option<PathBuf>,

    /// Initial words for `mode = "array"`.
    #[serde(default)]
    pub sensitive_words: Vec<String>,

    /// Expand replacements to the matched word's length.
    #[serde(default)]
    pub repeat: bool,

    /// Replacement text.
    #[serde(default = "default_replace_char")]
    pub replace_char: String,

    /// Tag name used by `mark`.
    #[serde(default = "default_mark_tag", alias = "mark")]
    pub mark_tag: String,

    /// Characters skipped while scanning.
    #[serde(default)]
    pub interference_factors: Vec<char>,

    /// Removal strategy for `remove`.
    #[serde(default)]
    pub removal_mode: RemovalMode,
}

fn default_replace_char() -> String {
    crate::DEFAULT_REPLACE_CHAR.to_string()
}

fn default_mark_tag() -> String {
    crate::DEFAULT_MARK_TAG.to_string()
}

impl Default for SensitiveConfig {
    fn default() -> Self {
        Self {
            mode: DictionaryMode::default(),
            word_file: None,
            sensitive_words: Vec::new(),
            repeat: false,
            replace_char: default_replace_char(),
            mark_tag: default_mark_tag(),
            interference_factors: Vec::new(),
            removal_mode: RemovalMode::default(),
        }
    }
}

impl SensitiveConfig {
    /// Config for an in-memory dictionary.
    pub fn array<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode: DictionaryMode::Array,
            sensitive_words: words.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Config for a dictionary file at an explicit path.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            mode: DictionaryMode::Path(path.into()),
            ..Self::default()
        }
    }

    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_replace_char(mut self, replace_char: impl Into<String>) -> Self {
        self.replace_char = replace_char.into();
        self
    }

    pub fn with_mark_tag(mut self, tag: impl Into<String>) -> Self {
        self.mark_tag = tag.into();
        self
    }

    pub fn with_interference_factors<I: IntoIterator<Item = char>>(mut self, chars: I) -> Self {
        self.interference_factors = chars.into_iter().collect();
        self
    }

    pub fn with_removal_mode(mut self, mode: RemovalMode) -> Self {
        self.removal_mode = mode;
        self
    }

    /// Load a config file, choosing the parser from the file extension.
    ///
    /// `.json`, `.yaml` and `.yml` are parsed accordingly; anything else is
    /// read as TOML. An empty file is rejected with
    /// [`ValidationError::EmptyConfig`].
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        if content.trim().is_empty() {
            return Err(ValidationError::EmptyConfig(path.display().to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Self::parse_json(&content),
            Some("yaml") | Some("yml") => Self::parse_yaml(&content),
            _ => Self::parse_toml(&content),
        }
    }

    /// Parse config from a TOML string.
    pub fn parse_toml(s: &str) -> ValidationResult<Self> {
        toml::from_str(s).map_err(|e| ValidationError::ParseError(format!("Invalid TOML: {}", e)))
    }

    /// Parse config from a JSON string.
    pub fn parse_json(s: &str) -> ValidationResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Parse config from a YAML string.
    pub fn parse_yaml(s: &str) -> ValidationResult<Self> {
        serde_yaml::from_str(s)
            .map_err(|e| ValidationError::ParseError(format!("Invalid YAML: {}", e)))
    }

    /// Word-list file backing this configuration, if any.
    ///
    /// `array` mode has no backing file. `file` mode prefers `word_file` and
    /// falls back to the resolved default location.
    pub fn word_file_path(&self) -> Option<PathBuf> {
        match &self.mode {
            DictionaryMode::Array => None,
            DictionaryMode::Path(path) => Some(path.clone()),
            DictionaryMode::File => self
                .word_file
                .clone()
                .or_else(crate::resolve::default_word_file),
        }
    }
}
