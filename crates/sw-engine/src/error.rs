//! Error types for the sensitive-word engine.

use std::path::PathBuf;
use sw_config::ValidationError;
use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, SensitiveError>;

/// Errors surfaced by the engine.
///
/// Every variant carries a stable [`code`](SensitiveError::code) so callers
/// can decide recovery (for example falling back to a bundled dictionary)
/// without matching on messages.
#[derive(Error, Debug)]
pub enum SensitiveError {
    /// No configuration was supplied, or the config file was empty.
    #[error("the configuration cannot be empty: {0}")]
    ConfigMissing(String),

    /// Array-mode build was given no words.
    #[error("the sensitive words cannot be empty")]
    EmptyWordList,

    /// The dictionary file selected for loading does not exist.
    #[error("the sensitive words file does not exist: {}", .0.display())]
    WordFileMissing(PathBuf),

    /// The dictionary file exists but could not be read.
    #[error("failed to read word list {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `replace` or `mark` was called with empty text.
    #[error("please provide the text to check")]
    EmptyText,

    /// A mutating call was made before the dictionary was built.
    #[error("the word registry has not been initialized")]
    NotInitialized,

    /// The backing word-list file for persistence does not exist.
    #[error("sensitive thesaurus file does not exist: {}", .0.display())]
    ThesaurusFileMissing(PathBuf),

    /// Words cannot be persisted when the dictionary lives in memory only.
    #[error("array mode cannot persist words to a file")]
    ArrayModePersist,

    /// Input was not valid UTF-8.
    #[error("invalid encoding in {context}: {source}")]
    InvalidEncoding {
        context: String,
        #[source]
        source: std::str::Utf8Error,
    },

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(ValidationError),

    /// I/O error while persisting words.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SensitiveError {
    /// Stable numeric code for this error.
    pub fn code(&self) -> u32 {
        match self {
            SensitiveError::ConfigMissing(_) => 1,
            SensitiveError::EmptyWordList => 2,
            SensitiveError::WordFileMissing(_) => 3,
            SensitiveError::ReadFailed { .. } => 4,
            SensitiveError::EmptyText => 5,
            SensitiveError::NotInitialized => 6,
            SensitiveError::ThesaurusFileMissing(_) => 7,
            SensitiveError::ArrayModePersist => 8,
            SensitiveError::InvalidEncoding { .. } => 9,
            SensitiveError::InvalidConfig(_) => 10,
            SensitiveError::Io(_) => 11,
        }
    }

    /// Whether the error concerns loading or persisting the dictionary.
    pub fn is_dictionary_error(&self) -> bool {
        matches!(
            self,
            SensitiveError::EmptyWordList
                | SensitiveError::WordFileMissing(_)
                | SensitiveError::ReadFailed { .. }
                | SensitiveError::ThesaurusFileMissing(_)
                | SensitiveError::ArrayModePersist
        )
    }

    /// Whether the error concerns the configuration itself.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SensitiveError::ConfigMissing(_) | SensitiveError::InvalidConfig(_)
        )
    }
}

impl From<ValidationError> for SensitiveError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyConfig(source) => SensitiveError::ConfigMissing(source),
            other => SensitiveError::InvalidConfig(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(SensitiveError::ConfigMissing(String::new()).code(), 1);
        assert_eq!(SensitiveError::EmptyWordList.code(), 2);
        assert_eq!(SensitiveError::WordFileMissing(PathBuf::new()).code(), 3);
        assert_eq!(SensitiveError::EmptyText.code(), 5);
        assert_eq!(SensitiveError::NotInitialized.code(), 6);
        assert_eq!(SensitiveError::ThesaurusFileMissing(PathBuf::new()).code(), 7);
        assert_eq!(SensitiveError::ArrayModePersist.code(), 8);
    }

    #[test]
    fn test_empty_config_maps_to_config_missing() {
        let err: SensitiveError = ValidationError::EmptyConfig("sensitive.toml".into()).into();
        assert!(matches!(err, SensitiveError::ConfigMissing(_)));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_other_validation_maps_to_invalid_config() {
        let err: SensitiveError = ValidationError::ParseError("bad".into()).into();
        assert_eq!(err.code(), 10);
    }

    #[test]
    fn test_invalid_encoding_message() {
        let bytes = [0x66, 0xff];
        let source = std::str::from_utf8(&bytes).unwrap_err();
        let err = SensitiveError::InvalidEncoding {
            context: "input text".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("invalid encoding in input text"));
        assert_eq!(err.code(), 9);
    }
}
