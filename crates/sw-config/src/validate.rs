//! Configuration validation errors and semantic validation.

use crate::sensitive::{DictionaryMode, SensitiveConfig};
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration is empty: {0}")]
    EmptyConfig(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::EmptyConfig(_) => 62,
            ValidationError::SemanticError(_) => 63,
            ValidationError::MissingField(_) => 64,
            ValidationError::InvalidValue { .. } => 65,
        }
    }
}

/// Validate an engine configuration semantically.
pub fn validate_config(config: &SensitiveConfig) -> ValidationResult<()> {
    if config.replace_char.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "replace_char".to_string(),
            message: "Must not be empty".to_string(),
        });
    }

    validate_mark_tag(&config.mark_tag)?;

    match &config.mode {
        DictionaryMode::Path(path) if path.as_os_str().is_empty() => {
            return Err(ValidationError::MissingField(
                "mode (word-list path is empty)".to_string(),
            ));
        }
        _ => {}
    }

    // A word made only of interference characters can never be matched.
    for word in &config.sensitive_words {
        let trimmed = word.trim();
        if !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|c| config.interference_factors.contains(&c))
        {
            return Err(ValidationError::SemanticError(format!(
                "sensitive word {:?} consists only of interference factors and can never match",
                trimmed
            )));
        }
    }

    Ok(())
}

/// Tag names end up inside `<tag>` delimiters, so keep them to a safe alphabet.
fn validate_mark_tag(tag: &str) -> ValidationResult<()> {
    if tag.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "mark_tag".to_string(),
            message: "Must not be empty".to_string(),
        });
    }

    if let Some(bad) = tag
        .chars()
        .find(|c| !(c.is_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(ValidationError::InvalidValue {
            field: "mark_tag".to_string(),
            message: format!("Unsupported character {:?} in tag {:?}", bad, tag),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        validate_config(&SensitiveConfig::default()).unwrap();
    }

    #[test]
    fn test_empty_replace_char_rejected() {
        let config = SensitiveConfig::default().with_replace_char("");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "replace_char"));
        assert_eq!(err.code(), 65);
    }

    #[test]
    fn test_mark_tag_alphabet() {
        validate_config(&SensitiveConfig::default().with_mark_tag("span-hit_1")).unwrap();
        assert!(validate_config(&SensitiveConfig::default().with_mark_tag("b><script")).is_err());
        assert!(validate_config(&SensitiveConfig::default().with_mark_tag("")).is_err());
    }

    #[test]
    fn test_empty_path_mode_rejected() {
        let config = SensitiveConfig::file("");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField(_)));
        assert_eq!(err.code(), 64);
    }

    #[test]
    fn test_empty_array_left_to_engine() {
        // The engine reports an empty array with its own error code at build time.
        validate_config(&SensitiveConfig::array(Vec::<String>::new())).unwrap();
    }

    #[test]
    fn test_unmatchable_word_rejected() {
        let config = SensitiveConfig::array(["ok", "&&"]).with_interference_factors(['&']);
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ValidationError::SemanticError(_)));
        assert_eq!(err.code(), 63);
    }

    #[test]
    fn test_error_codes_distinct() {
        let codes = [
            ValidationError::IoError(String::new()).code(),
            ValidationError::ParseError(String::new()).code(),
            ValidationError::EmptyConfig(String::new()).code(),
            ValidationError::SemanticError(String::new()).code(),
            ValidationError::MissingField(String::new()).code(),
        ];
        let mut sorted = codes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
    }
}
