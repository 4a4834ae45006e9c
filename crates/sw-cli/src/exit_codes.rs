//! Exit codes for the `sw` CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0-1: Scan outcomes (clean / sensitive words detected)
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors

use sw_engine::SensitiveError;

/// Exit codes for `sw` invocations.
///
/// These codes are a stable contract for scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    // ========================================================================
    // Scan Outcomes (0-1)
    // ========================================================================
    /// Success: nothing detected, or the command completed
    Clean = 0,

    /// `check`/`get` found at least one dictionary word
    Detected = 1,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments or input
    ArgsError = 10,

    /// Configuration missing, unreadable or invalid
    ConfigError = 11,

    /// Dictionary could not be loaded or persisted
    DictionaryError = 12,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error on stdin/stdout or while persisting
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Scan outcome rather than an error (codes 0-1).
    pub fn is_success(self) -> bool {
        (self as i32) < 10
    }

    /// User/environment error (codes 10-19).
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&(self as i32))
    }

    /// Internal error (codes 20-29).
    pub fn is_internal_error(self) -> bool {
        (self as i32) >= 20
    }

    /// Get the code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::Detected => "OK_DETECTED",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::DictionaryError => "ERR_DICTIONARY",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<&SensitiveError> for ExitCode {
    fn from(err: &SensitiveError) -> Self {
        match err {
            SensitiveError::EmptyText | SensitiveError::InvalidEncoding { .. } => {
                ExitCode::ArgsError
            }
            SensitiveError::ConfigMissing(_) | SensitiveError::InvalidConfig(_) => {
                ExitCode::ConfigError
            }
            SensitiveError::EmptyWordList
            | SensitiveError::WordFileMissing(_)
            | SensitiveError::ReadFailed { .. }
            | SensitiveError::ThesaurusFileMissing(_)
            | SensitiveError::ArrayModePersist => ExitCode::DictionaryError,
            SensitiveError::NotInitialized => ExitCode::InternalError,
            SensitiveError::Io(_) => ExitCode::IoError,
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Clean.as_i32(), 0);
        assert_eq!(ExitCode::Detected.as_i32(), 1);
        assert_eq!(ExitCode::ArgsError.as_i32(), 10);
        assert_eq!(ExitCode::ConfigError.as_i32(), 11);
        assert_eq!(ExitCode::DictionaryError.as_i32(), 12);
        assert_eq!(ExitCode::InternalError.as_i32(), 20);
        assert_eq!(ExitCode::IoError.as_i32(), 21);
    }

    #[test]
    fn test_exit_code_ranges() {
        assert!(ExitCode::Detected.is_success());
        assert!(ExitCode::ConfigError.is_user_error());
        assert!(!ExitCode::IoError.is_user_error());
        assert!(ExitCode::IoError.is_internal_error());
    }

    #[test]
    fn test_from_engine_error() {
        let missing = SensitiveError::WordFileMissing(PathBuf::from("x"));
        assert_eq!(ExitCode::from(&missing), ExitCode::DictionaryError);
        assert_eq!(
            ExitCode::from(&SensitiveError::EmptyText),
            ExitCode::ArgsError
        );
        assert_eq!(
            ExitCode::from(&SensitiveError::ConfigMissing("empty".into())),
            ExitCode::ConfigError
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ExitCode::DictionaryError.to_string(), "ERR_DICTIONARY (12)");
    }
}
