//! Errors surfaced by CLI commands.

use crate::exit_codes::ExitCode;
use sw_engine::SensitiveError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] SensitiveError),

    #[error("failed to read input: {0}")]
    Input(#[source] std::io::Error),

    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("invalid arguments: {0}")]
    Usage(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Engine(err) => ExitCode::from(err),
            CliError::Input(_) | CliError::Output(_) => ExitCode::IoError,
            CliError::Usage(_) => ExitCode::ArgsError,
        }
    }

    /// Stable numeric code: the engine's code, or the exit code otherwise.
    pub fn code(&self) -> u32 {
        match self {
            CliError::Engine(err) => err.code(),
            other => other.exit_code().as_i32().unsigned_abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_codes() {
        let err = CliError::from(SensitiveError::ArrayModePersist);
        assert_eq!(err.exit_code(), ExitCode::DictionaryError);
        assert_eq!(err.code(), 8);
        assert_eq!(err.to_string(), "array mode cannot persist words to a file");
    }

    #[test]
    fn test_usage_error() {
        let err = CliError::Usage("no words given".into());
        assert_eq!(err.exit_code(), ExitCode::ArgsError);
        assert_eq!(err.code(), 10);
    }
}
