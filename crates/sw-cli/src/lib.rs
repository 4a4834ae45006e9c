//! Library half of the `sw` binary.
//!
//! Holds everything the binary needs besides argument parsing: logging setup,
//! exit codes, output rendering and registry loading.

pub mod error;
pub mod exit_codes;
pub mod load;
pub mod logging;
pub mod output;

pub use error::{CliError, Result};
pub use exit_codes::ExitCode;
pub use load::{load_registry, read_text, LoadOptions, Loaded};
pub use output::{write_payload, OutputFormat, Payload};
