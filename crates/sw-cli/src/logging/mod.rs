//! Structured logging for the `sw` binary.
//!
//! Provides dual-mode logging:
//! - Human-readable console output for interactive use
//! - JSON lines for pipelines that collect logs
//!
//! stdout is reserved for command payloads; every log line goes to stderr.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose events the default filter lets through.
const LOG_TARGETS: &[&str] = &["sw", "sw_cli", "sw_engine", "sw_config"];

/// Build the event filter for `config`.
///
/// An explicit level (flag or SW_LOG) wins; otherwise RUST_LOG directives are
/// honoured, falling back to the default level.
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    let directives = || {
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={}", config.level))
            .collect::<Vec<_>>()
            .join(",")
    };

    if config.level_explicit {
        return EnvFilter::new(directives());
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives()))
}

/// Initialize the logging subsystem.
///
/// Must be called once at startup before any logging occurs.
pub fn init_logging(config: &LogConfig) {
    let filter = build_filter(config);

    match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .init();
            }
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .init();
        }
    }
}
