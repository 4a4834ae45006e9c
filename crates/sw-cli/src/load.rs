//! Building a registry from command-line options.
//!
//! Precedence: `--word` (array mode) → `--words <file>` → the dictionary
//! described by the resolved config file → built-in defaults.

use crate::error::{CliError, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use sw_config::{resolve_config, ConfigSource, DictionaryMode, SensitiveConfig};
use sw_engine::{SensitiveError, WordRegistry};

/// Dictionary-related options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub config: Option<PathBuf>,
    pub words: Option<PathBuf>,
    pub word: Vec<String>,
    pub interference: Option<String>,
}

/// A built registry and where its configuration came from.
#[derive(Debug)]
pub struct Loaded {
    pub registry: WordRegistry,
    pub config_source: ConfigSource,
}

/// Assemble the effective configuration for `opts`.
pub fn effective_config(opts: &LoadOptions) -> Result<(SensitiveConfig, ConfigSource)> {
    let paths = resolve_config(opts.config.as_deref(), opts.words.as_deref());

    let (mut config, source) = match (&opts.config, &paths.config) {
        // An explicit path that does not exist is an error, not a fallback.
        (Some(path), _) => (load_file(path)?, ConfigSource::CliArgument),
        (None, Some(path)) => (load_file(path)?, paths.config_source.clone()),
        (None, None) => (SensitiveConfig::default(), ConfigSource::BuiltinDefault),
    };
    tracing::debug!(source = %source, "configuration resolved");

    if !opts.word.is_empty() {
        config.mode = DictionaryMode::Array;
        config.sensitive_words = opts.word.clone();
    } else if let Some(words) = &opts.words {
        config.mode = DictionaryMode::Path(words.clone());
    } else if config.mode == DictionaryMode::File && config.word_file.is_none() {
        config.word_file = paths.word_file.clone();
    }

    if let Some(chars) = &opts.interference {
        config.interference_factors.extend(chars.chars());
    }

    Ok((config, source))
}

/// Build the registry described by `opts`.
pub fn load_registry(opts: &LoadOptions) -> Result<Loaded> {
    let (config, config_source) = effective_config(opts)?;
    let registry = WordRegistry::new(config)?;
    tracing::debug!(words = registry.word_count(), "registry ready");
    Ok(Loaded {
        registry,
        config_source,
    })
}

fn load_file(path: &Path) -> Result<SensitiveConfig> {
    SensitiveConfig::from_file(path).map_err(|err| CliError::Engine(SensitiveError::from(err)))
}

/// The command's text: the positional argument, or all of stdin.
pub fn read_text(arg: Option<&str>) -> Result<String> {
    match arg {
        Some(text) => Ok(text.to_string()),
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .map_err(CliError::Input)?;
            let text = String::from_utf8(bytes).map_err(|err| {
                CliError::Engine(SensitiveError::InvalidEncoding {
                    context: "standard input".to_string(),
                    source: err.utf8_error(),
                })
            })?;
            Ok(text.strip_suffix('\n').map(str::to_string).unwrap_or(text))
        }
    }
}
