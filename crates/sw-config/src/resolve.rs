//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI arguments → environment variables → XDG paths → defaults.

use std::path::{Path, PathBuf};

/// Discovered configuration file paths.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Path to the engine config file (or None if not found).
    pub config: Option<PathBuf>,

    /// Path to the default word-list file (or None if not found).
    pub word_file: Option<PathBuf>,

    /// Source of the config file (for diagnostics).
    pub config_source: ConfigSource,

    /// Source of the word-list file (for diagnostics).
    pub word_file_source: ConfigSource,
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/sensitive-words/.
    SystemConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_CONFIG_PATH: &str = "SW_CONFIG";
pub const ENV_WORDS_PATH: &str = "SW_WORDS_FILE";
pub const ENV_CONFIG_DIR: &str = "SW_CONFIG_DIR";

/// Standard file names.
pub const CONFIG_FILENAME: &str = "sensitive.toml";
pub const WORDS_FILENAME: &str = "SensitiveWord.txt";

/// Application name for XDG directories.
const APP_NAME: &str = "sensitive-words";

/// Resolve configuration paths using the standard resolution order.
///
/// Resolution order for each file:
/// 1. Explicit CLI path (if provided and present)
/// 2. Environment variable (SW_CONFIG, SW_WORDS_FILE)
/// 3. SW_CONFIG_DIR environment variable + filename
/// 4. XDG config directory (~/.config/sensitive-words/)
/// 5. System config (/etc/sensitive-words/)
/// 6. Built-in defaults (None)
pub fn resolve_config(cli_config: Option<&Path>, cli_words: Option<&Path>) -> ConfigPaths {
    let mut paths = ConfigPaths::default();

    paths.config = resolve_single_config(
        cli_config,
        ENV_CONFIG_PATH,
        CONFIG_FILENAME,
        &mut paths.config_source,
    );

    paths.word_file = resolve_single_config(
        cli_words,
        ENV_WORDS_PATH,
        WORDS_FILENAME,
        &mut paths.word_file_source,
    );

    paths
}

/// Resolve the default word-list location for `mode = "file"`.
pub fn default_word_file() -> Option<PathBuf> {
    let mut source = ConfigSource::default();
    resolve_single_config(None, ENV_WORDS_PATH, WORDS_FILENAME, &mut source)
}

/// Resolve a single configuration file path.
fn resolve_single_config(
    cli_path: Option<&Path>,
    env_var: &str,
    filename: &str,
    source: &mut ConfigSource,
) -> Option<PathBuf> {
    // 1. CLI argument
    if let Some(path) = cli_path {
        if path.exists() {
            *source = ConfigSource::CliArgument;
            return Some(path.to_path_buf());
        }
    }

    // 2. Environment variable (direct path)
    if let Ok(env_path) = std::env::var(env_var) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            *source = ConfigSource::Environment;
            return Some(path);
        }
    }

    // 3. Environment variable (config dir)
    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(filename);
        if path.exists() {
            *source = ConfigSource::Environment;
            return Some(path);
        }
    }

    // 4. XDG config directory
    if let Some(dir) = xdg_config_dir() {
        let path = dir.join(filename);
        if path.exists() {
            *source = ConfigSource::XdgConfig;
            return Some(path);
        }
    }

    // 5. System config
    let system_path = system_config_dir().join(filename);
    if system_path.exists() {
        *source = ConfigSource::SystemConfig;
        return Some(system_path);
    }

    *source = ConfigSource::BuiltinDefault;
    None
}

/// Get the XDG config directory for the engine.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}
