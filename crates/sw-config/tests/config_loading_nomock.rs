//! No-mock configuration loading + resolution tests.
//!
//! Covers:
//! - Loading real TOML/JSON/YAML files from disk
//! - Empty and malformed files
//! - Resolution order (CLI > env > config dir)

use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use sw_config::resolve::{resolve_config, ConfigSource, ENV_CONFIG_DIR, ENV_CONFIG_PATH, ENV_WORDS_PATH};
use sw_config::validate::{validate_config, ValidationError};
use sw_config::{DictionaryMode, RemovalMode, SensitiveConfig};
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

struct EnvGuard {
    keys: Vec<String>,
    saved: Vec<Option<String>>,
}

impl EnvGuard {
    fn new(keys: &[&str]) -> Self {
        let mut saved = Vec::with_capacity(keys.len());
        for key in keys {
            saved.push(env::var(key).ok());
        }
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            saved,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (idx, key) in self.keys.iter().enumerate() {
            match self.saved.get(idx).and_then(|v| v.as_ref()) {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

fn with_env_lock<T>(f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .expect("env lock poisoned");
    f()
}

#[test]
fn test_load_toml_file() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("sensitive.toml");
    fs::write(
        &path,
        r##"
mode = "array"
repeat = true
replace_char = "#"
mark_tag = "em"
interference_factors = [" ", "&", "*"]
sensitive_words = ["工口", "里番", "性感美女"]
"##,
    )
    .expect("write config");

    let config = SensitiveConfig::from_file(&path).expect("load toml");
    assert_eq!(config.mode, DictionaryMode::Array);
    assert!(config.repeat);
    assert_eq!(config.replace_char, "#");
    assert_eq!(config.mark_tag, "em");
    assert_eq!(config.interference_factors, vec![' ', '&', '*']);
    assert_eq!(config.sensitive_words.len(), 3);
    validate_config(&config).expect("valid config");
}

#[test]
fn test_load_json_file() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("sensitive.json");
    fs::write(
        &path,
        r#"{"mode": "/srv/words.txt", "removal_mode": "legacy_shallow"}"#,
    )
    .expect("write config");

    let config = SensitiveConfig::from_file(&path).expect("load json");
    assert_eq!(config.mode, DictionaryMode::Path(PathBuf::from("/srv/words.txt")));
    assert_eq!(config.removal_mode, RemovalMode::LegacyShallow);
}

#[test]
fn test_load_yaml_file() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("sensitive.yml");
    fs::write(
        &path,
        "mode: array\nsensitive_words:\n  - bad\n  - worse\ninterference_factors:\n  - '.'\n",
    )
    .expect("write config");

    let config = SensitiveConfig::from_file(&path).expect("load yaml");
    assert_eq!(config.sensitive_words, vec!["bad", "worse"]);
    assert_eq!(config.interference_factors, vec!['.']);
}

#[test]
fn test_empty_file_is_empty_config() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("sensitive.toml");
    fs::write(&path, "  \n\n").expect("write config");

    let err = SensitiveConfig::from_file(&path).expect_err("empty config should fail");
    assert!(matches!(err, ValidationError::EmptyConfig(_)));
    assert_eq!(err.code(), 62);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = SensitiveConfig::from_file(std::path::Path::new("/nonexistent/sensitive.toml"))
        .expect_err("missing config should fail");
    assert!(matches!(err, ValidationError::IoError(_)));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("sensitive.json");
    fs::write(&path, "{ not json").expect("write config");

    let err = SensitiveConfig::from_file(&path).expect_err("malformed config should fail");
    assert!(matches!(err, ValidationError::ParseError(_)));
}

#[test]
fn test_resolve_cli_over_env() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&[ENV_CONFIG_PATH, ENV_WORDS_PATH, ENV_CONFIG_DIR]);

        let temp = TempDir::new().expect("temp dir");
        let cli_config = temp.path().join("cli.toml");
        let env_config = temp.path().join("env.toml");
        fs::write(&cli_config, "repeat = true\n").expect("write cli config");
        fs::write(&env_config, "repeat = false\n").expect("write env config");

        env::set_var(ENV_CONFIG_PATH, env_config.display().to_string());

        let paths = resolve_config(Some(&cli_config), None);
        assert_eq!(paths.config_source, ConfigSource::CliArgument);
        assert_eq!(paths.config.unwrap(), cli_config);

        let paths = resolve_config(None, None);
        assert_eq!(paths.config_source, ConfigSource::Environment);
        assert_eq!(paths.config.unwrap(), env_config);
    });
}

#[test]
fn test_resolve_words_from_config_dir() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&[ENV_CONFIG_PATH, ENV_WORDS_PATH, ENV_CONFIG_DIR]);
        env::remove_var(ENV_WORDS_PATH);

        let temp = TempDir::new().expect("temp dir");
        let words = temp.path().join("SensitiveWord.txt");
        fs::write(&words, "bad\n").expect("write words");
        env::set_var(ENV_CONFIG_DIR, temp.path().display().to_string());

        let paths = resolve_config(None, None);
        assert_eq!(paths.word_file_source, ConfigSource::Environment);
        assert_eq!(paths.word_file.unwrap(), words);

        let config = SensitiveConfig::default();
        assert_eq!(config.word_file_path(), Some(words));
    });
}

#[test]
fn test_shipped_example_config_parses() {
    let content = include_str!("../../../config/sensitive.example.toml");
    let config = SensitiveConfig::parse_toml(content).expect("example config parses");
    validate_config(&config).expect("example config validates");

    assert_eq!(config.mode, DictionaryMode::File);
    assert_eq!(config.removal_mode, RemovalMode::Exact);
    assert_eq!(
        config.interference_factors,
        sw_config::COMMON_INTERFERENCE_FACTORS.to_vec()
    );
}
