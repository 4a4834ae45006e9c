//! Output formats and command payloads.
//!
//! Every command produces one payload. JSON output is a single object on
//! stdout; text output is the bare result for shell pipelines.

use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;
use sw_engine::Match;

/// Supported output formats for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Structured JSON (default for machine consumption)
    #[default]
    Json,

    /// Plain text for shell pipelines
    Text,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Result of a single command.
#[derive(Debug, Serialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum Payload {
    Check {
        detected: bool,
    },
    Get {
        match_type: String,
        count: usize,
        matches: Vec<Match>,
    },
    Replace {
        text: String,
    },
    Mark {
        text: String,
    },
    AddWord {
        path: String,
        words: Vec<String>,
        append: bool,
    },
    Validate {
        ready: bool,
        word_count: usize,
        max_depth: usize,
        mode: String,
        config_source: String,
        interference: Vec<char>,
        #[serde(skip_serializing_if = "Option::is_none")]
        words: Option<Vec<String>>,
    },
}

impl Payload {
    /// Plain-text rendering.
    pub fn to_text(&self) -> String {
        match self {
            Payload::Check { detected } => detected.to_string(),
            Payload::Get { matches, .. } => matches
                .iter()
                .map(|m| m.word.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            Payload::Replace { text } | Payload::Mark { text } => text.clone(),
            Payload::AddWord {
                path,
                words,
                append,
            } => {
                let verb = if *append { "appended" } else { "merged" };
                format!("{verb} {} word(s) into {path}", words.len())
            }
            Payload::Validate {
                word_count,
                max_depth,
                mode,
                config_source,
                interference,
                words,
                ..
            } => {
                let mut text = format!(
                    "ok: {word_count} word(s), max depth {max_depth}, mode {mode}, config from {config_source}, {} interference char(s)",
                    interference.len()
                );
                for word in words.iter().flatten() {
                    text.push('\n');
                    text.push_str(word);
                }
                text
            }
        }
    }
}

/// Write `payload` to `out` in `format`, followed by a newline.
pub fn write_payload<W: Write>(
    out: &mut W,
    payload: &Payload,
    format: OutputFormat,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, payload)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            let text = payload.to_text();
            if !text.is_empty() {
                writeln!(out, "{text}")?;
            }
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_json_shape() {
        let mut buf = Vec::new();
        write_payload(&mut buf, &Payload::Check { detected: true }, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["command"], "check");
        assert_eq!(value["detected"], true);
    }

    #[test]
    fn test_get_text_one_word_per_line() {
        let payload = Payload::Get {
            match_type: "minimal".to_string(),
            count: 2,
            matches: vec![
                Match {
                    word: "工口".to_string(),
                    start: 0,
                    char_len: 2,
                    byte_range: 0..6,
                },
                Match {
                    word: "里番".to_string(),
                    start: 2,
                    char_len: 2,
                    byte_range: 6..12,
                },
            ],
        };
        assert_eq!(payload.to_text(), "工口\n里番");
    }

    #[test]
    fn test_empty_text_writes_nothing() {
        let payload = Payload::Get {
            match_type: "minimal".to_string(),
            count: 0,
            matches: Vec::new(),
        };
        let mut buf = Vec::new();
        write_payload(&mut buf, &payload, OutputFormat::Text).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_add_word_kebab_tag() {
        let payload = Payload::AddWord {
            path: "words.txt".to_string(),
            words: vec!["x".to_string()],
            append: true,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["command"], "add-word");
        assert_eq!(payload.to_text(), "appended 1 word(s) into words.txt");
    }
}
