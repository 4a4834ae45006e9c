//! Word-list files: one dictionary word per line.
//!
//! Reading is streamed line by line so large dictionaries never sit in memory
//! as a whole. Each line is stripped of quotes, spaces, line terminators and
//! commas, then trimmed; lines left empty are skipped.

use crate::{Result, SensitiveError};
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Characters removed from every line of a word-list file.
const STRIPPED_CHARS: &[char] = &['\'', ' ', '\r', '\n', ','];

/// Clean one raw line into a dictionary word (possibly empty).
///
/// After the stripped characters are removed, surrounding whitespace and NUL
/// are trimmed as well.
pub fn sanitize_line(line: &str) -> String {
    let filtered: String = line
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect();
    filtered
        .trim_matches(|c: char| c.is_whitespace() || c == '\0')
        .to_string()
}

/// Forward-only iterator over the words of a word-list source.
///
/// Restart by opening the file again.
pub struct WordLines<R> {
    reader: R,
    source: PathBuf,
    line_no: usize,
    buf: Vec<u8>,
    done: bool,
}

impl WordLines<BufReader<File>> {
    /// Open a word-list file.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SensitiveError::WordFileMissing(path.to_path_buf()));
        }
        let file = File::open(path).map_err(|source| SensitiveError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> WordLines<R> {
    /// Wrap any buffered reader; `source` names it in errors.
    pub fn new(reader: R, source: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            source: source.into(),
            line_no: 0,
            buf: Vec::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for WordLines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_no += 1;
                    let line = match std::str::from_utf8(&self.buf) {
                        Ok(line) => line,
                        Err(source) => {
                            self.done = true;
                            return Some(Err(SensitiveError::InvalidEncoding {
                                context: format!(
                                    "{} line {}",
                                    self.source.display(),
                                    self.line_no
                                ),
                                source,
                            }));
                        }
                    };
                    let line = if self.line_no == 1 {
                        line.trim_start_matches('\u{feff}')
                    } else {
                        line
                    };

                    let word = sanitize_line(line);
                    if !word.is_empty() {
                        return Some(Ok(word));
                    }
                }
                Err(source) => {
                    self.done = true;
                    return Some(Err(SensitiveError::ReadFailed {
                        path: self.source.clone(),
                        source,
                    }));
                }
            }
        }
        None
    }
}

/// Append words to the end of a word-list file.
pub fn append_words(path: &Path, words: &[String]) -> Result<()> {
    if words.is_empty() {
        return Ok(());
    }

    let mut file = OpenOptions::new().append(true).open(path)?;
    let mut payload = String::from("\n");
    payload.push_str(&words.join("\n"));
    file.write_all(payload.as_bytes())?;
    file.flush()?;
    Ok(())
}

/// Rewrite a word-list file as its current words plus `words`, deduplicated.
///
/// First occurrence wins, so existing ordering is preserved.
pub fn rewrite_words(path: &Path, words: &[String]) -> Result<()> {
    let mut merged: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    let existing = WordLines::open(path)?.collect::<Result<Vec<String>>>()?;
    for word in existing.into_iter().chain(words.iter().cloned()) {
        if !word.is_empty() && seen.insert(word.clone()) {
            merged.push(word);
        }
    }

    let mut content = merged.join("\n");
    content.push('\n');
    std::fs::write(path, content)?;
    Ok(())
}
