//! The word registry: owner of the dictionary and the engine's public surface.
//!
//! The registry builds the trie from the configured source, applies runtime
//! additions and removals, and keeps the one-shot removal buffer. Words removed
//! with `once = true` are excluded from exactly the next `check`/`get` scan and
//! restored when that scan finishes, however it finishes.

use crate::matcher::{Detection, Match, MatchType, Matcher};
use crate::wordlist::{self, WordLines};
use crate::{InterferenceSet, Result, SensitiveError, Trie};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use sw_config::resolve::WORDS_FILENAME;
use sw_config::{validate_config, DictionaryMode, RemovalMode, SensitiveConfig};

/// A batch of words for `add`, `remove` and `add_word_to_file`.
///
/// A single string is split on `|`; lists are taken as given. Empty entries
/// are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordBatch(Vec<String>);

impl WordBatch {
    pub fn words(&self) -> &[String] {
        &self.0
    }

    pub fn into_words(self) -> Vec<String> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn from_list<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            words
                .into_iter()
                .map(Into::into)
                .filter(|w: &String| !w.is_empty())
                .collect(),
        )
    }
}

impl From<&str> for WordBatch {
    fn from(words: &str) -> Self {
        Self::from_list(words.split('|'))
    }
}

impl From<String> for WordBatch {
    fn from(words: String) -> Self {
        Self::from(words.as_str())
    }
}

impl From<&String> for WordBatch {
    fn from(words: &String) -> Self {
        Self::from(words.as_str())
    }
}

impl From<Vec<String>> for WordBatch {
    fn from(words: Vec<String>) -> Self {
        Self::from_list(words)
    }
}

impl From<Vec<&str>> for WordBatch {
    fn from(words: Vec<&str>) -> Self {
        Self::from_list(words)
    }
}

impl From<&[String]> for WordBatch {
    fn from(words: &[String]) -> Self {
        Self::from_list(words.iter().cloned())
    }
}

impl From<&[&str]> for WordBatch {
    fn from(words: &[&str]) -> Self {
        Self::from_list(words.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for WordBatch {
    fn from(words: [&str; N]) -> Self {
        Self::from_list(words)
    }
}

/// Source for a custom rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomSource {
    /// Word-list file.
    File(PathBuf),
    /// In-memory list.
    Words(Vec<String>),
}

impl From<&Path> for CustomSource {
    fn from(path: &Path) -> Self {
        CustomSource::File(path.to_path_buf())
    }
}

impl From<PathBuf> for CustomSource {
    fn from(path: PathBuf) -> Self {
        CustomSource::File(path)
    }
}

impl From<Vec<String>> for CustomSource {
    fn from(words: Vec<String>) -> Self {
        CustomSource::Words(words)
    }
}

impl From<Vec<&str>> for CustomSource {
    fn from(words: Vec<&str>) -> Self {
        CustomSource::Words(words.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for CustomSource {
    fn from(words: &[&str]) -> Self {
        CustomSource::Words(words.iter().map(|w| w.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for CustomSource {
    fn from(words: [&str; N]) -> Self {
        CustomSource::Words(words.iter().map(|w| w.to_string()).collect())
    }
}

/// Owner of the dictionary trie.
#[derive(Debug, Clone)]
pub struct WordRegistry {
    config: SensitiveConfig,
    trie: Trie,
    ready: bool,
    interference: InterferenceSet,
    removal_buffer: Vec<String>,
}

impl WordRegistry {
    /// Validate `config` and build the dictionary from its source.
    pub fn new(config: SensitiveConfig) -> Result<Self> {
        let mut registry = Self::unbuilt(config)?;
        registry.build()?;
        Ok(registry)
    }

    /// Validate `config` without loading any words.
    ///
    /// The registry reports itself not ready and rejects `add`/`remove` until
    /// [`build`](Self::build) or [`custom`](Self::custom) succeeds.
    pub fn unbuilt(config: SensitiveConfig) -> Result<Self> {
        validate_config(&config)?;
        let interference = config.interference_factors.iter().copied().collect();
        Ok(Self {
            config,
            trie: Trie::new(),
            ready: false,
            interference,
            removal_buffer: Vec::new(),
        })
    }

    /// Load a config file and build the registry it describes.
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let config = SensitiveConfig::from_file(path)?;
        Self::new(config)
    }

    /// Registry over an in-memory word list with default settings.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(SensitiveConfig::array(words))
    }

    /// Build the dictionary from the configured source.
    pub fn build(&mut self) -> Result<&mut Self> {
        let trie = match &self.config.mode {
            DictionaryMode::Array => trie_from_array(&self.config.sensitive_words)?,
            DictionaryMode::File | DictionaryMode::Path(_) => {
                let path = self
                    .config
                    .word_file_path()
                    .unwrap_or_else(|| PathBuf::from(WORDS_FILENAME));
                trie_from_file(&path)?
            }
        };
        self.install(trie);
        Ok(self)
    }

    /// Rebuild the dictionary from a word-list file.
    ///
    /// The new dictionary replaces the current one only if loading succeeds.
    pub fn rebuild_from_file(&mut self, path: &Path) -> Result<&mut Self> {
        let trie = trie_from_file(path)?;
        self.install(trie);
        Ok(self)
    }

    /// Rebuild the dictionary from an in-memory list.
    pub fn rebuild_from_array<S: AsRef<str>>(&mut self, words: &[S]) -> Result<&mut Self> {
        let trie = trie_from_array(words)?;
        self.install(trie);
        Ok(self)
    }

    /// Rebuild from a file path or a word list.
    pub fn custom(&mut self, source: impl Into<CustomSource>) -> Result<&mut Self> {
        match source.into() {
            CustomSource::File(path) => self.rebuild_from_file(&path),
            CustomSource::Words(words) => self.rebuild_from_array(&words),
        }
    }

    fn install(&mut self, trie: Trie) {
        tracing::debug!(words = trie.word_count(), "dictionary installed");
        self.trie = trie;
        self.ready = true;
        self.removal_buffer.clear();
    }

    /// Add words to the live dictionary.
    pub fn add(&mut self, words: impl Into<WordBatch>) -> Result<&mut Self> {
        self.ensure_ready()?;
        for word in words.into().words() {
            self.trie.insert(word);
        }
        Ok(self)
    }

    /// Remove words from the live dictionary.
    ///
    /// With `once`, each removed word is restored after the next `check` or
    /// `get` scan. Words that were not in the dictionary are not buffered.
    pub fn remove(&mut self, words: impl Into<WordBatch>, once: bool) -> Result<&mut Self> {
        self.ensure_ready()?;
        let mode = self.config.removal_mode;
        if mode == RemovalMode::LegacyShallow {
            tracing::warn!("legacy shallow removal drops every first-level branch of the word");
        }

        for word in words.into().into_words() {
            if self.trie.remove(&word, mode) && once {
                self.removal_buffer.push(word);
            }
        }
        Ok(self)
    }

    /// Re-insert every word removed with `once` and clear the buffer.
    ///
    /// Returns `false` when there was nothing to restore.
    pub fn restore(&mut self) -> bool {
        if self.removal_buffer.is_empty() {
            return false;
        }

        let words = std::mem::take(&mut self.removal_buffer);
        tracing::debug!(count = words.len(), "restoring one-shot removals");
        for word in &words {
            self.trie.insert(word);
        }
        true
    }

    /// Merge characters into the interference set.
    ///
    /// Unlike config validation, this does not reject dictionary words made
    /// only of interference characters. Such words stay in the trie but can
    /// no longer match; they are logged at `warn` and listed by
    /// [`unmatchable_words`](Self::unmatchable_words).
    pub fn interference_factor<I: IntoIterator<Item = char>>(&mut self, chars: I) -> &mut Self {
        self.interference.extend(chars);
        let unmatchable = self.unmatchable_words();
        if !unmatchable.is_empty() {
            tracing::warn!(
                count = unmatchable.len(),
                words = ?unmatchable,
                "dictionary words consist only of interference characters and can never match"
            );
        }
        self
    }

    /// Dictionary words made only of interference characters, sorted.
    pub fn unmatchable_words(&self) -> Vec<String> {
        self.trie
            .words()
            .into_iter()
            .filter(|word| word.chars().all(|c| self.interference.is_interference(c)))
            .collect()
    }

    /// Whether `text` contains a dictionary word.
    pub fn check(&mut self, text: &str) -> bool {
        let scan = ScanGuard::new(self);
        let found = scan.matcher().check(text);
        found
    }

    /// Alias of [`check`](Self::check).
    pub fn is_(&mut self, text: &str) -> bool {
        self.check(text)
    }

    /// [`check`](Self::check) over raw bytes, rejecting invalid UTF-8.
    pub fn check_bytes(&mut self, bytes: &[u8]) -> Result<bool> {
        let text = decode(bytes)?;
        Ok(self.check(text))
    }

    /// Matched substrings. A `limit` of zero returns all of them.
    pub fn get(&mut self, text: &str, match_type: MatchType, limit: usize) -> Vec<String> {
        let scan = ScanGuard::new(self);
        let words = scan.matcher().get(text, match_type, limit);
        words
    }

    /// [`get`](Self::get) over raw bytes, rejecting invalid UTF-8.
    pub fn get_bytes(
        &mut self,
        bytes: &[u8],
        match_type: MatchType,
        limit: usize,
    ) -> Result<Vec<String>> {
        let text = decode(bytes)?;
        Ok(self.get(text, match_type, limit))
    }

    /// Matches with their offsets.
    pub fn find(&mut self, text: &str, match_type: MatchType, limit: usize) -> Vec<Match> {
        let scan = ScanGuard::new(self);
        let matches = scan.matcher().find(text, match_type, limit);
        matches
    }

    /// One detection pass, reusable for several transforms.
    pub fn detect<'t>(&mut self, text: &'t str, match_type: MatchType) -> Detection<'t> {
        let scan = ScanGuard::new(self);
        let detection = scan.matcher().detect(text, match_type);
        detection
    }

    /// Replace detected words.
    ///
    /// `replace_char` and `repeat` fall back to the configured values.
    pub fn replace(
        &mut self,
        text: &str,
        replace_char: Option<&str>,
        repeat: Option<bool>,
        match_type: MatchType,
    ) -> Result<String> {
        if text.is_empty() {
            return Err(SensitiveError::EmptyText);
        }
        let replace_char = replace_char
            .filter(|c| !c.is_empty())
            .unwrap_or(self.config.replace_char.as_str())
            .to_string();
        let repeat = repeat.unwrap_or(self.config.repeat);
        Ok(self.detect(text, match_type).replace(&replace_char, repeat))
    }

    /// Wrap detected words in `<tag>`…`</tag>`; `tag` falls back to the
    /// configured tag.
    pub fn mark(&mut self, text: &str, tag: Option<&str>, match_type: MatchType) -> Result<String> {
        if text.is_empty() {
            return Err(SensitiveError::EmptyText);
        }
        let tag = tag
            .filter(|t| !t.is_empty())
            .unwrap_or(self.config.mark_tag.as_str())
            .to_string();
        Ok(self.detect(text, match_type).mark(&tag))
    }

    /// Persist words to the backing word-list file.
    ///
    /// With `append`, words are appended as new lines. Otherwise the file is
    /// rewritten as its existing words merged with `words`, deduplicated. The
    /// live dictionary is not changed; call [`add`](Self::add) for that.
    pub fn add_word_to_file(&self, words: impl Into<WordBatch>, append: bool) -> Result<()> {
        if self.config.mode == DictionaryMode::Array {
            return Err(SensitiveError::ArrayModePersist);
        }

        let path = self
            .config
            .word_file_path()
            .unwrap_or_else(|| PathBuf::from(WORDS_FILENAME));
        if !path.is_file() {
            return Err(SensitiveError::ThesaurusFileMissing(path));
        }

        let words = words.into().into_words();
        if append {
            wordlist::append_words(&path, &words)?;
        } else {
            wordlist::rewrite_words(&path, &words)?;
        }
        tracing::debug!(path = %path.display(), count = words.len(), append, "persisted words");
        Ok(())
    }

    /// Read-only scanner without restore semantics.
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(&self.trie, &self.interference)
    }

    /// Whether the dictionary has been built.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn config(&self) -> &SensitiveConfig {
        &self.config
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn interference(&self) -> &InterferenceSet {
        &self.interference
    }

    pub fn word_count(&self) -> usize {
        self.trie.word_count()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.trie.contains(word)
    }

    /// Words waiting to be restored after the next scan.
    pub fn pending_restore(&self) -> &[String] {
        &self.removal_buffer
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.ready {
            Ok(())
        } else {
            Err(SensitiveError::NotInitialized)
        }
    }
}

/// Runs [`WordRegistry::restore`] when a scan ends, including by unwinding.
struct ScanGuard<'r> {
    registry: &'r mut WordRegistry,
}

impl<'r> ScanGuard<'r> {
    fn new(registry: &'r mut WordRegistry) -> Self {
        Self { registry }
    }
}

impl Deref for ScanGuard<'_> {
    type Target = WordRegistry;

    fn deref(&self) -> &WordRegistry {
        self.registry
    }
}

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        self.registry.restore();
    }
}

fn decode(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|source| SensitiveError::InvalidEncoding {
        context: "input text".to_string(),
        source,
    })
}

fn trie_from_file(path: &Path) -> Result<Trie> {
    let mut trie = Trie::new();
    for word in WordLines::open(path)? {
        trie.insert(&word?);
    }
    tracing::debug!(path = %path.display(), words = trie.word_count(), "loaded word list");
    Ok(trie)
}

fn trie_from_array<S: AsRef<str>>(words: &[S]) -> Result<Trie> {
    if words.is_empty() {
        return Err(SensitiveError::EmptyWordList);
    }
    Ok(Trie::from_words(words.iter().map(|w| w.as_ref().trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> WordRegistry {
        WordRegistry::from_words(["工口", "里番", "性感美女"]).unwrap()
    }

    #[test]
    fn test_interference_factor_reports_unmatchable_words() {
        let mut registry = WordRegistry::from_words(["**", "工口"]).unwrap();
        assert!(registry.check("**"));
        assert!(registry.unmatchable_words().is_empty());

        registry.interference_factor(['*']);
        assert_eq!(registry.unmatchable_words(), vec!["**"]);
        assert!(registry.contains("**"));
        assert!(!registry.check("**"));
        assert!(registry.check("工*口"));
    }

    #[test]
    fn test_new_array_mode_ready() {
        let registry = registry();
        assert!(registry.is_ready());
        assert_eq!(registry.word_count(), 3);
    }

    #[test]
    fn test_empty_array_rejected() {
        let err = WordRegistry::new(SensitiveConfig::array(Vec::<String>::new())).unwrap_err();
        assert!(matches!(err, SensitiveError::EmptyWordList));
        assert_eq!(err.code(), 2);
    }

    #[test]
    fn test_unbuilt_rejects_mutation() {
        let mut registry = WordRegistry::unbuilt(SensitiveConfig::array(["x"])).unwrap();
        assert!(!registry.is_ready());
        assert!(matches!(registry.add("bad"), Err(SensitiveError::NotInitialized)));
        assert!(matches!(
            registry.remove("bad", false),
            Err(SensitiveError::NotInitialized)
        ));
        // Scans on an unbuilt registry see an empty dictionary.
        assert!(!registry.check("bad"));
    }

    #[test]
    fn test_add_pipe_delimited() {
        let mut registry = registry();
        registry.add("坏词|脏话").unwrap();
        assert!(registry.contains("坏词"));
        assert!(registry.contains("脏话"));
        assert!(!registry.contains("坏词|脏话"));
    }

    #[test]
    fn test_add_list_chains() {
        let mut registry = registry();
        registry
            .add(vec!["a|b", "c"])
            .unwrap()
            .remove("c", false)
            .unwrap();
        // List entries are not split.
        assert!(registry.contains("a|b"));
        assert!(!registry.contains("c"));
    }

    #[test]
    fn test_remove_once_restored_after_check() {
        let mut registry = registry();
        registry.remove("工口", true).unwrap();
        assert_eq!(registry.pending_restore(), ["工口".to_string()]);
        assert!(!registry.check("我爱工口漫画"));
        assert!(registry.pending_restore().is_empty());
        assert!(registry.check("我爱工口漫画"));
    }

    #[test]
    fn test_remove_once_restored_after_hit() {
        let mut registry = registry();
        registry.remove("工口", true).unwrap();
        assert!(registry.check("里番"));
        assert!(registry.contains("工口"));
    }

    #[test]
    fn test_remove_once_restored_after_get() {
        let mut registry = registry();
        registry.remove("里番", true).unwrap();
        assert_eq!(
            registry.get("工口里番", MatchType::Minimal, 0),
            vec!["工口".to_string()]
        );
        assert_eq!(registry.get("工口里番", MatchType::Minimal, 0).len(), 2);
    }

    #[test]
    fn test_remove_permanent() {
        let mut registry = registry();
        registry.remove("工口", false).unwrap();
        assert!(!registry.check("工口"));
        assert!(!registry.check("工口"));
    }

    #[test]
    fn test_remove_absent_word_not_buffered() {
        let mut registry = registry();
        registry.remove("不存在", true).unwrap();
        assert!(registry.pending_restore().is_empty());
        registry.check("x");
        assert!(!registry.contains("不存在"));
    }

    #[test]
    fn test_restore_without_buffer() {
        let mut registry = registry();
        assert!(!registry.restore());
    }

    #[test]
    fn test_replace_uses_config_defaults() {
        let config = SensitiveConfig::array(["工口"])
            .with_replace_char("#")
            .with_repeat(true);
        let mut registry = WordRegistry::new(config).unwrap();
        assert_eq!(
            registry
                .replace("我爱工口漫画", None, None, MatchType::Minimal)
                .unwrap(),
            "我爱##漫画"
        );
        assert_eq!(
            registry
                .replace("我爱工口漫画", Some("*"), Some(false), MatchType::Minimal)
                .unwrap(),
            "我爱*漫画"
        );
    }

    #[test]
    fn test_mark_uses_config_tag() {
        let mut registry =
            WordRegistry::new(SensitiveConfig::array(["工口"]).with_mark_tag("em")).unwrap();
        assert_eq!(
            registry.mark("我爱工口漫画", None, MatchType::Minimal).unwrap(),
            "我爱<em>工口</em>漫画"
        );
    }

    #[test]
    fn test_interference_factor_merges() {
        let mut registry = registry();
        assert!(!registry.check("工 口"));
        registry.interference_factor([' ', ' ']);
        assert_eq!(registry.interference().len(), 1);
        assert!(registry.check("工 口"));
    }

    #[test]
    fn test_custom_array_replaces_dictionary() {
        let mut registry = registry();
        registry.custom(["新词"]).unwrap();
        assert!(registry.contains("新词"));
        assert!(!registry.contains("工口"));
    }

    #[test]
    fn test_failed_custom_keeps_dictionary() {
        let mut registry = registry();
        let err = registry
            .custom(Path::new("/nonexistent/words.txt"))
            .unwrap_err();
        assert!(matches!(err, SensitiveError::WordFileMissing(_)));
        assert!(registry.is_ready());
        assert!(registry.contains("工口"));
    }

    #[test]
    fn test_check_bytes_invalid_encoding() {
        let mut registry = registry();
        let err = registry.check_bytes(&[0xe5, 0xb7]).unwrap_err();
        assert_eq!(err.code(), 9);
        assert!(registry.check_bytes("工口".as_bytes()).unwrap());
    }

    #[test]
    fn test_add_word_to_file_array_mode() {
        let registry = registry();
        assert!(matches!(
            registry.add_word_to_file("x", true),
            Err(SensitiveError::ArrayModePersist)
        ));
    }

    #[test]
    fn test_legacy_removal_mode() {
        let config = SensitiveConfig::array(["abc", "bat", "zoo"])
            .with_removal_mode(RemovalMode::LegacyShallow);
        let mut registry = WordRegistry::new(config).unwrap();
        registry.remove("abc", false).unwrap();
        assert!(!registry.contains("bat"));
        assert!(registry.contains("zoo"));
    }
}
