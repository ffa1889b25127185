//! Stopword filtering.
//!
//! Built-in lists come from the `stop-words` crate; a custom file (one word
//! per line, `#` comments allowed) and ad-hoc extra words can be layered on
//! top.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use stop_words::{get, LANGUAGE};
use tracing::info;

use crate::TextError;

/// Declarative stopword setup, used by config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StopwordConfig {
    /// Language of the built-in list ("en", "de", "fr", "es", ...).
    pub language: String,
    /// Whether to load the built-in list at all.
    pub use_builtin: bool,
    /// Optional file with one stopword per line.
    pub custom_file: Option<PathBuf>,
    /// Extra words to exclude, merged after the built-in list.
    pub extra_words: Vec<String>,
}

impl Default for StopwordConfig {
    fn default() -> Self {
        Self {
            language: "en".into(),
            use_builtin: true,
            custom_file: None,
            extra_words: Vec::new(),
        }
    }
}

impl StopwordConfig {
    /// Build the filter this configuration describes.
    pub fn build(&self) -> Result<StopwordFilter, TextError> {
        let mut filter = if self.use_builtin {
            StopwordFilter::for_language(&self.language)
        } else {
            StopwordFilter::empty()
        };
        if let Some(path) = &self.custom_file {
            filter.add_from_file(path)?;
        }
        for word in &self.extra_words {
            filter.add_word(word);
        }
        Ok(filter)
    }
}

/// A set-membership filter for common words.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::for_language("en")
    }
}

impl StopwordFilter {
    /// Built-in list for the given language; unknown languages fall back to
    /// English.
    pub fn for_language(language: &str) -> Self {
        let lang = match language.to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            "da" | "danish" => LANGUAGE::Danish,
            "fi" | "finnish" => LANGUAGE::Finnish,
            _ => LANGUAGE::English,
        };
        let stopwords = get(lang).iter().map(|s| s.to_lowercase()).collect();
        Self { stopwords }
    }

    /// No filtering at all.
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Filter built from an explicit word list.
    pub fn from_list(words: &[&str]) -> Self {
        let stopwords = words.iter().map(|w| w.to_lowercase()).collect();
        Self { stopwords }
    }

    /// Add a single word.
    pub fn add_word(&mut self, word: &str) {
        let word = word.trim();
        if !word.is_empty() {
            self.stopwords.insert(word.to_lowercase());
        }
    }

    /// Merge a custom stopword file: one word per line, blank lines and
    /// `#`-comments skipped. Returns how many words were added.
    pub fn add_from_file(&mut self, path: &Path) -> Result<usize, TextError> {
        let content = fs::read_to_string(path).map_err(|source| TextError::StopwordFile {
            path: path.to_path_buf(),
            source,
        })?;

        let before = self.stopwords.len();
        for line in content.lines() {
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            self.stopwords.insert(word.to_lowercase());
        }
        let added = self.stopwords.len() - before;
        info!(path = %path.display(), added, "custom_stopwords_loaded");
        Ok(added)
    }

    /// Check membership; lookup is case-insensitive.
    pub fn is_stopword(&self, word: &str) -> bool {
        if self.stopwords.contains(word) {
            return true;
        }
        self.stopwords.contains(&word.to_lowercase())
    }

    /// Drop stopwords from a token stream, preserving order.
    pub fn filter(&self, tokens: Vec<String>) -> Vec<String> {
        if self.stopwords.is_empty() {
            return tokens;
        }
        tokens
            .into_iter()
            .filter(|token| !self.is_stopword(token))
            .collect()
    }

    /// Number of stopwords in the filter.
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn english_builtin_contains_the() {
        let filter = StopwordFilter::for_language("en");
        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("The"));
        assert!(!filter.is_stopword("ferocious"));
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let filter = StopwordFilter::for_language("klingon");
        assert!(filter.is_stopword("and"));
    }

    #[test]
    fn empty_filter_passes_everything() {
        let filter = StopwordFilter::empty();
        let tokens = vec!["the".to_string(), "fox".to_string()];
        assert_eq!(filter.filter(tokens.clone()), tokens);
    }

    #[test]
    fn filter_preserves_order() {
        let filter = StopwordFilter::from_list(&["b"]);
        let tokens: Vec<String> = ["a", "b", "c", "b", "d"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(filter.filter(tokens), vec!["a", "c", "d"]);
    }

    #[test]
    fn custom_file_merges_into_builtin() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# project jargon").unwrap();
        writeln!(file, "foo").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "BAR").unwrap();

        let mut filter = StopwordFilter::from_list(&["the"]);
        let added = filter.add_from_file(file.path()).unwrap();
        assert_eq!(added, 2);
        assert!(filter.is_stopword("foo"));
        assert!(filter.is_stopword("bar"));
        assert!(filter.is_stopword("the"));
    }

    #[test]
    fn missing_custom_file_is_a_typed_error() {
        let mut filter = StopwordFilter::empty();
        let err = filter
            .add_from_file(Path::new("/nonexistent/stopwords.txt"))
            .unwrap_err();
        assert!(matches!(err, TextError::StopwordFile { .. }));
    }

    #[test]
    fn config_build_layers_all_sources() {
        let cfg = StopwordConfig {
            use_builtin: false,
            extra_words: vec!["crypto".into(), "Token".into()],
            ..Default::default()
        };
        let filter = cfg.build().unwrap();
        assert_eq!(filter.len(), 2);
        assert!(filter.is_stopword("token"));
    }
}
