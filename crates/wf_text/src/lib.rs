//! Text cleaning and tokenization for the word-frequency pipeline.
//!
//! Raw document text goes through a single pass that lowercases, keeps
//! alphabetic runs, and drops everything else as separators. The result is a
//! stream of normalized word tokens suitable for counting: no punctuation, no
//! digits, no case variants. Stopword removal ([`StopwordFilter`]) and the
//! part-of-speech seam ([`TagFilter`]) run after tokenization.
//!
//! The pipeline is driven by [`TokenizeConfig`]; [`process_text`] is the
//! convenience entry point that applies all three stages in order.
//!
//! ```
//! use wf_text::{process_text, StopwordFilter, TagFilter, TokenizeConfig};
//!
//! let cfg = TokenizeConfig::default();
//! let stopwords = StopwordFilter::from_list(&["the", "a"]);
//! let tags = TagFilter::disabled();
//!
//! let tokens = process_text("The quick brown fox!", &cfg, &stopwords, &tags).unwrap();
//! assert_eq!(tokens, vec!["quick", "brown", "fox"]);
//! ```

mod stopwords;
mod tags;

pub use stopwords::{StopwordConfig, StopwordFilter};
pub use tags::{TagFilter, Tagger};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Configuration for cleaning and tokenization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizeConfig {
    /// Semantic version of the tokenizer configuration.
    pub version: u32,
    /// If true, apply Unicode NFKC normalization before other transforms.
    pub normalize_unicode: bool,
    /// If true, lowercase the text.
    pub lowercase: bool,
    /// If true, only ASCII letters form tokens; accented letters become
    /// separators like punctuation does. Mirrors an English-corpus cleaner.
    pub ascii_only: bool,
    /// Minimum token length in characters; shorter tokens are dropped.
    pub min_token_len: usize,
    /// Maximum token length in characters; longer tokens are dropped.
    pub max_token_len: Option<usize>,
}

impl Default for TokenizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
            lowercase: true,
            ascii_only: true,
            min_token_len: 2,
            max_token_len: None,
        }
    }
}

impl TokenizeConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), TextError> {
        if self.version == 0 {
            return Err(TextError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if self.min_token_len == 0 {
            return Err(TextError::InvalidConfig(
                "min_token_len must be >= 1".into(),
            ));
        }
        if let Some(max) = self.max_token_len {
            if max < self.min_token_len {
                return Err(TextError::InvalidConfig(
                    "max_token_len must be >= min_token_len".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Errors produced by the text stage.
#[derive(Debug, Error)]
pub enum TextError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read stopword file {path}: {source}")]
    StopwordFile {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Clean `input` and split it into normalized word tokens.
///
/// Empty input yields an empty token list; only a broken configuration is an
/// error.
pub fn clean_and_tokenize(input: &str, cfg: &TokenizeConfig) -> Result<Vec<String>, TextError> {
    cfg.validate()?;

    let mut tokens = Vec::new();
    let mut current = String::new();

    if cfg.normalize_unicode {
        scan_chars(input.nfkc(), cfg, &mut tokens, &mut current);
    } else {
        scan_chars(input.chars(), cfg, &mut tokens, &mut current);
    }
    finish_token(&mut tokens, &mut current, cfg);

    Ok(tokens)
}

fn scan_chars<I>(iter: I, cfg: &TokenizeConfig, tokens: &mut Vec<String>, current: &mut String)
where
    I: Iterator<Item = char>,
{
    for ch in iter {
        if cfg.lowercase {
            // Lowercasing can expand a single character into several.
            for lower in ch.to_lowercase() {
                step(lower, cfg, tokens, current);
            }
        } else {
            step(ch, cfg, tokens, current);
        }
    }
}

fn step(ch: char, cfg: &TokenizeConfig, tokens: &mut Vec<String>, current: &mut String) {
    let is_word_char = if cfg.ascii_only {
        ch.is_ascii_alphabetic()
    } else {
        ch.is_alphabetic()
    };

    if is_word_char {
        current.push(ch);
    } else {
        finish_token(tokens, current, cfg);
    }
}

fn finish_token(tokens: &mut Vec<String>, current: &mut String, cfg: &TokenizeConfig) {
    if current.is_empty() {
        return;
    }
    let len = current.chars().count();
    let fits = len >= cfg.min_token_len
        && cfg.max_token_len.map(|max| len <= max).unwrap_or(true);
    if fits {
        tokens.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Full text stage: clean, tokenize, drop stopwords, run the tag seam.
pub fn process_text(
    input: &str,
    cfg: &TokenizeConfig,
    stopwords: &StopwordFilter,
    tags: &TagFilter,
) -> Result<Vec<String>, TextError> {
    let tokens = clean_and_tokenize(input, cfg)?;
    let tokens = stopwords.filter(tokens);
    Ok(tags.filter(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        let cfg = TokenizeConfig::default();
        let tokens = clean_and_tokenize("Hello, World! It's 2024.", &cfg).unwrap();
        assert_eq!(tokens, vec!["hello", "world", "it"]);
    }

    #[test]
    fn digits_split_tokens() {
        let cfg = TokenizeConfig::default();
        let tokens = clean_and_tokenize("abc123def", &cfg).unwrap();
        assert_eq!(tokens, vec!["abc", "def"]);
    }

    #[test]
    fn single_letters_dropped_by_default() {
        let cfg = TokenizeConfig::default();
        let tokens = clean_and_tokenize("a quick i test", &cfg).unwrap();
        assert_eq!(tokens, vec!["quick", "test"]);
    }

    #[test]
    fn min_token_len_one_keeps_single_letters() {
        let cfg = TokenizeConfig {
            min_token_len: 1,
            ..Default::default()
        };
        let tokens = clean_and_tokenize("a b c", &cfg).unwrap();
        assert_eq!(tokens, vec!["a", "b", "c"]);
    }

    #[test]
    fn max_token_len_drops_long_tokens() {
        let cfg = TokenizeConfig {
            max_token_len: Some(5),
            ..Default::default()
        };
        let tokens = clean_and_tokenize("short extraordinarily long", &cfg).unwrap();
        assert_eq!(tokens, vec!["short", "long"]);
    }

    #[test]
    fn ascii_only_treats_accents_as_separators() {
        let cfg = TokenizeConfig {
            normalize_unicode: false,
            ..Default::default()
        };
        let tokens = clean_and_tokenize("caf\u{00E9} naive", &cfg).unwrap();
        assert_eq!(tokens, vec!["caf", "naive"]);

        let cfg = TokenizeConfig {
            normalize_unicode: false,
            ascii_only: false,
            ..cfg
        };
        let tokens = clean_and_tokenize("caf\u{00E9} naive", &cfg).unwrap();
        assert_eq!(tokens, vec!["caf\u{00E9}", "naive"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let cfg = TokenizeConfig::default();
        assert!(clean_and_tokenize("", &cfg).unwrap().is_empty());
        assert!(clean_and_tokenize("  \n\t ", &cfg).unwrap().is_empty());
        assert!(clean_and_tokenize("123 !!! ...", &cfg).unwrap().is_empty());
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = TokenizeConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(
            clean_and_tokenize("text", &cfg),
            Err(TextError::InvalidConfig(_))
        ));

        let cfg = TokenizeConfig {
            min_token_len: 4,
            max_token_len: Some(2),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn process_text_composes_all_stages() {
        let cfg = TokenizeConfig::default();
        let stopwords = StopwordFilter::from_list(&["the", "over"]);
        let tags = TagFilter::disabled();

        let tokens =
            process_text("The quick fox jumps over the dog.", &cfg, &stopwords, &tags).unwrap();
        assert_eq!(tokens, vec!["quick", "fox", "jumps", "dog"]);
    }
}
