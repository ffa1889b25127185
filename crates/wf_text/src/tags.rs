//! Part-of-speech filtering seam.
//!
//! The analyzer reserves a place for tag-based filtering (keep only nouns,
//! say) without shipping a tagger. [`TagFilter`] is wired into the pipeline
//! but passes tokens through unchanged until it is both enabled and given a
//! [`Tagger`] implementation.

use rustc_hash::FxHashSet;

/// Assigns a part-of-speech tag to a word. Implementations are expected to
/// come from an external tagging library.
pub trait Tagger: Send + Sync {
    /// Tag for `word`, or `None` when the tagger cannot decide.
    fn tag(&self, word: &str) -> Option<String>;
}

/// Keeps only tokens whose tag is in the allowed set.
///
/// Disabled, without allowed tags, or without a tagger, the filter is the
/// identity function.
pub struct TagFilter {
    enabled: bool,
    allowed: FxHashSet<String>,
    tagger: Option<Box<dyn Tagger>>,
}

impl std::fmt::Debug for TagFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagFilter")
            .field("enabled", &self.enabled)
            .field("allowed", &self.allowed)
            .field("has_tagger", &self.tagger.is_some())
            .finish()
    }
}

impl Default for TagFilter {
    fn default() -> Self {
        Self::disabled()
    }
}

impl TagFilter {
    /// The inert pass-through filter.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            allowed: FxHashSet::default(),
            tagger: None,
        }
    }

    /// Enabled filter over the given tags, backed by `tagger`.
    pub fn with_tagger(allowed: &[&str], tagger: Box<dyn Tagger>) -> Self {
        Self {
            enabled: true,
            allowed: allowed.iter().map(|t| t.to_string()).collect(),
            tagger: Some(tagger),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Replace the allowed tag set.
    pub fn set_allowed_tags(&mut self, tags: &[&str]) {
        self.allowed = tags.iter().map(|t| t.to_string()).collect();
    }

    /// Apply the filter. Identity unless enabled with tags and a tagger.
    pub fn filter(&self, tokens: Vec<String>) -> Vec<String> {
        let Some(tagger) = self.tagger.as_ref() else {
            return tokens;
        };
        if !self.enabled || self.allowed.is_empty() {
            return tokens;
        }
        tokens
            .into_iter()
            .filter(|word| {
                tagger
                    .tag(word)
                    .map(|tag| self.allowed.contains(&tag))
                    .unwrap_or(true)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedTagger;

    impl Tagger for FixedTagger {
        fn tag(&self, word: &str) -> Option<String> {
            match word {
                "fox" | "dog" => Some("NN".into()),
                "jumps" => Some("VBZ".into()),
                _ => None,
            }
        }
    }

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn disabled_filter_is_identity() {
        let filter = TagFilter::disabled();
        assert!(!filter.is_enabled());
        let input = tokens(&["quick", "fox", "jumps"]);
        assert_eq!(filter.filter(input.clone()), input);
    }

    #[test]
    fn enabled_without_tags_is_identity() {
        let mut filter = TagFilter::with_tagger(&[], Box::new(FixedTagger));
        filter.set_allowed_tags(&[]);
        let input = tokens(&["quick", "fox"]);
        assert_eq!(filter.filter(input.clone()), input);
    }

    #[test]
    fn enabled_filter_keeps_allowed_tags() {
        let filter = TagFilter::with_tagger(&["NN"], Box::new(FixedTagger));
        assert!(filter.is_enabled());
        let input = tokens(&["fox", "jumps", "dog"]);
        assert_eq!(filter.filter(input), tokens(&["fox", "dog"]));
    }

    #[test]
    fn untagged_words_pass_through() {
        let filter = TagFilter::with_tagger(&["NN"], Box::new(FixedTagger));
        let input = tokens(&["mystery", "fox"]);
        assert_eq!(filter.filter(input), tokens(&["mystery", "fox"]));
    }
}
