//! Frequency aggregation and ranking.
//!
//! [`FrequencyTable`] is the one structure that survives the whole pipeline:
//! a mapping from normalized word to occurrence count. It is rebuilt
//! wholesale on each analysis run rather than incrementally maintained, and
//! its invariants are small: counts are positive, the key set has no
//! duplicates, and `total()` equals the length of the token list the table
//! was built from.
//!
//! Ranking is deterministic: [`FrequencyTable::top_n`] orders by count
//! descending and breaks ties alphabetically, so the table, the CSV export,
//! and the charts all agree between runs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Word → occurrence count, plus the total token count the table was built
/// from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
    total: u64,
}

/// Summary derived on demand from a [`FrequencyTable`]; never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CorpusStats {
    /// Number of tokens counted, duplicates included.
    pub total_tokens: u64,
    /// Number of distinct words.
    pub unique_words: usize,
    /// Mean occurrences per distinct word.
    pub avg_frequency: f64,
    /// Highest single-word count.
    pub max_frequency: u64,
    /// Lowest single-word count.
    pub min_frequency: u64,
    /// The word carrying `max_frequency`, with its count.
    pub most_frequent: Option<(String, u64)>,
}

impl FrequencyTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a token list. Any prior state is replaced.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut table = Self::new();
        table.rebuild(tokens);
        table
    }

    /// Replace the table's contents with counts over `tokens`.
    pub fn rebuild<S: AsRef<str>>(&mut self, tokens: &[S]) {
        self.counts.clear();
        self.total = 0;
        for token in tokens {
            *self.counts.entry(token.as_ref().to_owned()).or_insert(0) += 1;
            self.total += 1;
        }
    }

    /// Occurrence count for `word`; 0 when absent. Lookup is
    /// case-insensitive since keys are stored lowercase.
    pub fn frequency(&self, word: &str) -> u64 {
        if let Some(count) = self.counts.get(word) {
            return *count;
        }
        self.counts
            .get(&word.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// The `n` most frequent words, count descending, ties alphabetical.
    pub fn top_n(&self, n: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|(word, count)| (word.clone(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(n);
        entries
    }

    /// Every entry in ranked order; convenience for exports and charts.
    pub fn ranked(&self) -> Vec<(String, u64)> {
        self.top_n(self.counts.len())
    }

    /// Subset of words with `min <= count <= max` (no upper bound when
    /// `max` is `None`).
    pub fn filter_by_count(&self, min: u64, max: Option<u64>) -> HashMap<String, u64> {
        self.counts
            .iter()
            .filter(|(_, &count)| count >= min && max.map(|m| count <= m).unwrap_or(true))
            .map(|(word, &count)| (word.clone(), count))
            .collect()
    }

    /// Subset of words whose length in chars is within `[min, max]`.
    pub fn filter_by_word_length(&self, min: usize, max: Option<usize>) -> HashMap<String, u64> {
        self.counts
            .iter()
            .filter(|(word, _)| {
                let len = word.chars().count();
                len >= min && max.map(|m| len <= m).unwrap_or(true)
            })
            .map(|(word, &count)| (word.clone(), count))
            .collect()
    }

    /// Union with another table, summing counts per word.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (word, count) in &other.counts {
            *self.counts.entry(word.clone()).or_insert(0) += count;
        }
        self.total += other.total;
    }

    /// Compute the statistics summary for the current contents.
    pub fn stats(&self) -> CorpusStats {
        if self.counts.is_empty() {
            return CorpusStats::default();
        }

        let mut max_frequency = 0u64;
        let mut min_frequency = u64::MAX;
        let mut most_frequent: Option<(String, u64)> = None;
        for (word, &count) in &self.counts {
            if count > max_frequency
                || (count == max_frequency
                    && most_frequent
                        .as_ref()
                        .map(|(best, _)| word < best)
                        .unwrap_or(true))
            {
                max_frequency = count;
                most_frequent = Some((word.clone(), count));
            }
            min_frequency = min_frequency.min(count);
        }

        CorpusStats {
            total_tokens: self.total,
            unique_words: self.counts.len(),
            avg_frequency: self.total as f64 / self.counts.len() as f64,
            max_frequency,
            min_frequency,
            most_frequent,
        }
    }

    /// Number of distinct words.
    pub fn unique_words(&self) -> usize {
        self.counts.len()
    }

    /// Number of tokens counted, duplicates included.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(word, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, &count)| (word.as_str(), count))
    }

    /// Drop all contents.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.total = 0;
    }
}
