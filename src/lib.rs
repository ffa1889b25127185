//! Umbrella crate for the word-frequency analyzer.
//!
//! Stitches the pipeline stages together so callers can go from a folder of
//! text files to a ranked frequency table with a single call. The stages —
//! scanning ([`wf_ingest`]), cleaning and tokenization ([`wf_text`]),
//! counting ([`wf_freq`]), CSV export ([`wf_export`]) and rendering
//! ([`wf_viz`]) — stay independently usable; this crate only composes them
//! and carries the desktop shell.

pub mod app;
mod config;

pub use config::{AnalyzerConfig, ConfigError, ExportSettings};

pub use wf_export::{
    write_filtered, write_frequencies, write_top_n, write_with_statistics, ExportError, SortOrder,
};
pub use wf_freq::{CorpusStats, FrequencyTable};
pub use wf_ingest::{
    load_directory, Corpus, Decoding, Document, IngestConfig, IngestError, SkippedFile,
};
pub use wf_text::{
    clean_and_tokenize, process_text, StopwordConfig, StopwordFilter, TagFilter, Tagger,
    TextError, TokenizeConfig,
};
pub use wf_viz::{
    render_bar_chart, render_horizontal_bar_chart, render_word_cloud, save_png, BarChartConfig,
    VizError, WordCloudConfig,
};

use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tracing::info;

/// Errors that can occur while running the analysis pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("ingest failure: {0}")]
    Ingest(#[from] IngestError),
    #[error("text processing failure: {0}")]
    Text(#[from] TextError),
    #[error("no text documents found in {0}")]
    NoDocuments(PathBuf),
}

/// Everything one analysis run produces.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// The rebuilt frequency table.
    pub table: FrequencyTable,
    /// Statistics derived from the table.
    pub stats: CorpusStats,
    /// How many documents were loaded.
    pub file_count: usize,
    /// Files that matched the scan but could not be loaded.
    pub skipped: Vec<SkippedFile>,
}

/// Tokenize every document of a corpus with the same filters, in scan order.
pub fn tokenize_corpus(
    corpus: &Corpus,
    cfg: &TokenizeConfig,
    stopwords: &StopwordFilter,
    tags: &TagFilter,
) -> Result<Vec<String>, TextError> {
    let mut tokens = Vec::new();
    for doc in &corpus.documents {
        tokens.extend(process_text(&doc.content, cfg, stopwords, tags)?);
    }
    Ok(tokens)
}

/// Run the full pipeline over a directory: scan, tokenize, count.
///
/// Uses the inert tag filter; callers that want part-of-speech filtering
/// build the stages themselves.
pub fn run_analysis(dir: &Path, cfg: &AnalyzerConfig) -> Result<AnalysisReport, PipelineError> {
    let start = Instant::now();

    let corpus = load_directory(dir, &cfg.ingest)?;
    if corpus.is_empty() {
        return Err(PipelineError::NoDocuments(dir.to_path_buf()));
    }

    let stopwords = cfg.stopwords.build()?;
    let tags = TagFilter::disabled();
    let tokens = tokenize_corpus(&corpus, &cfg.tokenize, &stopwords, &tags)?;

    let table = FrequencyTable::from_tokens(&tokens);
    let stats = table.stats();

    info!(
        dir = %dir.display(),
        files = corpus.file_count(),
        tokens = stats.total_tokens,
        unique = stats.unique_words,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "analysis_complete"
    );

    Ok(AnalysisReport {
        table,
        stats,
        file_count: corpus.file_count(),
        skipped: corpus.skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn run_analysis_end_to_end() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("one.txt"),
            "The quick brown fox jumps over the lazy dog.",
        )
        .unwrap();
        fs::write(dir.path().join("two.txt"), "Quick quick, said the fox!").unwrap();

        let cfg = AnalyzerConfig::default();
        let report = run_analysis(dir.path(), &cfg).unwrap();

        assert_eq!(report.file_count, 2);
        assert_eq!(report.table.frequency("fox"), 2);
        // Stopwords never reach the table.
        assert_eq!(report.table.frequency("the"), 0);

        let sum: u64 = report.table.iter().map(|(_, c)| c).sum();
        assert_eq!(sum, report.stats.total_tokens);
    }

    #[test]
    fn empty_directory_reports_no_documents() {
        let dir = TempDir::new().unwrap();
        let cfg = AnalyzerConfig::default();
        let err = run_analysis(dir.path(), &cfg).unwrap_err();
        assert!(matches!(err, PipelineError::NoDocuments(_)));
    }

    #[test]
    fn missing_directory_propagates_ingest_error() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("missing");
        let cfg = AnalyzerConfig::default();
        let err = run_analysis(&gone, &cfg).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Ingest(IngestError::MissingDirectory(_))
        ));
    }
}
