use std::fs;

use tempfile::TempDir;
use wordfreq::{
    render_bar_chart, render_word_cloud, run_analysis, write_frequencies, AnalyzerConfig,
    BarChartConfig, ExportError, FrequencyTable, IngestError, PipelineError, SortOrder, VizError,
    WordCloudConfig,
};

#[test]
fn missing_directory_is_advisory_not_fatal() {
    let dir = TempDir::new().unwrap();
    let gone = dir.path().join("does-not-exist");

    let err = run_analysis(&gone, &AnalyzerConfig::default()).unwrap_err();
    match err {
        PipelineError::Ingest(IngestError::MissingDirectory(path)) => {
            assert_eq!(path, gone);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn directory_without_text_files_reports_no_documents() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("image.png"), [0u8; 4]).unwrap();

    let err = run_analysis(dir.path(), &AnalyzerConfig::default()).unwrap_err();
    assert!(matches!(err, PipelineError::NoDocuments(_)));
}

#[test]
fn unreadable_stopword_file_is_a_text_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("doc.txt"), "some words here").unwrap();

    let mut cfg = AnalyzerConfig::default();
    cfg.stopwords.custom_file = Some(dir.path().join("missing_stopwords.txt"));

    let err = run_analysis(dir.path(), &cfg).unwrap_err();
    assert!(matches!(err, PipelineError::Text(_)));
}

#[test]
fn export_of_empty_table_fails_without_touching_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");

    let err = write_frequencies(&FrequencyTable::new(), &path, SortOrder::CountDesc).unwrap_err();
    assert!(matches!(err, ExportError::EmptyTable));
    assert!(!path.exists());
}

#[test]
fn rendering_empty_table_fails() {
    let empty = FrequencyTable::new();
    assert!(matches!(
        render_bar_chart(&empty, &BarChartConfig::default()),
        Err(VizError::EmptyInput)
    ));
    assert!(matches!(
        render_word_cloud(&empty, &WordCloudConfig::default()),
        Err(VizError::EmptyInput)
    ));
}

#[test]
fn failed_run_leaves_no_partial_results() {
    // A failure in one run must not poison a later, valid run.
    let dir = TempDir::new().unwrap();
    let cfg = AnalyzerConfig::default();

    assert!(run_analysis(dir.path(), &cfg).is_err());

    fs::write(dir.path().join("doc.txt"), "recovery works fine").unwrap();
    let report = run_analysis(dir.path(), &cfg).unwrap();
    assert_eq!(report.table.frequency("recovery"), 1);
}
