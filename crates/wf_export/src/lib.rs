//! CSV export for frequency tables.
//!
//! Two layouts: the plain two-column `word,count` file (optionally top-N or
//! filtered first), and the extended layout that leads with summary rows and
//! adds a per-word percentage column. Parent directories are created on
//! demand. Exporting an empty table is a typed error so callers can surface
//! "nothing to export" instead of writing a header-only file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use wf_freq::FrequencyTable;

/// Row ordering for the plain layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Count descending, ties alphabetical.
    #[default]
    CountDesc,
    /// Word ascending.
    Alphabetical,
}

/// Errors produced while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("frequency table is empty; nothing to export")]
    EmptyTable,
    #[error("no words left after filtering; nothing to export")]
    EmptyAfterFilter,
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Write the whole table as `word,count` rows. Returns the row count.
pub fn write_frequencies(
    table: &FrequencyTable,
    path: &Path,
    order: SortOrder,
) -> Result<usize, ExportError> {
    if table.is_empty() {
        return Err(ExportError::EmptyTable);
    }
    let rows = sorted_rows(table, order);
    write_plain(&rows, path)
}

/// Write only the `n` most frequent words.
pub fn write_top_n(table: &FrequencyTable, path: &Path, n: usize) -> Result<usize, ExportError> {
    if table.is_empty() {
        return Err(ExportError::EmptyTable);
    }
    let rows = table.top_n(n);
    if rows.is_empty() {
        return Err(ExportError::EmptyAfterFilter);
    }
    write_plain(&rows, path)
}

/// Write words passing both a minimum count and a minimum length.
pub fn write_filtered(
    table: &FrequencyTable,
    path: &Path,
    min_count: u64,
    min_length: usize,
) -> Result<usize, ExportError> {
    if table.is_empty() {
        return Err(ExportError::EmptyTable);
    }
    let by_count = table.filter_by_count(min_count, None);
    let mut rows: Vec<(String, u64)> = by_count
        .into_iter()
        .filter(|(word, _)| word.chars().count() >= min_length)
        .collect();
    if rows.is_empty() {
        return Err(ExportError::EmptyAfterFilter);
    }
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    write_plain(&rows, path)
}

/// Extended layout: summary rows, a separator, then
/// `word,count,percent` rows where percent is the word's share of all
/// counted tokens, two decimals.
pub fn write_with_statistics(table: &FrequencyTable, path: &Path) -> Result<usize, ExportError> {
    if table.is_empty() {
        return Err(ExportError::EmptyTable);
    }
    ensure_parent(path)?;

    // Records vary in width here, so the writer must be flexible.
    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    let stats = table.stats();

    writer.write_record(["summary"])?;
    let total_words = stats.total_tokens.to_string();
    writer.write_record(["total_words", total_words.as_str()])?;
    let unique_words = stats.unique_words.to_string();
    writer.write_record(["unique_words", unique_words.as_str()])?;
    writer.write_record([""])?;

    writer.write_record(["word", "count", "percent"])?;
    let total = stats.total_tokens as f64;
    let rows = table.ranked();
    for (word, count) in &rows {
        let percent = if total > 0.0 {
            *count as f64 / total * 100.0
        } else {
            0.0
        };
        let count = count.to_string();
        let percent = format!("{percent:.2}");
        writer.write_record([word.as_str(), count.as_str(), percent.as_str()])?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = rows.len(), "csv_export_with_statistics");
    Ok(rows.len())
}

fn sorted_rows(table: &FrequencyTable, order: SortOrder) -> Vec<(String, u64)> {
    match order {
        SortOrder::CountDesc => table.ranked(),
        SortOrder::Alphabetical => {
            let all: HashMap<String, u64> = table.filter_by_count(0, None);
            let mut rows: Vec<(String, u64)> = all.into_iter().collect();
            rows.sort_by(|a, b| a.0.cmp(&b.0));
            rows
        }
    }
}

fn write_plain(rows: &[(String, u64)], path: &Path) -> Result<usize, ExportError> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["word", "count"])?;
    for (word, count) in rows {
        let count = count.to_string();
        writer.write_record([word.as_str(), count.as_str()])?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = rows.len(), "csv_export");
    Ok(rows.len())
}

fn ensure_parent(path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> FrequencyTable {
        FrequencyTable::from_tokens(&["data", "python", "data", "analysis", "data", "python"])
    }

    #[test]
    fn plain_export_sorted_by_count() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let rows = write_frequencies(&sample(), &path, SortOrder::CountDesc).unwrap();
        assert_eq!(rows, 3);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "word,count");
        assert_eq!(lines[1], "data,3");
        assert_eq!(lines[2], "python,2");
        assert_eq!(lines[3], "analysis,1");
    }

    #[test]
    fn plain_export_alphabetical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        write_frequencies(&sample(), &path, SortOrder::Alphabetical).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "analysis,1");
        assert_eq!(lines[2], "data,3");
        assert_eq!(lines[3], "python,2");
    }

    #[test]
    fn top_n_limits_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("top.csv");

        let rows = write_top_n(&sample(), &path, 2).unwrap();
        assert_eq!(rows, 2);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn filtered_export_applies_both_filters() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("filtered.csv");

        // min_count 2 drops "analysis"; min_length 5 drops "data".
        let rows = write_filtered(&sample(), &path, 2, 5).unwrap();
        assert_eq!(rows, 1);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("python,2"));
        assert!(!content.contains("data"));
    }

    #[test]
    fn filtered_export_can_come_up_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("filtered.csv");

        let err = write_filtered(&sample(), &path, 100, 1).unwrap_err();
        assert!(matches!(err, ExportError::EmptyAfterFilter));
        assert!(!path.exists());
    }

    #[test]
    fn statistics_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stats.csv");

        write_with_statistics(&sample(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "summary");
        assert_eq!(lines[1], "total_words,6");
        assert_eq!(lines[2], "unique_words,3");
        assert_eq!(lines[3], "\"\"");
        assert_eq!(lines[4], "word,count,percent");
        assert_eq!(lines[5], "data,3,50.00");
        assert_eq!(lines[6], "python,2,33.33");
        assert_eq!(lines[7], "analysis,1,16.67");
    }

    #[test]
    fn empty_table_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("never.csv");
        let empty = FrequencyTable::new();

        assert!(matches!(
            write_frequencies(&empty, &path, SortOrder::CountDesc),
            Err(ExportError::EmptyTable)
        ));
        assert!(matches!(
            write_with_statistics(&empty, &path),
            Err(ExportError::EmptyTable)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn parent_directories_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deep/out.csv");

        write_frequencies(&sample(), &path, SortOrder::CountDesc).unwrap();
        assert!(path.exists());
    }
}
