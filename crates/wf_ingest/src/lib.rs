//! Corpus loading for the word-frequency pipeline.
//!
//! Scans a user-chosen directory for text documents, decodes each file, and
//! produces a [`Corpus`] ready for tokenization. Decoding attempts strict
//! UTF-8 first and falls back to a lossy decode so a single odd file never
//! aborts an analysis run; the fallback is recorded on the document and
//! logged. Unreadable files are skipped with a warning and reported in
//! [`Corpus::skipped`] rather than failing the whole scan.
//!
//! Only the top level of the directory is scanned; subdirectories are
//! ignored. Files are visited in file-name order so repeated runs over the
//! same folder produce the same corpus.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Runtime configuration for corpus loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Semantic version of the ingest configuration.
    pub version: u32,
    /// File extension to scan for, without the leading dot.
    pub extension: String,
    /// Skip dotfiles even when they carry the right extension.
    pub skip_hidden: bool,
    /// Upper bound on a single file's size in bytes; larger files are skipped.
    pub max_file_bytes: Option<u64>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            version: 1,
            extension: "txt".into(),
            skip_hidden: true,
            max_file_bytes: Some(64 * 1024 * 1024),
        }
    }
}

impl IngestConfig {
    /// Validate the configuration before a scan.
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.version == 0 {
            return Err(IngestError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(IngestError::InvalidConfig(
                "extension must be non-empty and given without the leading dot".into(),
            ));
        }
        Ok(())
    }
}

/// Errors that can occur while loading a corpus.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("directory does not exist: {0}")]
    MissingDirectory(PathBuf),
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How a document's bytes were turned into a `String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decoding {
    /// Bytes were valid UTF-8.
    Utf8,
    /// Strict UTF-8 failed; invalid sequences were replaced.
    LossyFallback,
}

/// One loaded text document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// File name without its directory.
    pub file_name: String,
    /// Full path the document was read from.
    pub path: PathBuf,
    /// Decoded text content.
    pub content: String,
    /// Decoder that produced `content`.
    pub decoding: Decoding,
    /// Size of the file on disk in bytes.
    pub bytes: u64,
}

/// A file that matched the scan but could not be loaded.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// The result of scanning a directory: loaded documents plus per-file skips.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub documents: Vec<Document>,
    pub skipped: Vec<SkippedFile>,
}

impl Corpus {
    /// Number of successfully loaded documents.
    pub fn file_count(&self) -> usize {
        self.documents.len()
    }

    /// Total on-disk size of the loaded documents.
    pub fn total_bytes(&self) -> u64 {
        self.documents.iter().map(|d| d.bytes).sum()
    }

    /// All document contents joined with newlines, in scan order.
    pub fn combined_content(&self) -> String {
        let mut out = String::with_capacity(
            self.documents.iter().map(|d| d.content.len() + 1).sum(),
        );
        for doc in &self.documents {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&doc.content);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Scan `dir` for matching files and load them into a [`Corpus`].
///
/// A missing or non-directory path is an error; everything that goes wrong
/// below that level (unreadable file, oversized file) is advisory and lands
/// in [`Corpus::skipped`].
pub fn load_directory(dir: &Path, cfg: &IngestConfig) -> Result<Corpus, IngestError> {
    cfg.validate()?;
    let start = Instant::now();

    if !dir.exists() {
        return Err(IngestError::MissingDirectory(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(IngestError::NotADirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| IngestError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_candidate(path, cfg))
        .collect();
    // Stable scan order regardless of what the OS hands back.
    paths.sort();

    let mut corpus = Corpus::default();
    for path in paths {
        match load_file(&path, cfg) {
            Ok(doc) => {
                info!(
                    file = %doc.file_name,
                    bytes = doc.bytes,
                    decoding = ?doc.decoding,
                    "document_loaded"
                );
                corpus.documents.push(doc);
            }
            Err(reason) => {
                warn!(path = %path.display(), %reason, "document_skipped");
                corpus.skipped.push(SkippedFile { path, reason });
            }
        }
    }

    info!(
        dir = %dir.display(),
        files = corpus.file_count(),
        skipped = corpus.skipped.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "scan_complete"
    );
    Ok(corpus)
}

fn is_candidate(path: &Path, cfg: &IngestConfig) -> bool {
    if !path.is_file() {
        return false;
    }
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if cfg.skip_hidden && name.starts_with('.') {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(&cfg.extension))
        .unwrap_or(false)
}

fn load_file(path: &Path, cfg: &IngestConfig) -> Result<Document, String> {
    let meta = fs::metadata(path).map_err(|err| format!("metadata failed: {err}"))?;
    if let Some(limit) = cfg.max_file_bytes {
        if meta.len() > limit {
            return Err(format!("file exceeds {limit} bytes (got {})", meta.len()));
        }
    }

    let bytes = fs::read(path).map_err(|err| format!("read failed: {err}"))?;
    let (content, decoding) = decode(bytes);

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| "file name is not valid unicode".to_string())?;

    Ok(Document {
        file_name,
        path: path.to_path_buf(),
        content,
        decoding,
        bytes: meta.len(),
    })
}

/// Decode file bytes: strict UTF-8 first, lossy replacement as the fallback.
fn decode(bytes: Vec<u8>) -> (String, Decoding) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, Decoding::Utf8),
        Err(err) => {
            let text = String::from_utf8_lossy(err.as_bytes()).into_owned();
            (text, Decoding::LossyFallback)
        }
    }
}
