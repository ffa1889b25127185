//! YAML configuration for the analyzer.
//!
//! All pipeline stages are configured from a single YAML file with one
//! section per stage. Every field has a default, so an empty file (or no
//! file at all) yields a working configuration.
//!
//! ## Example
//!
//! ```yaml
//! version: "1.0"
//! name: "english corpus defaults"
//!
//! ingest:
//!   extension: "txt"
//!   skip_hidden: true
//!
//! tokenize:
//!   lowercase: true
//!   min_token_len: 2
//!
//! stopwords:
//!   language: "en"
//!   extra_words: ["chapter", "page"]
//!
//! export:
//!   order: count_desc
//!   include_statistics: true
//!
//! chart:
//!   width: 1200
//!   height: 800
//!   top_n: 20
//!
//! horizontal_chart:
//!   top_n: 15
//!
//! cloud:
//!   width: 800
//!   height: 600
//!   max_words: 100
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use wf_export::SortOrder;
use wf_ingest::IngestConfig;
use wf_text::{StopwordConfig, TokenizeConfig};
use wf_viz::{BarChartConfig, WordCloudConfig};

/// Errors that can occur when loading the analyzer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Export preferences used by the GUI and the headless runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Row ordering for the plain layout.
    pub order: SortOrder,
    /// Use the extended layout with summary rows and percentages.
    pub include_statistics: bool,
    /// Cap the plain layout at the N most frequent words.
    pub top_n: Option<usize>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            order: SortOrder::CountDesc,
            include_statistics: true,
            top_n: None,
        }
    }
}

/// Top-level configuration for the whole analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Configuration format version.
    pub version: String,

    /// Optional configuration name/description.
    pub name: Option<String>,

    /// Directory scanning stage.
    pub ingest: IngestConfig,

    /// Cleaning and tokenization stage.
    pub tokenize: TokenizeConfig,

    /// Stopword sources.
    pub stopwords: StopwordConfig,

    /// CSV export preferences.
    pub export: ExportSettings,

    /// Vertical bar chart geometry.
    pub chart: BarChartConfig,

    /// Horizontal bar chart geometry.
    pub horizontal_chart: BarChartConfig,

    /// Word cloud geometry.
    pub cloud: WordCloudConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            ingest: IngestConfig::default(),
            tokenize: TokenizeConfig::default(),
            stopwords: StopwordConfig::default(),
            export: ExportSettings::default(),
            chart: BarChartConfig::default(),
            horizontal_chart: BarChartConfig::horizontal_default(),
            cloud: WordCloudConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Load a YAML configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: AnalyzerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration, delegating to each stage.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.version.as_str() {
            "1" | "1.0" => {}
            v => return Err(ConfigError::UnsupportedVersion(v.to_string())),
        }

        self.ingest
            .validate()
            .map_err(|err| ConfigError::Validation(err.to_string()))?;
        self.tokenize
            .validate()
            .map_err(|err| ConfigError::Validation(err.to_string()))?;

        if self.chart.top_n == 0 || self.horizontal_chart.top_n == 0 {
            return Err(ConfigError::Validation(
                "chart top_n must be >= 1".to_string(),
            ));
        }
        if self.cloud.max_words == 0 {
            return Err(ConfigError::Validation(
                "cloud max_words must be >= 1".to_string(),
            ));
        }
        if let Some(0) = self.export.top_n {
            return Err(ConfigError::Validation(
                "export top_n must be >= 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_is_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.version, "1.0");
        assert_eq!(config.chart.top_n, 20);
        assert_eq!(config.horizontal_chart.top_n, 15);
        assert_eq!(config.cloud.max_words, 100);
    }

    #[test]
    fn load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
tokenize:
  min_token_len: 3
stopwords:
  language: "en"
  extra_words: ["chapter"]
chart:
  top_n: 10
"#;

        let config = AnalyzerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name, Some("test config".to_string()));
        assert_eq!(config.tokenize.min_token_len, 3);
        assert_eq!(config.stopwords.extra_words, vec!["chapter"]);
        assert_eq!(config.chart.top_n, 10);
        // Untouched sections keep their defaults.
        assert_eq!(config.cloud.width, 800);
    }

    #[test]
    fn load_from_file() {
        let yaml = r#"
version: "1.0"
ingest:
  extension: "txt"
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = AnalyzerConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.version, "1.0");
    }

    #[test]
    fn unsupported_version_rejected() {
        let result = AnalyzerConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(_))));
    }

    #[test]
    fn stage_validation_propagates() {
        let yaml = r#"
version: "1.0"
tokenize:
  min_token_len: 0
"#;
        let result = AnalyzerConfig::from_yaml(yaml);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn zero_chart_top_n_rejected() {
        let yaml = r#"
version: "1.0"
chart:
  top_n: 0
"#;
        let result = AnalyzerConfig::from_yaml(yaml);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
