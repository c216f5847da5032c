//! Configuration management for the phishing verification pipeline

use anyhow::{Context, Result};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pipeline: PipelineConfig,
    pub heuristics: HeuristicsConfig,
    pub logging: LoggingConfig,
}

/// Batch pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Labeled input dataset (CSV with URL and label columns)
    pub input_path: PathBuf,
    /// Result dataset, recreated on every run
    pub output_path: PathBuf,
    /// Records held in memory per group
    pub group_size: usize,
    /// Optional JSON copy of the final run report
    pub report_path: Option<PathBuf>,
    /// Output rows echoed back after a successful run
    pub sample_rows: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("Dataset549k.csv"),
            output_path: PathBuf::from("phishing_results_full_verified.csv"),
            group_size: 50_000,
            report_path: None,
            sample_rows: 5,
        }
    }
}

/// Heuristic indicator parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicsConfig {
    /// URLs strictly longer than this many characters are flagged
    pub long_url_threshold: usize,
    /// Substrings that flag a host as suspicious
    pub suspicious_keywords: Vec<String>,
    /// Top-level domains that flag a host as suspicious
    pub suspicious_tlds: Vec<String>,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            long_url_threshold: 75,
            suspicious_keywords: ["secure", "login", "verify"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            suspicious_tlds: ["tk", "xyz", "gq", "ml"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config/config.toml`, falling back to defaults
    /// for anything the file does not set (or when the file is absent).
    pub fn load() -> Result<Self> {
        Self::build(File::from(Path::new("config/config.toml")).required(false))
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::build(File::from(path.as_ref()))
    }

    fn build<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = Config::builder()
            .add_source(source)
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.pipeline.group_size, 50_000);
        assert_eq!(config.heuristics.long_url_threshold, 75);
        assert_eq!(config.heuristics.suspicious_tlds, vec!["tk", "xyz", "gq", "ml"]);
        assert!(config.pipeline.report_path.is_none());
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[pipeline]\ngroup_size = 10\n\n[logging]\nformat = \"json\"").unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.pipeline.group_size, 10);
        assert_eq!(config.logging.format, "json");
        assert_eq!(
            config.pipeline.output_path,
            PathBuf::from("phishing_results_full_verified.csv")
        );
        assert_eq!(config.heuristics.suspicious_keywords.len(), 3);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load_from_path(dir.path().join("absent.toml")).is_err());
    }
}
