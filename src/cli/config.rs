//! TOML configuration file support.
//!
//! Settings that would otherwise be repeated on every invocation can live in
//! a config file; command-line flags take precedence over it:
//!
//! ```toml
//! # skysurvey.toml
//! [analysis]
//! positive_class = "STAR"
//! train_fraction = 0.8
//!
//! [reader]
//! batch_size = 4096
//!
//! [writer]
//! preset = "fast"
//! compression_level = 9
//! row_group_size = 2048
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use skysurvey::dataset::SpectralClass;
use skysurvey::reader::ReaderConfig;
use skysurvey::writer::{CompressionType, WriterConfig};

/// Root configuration structure for skysurvey.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Classification experiment settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Parquet read settings.
    #[serde(default)]
    pub reader: ReaderConfig,

    /// Bundle write settings.
    #[serde(default)]
    pub writer: WriterSection,
}

/// Configuration for the classify command.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisConfig {
    /// Class treated as the positive label.
    pub positive_class: Option<SpectralClass>,

    /// Fraction of rows used for training.
    pub train_fraction: Option<f64>,
}

/// Named starting points for the bundle writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriterPreset {
    /// ZSTD level 3.
    #[default]
    Default,
    /// Snappy, for quick scratch bundles.
    Fast,
    /// ZSTD level 22, for bundles that are written once and read often.
    Max,
}

/// Configuration for the demo command.
#[derive(Debug, Default, Deserialize)]
pub struct WriterSection {
    /// Preset the other writer settings are applied on top of.
    pub preset: Option<WriterPreset>,

    /// ZSTD compression level (1-22).
    pub compression_level: Option<i32>,

    /// Rows per Parquet row group.
    pub row_group_size: Option<usize>,
}

impl WriterSection {
    /// Build the writer configuration: preset first, then explicit overrides.
    pub fn writer_config(&self) -> WriterConfig {
        let mut config = match self.preset.unwrap_or_default() {
            WriterPreset::Default => WriterConfig::default(),
            WriterPreset::Fast => WriterConfig::fast_write(),
            WriterPreset::Max => WriterConfig::max_compression(),
        };
        if let Some(level) = self.compression_level {
            config.compression = CompressionType::Zstd(level);
        }
        if let Some(size) = self.row_group_size {
            config.row_group_size = size;
        }
        config
    }
}

impl Config {
    /// Load configuration from a TOML file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [analysis]
            positive_class = "QSO"
            train_fraction = 0.75

            [reader]
            batch_size = 4096

            [writer]
            compression_level = 15
            row_group_size = 2048
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.analysis.positive_class, Some(SpectralClass::Qso));
        assert_eq!(config.analysis.train_fraction, Some(0.75));
        assert_eq!(config.reader.batch_size, 4096);
        assert_eq!(config.writer.compression_level, Some(15));
        assert_eq!(config.writer.row_group_size, Some(2048));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [analysis]
            train_fraction = 0.5
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.analysis.train_fraction, Some(0.5));
        assert_eq!(config.analysis.positive_class, None);
        assert_eq!(config.reader.batch_size, ReaderConfig::default().batch_size);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.analysis.positive_class, None);
        assert_eq!(config.writer.compression_level, None);
    }

    #[test]
    fn test_unknown_class_is_rejected() {
        let toml = r#"
            [analysis]
            positive_class = "COMET"
        "#;
        assert!(Config::from_str(toml).is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.analysis.train_fraction, None);
    }

    #[test]
    fn test_writer_presets() {
        let config = Config::from_str("[writer]\npreset = \"max\"").unwrap();
        assert_eq!(
            config.writer.writer_config().compression,
            CompressionType::max_compression()
        );

        let config = Config::from_str("[writer]\npreset = \"fast\"\nrow_group_size = 64").unwrap();
        let writer = config.writer.writer_config();
        assert_eq!(writer.compression, CompressionType::fast());
        assert_eq!(writer.row_group_size, 64);

        // An explicit level wins over the preset
        let config = Config::from_str("[writer]\npreset = \"fast\"\ncompression_level = 7").unwrap();
        assert_eq!(config.writer.writer_config().compression, CompressionType::Zstd(7));

        let config = Config::from_str("").unwrap();
        assert_eq!(
            config.writer.writer_config().compression,
            CompressionType::default()
        );
        assert!(Config::from_str("[writer]\npreset = \"turbo\"").is_err());
    }
}
