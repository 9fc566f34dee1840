use serde::Deserialize;

/// Configuration for reading survey bundles
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Batch size (rows) for Parquet record batches
    pub batch_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { batch_size: 8192 }
    }
}
