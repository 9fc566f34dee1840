use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::datatypes::Schema;
use parquet::file::reader::{FileReader, SerializedFileReader};

use crate::error::SurveyError;
use crate::schema::{KEY_FORMAT_VERSION, KEY_WAVELENGTH};

/// Metadata extracted from one Parquet file of a bundle
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Format version string
    pub format_version: String,
    /// Total number of rows in the file
    pub total_rows: usize,
    /// Number of row groups
    pub num_row_groups: usize,
    /// Arrow schema of the file
    pub schema: Arc<Schema>,
    /// Raw key-value metadata from the Parquet footer
    pub key_value_metadata: HashMap<String, String>,
}

impl FileMetadata {
    /// Read the footer of the Parquet file at `path`.
    ///
    /// The file handle is released before this returns.
    pub(super) fn read(path: &Path) -> Result<Self, SurveyError> {
        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let parquet_metadata = reader.metadata();
        let file_meta = parquet_metadata.file_metadata();
        let schema = parquet::arrow::parquet_to_arrow_schema(
            file_meta.schema_descr(),
            file_meta.key_value_metadata(),
        )?;

        let mut kv_metadata = HashMap::new();
        if let Some(kv_list) = file_meta.key_value_metadata() {
            for kv in kv_list {
                if let Some(value) = &kv.value {
                    kv_metadata.insert(kv.key.clone(), value.clone());
                }
            }
        }

        let format_version = kv_metadata
            .get(KEY_FORMAT_VERSION)
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let total_rows: i64 = (0..parquet_metadata.num_row_groups())
            .map(|i| parquet_metadata.row_group(i).num_rows())
            .sum();

        Ok(Self {
            format_version,
            total_rows: total_rows as usize,
            num_row_groups: parquet_metadata.num_row_groups(),
            schema: Arc::new(schema),
            key_value_metadata: kv_metadata,
        })
    }

    /// Wavelength grid stored in the spectra footer
    pub(super) fn wavelength(&self) -> Result<Vec<f64>, SurveyError> {
        let raw = self.key_value_metadata.get(KEY_WAVELENGTH).ok_or_else(|| {
            SurveyError::Schema(format!("spectra footer is missing '{KEY_WAVELENGTH}'"))
        })?;
        Ok(serde_json::from_str(raw)?)
    }
}
