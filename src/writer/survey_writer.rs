use std::collections::HashMap;
use std::fs::{self, File};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, FixedSizeListArray, Float32Array, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::{debug, info};
use ndarray::{s, ArrayView1, ArrayView2};
use parquet::arrow::ArrowWriter;

use super::config::WriterConfig;
use super::stats::WriterStats;
use crate::dataset::{SliceRows, SurveyDataset};
use crate::error::SurveyError;
use crate::schema::{
    columns, create_photo_catalog_schema, create_spectra_schema, create_spectro_catalog_schema,
    KEY_FORMAT_VERSION, KEY_WAVELENGTH, PHOTO_CATALOG_FILE, SKYSURVEY_FORMAT_VERSION,
    SPECTRA_FILE, SPECTRO_CATALOG_FILE,
};

/// Writes a [`SurveyDataset`] as a three-file Parquet bundle
///
/// Rows are written in chunks of [`WriterConfig::row_group_size`], so every
/// row group of every file covers the same source range.
#[derive(Debug, Clone, Default)]
pub struct SurveyWriter {
    config: WriterConfig,
}

/// Outcome of writing one file
struct FileOutcome {
    row_groups: usize,
    size_bytes: u64,
}

impl SurveyWriter {
    /// Create a writer with the given configuration
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Writer configuration
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Write `dataset` into the bundle directory `dir`, creating it if needed.
    ///
    /// Existing bundle files in `dir` are replaced. All three files are
    /// first written under staging names and only renamed into place once
    /// every one of them succeeded, so a failed write leaves the previous
    /// bundle untouched.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use skysurvey::demo::synthetic_survey;
    /// use skysurvey::writer::SurveyWriter;
    ///
    /// let survey = synthetic_survey(1000, 500, 42)?;
    /// let stats = SurveyWriter::default().write("survey", &survey)?;
    /// println!("{}", stats);
    /// # Ok::<(), skysurvey::SurveyError>(())
    /// ```
    pub fn write<P: AsRef<Path>>(
        &self,
        dir: P,
        dataset: &SurveyDataset,
    ) -> Result<WriterStats, SurveyError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let rows = dataset.num_rows();
        let pixels = dataset.num_pixels();
        if pixels == 0 && rows > 0 {
            return Err(SurveyError::Shape(
                "cannot write spectra with zero pixels".to_string(),
            ));
        }

        let mut staged = Vec::with_capacity(3);
        let result = self.write_staged(dir, dataset, &mut staged);
        let stats = match result {
            Ok(stats) => stats,
            Err(e) => {
                for (staging, _) in &staged {
                    let _ = fs::remove_file(staging);
                }
                return Err(e);
            }
        };
        for (staging, target) in &staged {
            fs::rename(staging, target)?;
        }

        info!("Wrote survey bundle {}: {}", dir.display(), stats);
        Ok(stats)
    }

    /// Write the three files under staging names, recording each one in `staged`.
    fn write_staged(
        &self,
        dir: &Path,
        dataset: &SurveyDataset,
        staged: &mut Vec<(PathBuf, PathBuf)>,
    ) -> Result<WriterStats, SurveyError> {
        let rows = dataset.num_rows();
        let mut stats = WriterStats {
            rows_written: rows,
            pixels_per_spectrum: dataset.num_pixels(),
            ..WriterStats::default()
        };

        let spectra = dataset.spectra();
        let mut spectra_meta = base_metadata();
        spectra_meta.insert(
            KEY_WAVELENGTH.to_string(),
            serde_json::to_string(&spectra.wavelength().to_vec())?,
        );
        let outcome = self.write_file(
            &stage(dir, SPECTRA_FILE, staged),
            create_spectra_schema(dataset.num_pixels()),
            &spectra_meta,
            rows,
            |range| {
                Ok(vec![
                    float_list_column(spectra.flux().slice(s![range.clone(), ..]))?,
                    float_list_column(spectra.ivar().slice(s![range, ..]))?,
                ])
            },
        )?;
        stats.absorb(outcome);

        let spectro = dataset.spectro();
        let extra_names: Vec<&str> = spectro.extra_names().collect();
        let outcome = self.write_file(
            &stage(dir, SPECTRO_CATALOG_FILE, staged),
            create_spectro_catalog_schema(extra_names.as_slice()),
            &base_metadata(),
            rows,
            |range| {
                let class = StringArray::from_iter_values(
                    spectro.class()[range.clone()].iter().map(|c| c.as_str()),
                );
                let mut arrays: Vec<ArrayRef> = vec![
                    Arc::new(class),
                    f64_column(spectro.redshift().slice(s![range.clone()])),
                    f64_column(spectro.redshift_err().slice(s![range.clone()])),
                ];
                for name in &extra_names {
                    let values = spectro.extra(name).ok_or_else(|| {
                        SurveyError::Schema(format!("extra column '{name}' disappeared"))
                    })?;
                    arrays.push(f64_column(values.slice(s![range.clone()])));
                }
                Ok(arrays)
            },
        )?;
        stats.absorb(outcome);

        let photo = dataset.photo();
        let outcome = self.write_file(
            &stage(dir, PHOTO_CATALOG_FILE, staged),
            create_photo_catalog_schema(),
            &base_metadata(),
            rows,
            |range| {
                Ok(vec![
                    float_list_column(photo.magnitudes().slice(s![range.clone(), ..]))?,
                    float_list_column(photo.extinction().slice(s![range, ..]))?,
                ])
            },
        )?;
        stats.absorb(outcome);

        Ok(stats)
    }

    /// Write one file, building one record batch per row group.
    fn write_file<F>(
        &self,
        path: &Path,
        schema: Schema,
        metadata: &HashMap<String, String>,
        rows: usize,
        mut columns_for: F,
    ) -> Result<FileOutcome, SurveyError>
    where
        F: FnMut(Range<usize>) -> Result<Vec<ArrayRef>, SurveyError>,
    {
        let schema = Arc::new(schema);
        let props = self.config.to_writer_properties(metadata);
        let file = File::create(path)?;
        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        let chunk = self.config.row_group_size.max(1);
        let mut start = 0;
        while start < rows {
            let end = (start + chunk).min(rows);
            let batch = RecordBatch::try_new(schema.clone(), columns_for(start..end)?)?;
            writer.write(&batch)?;
            start = end;
        }

        let file_metadata = writer.close()?;
        let size_bytes = fs::metadata(path)?.len();
        debug!(
            "{}: {} rows in {} row groups, {} bytes",
            path.display(),
            file_metadata.num_rows,
            file_metadata.row_groups.len(),
            size_bytes
        );
        Ok(FileOutcome {
            row_groups: file_metadata.row_groups.len(),
            size_bytes,
        })
    }
}

impl WriterStats {
    fn absorb(&mut self, outcome: FileOutcome) {
        self.row_groups_written += outcome.row_groups;
        self.total_size_bytes += outcome.size_bytes;
    }
}

/// Staging path for the bundle file `name`
pub(super) fn staging_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.partial"))
}

/// Register `name` for staging and return the path to write it to
fn stage(dir: &Path, name: &str, staged: &mut Vec<(PathBuf, PathBuf)>) -> PathBuf {
    let staging = staging_path(dir, name);
    staged.push((staging.clone(), dir.join(name)));
    staging
}

/// Footer metadata carried by every bundle file
fn base_metadata() -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    metadata.insert(
        KEY_FORMAT_VERSION.to_string(),
        SKYSURVEY_FORMAT_VERSION.to_string(),
    );
    metadata
}

/// Pack the rows of a matrix into a FixedSizeList<Float32> column
fn float_list_column(matrix: ArrayView2<'_, f32>) -> Result<ArrayRef, SurveyError> {
    let width = matrix.ncols();
    let values = Float32Array::from_iter_values(matrix.iter().copied());
    let item = Arc::new(Field::new(columns::LIST_ITEM, DataType::Float32, true));
    let list = FixedSizeListArray::try_new(item, width as i32, Arc::new(values), None)?;
    Ok(Arc::new(list))
}

fn f64_column(values: ArrayView1<'_, f64>) -> ArrayRef {
    Arc::new(Float64Array::from_iter_values(values.iter().copied()))
}
