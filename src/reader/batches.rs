use std::fs::File;

use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::{ParquetRecordBatchReaderBuilder, RowSelection};

use super::utils::consecutive_ranges;
use super::{DatasetId, SurveyReader};
use crate::error::SurveyError;

/// Streaming iterator over the record batches of one bundle file
///
/// Owns the open file handle; dropping the iterator releases it.
pub struct RecordBatchIterator {
    inner: Box<dyn Iterator<Item = Result<RecordBatch, arrow::error::ArrowError>> + Send>,
}

impl RecordBatchIterator {
    pub(crate) fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Result<RecordBatch, arrow::error::ArrowError>> + Send + 'static,
    {
        Self {
            inner: Box::new(iter),
        }
    }
}

impl Iterator for RecordBatchIterator {
    type Item = Result<RecordBatch, SurveyError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|r| r.map_err(SurveyError::from))
    }
}

impl SurveyReader {
    /// Returns a streaming iterator over every record batch of one dataset
    ///
    /// Memory usage is bounded by `batch_size * row_size`.
    ///
    /// # Example
    /// ```rust,no_run
    /// use skysurvey::reader::{DatasetId, SurveyReader};
    ///
    /// let reader = SurveyReader::open("survey")?;
    /// for batch_result in reader.iter_batches(DatasetId::PhotoCatalog)? {
    ///     let batch = batch_result?;
    ///     println!("Processing batch with {} rows", batch.num_rows());
    /// }
    /// # Ok::<(), skysurvey::SurveyError>(())
    /// ```
    pub fn iter_batches(&self, id: DatasetId) -> Result<RecordBatchIterator, SurveyError> {
        self.batches(id, None)
    }

    /// Streaming iterator over only the given rows of one dataset
    ///
    /// `sorted_rows` must be ascending and free of duplicates; rows come
    /// back in that order. Rows outside the selection are skipped by the
    /// Parquet decoder rather than filtered after decoding.
    pub fn iter_batches_rows(
        &self,
        id: DatasetId,
        sorted_rows: &[usize],
    ) -> Result<RecordBatchIterator, SurveyError> {
        if sorted_rows.windows(2).any(|w| w[0] >= w[1]) {
            return Err(SurveyError::InvalidData(
                "row selection must be strictly ascending".to_string(),
            ));
        }
        if let Some(&last) = sorted_rows.last() {
            if last >= self.num_rows() {
                return Err(SurveyError::Shape(format!(
                    "row index {last} out of range for {} rows",
                    self.num_rows()
                )));
            }
        }
        self.batches(id, Some(sorted_rows))
    }

    fn batches(
        &self,
        id: DatasetId,
        rows: Option<&[usize]>,
    ) -> Result<RecordBatchIterator, SurveyError> {
        let file = File::open(self.path(id))?;
        let mut builder =
            ParquetRecordBatchReaderBuilder::try_new(file)?.with_batch_size(self.config.batch_size);
        if let Some(rows) = rows {
            let selection = RowSelection::from_consecutive_ranges(
                consecutive_ranges(rows).into_iter(),
                self.num_rows(),
            );
            builder = builder.with_row_selection(selection);
        }
        let reader = builder.build()?;
        Ok(RecordBatchIterator::new(reader))
    }

    /// Read all record batches of one dataset (eager)
    ///
    /// **Warning**: This loads the whole file into memory. For large files,
    /// prefer `iter_batches()`.
    pub fn read_all_batches(&self, id: DatasetId) -> Result<Vec<RecordBatch>, SurveyError> {
        self.iter_batches(id)?.collect()
    }
}
