use log::{debug, warn};
use ndarray::{Array1, Array2};

use super::utils::{append_float_rows, get_column};
use super::{DatasetId, RecordBatchIterator, SurveyReader};
use crate::dataset::{Selection, SliceRows, SpectrumTable};
use crate::error::SurveyError;
use crate::schema::columns;

impl SurveyReader {
    /// Load the full flux and ivar matrices with the wavelength grid
    ///
    /// **Warning**: For the reference survey this is two `100000 x 4603` f32
    /// matrices. Prefer [`SurveyReader::load_array_rows`] when only a subset
    /// is needed.
    pub fn load_array(&self) -> Result<SpectrumTable, SurveyError> {
        let table = self.spectra_from_batches(self.iter_batches(DatasetId::Spectra)?)?;
        if table.num_rows() != self.num_rows() {
            return Err(SurveyError::row_mismatch(
                "spectra",
                self.num_rows(),
                table.num_rows(),
            ));
        }
        Ok(table)
    }

    /// Load only the selected flux and ivar rows
    ///
    /// Masks yield rows in ascending order; index lists yield rows in the
    /// order given. An empty selection yields a `0 x P` table.
    pub fn load_array_rows<'a>(
        &self,
        selection: impl Into<Selection<'a>>,
    ) -> Result<SpectrumTable, SurveyError> {
        self.read_selected(selection.into(), |sorted| {
            self.spectra_from_batches(self.iter_batches_rows(DatasetId::Spectra, sorted)?)
        })
    }

    /// Read `selection` in file order through `read`, then restore the
    /// requested order if it differs.
    pub(super) fn read_selected<T: SliceRows>(
        &self,
        selection: Selection<'_>,
        read: impl FnOnce(&[usize]) -> Result<T, SurveyError>,
    ) -> Result<T, SurveyError> {
        let requested = selection.resolve(self.num_rows())?;
        let mut sorted = requested.clone();
        sorted.sort_unstable();
        sorted.dedup();

        let subset = read(&sorted)?;
        if subset.num_rows() != sorted.len() {
            return Err(SurveyError::row_mismatch(
                "row subset",
                sorted.len(),
                subset.num_rows(),
            ));
        }
        if sorted == requested {
            return Ok(subset);
        }
        let positions: Vec<usize> = requested
            .iter()
            .map(|row| sorted.binary_search(row).unwrap_or_else(|pos| pos))
            .collect();
        subset.slice_rows(&positions)
    }

    fn spectra_from_batches(
        &self,
        batches: RecordBatchIterator,
    ) -> Result<SpectrumTable, SurveyError> {
        let width = self.num_pixels();
        let mut flux = Vec::new();
        let mut ivar = Vec::new();
        let mut rows = 0;

        for batch in batches {
            let batch = batch?;
            append_float_rows(
                get_column(&batch, columns::FLUX)?.as_ref(),
                columns::FLUX,
                width,
                &mut flux,
            )?;
            append_float_rows(
                get_column(&batch, columns::IVAR)?.as_ref(),
                columns::IVAR,
                width,
                &mut ivar,
            )?;
            rows += batch.num_rows();
        }

        let to_matrix = |values: Vec<f32>| {
            Array2::from_shape_vec((rows, width), values)
                .map_err(|e| SurveyError::Shape(e.to_string()))
        };
        let table = SpectrumTable::new(
            to_matrix(flux)?,
            to_matrix(ivar)?,
            Array1::from(self.wavelength.clone()),
        )?;

        let masked = table.fully_masked_rows();
        if masked > 0 {
            warn!("{} of {} spectra have no valid pixels", masked, rows);
        }
        debug!("Loaded {} spectra x {} pixels", rows, width);
        Ok(table)
    }
}
