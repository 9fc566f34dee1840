use ndarray::{Array1, Array2, ArrayView1, Axis};

use super::selection::{Selection, SliceRows};
use crate::error::SurveyError;

/// Flux and inverse-variance matrices sharing one wavelength grid.
///
/// Invariants, checked by [`SpectrumTable::new`]:
/// - `flux` and `ivar` are both `R x P`
/// - `wavelength` has length `P`
/// - every `ivar` entry is `>= 0` (0 marks a bad pixel)
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumTable {
    flux: Array2<f32>,
    ivar: Array2<f32>,
    wavelength: Array1<f64>,
}

impl SpectrumTable {
    /// Build a table, validating shapes and ivar sign.
    pub fn new(
        flux: Array2<f32>,
        ivar: Array2<f32>,
        wavelength: Array1<f64>,
    ) -> Result<Self, SurveyError> {
        if flux.dim() != ivar.dim() {
            return Err(SurveyError::Shape(format!(
                "flux is {:?} but ivar is {:?}",
                flux.dim(),
                ivar.dim()
            )));
        }
        if flux.ncols() != wavelength.len() {
            return Err(SurveyError::Shape(format!(
                "spectra have {} pixels but the wavelength grid has {}",
                flux.ncols(),
                wavelength.len()
            )));
        }
        if let Some(bad) = ivar.iter().find(|&&v| v.is_nan() || v < 0.0) {
            return Err(SurveyError::InvalidData(format!(
                "ivar must be a non-negative number, found {bad}"
            )));
        }
        Ok(Self {
            flux,
            ivar,
            wavelength,
        })
    }

    /// Flux matrix (`R x P`)
    pub fn flux(&self) -> &Array2<f32> {
        &self.flux
    }

    /// Inverse-variance matrix (`R x P`)
    pub fn ivar(&self) -> &Array2<f32> {
        &self.ivar
    }

    /// Shared wavelength grid (length `P`)
    pub fn wavelength(&self) -> &Array1<f64> {
        &self.wavelength
    }

    /// Pixels per spectrum
    pub fn num_pixels(&self) -> usize {
        self.wavelength.len()
    }

    /// Flux of one source
    pub fn flux_row(&self, row: usize) -> Option<ArrayView1<'_, f32>> {
        (row < self.flux.nrows()).then(|| self.flux.row(row))
    }

    /// Rows whose ivar is zero at every pixel
    pub fn fully_masked_rows(&self) -> usize {
        self.ivar
            .axis_iter(Axis(0))
            .filter(|row| row.iter().all(|&v| v == 0.0))
            .count()
    }

    /// Split into `(flux, ivar, wavelength)`
    pub fn into_parts(self) -> (Array2<f32>, Array2<f32>, Array1<f64>) {
        (self.flux, self.ivar, self.wavelength)
    }
}

impl SliceRows for SpectrumTable {
    fn num_rows(&self) -> usize {
        self.flux.nrows()
    }

    fn slice_rows<'a>(&self, selection: impl Into<Selection<'a>>) -> Result<Self, SurveyError> {
        let rows = selection.into().resolve(self.num_rows())?;
        Ok(Self {
            flux: self.flux.select(Axis(0), &rows),
            ivar: self.ivar.select(Axis(0), &rows),
            wavelength: self.wavelength.clone(),
        })
    }
}
