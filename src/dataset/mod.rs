//! # Survey Dataset Module
//!
//! In-memory model of a survey bundle. Three row-aligned datasets share one
//! row index space:
//!
//! - [`SpectrumTable`]: flux and ivar matrices (`R x P`) plus the wavelength grid
//! - [`SpectroscopicCatalog`]: class label, redshift, redshift error, extras
//! - [`PhotometricCatalog`]: five-band magnitudes and extinction (`R x 5`)
//!
//! [`SurveyDataset`] is the join view over the three. It is the single place
//! where the row-alignment invariant is enforced: construction fails with
//! [`SurveyError::Shape`] when the row counts disagree, so every downstream
//! operation can index all three datasets with the same row number.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use skysurvey::dataset::{SliceRows, SpectralClass, SurveyDataset};
//! use skysurvey::filter::Predicate;
//!
//! let survey = SurveyDataset::open("survey")?;
//! let stars = survey.build_mask(&Predicate::class_equals(SpectralClass::Star))?;
//! let subset = survey.slice_rows(&stars)?;
//! println!("{} stars", subset.num_rows());
//! # Ok::<(), skysurvey::SurveyError>(())
//! ```

mod catalog;
mod mask;
mod selection;
mod spectra;
mod summary;
mod types;


pub use catalog::{PhotometricCatalog, SpectroscopicCatalog};
pub use mask::RowMask;
pub use selection::{Selection, SliceRows};
pub use spectra::SpectrumTable;
pub use summary::SurveySummary;
pub use types::{Band, SpectralClass};

use std::path::Path;

use ndarray::{Array1, Array2};

use crate::error::SurveyError;
use crate::filter::{self, Predicate};
use crate::reader::SurveyReader;

/// Row-aligned join view over the spectra and both catalogs.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyDataset {
    spectra: SpectrumTable,
    spectro: SpectroscopicCatalog,
    photo: PhotometricCatalog,
}

impl SurveyDataset {
    /// Join three datasets, failing fast if their row counts differ.
    pub fn from_parts(
        spectra: SpectrumTable,
        spectro: SpectroscopicCatalog,
        photo: PhotometricCatalog,
    ) -> Result<Self, SurveyError> {
        let rows = spectra.num_rows();
        if spectro.num_rows() != rows {
            return Err(SurveyError::row_mismatch(
                "spectroscopic catalog",
                rows,
                spectro.num_rows(),
            ));
        }
        if photo.num_rows() != rows {
            return Err(SurveyError::row_mismatch(
                "photometric catalog",
                rows,
                photo.num_rows(),
            ));
        }
        Ok(Self {
            spectra,
            spectro,
            photo,
        })
    }

    /// Load every dataset of the bundle at `dir` and join them.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, SurveyError> {
        SurveyReader::open(dir)?.load_dataset()
    }

    /// Spectra
    pub fn spectra(&self) -> &SpectrumTable {
        &self.spectra
    }

    /// Spectroscopic catalog
    pub fn spectro(&self) -> &SpectroscopicCatalog {
        &self.spectro
    }

    /// Photometric catalog
    pub fn photo(&self) -> &PhotometricCatalog {
        &self.photo
    }

    /// Pixels per spectrum
    pub fn num_pixels(&self) -> usize {
        self.spectra.num_pixels()
    }

    /// Split back into the three datasets
    pub fn into_parts(self) -> (SpectrumTable, SpectroscopicCatalog, PhotometricCatalog) {
        (self.spectra, self.spectro, self.photo)
    }

    /// Evaluate a predicate over the joined columns.
    pub fn build_mask(&self, predicate: &Predicate) -> Result<RowMask, SurveyError> {
        filter::build_mask(self, predicate)
    }

    /// Plain sum of the selected flux rows.
    pub fn coadd(&self, mask: &RowMask) -> Result<Array1<f64>, SurveyError> {
        crate::coadd::coadd(self.spectra.flux().view(), mask)
    }

    /// Binary labels, 1 where the class equals `positive`.
    pub fn labels(&self, positive: SpectralClass) -> Array1<u8> {
        crate::features::extract_labels(self.spectro.class(), positive)
    }

    /// `R x 5` magnitude feature matrix.
    pub fn features(&self) -> Result<Array2<f32>, SurveyError> {
        crate::features::extract_features(self.photo.magnitudes().view())
    }

    /// Summary statistics over the joined datasets
    pub fn summary(&self) -> SurveySummary {
        SurveySummary::from_dataset(self)
    }
}

impl SliceRows for SurveyDataset {
    fn num_rows(&self) -> usize {
        self.spectra.num_rows()
    }

    fn slice_rows<'a>(&self, selection: impl Into<Selection<'a>>) -> Result<Self, SurveyError> {
        let selection = selection.into();
        Ok(Self {
            spectra: self.spectra.slice_rows(selection)?,
            spectro: self.spectro.slice_rows(selection)?,
            photo: self.photo.slice_rows(selection)?,
        })
    }
}
