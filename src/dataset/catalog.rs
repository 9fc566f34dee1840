use std::collections::BTreeMap;

use ndarray::{Array1, Array2, ArrayView1, Axis};

use super::selection::{Selection, SliceRows};
use super::types::{Band, SpectralClass};
use crate::error::SurveyError;
use crate::schema::{columns, NUM_BANDS};

/// Per-source spectroscopic measurements: class, redshift and extra columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectroscopicCatalog {
    class: Vec<SpectralClass>,
    redshift: Array1<f64>,
    redshift_err: Array1<f64>,
    extra: BTreeMap<String, Array1<f64>>,
}

impl SpectroscopicCatalog {
    /// Build a catalog from its required columns.
    pub fn new(
        class: Vec<SpectralClass>,
        redshift: Array1<f64>,
        redshift_err: Array1<f64>,
    ) -> Result<Self, SurveyError> {
        let rows = class.len();
        if redshift.len() != rows {
            return Err(SurveyError::row_mismatch(columns::REDSHIFT, rows, redshift.len()));
        }
        if redshift_err.len() != rows {
            return Err(SurveyError::row_mismatch(
                columns::REDSHIFT_ERR,
                rows,
                redshift_err.len(),
            ));
        }
        Ok(Self {
            class,
            redshift,
            redshift_err,
            extra: BTreeMap::new(),
        })
    }

    /// Attach an extra numeric column.
    pub fn with_extra(
        mut self,
        name: impl Into<String>,
        values: Array1<f64>,
    ) -> Result<Self, SurveyError> {
        let name = name.into();
        if [columns::CLASS, columns::REDSHIFT, columns::REDSHIFT_ERR].contains(&name.as_str()) {
            return Err(SurveyError::Schema(format!(
                "'{name}' is a required column and cannot be used as an extra"
            )));
        }
        if values.len() != self.class.len() {
            return Err(SurveyError::row_mismatch(&name, self.class.len(), values.len()));
        }
        self.extra.insert(name, values);
        Ok(self)
    }

    /// Class label column
    pub fn class(&self) -> &[SpectralClass] {
        &self.class
    }

    /// Redshift column
    pub fn redshift(&self) -> &Array1<f64> {
        &self.redshift
    }

    /// Redshift error column
    pub fn redshift_err(&self) -> &Array1<f64> {
        &self.redshift_err
    }

    /// Extra numeric column by name
    pub fn extra(&self, name: &str) -> Option<&Array1<f64>> {
        self.extra.get(name)
    }

    /// Names of the extra numeric columns, sorted
    pub fn extra_names(&self) -> impl Iterator<Item = &str> {
        self.extra.keys().map(String::as_str)
    }

    /// Number of sources per class
    pub fn class_counts(&self) -> BTreeMap<SpectralClass, usize> {
        let mut counts = BTreeMap::new();
        for class in &self.class {
            *counts.entry(*class).or_insert(0) += 1;
        }
        counts
    }
}

impl SliceRows for SpectroscopicCatalog {
    fn num_rows(&self) -> usize {
        self.class.len()
    }

    fn slice_rows<'a>(&self, selection: impl Into<Selection<'a>>) -> Result<Self, SurveyError> {
        let rows = selection.into().resolve(self.num_rows())?;
        Ok(Self {
            class: rows.iter().map(|&i| self.class[i]).collect(),
            redshift: self.redshift.select(Axis(0), &rows),
            redshift_err: self.redshift_err.select(Axis(0), &rows),
            extra: self
                .extra
                .iter()
                .map(|(name, values)| (name.clone(), values.select(Axis(0), &rows)))
                .collect(),
        })
    }
}

/// Per-source five-band photometry.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotometricCatalog {
    magnitudes: Array2<f32>,
    extinction: Array2<f32>,
}

impl PhotometricCatalog {
    /// Build a catalog; both matrices must be `R x 5`.
    pub fn new(magnitudes: Array2<f32>, extinction: Array2<f32>) -> Result<Self, SurveyError> {
        for (name, matrix) in [(columns::MAG, &magnitudes), (columns::EXTINCTION, &extinction)] {
            if matrix.ncols() != NUM_BANDS {
                return Err(SurveyError::Shape(format!(
                    "{name} has {} bands per row, expected {NUM_BANDS}",
                    matrix.ncols()
                )));
            }
        }
        if magnitudes.nrows() != extinction.nrows() {
            return Err(SurveyError::row_mismatch(
                columns::EXTINCTION,
                magnitudes.nrows(),
                extinction.nrows(),
            ));
        }
        Ok(Self {
            magnitudes,
            extinction,
        })
    }

    /// Magnitude matrix (`R x 5`)
    pub fn magnitudes(&self) -> &Array2<f32> {
        &self.magnitudes
    }

    /// Extinction matrix (`R x 5`)
    pub fn extinction(&self) -> &Array2<f32> {
        &self.extinction
    }

    /// Magnitudes in one band
    pub fn magnitude(&self, band: Band) -> ArrayView1<'_, f32> {
        self.magnitudes.column(band.index())
    }

    /// Extinction in one band
    pub fn band_extinction(&self, band: Band) -> ArrayView1<'_, f32> {
        self.extinction.column(band.index())
    }

    /// Extinction-corrected magnitudes (`mag - extinction`)
    pub fn dereddened(&self) -> Array2<f32> {
        &self.magnitudes - &self.extinction
    }

    /// Color index `a - b` for every source
    pub fn color(&self, a: Band, b: Band) -> Array1<f32> {
        &self.magnitude(a) - &self.magnitude(b)
    }
}

impl SliceRows for PhotometricCatalog {
    fn num_rows(&self) -> usize {
        self.magnitudes.nrows()
    }

    fn slice_rows<'a>(&self, selection: impl Into<Selection<'a>>) -> Result<Self, SurveyError> {
        let rows = selection.into().resolve(self.num_rows())?;
        Ok(Self {
            magnitudes: self.magnitudes.select(Axis(0), &rows),
            extinction: self.extinction.select(Axis(0), &rows),
        })
    }
}
