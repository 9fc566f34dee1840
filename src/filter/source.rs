use crate::dataset::{
    PhotometricCatalog, SliceRows, SpectralClass, SpectroscopicCatalog, SurveyDataset,
};
use crate::error::SurveyError;

use super::NumericColumn;

/// Typed column access for predicate evaluation.
pub trait ColumnSource {
    /// Number of rows every column has
    fn row_count(&self) -> usize;

    /// Class label column
    fn class_column(&self) -> Result<&[SpectralClass], SurveyError>;

    /// Values of a numeric column as f64, NaN for undefined entries
    fn numeric_column(&self, column: &NumericColumn) -> Result<Vec<f64>, SurveyError>;
}

fn absent(column: impl std::fmt::Display, table: &str) -> SurveyError {
    SurveyError::Schema(format!("column '{column}' is not part of the {table}"))
}

impl ColumnSource for SpectroscopicCatalog {
    fn row_count(&self) -> usize {
        SliceRows::num_rows(self)
    }

    fn class_column(&self) -> Result<&[SpectralClass], SurveyError> {
        Ok(self.class())
    }

    fn numeric_column(&self, column: &NumericColumn) -> Result<Vec<f64>, SurveyError> {
        match column {
            NumericColumn::Redshift => Ok(self.redshift().to_vec()),
            NumericColumn::RedshiftErr => Ok(self.redshift_err().to_vec()),
            NumericColumn::Extra(name) => self
                .extra(name)
                .map(|values| values.to_vec())
                .ok_or_else(|| absent(name, "spectroscopic catalog")),
            other => Err(absent(other, "spectroscopic catalog")),
        }
    }
}

impl ColumnSource for PhotometricCatalog {
    fn row_count(&self) -> usize {
        SliceRows::num_rows(self)
    }

    fn class_column(&self) -> Result<&[SpectralClass], SurveyError> {
        Err(absent("class", "photometric catalog"))
    }

    fn numeric_column(&self, column: &NumericColumn) -> Result<Vec<f64>, SurveyError> {
        match column {
            NumericColumn::Magnitude(band) => {
                Ok(self.magnitude(*band).iter().map(|&v| v as f64).collect())
            }
            NumericColumn::Extinction(band) => {
                Ok(self.band_extinction(*band).iter().map(|&v| v as f64).collect())
            }
            other => Err(absent(other, "photometric catalog")),
        }
    }
}

impl ColumnSource for SurveyDataset {
    fn row_count(&self) -> usize {
        SliceRows::num_rows(self)
    }

    fn class_column(&self) -> Result<&[SpectralClass], SurveyError> {
        self.spectro().class_column()
    }

    fn numeric_column(&self, column: &NumericColumn) -> Result<Vec<f64>, SurveyError> {
        match column {
            NumericColumn::Magnitude(_) | NumericColumn::Extinction(_) => {
                self.photo().numeric_column(column)
            }
            _ => self.spectro().numeric_column(column),
        }
    }
}
