use std::collections::BTreeMap;
use std::fmt;

use super::{SliceRows, SpectralClass, SpectroscopicCatalog, SurveyDataset};

/// Summary statistics about a survey bundle
#[derive(Debug, Clone, PartialEq)]
pub struct SurveySummary {
    /// Number of sources (rows)
    pub num_rows: usize,
    /// Pixels per spectrum
    pub num_pixels: usize,
    /// Wavelength range (min, max) in Angstrom
    pub wavelength_range: Option<(f64, f64)>,
    /// Sources per spectroscopic class
    pub class_counts: BTreeMap<SpectralClass, usize>,
    /// Redshift range (min, max), ignoring NaN
    pub redshift_range: Option<(f64, f64)>,
    /// Spectra whose ivar is zero everywhere; `None` when flux was not loaded
    pub fully_masked_spectra: Option<usize>,
}

/// Min and max of the finite values, if any
pub(crate) fn finite_range<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

impl SurveySummary {
    /// Summarize a catalog and a wavelength grid without touching flux.
    pub(crate) fn from_catalog(
        catalog: &SpectroscopicCatalog,
        wavelength: &[f64],
        fully_masked_spectra: Option<usize>,
    ) -> Self {
        Self {
            num_rows: catalog.num_rows(),
            num_pixels: wavelength.len(),
            wavelength_range: finite_range(wavelength),
            class_counts: catalog.class_counts(),
            redshift_range: finite_range(catalog.redshift().iter()),
            fully_masked_spectra,
        }
    }

    pub(super) fn from_dataset(dataset: &SurveyDataset) -> Self {
        let wavelength = dataset.spectra().wavelength().to_vec();
        Self::from_catalog(
            dataset.spectro(),
            &wavelength,
            Some(dataset.spectra().fully_masked_rows()),
        )
    }

    /// Count for one class (0 when absent)
    pub fn count(&self, class: SpectralClass) -> usize {
        self.class_counts.get(&class).copied().unwrap_or(0)
    }
}

impl fmt::Display for SurveySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Survey Summary")?;
        writeln!(f, "==============")?;
        writeln!(f, "Sources: {}", self.num_rows)?;
        writeln!(f, "Pixels per spectrum: {}", self.num_pixels)?;
        if let Some((lo, hi)) = self.wavelength_range {
            writeln!(f, "Wavelength range: {:.1} - {:.1} A", lo, hi)?;
        }
        for class in SpectralClass::ALL {
            writeln!(f, "  {:<7} {}", class, self.count(class))?;
        }
        if let Some((lo, hi)) = self.redshift_range {
            writeln!(f, "Redshift range: {:.4} - {:.4}", lo, hi)?;
        }
        if let Some(masked) = self.fully_masked_spectra {
            writeln!(f, "Fully masked spectra: {}", masked)?;
        }
        Ok(())
    }
}
