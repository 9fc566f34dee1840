//! # Survey Reader Module
//!
//! Read-only access to the three Parquet files of a survey bundle.
//!
//! ## Features
//!
//! - **Fail-fast alignment**: [`SurveyReader::open`] reads every footer and
//!   rejects bundles whose files disagree on the row count
//! - **Typed tables**: [`SurveyReader::load_table`] returns a
//!   [`SpectroscopicCatalog`](crate::dataset::SpectroscopicCatalog) or
//!   [`PhotometricCatalog`](crate::dataset::PhotometricCatalog)
//! - **Subset reads**: [`SurveyReader::load_array_rows`] fetches only the
//!   selected flux/ivar rows through Parquet row selection
//! - **Scoped handles**: each read opens its file and drops it before returning
//!
//! ## Example
//!
//! ```rust,no_run
//! use skysurvey::dataset::{SpectralClass, SpectroscopicCatalog};
//! use skysurvey::filter::{build_mask, Predicate};
//! use skysurvey::reader::SurveyReader;
//!
//! let reader = SurveyReader::open("survey")?;
//! println!("{}", reader.summary()?);
//!
//! // Only read the spectra of stars
//! let catalog: SpectroscopicCatalog = reader.load_table()?;
//! let stars = build_mask(&catalog, &Predicate::class_equals(SpectralClass::Star))?;
//! let spectra = reader.load_array_rows(&stars)?;
//! println!("{} star spectra", spectra.flux().nrows());
//! # Ok::<(), skysurvey::SurveyError>(())
//! ```

mod arrays;
mod batches;
mod config;
mod metadata;
mod open;
mod summary;
mod tables;
mod utils;

#[cfg(test)]
mod tests;

pub use batches::RecordBatchIterator;
pub use config::ReaderConfig;
pub use metadata::FileMetadata;
pub use tables::CatalogTable;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::schema::{PHOTO_CATALOG_FILE, SPECTRA_FILE, SPECTRO_CATALOG_FILE};

/// Identifies one of the three datasets of a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetId {
    /// Flux and ivar arrays
    Spectra,
    /// Spectroscopic catalog table
    SpectroCatalog,
    /// Photometric catalog table
    PhotoCatalog,
}

impl DatasetId {
    /// All datasets of a bundle
    pub const ALL: [DatasetId; 3] = [
        DatasetId::Spectra,
        DatasetId::SpectroCatalog,
        DatasetId::PhotoCatalog,
    ];

    /// File name inside the bundle directory
    pub fn file_name(&self) -> &'static str {
        match self {
            DatasetId::Spectra => SPECTRA_FILE,
            DatasetId::SpectroCatalog => SPECTRO_CATALOG_FILE,
            DatasetId::PhotoCatalog => PHOTO_CATALOG_FILE,
        }
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DatasetId::Spectra => "spectra",
            DatasetId::SpectroCatalog => "spectroscopic catalog",
            DatasetId::PhotoCatalog => "photometric catalog",
        })
    }
}

/// Reader for survey bundles
///
/// Holds only paths and footer metadata; data is read on demand.
#[derive(Debug, Clone)]
pub struct SurveyReader {
    root: PathBuf,
    config: ReaderConfig,
    spectra: FileMetadata,
    spectro: FileMetadata,
    photo: FileMetadata,
    wavelength: Vec<f64>,
}

impl SurveyReader {
    /// Bundle directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of one dataset file
    pub fn path(&self, id: DatasetId) -> PathBuf {
        self.root.join(id.file_name())
    }

    /// Footer metadata of one dataset file
    pub fn file_metadata(&self, id: DatasetId) -> &FileMetadata {
        match id {
            DatasetId::Spectra => &self.spectra,
            DatasetId::SpectroCatalog => &self.spectro,
            DatasetId::PhotoCatalog => &self.photo,
        }
    }

    /// Shared row count of the bundle
    pub fn num_rows(&self) -> usize {
        self.spectra.total_rows
    }

    /// Pixels per spectrum
    pub fn num_pixels(&self) -> usize {
        self.wavelength.len()
    }

    /// Shared wavelength grid
    pub fn wavelength(&self) -> &[f64] {
        &self.wavelength
    }

    /// Reader configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }
}
