//! # skysurvey - Exploratory Analysis of Spectroscopic Survey Data
//!
//! `skysurvey` opens a survey bundle of three row-aligned datasets (spectra,
//! spectroscopic catalog, photometric catalog), selects rows with typed
//! predicates, co-adds the selected spectra and derives label and feature
//! matrices for a star vs. non-star classification experiment.
//!
//! ## Key Features
//!
//! - **Row-Aligned Join View**: [`dataset::SurveyDataset`] guarantees that row
//!   `i` of every dataset refers to the same source, failing fast otherwise.
//!
//! - **Typed Predicates**: [`filter::Predicate`] expressions over catalog
//!   columns and derived color indices; NaN never satisfies a range.
//!
//! - **Subset Reads**: [`reader::SurveyReader::load_array_rows`] reads only
//!   the selected spectra from Parquet.
//!
//! - **Pluggable Classifiers**: the narrow [`classify::Classifier`] trait, with
//!   a nearest-centroid reference implementation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use skysurvey::prelude::*;
//!
//! // Write a synthetic bundle, then open it again
//! let survey = synthetic_survey(1000, 500, 42)?;
//! SurveyWriter::default().write("survey", &survey)?;
//! let survey = SurveyDataset::open("survey")?;
//!
//! // Blue quasars
//! let blue_qsos = Predicate::class_equals(SpectralClass::Qso)
//!     .and(Predicate::lt(NumericExpr::color(Band::U, Band::G), 0.6));
//! let mask = survey.build_mask(&blue_qsos)?;
//! let stacked = survey.coadd(&mask)?;
//! println!("co-added {} spectra over {} pixels", mask.count(), stacked.len());
//!
//! // Star vs. non-star
//! let report = run_experiment(&NearestCentroid, &survey, SpectralClass::Star, 0.8)?;
//! println!("{report}");
//! # Ok::<(), skysurvey::SurveyError>(())
//! ```
//!
//! This creates a directory structure:
//! ```text
//! survey/
//! ├── spectra.parquet
//! ├── spectro_catalog.parquet
//! └── photo_catalog.parquet
//! ```
//!
//! ## Architecture
//!
//! - [`schema`]: Arrow schemas and footer keys of the bundle files
//! - [`dataset`]: in-memory tables, row masks and the join view
//! - [`reader`]: Parquet bundle reader with row-selective loads
//! - [`writer`]: Parquet bundle writer
//! - [`filter`]: predicate expressions and mask building
//! - [`coadd`]: spectral co-addition
//! - [`features`]: label and feature extraction
//! - [`classify`]: classifier trait, train/test split and metrics
//! - [`demo`]: deterministic synthetic surveys

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod classify;
pub mod coadd;
pub mod dataset;
pub mod demo;
pub mod error;
pub mod features;
pub mod filter;
pub mod reader;
pub mod schema;
pub mod writer;

pub use error::SurveyError;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::classify::{
        run_experiment, run_experiment_on, Classifier, ConfusionMatrix, NearestCentroid,
        TrainTestSplit,
    };
    pub use crate::coadd::{coadd, coadd_weighted};
    pub use crate::dataset::{
        Band, PhotometricCatalog, RowMask, SliceRows, SpectralClass, SpectroscopicCatalog,
        SpectrumTable, SurveyDataset, SurveySummary,
    };
    pub use crate::demo::synthetic_survey;
    pub use crate::error::SurveyError;
    pub use crate::features::{extract_colors, extract_features, extract_labels};
    pub use crate::filter::{build_mask, ColumnSource, NumericColumn, NumericExpr, Predicate};
    pub use crate::reader::{DatasetId, ReaderConfig, SurveyReader};
    pub use crate::writer::{CompressionType, SurveyWriter, WriterConfig, WriterStats};
}
