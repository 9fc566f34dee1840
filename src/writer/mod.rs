//! # Survey Bundle Writer
//!
//! Writes an in-memory [`SurveyDataset`](crate::dataset::SurveyDataset) to the
//! three-file Parquet layout described in [`crate::schema`].
//!
//! ## Design Principles
//!
//! 1. **Aligned Row Groups**: All three files are cut into row groups at the
//!    same row boundaries, so a row selection touches matching groups.
//!
//! 2. **Self-Contained Files**: The format version is stored in every footer
//!    and the wavelength grid in the spectra footer.
//!
//! 3. **Configurable Compression**: Supports ZSTD (default), Snappy, and
//!    uncompressed.

mod config;
mod stats;
mod survey_writer;


pub use config::{CompressionType, WriterConfig};
pub use stats::WriterStats;
pub use survey_writer::SurveyWriter;
