//! # Survey Bundle Schema
//!
//! Arrow schemas for the three row-aligned Parquet files of a survey bundle.
//!
//! ## Bundle Layout
//!
//! ```text
//! survey/
//! ├── spectra.parquet          # flux + ivar per source, wavelength in footer
//! ├── spectro_catalog.parquet  # class, z, z_err, extra numeric columns
//! └── photo_catalog.parquet    # 5-band magnitudes and extinction
//! ```
//!
//! ## Columns
//!
//! | File | Column | Type | Unit |
//! |------|--------|------|------|
//! | spectra | flux | FixedSizeList<Float32, P> | 1e-17 erg/s/cm^2/Angstrom |
//! | spectra | ivar | FixedSizeList<Float32, P> | inverse flux variance |
//! | spectro_catalog | class | Utf8 | STAR, QSO or GALAXY |
//! | spectro_catalog | z | Float64 | redshift |
//! | spectro_catalog | z_err | Float64 | redshift error |
//! | photo_catalog | mag | FixedSizeList<Float32, 5> | AB magnitude (u, g, r, i, z) |
//! | photo_catalog | extinction | FixedSizeList<Float32, 5> | magnitude |
//!
//! Row `i` of every file describes the same source. The shared wavelength grid
//! is stored once, as a JSON array under [`KEY_WAVELENGTH`] in the footer of
//! `spectra.parquet`.

mod builders;
/// Column name constants.
pub mod columns;
mod constants;
mod validation;

#[cfg(test)]
mod tests;

pub use builders::{
    create_photo_catalog_schema, create_spectra_schema, create_spectro_catalog_schema,
};
pub use columns::*;
pub use constants::*;
pub use validation::{validate_photo_catalog, validate_spectra, validate_spectro_catalog};
