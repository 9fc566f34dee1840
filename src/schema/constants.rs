/// Bundle format version - follows semantic versioning
pub const SKYSURVEY_FORMAT_VERSION: &str = "1.0.0";

/// Metadata key for format version in Parquet footer
pub const KEY_FORMAT_VERSION: &str = "skysurvey:format_version";

/// Metadata key for the shared wavelength grid (JSON array) in the spectra footer
pub const KEY_WAVELENGTH: &str = "skysurvey:wavelength";

/// File name of the flux/ivar dataset inside a bundle directory
pub const SPECTRA_FILE: &str = "spectra.parquet";

/// File name of the spectroscopic catalog inside a bundle directory
pub const SPECTRO_CATALOG_FILE: &str = "spectro_catalog.parquet";

/// File name of the photometric catalog inside a bundle directory
pub const PHOTO_CATALOG_FILE: &str = "photo_catalog.parquet";

/// Number of photometric bands (u, g, r, i, z)
pub const NUM_BANDS: usize = 5;

/// Pixels per spectrum in the reference survey
pub const REFERENCE_NUM_PIXELS: usize = 4603;

/// Rows in the reference survey
pub const REFERENCE_NUM_ROWS: usize = 100_000;
