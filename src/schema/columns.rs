// spectra.parquet
/// Per-pixel flux vector
pub const FLUX: &str = "flux";
/// Per-pixel inverse variance vector (0 marks a bad pixel)
pub const IVAR: &str = "ivar";

// spectro_catalog.parquet
/// Spectroscopic class label (STAR, QSO, GALAXY)
pub const CLASS: &str = "class";
/// Redshift
pub const REDSHIFT: &str = "z";
/// Redshift error
pub const REDSHIFT_ERR: &str = "z_err";

// photo_catalog.parquet
/// Five-band magnitude vector (u, g, r, i, z)
pub const MAG: &str = "mag";
/// Five-band Galactic extinction vector
pub const EXTINCTION: &str = "extinction";

/// Inner field name used for list items
pub const LIST_ITEM: &str = "item";
