//! Label and feature extraction for star / non-star classification.

use ndarray::{s, Array1, Array2, ArrayView2};

use crate::dataset::SpectralClass;
use crate::error::SurveyError;
use crate::schema::NUM_BANDS;

/// 1 where the class equals `positive`, 0 elsewhere.
pub fn extract_labels(classes: &[SpectralClass], positive: SpectralClass) -> Array1<u8> {
    classes.iter().map(|&class| u8::from(class == positive)).collect()
}

fn ensure_band_width(magnitudes: &ArrayView2<'_, f32>) -> Result<(), SurveyError> {
    if magnitudes.ncols() != NUM_BANDS {
        return Err(SurveyError::Shape(format!(
            "magnitude rows have {} entries, expected {NUM_BANDS}",
            magnitudes.ncols()
        )));
    }
    Ok(())
}

/// `R x 5` feature matrix from the magnitude column, values unmodified.
///
/// Fails with [`SurveyError::Shape`] unless every row has exactly five bands.
pub fn extract_features(magnitudes: ArrayView2<'_, f32>) -> Result<Array2<f32>, SurveyError> {
    ensure_band_width(&magnitudes)?;
    Ok(magnitudes.to_owned())
}

/// `R x 4` adjacent-band color indices: u-g, g-r, r-i, i-z.
pub fn extract_colors(magnitudes: ArrayView2<'_, f32>) -> Result<Array2<f32>, SurveyError> {
    ensure_band_width(&magnitudes)?;
    let blue = magnitudes.slice(s![.., ..NUM_BANDS - 1]);
    let red = magnitudes.slice(s![.., 1..]);
    Ok(&blue - &red)
}
