//! Spectral co-adding over a row mask.
//!
//! [`coadd`] is a plain elementwise sum accumulated in f64. Because it is a
//! sum, it is additive over disjoint masks:
//! `coadd(A | B) == coadd(A) + coadd(B)` whenever `A & B` is empty.

use log::{debug, warn};
use ndarray::{Array1, ArrayView2, Axis, Zip};

use crate::dataset::RowMask;
use crate::error::SurveyError;

/// Elementwise sum of the flux rows selected by `mask`.
///
/// An all-false mask yields a zero vector of length `P`. The mask must have
/// one entry per flux row.
///
/// ```
/// use ndarray::array;
/// use skysurvey::coadd::coadd;
/// use skysurvey::dataset::RowMask;
///
/// let flux = array![[1.0f32, 2.0], [3.0, 4.0], [5.0, 6.0]];
/// let mask = RowMask::new(vec![true, false, true]);
/// let sum = coadd(flux.view(), &mask)?;
/// assert_eq!(sum.to_vec(), vec![6.0, 8.0]);
/// # Ok::<(), skysurvey::SurveyError>(())
/// ```
pub fn coadd(flux: ArrayView2<'_, f32>, mask: &RowMask) -> Result<Array1<f64>, SurveyError> {
    mask.ensure_len(flux.nrows())?;
    let mut total = Array1::<f64>::zeros(flux.ncols());
    for (row, selected) in flux.axis_iter(Axis(0)).zip(mask.iter()) {
        if selected {
            total.zip_mut_with(&row, |acc, &v| *acc += v as f64);
        }
    }
    debug!("Co-added {} of {} spectra", mask.count(), flux.nrows());
    Ok(total)
}

/// Inverse-variance weighted co-add of the rows selected by `mask`.
///
/// Returns `(flux, ivar)` where `flux[p] = sum(ivar * flux) / sum(ivar)` and
/// `ivar[p] = sum(ivar)`. Pixels with no weight (every selected ivar is 0)
/// come back as flux 0 and ivar 0.
pub fn coadd_weighted(
    flux: ArrayView2<'_, f32>,
    ivar: ArrayView2<'_, f32>,
    mask: &RowMask,
) -> Result<(Array1<f64>, Array1<f64>), SurveyError> {
    if flux.dim() != ivar.dim() {
        return Err(SurveyError::Shape(format!(
            "flux is {:?} but ivar is {:?}",
            flux.dim(),
            ivar.dim()
        )));
    }
    mask.ensure_len(flux.nrows())?;

    let mut weighted = Array1::<f64>::zeros(flux.ncols());
    let mut weight = Array1::<f64>::zeros(flux.ncols());
    for ((f_row, w_row), selected) in flux
        .axis_iter(Axis(0))
        .zip(ivar.axis_iter(Axis(0)))
        .zip(mask.iter())
    {
        if !selected {
            continue;
        }
        Zip::from(&mut weighted)
            .and(&mut weight)
            .and(&f_row)
            .and(&w_row)
            .for_each(|acc, w_acc, &f, &w| {
                if w > 0.0 {
                    *acc += w as f64 * f as f64;
                    *w_acc += w as f64;
                }
            });
    }

    let empty = weight.iter().filter(|&&w| w == 0.0).count();
    if empty > 0 && mask.count() > 0 {
        warn!("{} of {} pixels have no valid data in the co-add", empty, weight.len());
    }

    let mean = Zip::from(&weighted)
        .and(&weight)
        .map_collect(|&num, &den| if den > 0.0 { num / den } else { 0.0 });
    Ok((mean, weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_coadd_selected_rows() {
        let flux = array![[1.0f32, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let mask = RowMask::new(vec![true, false, true]);
        let sum = coadd(flux.view(), &mask).unwrap();
        assert_eq!(sum, array![6.0, 8.0]);
    }

    #[test]
    fn test_coadd_empty_mask_is_zero() {
        let flux = array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let sum = coadd(flux.view(), &RowMask::none(2)).unwrap();
        assert_eq!(sum, Array1::<f64>::zeros(3));
    }

    #[test]
    fn test_coadd_zero_rows() {
        let flux = Array2::<f32>::zeros((0, 4));
        let sum = coadd(flux.view(), &RowMask::none(0)).unwrap();
        assert_eq!(sum.len(), 4);
        assert!(sum.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_coadd_mask_length_mismatch() {
        let flux = array![[1.0f32], [2.0]];
        let err = coadd(flux.view(), &RowMask::all(3)).unwrap_err();
        assert!(matches!(err, SurveyError::Shape(_)));
    }

    #[test]
    fn test_coadd_disjoint_masks_add_up() {
        let flux = array![[1.0f32, -2.0], [0.5, 4.0], [5.0, 6.0], [7.0, 0.25]];
        let a = RowMask::new(vec![true, false, false, true]);
        let b = RowMask::new(vec![false, true, false, false]);
        let union = a.or(&b).unwrap();
        let lhs = coadd(flux.view(), &union).unwrap();
        let rhs = coadd(flux.view(), &a).unwrap() + coadd(flux.view(), &b).unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_weighted_coadd_ignores_bad_pixels() {
        let flux = array![[2.0f32, 10.0], [4.0, 20.0]];
        let ivar = array![[1.0f32, 0.0], [3.0, 0.0]];
        let (mean, weight) = coadd_weighted(flux.view(), ivar.view(), &RowMask::all(2)).unwrap();
        // (1*2 + 3*4) / 4
        assert!((mean[0] - 3.5).abs() < 1e-12);
        assert_eq!(weight[0], 4.0);
        assert_eq!(mean[1], 0.0);
        assert_eq!(weight[1], 0.0);
    }

    #[test]
    fn test_weighted_coadd_shape_mismatch() {
        let flux = array![[1.0f32, 2.0]];
        let ivar = array![[1.0f32]];
        assert!(matches!(
            coadd_weighted(flux.view(), ivar.view(), &RowMask::all(1)),
            Err(SurveyError::Shape(_))
        ));
    }
}
