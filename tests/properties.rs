//! Property tests for masks, predicates and co-adding.

use ndarray::{Array1, Array2};
use proptest::prelude::*;

use skysurvey::coadd::coadd;
use skysurvey::dataset::{RowMask, SliceRows, SpectralClass, SpectroscopicCatalog};
use skysurvey::filter::{build_mask, NumericColumn, Predicate};

/// Flux matrix plus a per-row assignment: 0 = neither mask, 1 = A, 2 = B
fn flux_and_assignment() -> impl Strategy<Value = (Array2<f32>, Vec<u8>)> {
    (1usize..24, 1usize..10).prop_flat_map(|(rows, pixels)| {
        (
            prop::collection::vec(-1000.0f32..1000.0, rows * pixels),
            prop::collection::vec(0u8..3, rows),
        )
            .prop_map(move |(values, assignment)| {
                let flux = Array2::from_shape_vec((rows, pixels), values).unwrap();
                (flux, assignment)
            })
    })
}

/// Redshift-like values with NaN holes
fn values_with_nan() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        prop_oneof![
            3 => -5.0f64..5.0,
            1 => Just(f64::NAN),
        ],
        0..40,
    )
}

fn catalog(redshift: Vec<f64>) -> SpectroscopicCatalog {
    let n = redshift.len();
    SpectroscopicCatalog::new(
        vec![SpectralClass::Galaxy; n],
        Array1::from(redshift),
        Array1::zeros(n),
    )
    .unwrap()
}

proptest! {
    /// coadd(A | B) == coadd(A) + coadd(B) for disjoint A and B
    #[test]
    fn coadd_is_additive_over_disjoint_masks((flux, assignment) in flux_and_assignment()) {
        let a: RowMask = assignment.iter().map(|&k| k == 1).collect();
        let b: RowMask = assignment.iter().map(|&k| k == 2).collect();
        prop_assert!(a.is_disjoint(&b).unwrap());

        let union = coadd(flux.view(), &a.or(&b).unwrap()).unwrap();
        let separate = coadd(flux.view(), &a).unwrap() + coadd(flux.view(), &b).unwrap();
        for (u, s) in union.iter().zip(separate.iter()) {
            prop_assert!((u - s).abs() <= 1e-9 * (1.0 + u.abs()), "{} != {}", u, s);
        }
    }

    /// An all-false mask co-adds to exactly zero
    #[test]
    fn coadd_of_empty_mask_is_zero((flux, _) in flux_and_assignment()) {
        let total = coadd(flux.view(), &RowMask::none(flux.nrows())).unwrap();
        prop_assert_eq!(total, Array1::<f64>::zeros(flux.ncols()));
    }

    /// Range predicates never select NaN rows, and every selected row is in range
    #[test]
    fn range_never_selects_nan(values in values_with_nan(), lo in -5.0f64..5.0, width in 0.0f64..10.0) {
        let hi = lo + width;
        let cat = catalog(values.clone());
        let mask = build_mask(&cat, &Predicate::between(NumericColumn::Redshift, lo, hi)).unwrap();
        prop_assert_eq!(mask.len(), values.len());
        for (i, v) in values.iter().enumerate() {
            if v.is_nan() {
                prop_assert!(!mask.get(i));
            } else {
                prop_assert_eq!(mask.get(i), *v >= lo && *v <= hi);
            }
        }

        // The complement of a range is not a range: negation picks NaN rows up
        let negated = build_mask(&cat, &Predicate::between(NumericColumn::Redshift, lo, hi).negate()).unwrap();
        prop_assert_eq!(negated, mask.not());
    }

    /// slice_rows returns mask.count() rows, the k-th being the k-th selected row
    #[test]
    fn slice_rows_preserves_selected_order(values in values_with_nan(), seed in any::<u64>()) {
        let cat = catalog(values.clone());
        let mask: RowMask = (0..values.len()).map(|i| (seed >> (i % 64)) & 1 == 1).collect();
        let subset = cat.slice_rows(&mask).unwrap();

        prop_assert_eq!(subset.num_rows(), mask.count());
        for (k, row) in mask.indices().into_iter().enumerate() {
            let (got, want) = (subset.redshift()[k], values[row]);
            prop_assert!(got == want || (got.is_nan() && want.is_nan()));
        }
    }
}
