use std::ops::Bound;

use ndarray::{array, Array1, Array2};

use super::*;
use crate::dataset::{Band, PhotometricCatalog, SpectralClass, SpectroscopicCatalog, SurveyDataset, SpectrumTable};
use crate::error::SurveyError;

use SpectralClass::{Galaxy, Qso, Star};

fn catalog() -> SpectroscopicCatalog {
    SpectroscopicCatalog::new(
        vec![Star, Qso, Galaxy, Star, Qso],
        array![0.0, 1.5, 0.3, f64::NAN, 2.0],
        array![1e-4, 2e-3, 5e-4, 1e-4, 3e-3],
    )
    .unwrap()
    .with_extra("snr", array![12.0, 3.0, 8.0, 20.0, f64::NAN])
    .unwrap()
}

fn photometry() -> PhotometricCatalog {
    let mags = array![
        [19.0f32, 18.0, 17.5, 17.3, 17.2],
        [18.3, 18.1, 18.0, 17.9, 17.8],
        [21.0, 19.5, 18.7, 18.3, 18.0],
        [f32::NAN, 17.0, 16.6, 16.4, 16.3],
        [19.2, 19.0, 18.9, 18.8, 18.7],
    ];
    let extinction = Array2::from_elem((5, 5), 0.1f32);
    PhotometricCatalog::new(mags, extinction).unwrap()
}

fn survey() -> SurveyDataset {
    let spectra = SpectrumTable::new(
        Array2::zeros((5, 3)),
        Array2::ones((5, 3)),
        Array1::from(vec![4000.0, 5000.0, 6000.0]),
    )
    .unwrap();
    SurveyDataset::from_parts(spectra, catalog(), photometry()).unwrap()
}

#[test]
fn test_class_equals() {
    let mask = build_mask(&catalog(), &Predicate::class_equals(Star)).unwrap();
    assert_eq!(mask.as_slice(), &[true, false, false, true, false]);
}

#[test]
fn test_range_bounds_inclusive_and_exclusive() {
    let cat = catalog();

    let ge = build_mask(&cat, &Predicate::ge(NumericColumn::Redshift, 1.5)).unwrap();
    assert_eq!(ge.indices(), vec![1, 4]);

    let gt = build_mask(&cat, &Predicate::gt(NumericColumn::Redshift, 1.5)).unwrap();
    assert_eq!(gt.indices(), vec![4]);

    let le = build_mask(&cat, &Predicate::le(NumericColumn::Redshift, 0.3)).unwrap();
    assert_eq!(le.indices(), vec![0, 2]);

    let lt = build_mask(&cat, &Predicate::lt(NumericColumn::Redshift, 0.3)).unwrap();
    assert_eq!(lt.indices(), vec![0]);

    let between = build_mask(&cat, &Predicate::between(NumericColumn::Redshift, 0.3, 1.5)).unwrap();
    assert_eq!(between.indices(), vec![1, 2]);
}

#[test]
fn test_nan_never_satisfies_range() {
    let cat = catalog();
    // Unbounded on both sides still rejects the NaN redshift in row 3
    let everything = Predicate::range(NumericColumn::Redshift, Bound::Unbounded, Bound::Unbounded);
    let mask = build_mask(&cat, &everything).unwrap();
    assert_eq!(mask.indices(), vec![0, 1, 2, 4]);

    assert!(!within(f64::NAN, Bound::Unbounded, Bound::Unbounded));
    assert!(!within(f64::NAN, Bound::Included(f64::NEG_INFINITY), Bound::Unbounded));
}

#[test]
fn test_nan_from_difference_is_not_selected() {
    // Row 3 has a NaN u magnitude, so u - g is NaN there
    let photo = photometry();
    let blue = build_mask(&photo, &Predicate::lt(NumericExpr::color(Band::U, Band::G), 10.0)).unwrap();
    assert!(!blue.get(3));
    assert_eq!(blue.count(), 4);

    let red = build_mask(&photo, &Predicate::ge(NumericExpr::color(Band::U, Band::G), -10.0)).unwrap();
    assert!(!red.get(3));
}

#[test]
fn test_color_predicate() {
    // u - g: [1.0, 0.2, 1.5, NaN, 0.2]
    let mask = build_mask(
        &photometry(),
        &Predicate::lt(NumericExpr::color(Band::U, Band::G), 0.6),
    )
    .unwrap();
    assert_eq!(mask.indices(), vec![1, 4]);
}

#[test]
fn test_dereddened_magnitude() {
    // r - extinction(r) = [17.4, 17.9, 18.6, 16.5, 18.8]
    let mask = build_mask(
        &photometry(),
        &Predicate::lt(NumericExpr::dereddened(Band::R), 17.5),
    )
    .unwrap();
    assert_eq!(mask.indices(), vec![0, 3]);
}

#[test]
fn test_extra_column() {
    let mask = build_mask(&catalog(), &Predicate::gt(NumericColumn::Extra("snr".into()), 5.0)).unwrap();
    assert_eq!(mask.indices(), vec![0, 2, 3]);
}

#[test]
fn test_missing_extra_is_schema_error() {
    let result = build_mask(
        &catalog(),
        &Predicate::gt(NumericColumn::Extra("flux_auto".into()), 1.0),
    );
    assert!(matches!(result, Err(SurveyError::Schema(_))));
}

#[test]
fn test_wrong_table_is_schema_error() {
    let result = build_mask(&photometry(), &Predicate::class_equals(Star));
    assert!(matches!(result, Err(SurveyError::Schema(_))));

    let result = build_mask(&catalog(), &Predicate::lt(NumericExpr::magnitude(Band::R), 20.0));
    assert!(matches!(result, Err(SurveyError::Schema(_))));
}

#[test]
fn test_empty_and_or() {
    let cat = catalog();
    let all = build_mask(&cat, &Predicate::And(vec![])).unwrap();
    assert_eq!(all.count(), 5);

    let none = build_mask(&cat, &Predicate::Or(vec![])).unwrap();
    assert_eq!(none.len(), 5);
    assert_eq!(none.count(), 0);
}

#[test]
fn test_boolean_combinators() {
    let cat = catalog();
    let stars_or_qsos = Predicate::class_equals(Star).or(Predicate::class_equals(Qso));
    assert_eq!(build_mask(&cat, &stars_or_qsos).unwrap().indices(), vec![0, 1, 3, 4]);

    let distant_qsos = Predicate::class_equals(Qso).and(Predicate::gt(NumericColumn::Redshift, 1.8));
    assert_eq!(build_mask(&cat, &distant_qsos).unwrap().indices(), vec![4]);

    let not_star = Predicate::class_equals(Star).negate();
    assert_eq!(build_mask(&cat, &not_star).unwrap().indices(), vec![1, 2, 4]);
}

#[test]
fn test_combinators_flatten() {
    let p = Predicate::class_equals(Star)
        .and(Predicate::class_equals(Qso))
        .and(Predicate::class_equals(Galaxy));
    match p {
        Predicate::And(parts) => assert_eq!(parts.len(), 3),
        other => panic!("expected And, got {other:?}"),
    }
}

#[test]
fn test_negated_range_selects_nan() {
    // Not(range) is the complement of the range mask, NaN rows included
    let cat = catalog();
    let p = Predicate::lt(NumericColumn::Redshift, 1.0).negate();
    assert_eq!(build_mask(&cat, &p).unwrap().indices(), vec![1, 3, 4]);
}

#[test]
fn test_joined_view_mixes_catalogs() {
    let survey = survey();
    let p = Predicate::class_equals(Qso).and(Predicate::lt(NumericExpr::color(Band::U, Band::G), 0.6));
    let mask = survey.build_mask(&p).unwrap();
    assert_eq!(mask.indices(), vec![1, 4]);
}

#[test]
fn test_expr_display() {
    assert_eq!(NumericExpr::color(Band::U, Band::G).to_string(), "(mag_u - mag_g)");
    assert_eq!(NumericExpr::from(NumericColumn::Redshift).to_string(), "z");
}
