//! # Classification
//!
//! The classifier itself is an external capability: anything implementing
//! [`Classifier`] can be trained on the `R x 5` magnitude features and the
//! binary star labels. This module supplies the plumbing around it:
//!
//! - [`TrainTestSplit`]: index split of one feature matrix into train/test rows
//! - [`ConfusionMatrix`]: scoring of binary predictions
//! - [`NearestCentroid`]: a small reference implementation
//!
//! ## Example
//!
//! ```rust,no_run
//! use skysurvey::classify::{run_experiment, NearestCentroid};
//! use skysurvey::dataset::{SpectralClass, SurveyDataset};
//!
//! let survey = SurveyDataset::open("survey")?;
//! let report = run_experiment(&NearestCentroid, &survey, SpectralClass::Star, 0.8)?;
//! println!("accuracy {:.3}", report.accuracy());
//! # Ok::<(), skysurvey::SurveyError>(())
//! ```

mod centroid;
mod metrics;

pub use centroid::{CentroidModel, NearestCentroid};
pub use metrics::ConfusionMatrix;

use log::{debug, info};
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};

use crate::dataset::{SpectralClass, SurveyDataset};
use crate::error::SurveyError;

/// Narrow fit/predict capability over binary labels.
pub trait Classifier {
    /// Trained model state
    type Model;

    /// Train on `features` (`N x F`) and `labels` (length `N`, values 0/1)
    fn fit(
        &self,
        features: ArrayView2<'_, f32>,
        labels: ArrayView1<'_, u8>,
    ) -> Result<Self::Model, SurveyError>;

    /// Predict 0/1 labels for `features` (`M x F`)
    fn predict(
        &self,
        model: &Self::Model,
        features: ArrayView2<'_, f32>,
    ) -> Result<Array1<u8>, SurveyError>;
}

/// Train and test partitions of one feature matrix and its labels.
///
/// The first `n_train` rows train, the rest test. Both partitions are taken
/// from the same matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    /// Training features
    pub train_features: Array2<f32>,
    /// Training labels
    pub train_labels: Array1<u8>,
    /// Test features
    pub test_features: Array2<f32>,
    /// Test labels
    pub test_labels: Array1<u8>,
}

impl TrainTestSplit {
    /// Split at row `n_train`.
    pub fn at(
        features: ArrayView2<'_, f32>,
        labels: ArrayView1<'_, u8>,
        n_train: usize,
    ) -> Result<Self, SurveyError> {
        if labels.len() != features.nrows() {
            return Err(SurveyError::row_mismatch(
                "label vector",
                features.nrows(),
                labels.len(),
            ));
        }
        if n_train > features.nrows() {
            return Err(SurveyError::Shape(format!(
                "cannot train on {n_train} rows out of {}",
                features.nrows()
            )));
        }
        Ok(Self {
            train_features: features.slice(s![..n_train, ..]).to_owned(),
            train_labels: labels.slice(s![..n_train]).to_owned(),
            test_features: features.slice(s![n_train.., ..]).to_owned(),
            test_labels: labels.slice(s![n_train..]).to_owned(),
        })
    }

    /// Split with `fraction` of the rows (rounded down) in the training set.
    pub fn by_fraction(
        features: ArrayView2<'_, f32>,
        labels: ArrayView1<'_, u8>,
        fraction: f64,
    ) -> Result<Self, SurveyError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(SurveyError::InvalidData(format!(
                "train fraction must be within [0, 1], got {fraction}"
            )));
        }
        let n_train = (features.nrows() as f64 * fraction).floor() as usize;
        Self::at(features, labels, n_train)
    }
}

/// Fit on the training split of `survey`, predict the test split and score it.
pub fn run_experiment<C: Classifier>(
    classifier: &C,
    survey: &SurveyDataset,
    positive: SpectralClass,
    train_fraction: f64,
) -> Result<ConfusionMatrix, SurveyError> {
    let features = survey.features()?;
    let labels = survey.labels(positive);
    debug!("{} vs rest", positive);
    run_experiment_on(classifier, features.view(), labels.view(), train_fraction)
}

/// Run the split, fit, predict and score sequence on prepared features and labels.
///
/// Callers that only hold the catalogs use this directly, so the spectra
/// never have to be loaded.
pub fn run_experiment_on<C: Classifier>(
    classifier: &C,
    features: ArrayView2<'_, f32>,
    labels: ArrayView1<'_, u8>,
    train_fraction: f64,
) -> Result<ConfusionMatrix, SurveyError> {
    let split = TrainTestSplit::by_fraction(features, labels, train_fraction)?;
    info!(
        "Training on {} rows, testing on {} rows",
        split.train_labels.len(),
        split.test_labels.len()
    );

    let model = classifier.fit(split.train_features.view(), split.train_labels.view())?;
    let predicted = classifier.predict(&model, split.test_features.view())?;
    let report = ConfusionMatrix::from_predictions(split.test_labels.view(), predicted.view())?;
    info!("{}", report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_split_at_index() {
        let features = array![[1.0f32, 0.0], [2.0, 0.0], [3.0, 0.0], [4.0, 0.0]];
        let labels = array![1u8, 0, 1, 0];
        let split = TrainTestSplit::at(features.view(), labels.view(), 3).unwrap();
        assert_eq!(split.train_features.nrows(), 3);
        assert_eq!(split.test_features, array![[4.0f32, 0.0]]);
        assert_eq!(split.train_labels, array![1u8, 0, 1]);
        assert_eq!(split.test_labels, array![0u8]);
    }

    #[test]
    fn test_split_by_fraction_rounds_down() {
        let features = Array2::<f32>::zeros((10, 5));
        let labels = Array1::<u8>::zeros(10);
        let split = TrainTestSplit::by_fraction(features.view(), labels.view(), 0.75).unwrap();
        assert_eq!(split.train_labels.len(), 7);
        assert_eq!(split.test_labels.len(), 3);
    }

    #[test]
    fn test_split_rejects_bad_inputs() {
        let features = Array2::<f32>::zeros((4, 5));
        let labels = Array1::<u8>::zeros(3);
        assert!(matches!(
            TrainTestSplit::at(features.view(), labels.view(), 2),
            Err(SurveyError::Shape(_))
        ));

        let labels = Array1::<u8>::zeros(4);
        assert!(matches!(
            TrainTestSplit::at(features.view(), labels.view(), 5),
            Err(SurveyError::Shape(_))
        ));
        assert!(matches!(
            TrainTestSplit::by_fraction(features.view(), labels.view(), 1.5),
            Err(SurveyError::InvalidData(_))
        ));
    }

    #[test]
    fn test_catalog_only_experiment_matches_full_survey() {
        let survey = crate::demo::synthetic_survey(120, 4, 9).unwrap();
        let full = run_experiment(&NearestCentroid, &survey, SpectralClass::Qso, 0.75).unwrap();

        let features = crate::features::extract_features(survey.photo().magnitudes().view()).unwrap();
        let labels = crate::features::extract_labels(survey.spectro().class(), SpectralClass::Qso);
        let catalog_only =
            run_experiment_on(&NearestCentroid, features.view(), labels.view(), 0.75).unwrap();

        assert_eq!(catalog_only, full);
        assert_eq!(catalog_only.total(), 30);
    }
}
