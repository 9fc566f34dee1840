use ndarray::{Array1, ArrayView1, ArrayView2, Axis};

use super::Classifier;
use crate::error::SurveyError;

/// Assigns each row to the class whose training centroid is nearest
/// (Euclidean distance). Rows with a non-finite feature are left out of the
/// centroids and predicted as 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestCentroid;

/// Per-class feature means learned by [`NearestCentroid`]
#[derive(Debug, Clone, PartialEq)]
pub struct CentroidModel {
    /// Mean feature vector of label-0 rows
    pub negative: Array1<f64>,
    /// Mean feature vector of label-1 rows
    pub positive: Array1<f64>,
}

fn squared_distance(row: ArrayView1<'_, f32>, centroid: &Array1<f64>) -> f64 {
    row.iter()
        .zip(centroid.iter())
        .map(|(&x, &c)| (x as f64 - c).powi(2))
        .sum()
}

impl Classifier for NearestCentroid {
    type Model = CentroidModel;

    fn fit(
        &self,
        features: ArrayView2<'_, f32>,
        labels: ArrayView1<'_, u8>,
    ) -> Result<CentroidModel, SurveyError> {
        if labels.len() != features.nrows() {
            return Err(SurveyError::row_mismatch(
                "label vector",
                features.nrows(),
                labels.len(),
            ));
        }
        let width = features.ncols();
        let mut sums = [Array1::<f64>::zeros(width), Array1::<f64>::zeros(width)];
        let mut counts = [0usize; 2];

        for (row, &label) in features.axis_iter(Axis(0)).zip(labels.iter()) {
            if !row.iter().all(|v| v.is_finite()) {
                continue;
            }
            let slot = usize::from(label != 0);
            sums[slot].zip_mut_with(&row, |acc, &v| *acc += v as f64);
            counts[slot] += 1;
        }

        if counts.contains(&0) {
            return Err(SurveyError::InvalidData(format!(
                "need training rows of both labels, got {} negative and {} positive",
                counts[0], counts[1]
            )));
        }

        let [negative, positive] = sums;
        Ok(CentroidModel {
            negative: negative / counts[0] as f64,
            positive: positive / counts[1] as f64,
        })
    }

    fn predict(
        &self,
        model: &CentroidModel,
        features: ArrayView2<'_, f32>,
    ) -> Result<Array1<u8>, SurveyError> {
        if features.ncols() != model.positive.len() {
            return Err(SurveyError::Shape(format!(
                "model was trained on {} features, got {}",
                model.positive.len(),
                features.ncols()
            )));
        }
        Ok(features
            .axis_iter(Axis(0))
            .map(|row| {
                let to_positive = squared_distance(row, &model.positive);
                let to_negative = squared_distance(row, &model.negative);
                u8::from(to_positive < to_negative)
            })
            .collect())
    }
}
