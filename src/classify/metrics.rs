use std::fmt;

use ndarray::ArrayView1;

use crate::error::SurveyError;

/// Binary confusion matrix (positive label = 1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    /// Predicted 1, truth 1
    pub true_positive: usize,
    /// Predicted 1, truth 0
    pub false_positive: usize,
    /// Predicted 0, truth 0
    pub true_negative: usize,
    /// Predicted 0, truth 1
    pub false_negative: usize,
}

impl ConfusionMatrix {
    /// Tally predictions against the truth.
    pub fn from_predictions(
        truth: ArrayView1<'_, u8>,
        predicted: ArrayView1<'_, u8>,
    ) -> Result<Self, SurveyError> {
        if truth.len() != predicted.len() {
            return Err(SurveyError::row_mismatch(
                "prediction vector",
                truth.len(),
                predicted.len(),
            ));
        }
        let mut matrix = Self::default();
        for (&t, &p) in truth.iter().zip(predicted.iter()) {
            match (t != 0, p != 0) {
                (true, true) => matrix.true_positive += 1,
                (false, true) => matrix.false_positive += 1,
                (false, false) => matrix.true_negative += 1,
                (true, false) => matrix.false_negative += 1,
            }
        }
        Ok(matrix)
    }

    /// Number of scored rows
    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }

    /// Fraction of correct predictions (0 when nothing was scored)
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positive + self.true_negative, self.total())
    }

    /// Fraction of predicted positives that are positive
    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    /// Fraction of positives that were predicted positive
    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "              pred=1   pred=0")?;
        writeln!(f, "  truth=1  {:>8} {:>8}", self.true_positive, self.false_negative)?;
        writeln!(f, "  truth=0  {:>8} {:>8}", self.false_positive, self.true_negative)?;
        write!(
            f,
            "accuracy {:.4}  precision {:.4}  recall {:.4}",
            self.accuracy(),
            self.precision(),
            self.recall()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_confusion_counts() {
        let truth = array![1u8, 1, 0, 0, 1];
        let predicted = array![1u8, 0, 0, 1, 1];
        let m = ConfusionMatrix::from_predictions(truth.view(), predicted.view()).unwrap();
        assert_eq!(m.true_positive, 2);
        assert_eq!(m.false_negative, 1);
        assert_eq!(m.false_positive, 1);
        assert_eq!(m.true_negative, 1);
        assert!((m.accuracy() - 0.6).abs() < 1e-12);
        assert!((m.precision() - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.recall() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_scores_are_zero() {
        let empty = ndarray::Array1::<u8>::zeros(0);
        let m = ConfusionMatrix::from_predictions(empty.view(), empty.view()).unwrap();
        assert_eq!(m.total(), 0);
        assert_eq!(m.accuracy(), 0.0);
    }
}
