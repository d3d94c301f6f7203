//! Calibrated linear classifier.

use crate::artifact::ArtifactError;
use riskx_core::{AlignedRecord, Classifier};

/// Logistic regression over the aligned feature values.
///
/// The label is the sign of the linear margin; the class distribution is
/// `[1 - p, p]` with `p = sigmoid(margin)`, so the positive class sits at
/// index 1.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    weights: Vec<f64>,
    intercept: f64,
}

impl LogisticModel {
    /// Validate and build. Weights must be non-empty and every parameter
    /// finite.
    pub fn new(weights: Vec<f64>, intercept: f64) -> Result<Self, ArtifactError> {
        if weights.is_empty() {
            return Err(ArtifactError::EmptyWeights);
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(ArtifactError::NonFinite("weights"));
        }
        if !intercept.is_finite() {
            return Err(ArtifactError::NonFinite("intercept"));
        }
        Ok(Self { weights, intercept })
    }

    fn margin(&self, record: &AlignedRecord) -> f64 {
        self.weights
            .iter()
            .zip(record.values())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }
}

impl Classifier for LogisticModel {
    fn n_features(&self) -> usize {
        self.weights.len()
    }

    fn predict(&self, record: &AlignedRecord) -> i64 {
        i64::from(self.margin(record) > 0.0)
    }

    fn predict_proba(&self, record: &AlignedRecord) -> Option<Vec<f64>> {
        let p = sigmoid(self.margin(record));
        Some(vec![1.0 - p, p])
    }
}

/// Logistic function, split on the sign of the argument so the
/// exponential never overflows.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
