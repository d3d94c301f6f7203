//! Uncalibrated linear scorer.

use crate::artifact::ArtifactError;
use riskx_core::{AlignedRecord, Classifier};

/// Linear classifier without calibrated probabilities.
///
/// Only the sign of the margin is meaningful, so this model keeps the
/// default `predict_proba` and reports labels alone.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginModel {
    weights: Vec<f64>,
    bias: f64,
}

impl MarginModel {
    pub fn new(weights: Vec<f64>, bias: f64) -> Result<Self, ArtifactError> {
        if weights.is_empty() {
            return Err(ArtifactError::EmptyWeights);
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(ArtifactError::NonFinite("weights"));
        }
        if !bias.is_finite() {
            return Err(ArtifactError::NonFinite("bias"));
        }
        Ok(Self { weights, bias })
    }

    fn margin(&self, record: &AlignedRecord) -> f64 {
        self.weights
            .iter()
            .zip(record.values())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias
    }
}

impl Classifier for MarginModel {
    fn n_features(&self) -> usize {
        self.weights.len()
    }

    fn predict(&self, record: &AlignedRecord) -> i64 {
        i64::from(self.margin(record) > 0.0)
    }
}
