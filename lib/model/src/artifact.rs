//! The on-disk model artifact format.
//!
//! An artifact is a JSON document carrying the trained parameters of one
//! model, tagged by `kind`, plus an optional `metadata` blob. Parsing
//! accepts the document shape; [`ModelArtifact::into_classifier`] then
//! validates the parameters and produces the runnable model.

use crate::forest::{DecisionTree, ForestModel};
use crate::logistic::LogisticModel;
use crate::margin::MarginModel;
use riskx_core::Classifier;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Descriptive information stored alongside the trained parameters.
///
/// Every field is optional; `feature_names`, when present, can supply the
/// serving schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Trained parameters, one variant per supported model family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelSpec {
    /// Calibrated linear classifier: sigmoid over a weighted sum.
    Logistic { weights: Vec<f64>, intercept: f64 },
    /// Ensemble of decision trees voting with class distributions.
    Forest {
        n_features: usize,
        trees: Vec<DecisionTree>,
    },
    /// Uncalibrated linear scorer: label from the sign of the margin,
    /// no probability support.
    Margin { weights: Vec<f64>, bias: f64 },
}

/// A complete artifact document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ArtifactMetadata>,
    #[serde(flatten)]
    pub spec: ModelSpec,
}

impl ModelArtifact {
    /// Feature names carried by the metadata blob, if any.
    #[must_use]
    pub fn feature_names(&self) -> Option<&[String]> {
        self.metadata
            .as_ref()
            .and_then(|m| m.feature_names.as_deref())
    }

    /// Validate the parameters and build the runnable classifier.
    pub fn into_classifier(self) -> Result<Arc<dyn Classifier>, ArtifactError> {
        match self.spec {
            ModelSpec::Logistic { weights, intercept } => {
                Ok(Arc::new(LogisticModel::new(weights, intercept)?))
            }
            ModelSpec::Forest { n_features, trees } => {
                Ok(Arc::new(ForestModel::new(n_features, trees)?))
            }
            ModelSpec::Margin { weights, bias } => Ok(Arc::new(MarginModel::new(weights, bias)?)),
        }
    }
}

/// Parameter validation failures. A parsed artifact can still be
/// unusable; these name the reason.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArtifactError {
    #[error("Model has no weights")]
    EmptyWeights,

    #[error("Non-finite value in {0}")]
    NonFinite(&'static str),

    #[error("Forest feature width is zero")]
    ZeroFeatures,

    #[error("Forest has no trees")]
    EmptyForest,

    #[error("Tree {tree} is invalid: {reason}")]
    InvalidTree { tree: usize, reason: String },
}
