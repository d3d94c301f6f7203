//! Loading model artifacts from disk.

use crate::artifact::{ArtifactError, ModelArtifact};
use riskx_core::Classifier;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model artifact not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model artifact: {0}")]
    Invalid(#[from] ArtifactError),
}

/// A deserialized, validated model ready to serve.
#[derive(Clone)]
pub struct LoadedModel {
    pub classifier: Arc<dyn Classifier>,
    /// Feature names from the artifact's metadata blob, when recorded.
    pub feature_names: Option<Vec<String>>,
}

/// Read, parse and validate a model artifact.
///
/// Every failure here is recoverable. The caller decides whether a
/// missing or broken artifact aborts startup or just means serving with
/// no model installed.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<LoadedModel, ModelError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ModelError::NotFound(path.display().to_string()));
    }

    let data = std::fs::read_to_string(path)?;
    let artifact: ModelArtifact = serde_json::from_str(&data)?;
    let feature_names = artifact.feature_names().map(<[String]>::to_vec);
    let classifier = artifact.into_classifier()?;

    Ok(LoadedModel {
        classifier,
        feature_names,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskx_core::{AlignedRecord, FeatureVector};
    use riskx_schema::FeatureSchema;

    fn write_artifact(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("model.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_logistic_artifact() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_artifact(
            temp_dir.path(),
            r#"{
                "kind": "logistic",
                "weights": [1.0, -1.0],
                "intercept": 0.0,
                "metadata": { "feature_names": ["age", "dose_mg"] }
            }"#,
        );

        let loaded = load_model(&path).unwrap();
        assert_eq!(loaded.classifier.n_features(), 2);
        assert_eq!(
            loaded.feature_names,
            Some(vec!["age".to_string(), "dose_mg".to_string()])
        );

        let schema = FeatureSchema::new(["age", "dose_mg"]).unwrap();
        let record = AlignedRecord::align(&FeatureVector::new(vec![3.0, 1.0]), &schema);
        assert_eq!(loaded.classifier.predict(&record), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = load_model(temp_dir.path().join("absent.json"))
            .err()
            .unwrap();
        assert!(matches!(err, ModelError::NotFound(_)));
    }

    #[test]
    fn test_load_malformed_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_artifact(temp_dir.path(), "{ not json");
        let err = load_model(&path).err().unwrap();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[test]
    fn test_load_unknown_kind() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_artifact(temp_dir.path(), r#"{ "kind": "neural", "layers": [8] }"#);
        let err = load_model(&path).err().unwrap();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[test]
    fn test_load_invalid_parameters() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_artifact(
            temp_dir.path(),
            r#"{ "kind": "logistic", "weights": [], "intercept": 0.0 }"#,
        );
        let err = load_model(&path).err().unwrap();
        assert!(matches!(
            err,
            ModelError::Invalid(ArtifactError::EmptyWeights)
        ));
    }

    #[test]
    fn test_load_margin_artifact_without_metadata() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_artifact(
            temp_dir.path(),
            r#"{ "kind": "margin", "weights": [0.3, 0.4, 0.5], "bias": -0.1 }"#,
        );

        let loaded = load_model(&path).unwrap();
        assert_eq!(loaded.feature_names, None);

        let schema = FeatureSchema::indexed(3).unwrap();
        let record = AlignedRecord::align(&FeatureVector::new(vec![0.0, 1.0, 1.0]), &schema);
        assert_eq!(loaded.classifier.predict(&record), 1);
        assert_eq!(loaded.classifier.predict_proba(&record), None);
    }
}
