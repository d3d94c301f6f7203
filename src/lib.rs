//! # riskX
//!
//! An HTTP inference service for pre-trained binary classifiers over
//! fixed-length tabular feature vectors.
//!
//! riskX loads a model artifact once at startup, validates every incoming
//! feature vector against a named schema, and answers with a stable
//! label-plus-probability contract. Every failure mode maps to a typed,
//! inspectable error instead of a crash.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! riskx --model-path ./model.json --http-port 10000
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use riskx::prelude::*;
//! use serde_json::json;
//!
//! // Schema and model are fixed at startup.
//! let schema = FeatureSchema::new(["age", "dose_mg", "years_using"]).unwrap();
//! let pipeline = InferencePipeline::new(schema, None);
//!
//! // Shape problems are typed errors, not crashes.
//! let err = pipeline.handle(&json!({ "input": [41, 2] })).unwrap_err();
//! assert_eq!(err, Error::FeatureCountMismatch { expected: 3, received: 2 });
//!
//! // Without a model the service stays up and says so.
//! let err = pipeline.handle(&json!({ "input": [41, 2, 6] })).unwrap_err();
//! assert_eq!(err, Error::ModelUnavailable);
//! ```
//!
//! ## Crate Structure
//!
//! riskX is composed of several crates:
//!
//! - `riskx-schema` - The ordered, validated feature schema
//! - `riskx-core` - FeatureVector, AlignedRecord, the inference pipeline
//! - `riskx-model` - Model artifact format, classifiers, loading
//! - `riskx-api` - REST endpoints with CORS
//!
//! ## Features
//!
//! - **Schema Validation**: Strict feature count and value checks per request
//! - **Positional Alignment**: Deterministic name binding, no fuzzy matching
//! - **Model Artifacts**: Logistic, tree-ensemble and margin classifiers from JSON
//! - **Graceful Degradation**: A missing model degrades to typed 503s, never a crash
//! - **REST API**: `/predict`, `/health` and `/` with permissive CORS

// Re-export schema types
pub use riskx_schema::{FeatureSchema, SchemaError};

// Re-export core types
pub use riskx_core::{
    AlignedRecord, Classifier, Error, ErrorCategory, FeatureVector, InferencePipeline,
    PredictionResult, Result, DEFAULT_ROUND_DIGITS,
};

// Re-export model loading
pub use riskx_model::{load_model, LoadedModel, ModelArtifact, ModelError};

// Re-export API
pub use riskx_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        load_model, AlignedRecord, Classifier, Error, ErrorCategory, FeatureSchema,
        FeatureVector, InferencePipeline, LoadedModel, ModelArtifact, ModelError,
        PredictionResult, Result, RestApi, SchemaError, DEFAULT_ROUND_DIGITS,
    };
}
