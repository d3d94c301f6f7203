//! # riskX Core
//!
//! Core library for the riskX inference service.
//!
//! This crate provides the per-request inference machinery:
//!
//! - [`FeatureVector`] - Validated raw feature values
//! - [`AlignedRecord`] - Feature values bound to schema names
//! - [`Classifier`] - The trait a loaded model implements
//! - [`InferencePipeline`] - The validate/align/invoke/format flow
//! - [`Error`] - The request-level error taxonomy
//!
//! ## Example
//!
//! ```rust
//! use riskx_core::{Error, InferencePipeline};
//! use riskx_schema::FeatureSchema;
//! use serde_json::json;
//!
//! // A pipeline with no model still validates input shape.
//! let schema = FeatureSchema::new(["a", "b", "c"]).unwrap();
//! let pipeline = InferencePipeline::new(schema, None);
//!
//! let err = pipeline.handle(&json!({ "input": [1, 2] })).unwrap_err();
//! assert_eq!(err, Error::FeatureCountMismatch { expected: 3, received: 2 });
//!
//! let err = pipeline.handle(&json!({ "input": [1, 2, 3] })).unwrap_err();
//! assert_eq!(err, Error::ModelUnavailable);
//! ```

pub mod classifier;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod vector;

pub use classifier::Classifier;
pub use error::{Error, ErrorCategory, Result};
pub use pipeline::{InferencePipeline, PredictionResult, DEFAULT_ROUND_DIGITS};
pub use record::AlignedRecord;
pub use vector::FeatureVector;
