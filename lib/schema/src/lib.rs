//! # riskX Schema
//!
//! Feature-contract layer for the riskX inference service.
//!
//! ## Overview
//!
//! riskX serves predictions over fixed-length tabular feature vectors.
//! This crate defines the contract a valid input must satisfy: an ordered
//! list of named features, resolved and validated once at startup.
//!
//! **How it is used:**
//! 1. Startup resolves the feature names (config file, model metadata, or a bare count)
//! 2. [`FeatureSchema`] validates them once (non-empty, no blanks, no duplicates)
//! 3. Every request is length-checked against the schema and aligned positionally
//!
//! ## Schema Definition
//!
//! ```rust
//! use riskx_schema::FeatureSchema;
//!
//! // From explicit names (order is the contract)
//! let schema = FeatureSchema::new(["age", "dose_mg", "years_using"]).unwrap();
//! assert_eq!(schema.len(), 3);
//!
//! // Or generated from a bare count: f0, f1, ..
//! let schema = FeatureSchema::indexed(27).unwrap();
//! assert_eq!(schema.name(0), Some("f0"));
//! ```

pub mod schema;

// Re-export main types
pub use schema::{FeatureSchema, SchemaError};
