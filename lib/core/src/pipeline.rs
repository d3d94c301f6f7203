//! The inference request pipeline.
//!
//! Per request: validate the decoded payload against the schema, align it
//! into a named record, invoke the model, normalize the output. Any
//! failure short-circuits to a typed [`Error`]; nothing here panics,
//! retries, or keeps state between requests.

use crate::classifier::Classifier;
use crate::error::{Error, Result};
use crate::record::AlignedRecord;
use crate::vector::FeatureVector;
use riskx_schema::FeatureSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Decimal digits kept on reported probabilities unless reconfigured.
pub const DEFAULT_ROUND_DIGITS: u32 = 4;

/// Normalized outcome of a successful prediction.
///
/// `probability`, when present, is the probability mass assigned to the
/// positive class (label 1), clamped to `[0, 1]` and rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: u8,
    pub probability: Option<f64>,
}

/// Turns a decoded request body into a [`PredictionResult`] or a typed
/// failure.
///
/// Holds the schema and the model handle installed once at startup;
/// nothing mutable is shared across requests, so one pipeline serves any
/// number of concurrent callers.
pub struct InferencePipeline {
    schema: FeatureSchema,
    model: Option<Arc<dyn Classifier>>,
    round_digits: u32,
}

impl InferencePipeline {
    /// Create a pipeline over `schema`, serving `model` when one was
    /// loaded at startup.
    ///
    /// `None` makes every invocation report [`Error::ModelUnavailable`]:
    /// absence is detected in one place here instead of being re-checked
    /// at every call site.
    #[must_use]
    pub fn new(schema: FeatureSchema, model: Option<Arc<dyn Classifier>>) -> Self {
        Self {
            schema,
            model,
            round_digits: DEFAULT_ROUND_DIGITS,
        }
    }

    /// Override the probability rounding digits.
    #[must_use]
    pub fn with_round_digits(mut self, digits: u32) -> Self {
        self.round_digits = digits;
        self
    }

    #[inline]
    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    #[inline]
    #[must_use]
    pub fn model_available(&self) -> bool {
        self.model.is_some()
    }

    #[inline]
    #[must_use]
    pub fn round_digits(&self) -> u32 {
        self.round_digits
    }

    /// Extract and check the raw feature vector from a decoded body.
    ///
    /// The body must be an object with an `input` array of exactly
    /// `schema.len()` numeric-coercible values. Numbers, booleans and
    /// numeric strings coerce; anything else, and any non-finite parse,
    /// is malformed. The count is checked before the elements.
    pub fn validate(&self, payload: &Value) -> Result<FeatureVector> {
        let input = payload
            .get("input")
            .and_then(Value::as_array)
            .ok_or(Error::MissingInput)?;

        let expected = self.schema.len();
        if input.len() != expected {
            return Err(Error::FeatureCountMismatch {
                expected,
                received: input.len(),
            });
        }

        let mut values = Vec::with_capacity(expected);
        for (index, raw) in input.iter().enumerate() {
            let value = coerce_numeric(raw).ok_or_else(|| Error::MalformedValue {
                index,
                value: raw.to_string(),
            })?;
            values.push(value);
        }

        Ok(FeatureVector::new(values))
    }

    /// Bind a validated vector to the schema names. Pure and purely
    /// positional; see [`AlignedRecord::align`].
    #[must_use]
    pub fn align(&self, vector: &FeatureVector) -> AlignedRecord {
        AlignedRecord::align(vector, &self.schema)
    }

    /// Run the model on an aligned record.
    ///
    /// Fails only when no model was installed. Probability extraction is
    /// best-effort: a model that declines the capability, or yields a
    /// degenerate distribution, produces a label with no probability and
    /// that is still a success.
    pub fn invoke(&self, record: &AlignedRecord) -> Result<(i64, Option<f64>)> {
        let model = self.model.as_deref().ok_or(Error::ModelUnavailable)?;

        let label = model.predict(record);
        let probability = model
            .predict_proba(record)
            .as_deref()
            .and_then(positive_probability);

        Ok((label, probability))
    }

    /// Normalize raw model output into the response contract: label in
    /// {0, 1}, probability clamped to [0, 1] and rounded. Pure.
    #[must_use]
    pub fn format_result(&self, label: i64, probability: Option<f64>) -> PredictionResult {
        PredictionResult {
            label: u8::from(label != 0),
            probability: probability.map(|p| round_to(p.clamp(0.0, 1.0), self.round_digits)),
        }
    }

    /// Full per-request flow: validate → align → invoke → format, with
    /// the first failure short-circuiting out.
    pub fn handle(&self, payload: &Value) -> Result<PredictionResult> {
        let vector = self.validate(payload)?;
        let record = self.align(&vector);
        let (label, probability) = self.invoke(&record)?;
        Ok(self.format_result(label, probability))
    }
}

/// Coerce one JSON element to a finite real number.
///
/// Numbers, booleans and numeric strings (trimmed) are accepted, the
/// acceptance set of a float cast on the wire format this serves. Null,
/// containers, non-numeric strings and non-finite parses are not.
fn coerce_numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

/// Positive-class probability out of a model's class distribution.
///
/// Two entries is the binary convention: index 1 is the positive class.
/// More than two means the classifier is not strictly binary; the
/// maximum class probability is the documented best-effort summary.
/// Fewer than two carries no usable mass and reads as absent.
fn positive_probability(distribution: &[f64]) -> Option<f64> {
    match distribution.len() {
        2 => Some(distribution[1]),
        n if n > 2 => Some(
            distribution
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max),
        ),
        _ => None,
    }
}

fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).round() / scale
}
