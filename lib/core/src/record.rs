use crate::vector::FeatureVector;
use riskx_schema::FeatureSchema;
use serde::Serialize;

/// A feature vector bound to schema names: parallel name/value arrays in
/// schema order, one value per name, no missing or extra keys.
///
/// Built fresh per request by [`AlignedRecord::align`]. Models consume it
/// as named columns, or as the bare value slice when names are not
/// needed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedRecord {
    names: Vec<String>,
    values: Vec<f64>,
}

impl AlignedRecord {
    /// Bind a validated vector to the schema, purely positionally:
    /// `record[names[i]] = vector[i]`.
    ///
    /// No reordering and no name matching happen here. A caller that
    /// supplies values in the wrong order gets a silently wrong answer,
    /// not an error; the upstream length check is the only guard.
    /// Deterministic: the same vector and schema always produce an
    /// identical record.
    ///
    /// Expects `vector.len() == schema.len()` (the pipeline validates
    /// before aligning).
    #[must_use]
    pub fn align(vector: &FeatureVector, schema: &FeatureSchema) -> Self {
        debug_assert_eq!(vector.len(), schema.len());
        Self {
            names: schema.names().to_vec(),
            values: vector.as_slice().to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Feature names, in schema order.
    #[inline]
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Feature values, in schema order.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value bound to `name`, if the schema declares it.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|i| self.values.get(i).copied())
    }

    /// Iterate `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}
