//! Feature schema definitions
//!
//! The schema is the contract for what a valid input vector looks like:
//! an ordered list of feature names, fixed at construction. Alignment of
//! incoming vectors is purely positional; the names exist to give the
//! model named columns and to make records inspectable.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Ordered, named specification of the expected feature vector layout.
///
/// Invariants are enforced once at construction and never re-checked per
/// request: at least one feature, no blank names, no duplicates. The
/// length never changes for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    /// Create a schema from ordered feature names.
    ///
    /// Position in the list is the contract: the value at index `i` of an
    /// incoming vector is bound to `names[i]`.
    pub fn new<I, S>(names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = AHashSet::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(SchemaError::BlankName { index });
            }
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateName(name.clone()));
            }
        }

        Ok(Self { names })
    }

    /// Generate a schema of `count` positional names `f0..f{count-1}`,
    /// for deployments that configure only the expected feature count.
    pub fn indexed(count: usize) -> Result<Self, SchemaError> {
        Self::new((0..count).map(|i| format!("f{}", i)))
    }

    /// Number of expected features.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The ordered feature names.
    #[inline]
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Name at position `index`, if in range.
    #[inline]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Position of `name` in the schema, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Iterate the names in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for FeatureSchema {
    type Error = SchemaError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<FeatureSchema> for Vec<String> {
    fn from(schema: FeatureSchema) -> Self {
        schema.names
    }
}

/// Errors that can occur during schema construction
#[derive(Debug, Clone, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema cannot be empty")]
    Empty,

    #[error("Feature name at position {index} is blank")]
    BlankName { index: usize },

    #[error("Duplicate feature name: {0}")]
    DuplicateName(String),
}
