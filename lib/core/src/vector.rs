use serde::{Deserialize, Serialize};

/// A raw feature vector: the caller's ordered numeric values, one per
/// schema position.
///
/// Carries no names of its own; position `i` corresponds to the schema's
/// name at `i`. Built per request and discarded when the request ends,
/// never retained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    #[inline]
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
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

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Iterate the values in caller order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_basics() {
        let vector = FeatureVector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(vector.len(), 3);
        assert!(!vector.is_empty());
        assert_eq!(vector.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_from_slice_copies() {
        let values = [4.0, 5.0];
        let vector = FeatureVector::from_slice(&values);
        assert_eq!(vector, FeatureVector::new(vec![4.0, 5.0]));
    }

    #[test]
    fn test_iter_order() {
        let vector = FeatureVector::new(vec![3.0, 1.0, 2.0]);
        let collected: Vec<f64> = vector.iter().collect();
        assert_eq!(collected, vec![3.0, 1.0, 2.0]);
    }
}
