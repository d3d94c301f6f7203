//! Tree-ensemble classifier.
//!
//! Each tree is a flat node array walked from node 0. Split nodes route
//! `x <= threshold` to the left child and everything else, NaN included,
//! to the right. Children always come after their parent in the array,
//! so a walk strictly advances and cannot cycle.

use crate::artifact::ArtifactError;
use riskx_core::{AlignedRecord, Classifier};
use serde::{Deserialize, Serialize};

/// One node of a decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Per-class mass. May be raw training counts; normalized at
        /// evaluation time.
        distribution: Vec<f64>,
    },
}

/// A single decision tree as a flat node array, root at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Check node consistency against the forest's feature width.
    ///
    /// Returns the tree's class width on success, a node-level reason on
    /// failure.
    fn validate(&self, n_features: usize) -> Result<usize, String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        let mut width: Option<usize> = None;
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!("node {i}: feature index {feature} out of range"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {i}: non-finite threshold"));
                    }
                    for child in [*left, *right] {
                        if child >= self.nodes.len() {
                            return Err(format!("node {i}: child {child} out of range"));
                        }
                        if child <= i {
                            return Err(format!("node {i}: child {child} does not follow its parent"));
                        }
                    }
                }
                TreeNode::Leaf { distribution } => {
                    if distribution.is_empty() {
                        return Err(format!("node {i}: empty distribution"));
                    }
                    if distribution.iter().any(|v| !v.is_finite() || *v < 0.0) {
                        return Err(format!(
                            "node {i}: distribution values must be finite and non-negative"
                        ));
                    }
                    if distribution.iter().sum::<f64>() <= 0.0 {
                        return Err(format!("node {i}: distribution sums to zero"));
                    }
                    match width {
                        Some(w) if w != distribution.len() => {
                            return Err(format!(
                                "node {i}: class width {} differs from {w}",
                                distribution.len()
                            ));
                        }
                        None => width = Some(distribution.len()),
                        _ => {}
                    }
                }
            }
        }

        width.ok_or_else(|| "tree has no leaves".to_string())
    }

    /// Walk to the leaf selected by `values`.
    fn leaf(&self, values: &[f64]) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { distribution } => return distribution,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    // Out-of-range features read as NaN; NaN comparisons
                    // are false and take the right branch.
                    let x = values.get(*feature).copied().unwrap_or(f64::NAN);
                    index = if x <= *threshold { *left } else { *right };
                }
            }
        }
    }

    fn class_distribution(&self, values: &[f64]) -> Vec<f64> {
        let leaf = self.leaf(values);
        let total: f64 = leaf.iter().sum();
        leaf.iter().map(|v| v / total).collect()
    }
}

/// Ensemble over validated trees. The forest's class distribution is the
/// mean of the per-tree distributions; the label is its argmax.
#[derive(Debug, Clone, PartialEq)]
pub struct ForestModel {
    n_features: usize,
    n_classes: usize,
    trees: Vec<DecisionTree>,
}

impl ForestModel {
    /// Validate every tree and build. All trees must agree on the class
    /// width and reference only features below `n_features`.
    pub fn new(n_features: usize, trees: Vec<DecisionTree>) -> Result<Self, ArtifactError> {
        if n_features == 0 {
            return Err(ArtifactError::ZeroFeatures);
        }
        if trees.is_empty() {
            return Err(ArtifactError::EmptyForest);
        }

        let mut n_classes = 0;
        for (index, tree) in trees.iter().enumerate() {
            let width = tree
                .validate(n_features)
                .map_err(|reason| ArtifactError::InvalidTree { tree: index, reason })?;
            if index == 0 {
                n_classes = width;
            } else if width != n_classes {
                return Err(ArtifactError::InvalidTree {
                    tree: index,
                    reason: format!("class width {width} differs from {n_classes}"),
                });
            }
        }

        Ok(Self {
            n_features,
            n_classes,
            trees,
        })
    }

    fn distribution(&self, values: &[f64]) -> Vec<f64> {
        let mut mean = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (slot, p) in mean.iter_mut().zip(tree.class_distribution(values)) {
                *slot += p;
            }
        }
        let count = self.trees.len() as f64;
        for slot in &mut mean {
            *slot /= count;
        }
        mean
    }
}

impl Classifier for ForestModel {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, record: &AlignedRecord) -> i64 {
        argmax(&self.distribution(record.values())) as i64
    }

    fn predict_proba(&self, record: &AlignedRecord) -> Option<Vec<f64>> {
        Some(self.distribution(record.values()))
    }
}

/// Index of the largest entry; the first wins a tie.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskx_core::FeatureVector;
    use riskx_schema::FeatureSchema;

    fn record(values: &[f64]) -> AlignedRecord {
        let schema = FeatureSchema::indexed(values.len()).unwrap();
        AlignedRecord::align(&FeatureVector::from_slice(values), &schema)
    }

    fn stump() -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.5,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf {
                    distribution: vec![3.0, 1.0],
                },
                TreeNode::Leaf {
                    distribution: vec![0.0, 4.0],
                },
            ],
        }
    }

    fn leaf_only(distribution: Vec<f64>) -> DecisionTree {
        DecisionTree {
            nodes: vec![TreeNode::Leaf { distribution }],
        }
    }

    #[test]
    fn test_stump_routes_by_threshold() {
        let model = ForestModel::new(1, vec![stump()]).unwrap();

        // Left leaf holds counts [3, 1], normalized to [0.75, 0.25].
        assert_eq!(model.predict(&record(&[0.2])), 0);
        assert_eq!(
            model.predict_proba(&record(&[0.2])),
            Some(vec![0.75, 0.25])
        );

        assert_eq!(model.predict(&record(&[0.9])), 1);
        assert_eq!(model.predict_proba(&record(&[0.9])), Some(vec![0.0, 1.0]));

        // The threshold itself descends left.
        assert_eq!(model.predict(&record(&[0.5])), 0);
    }

    #[test]
    fn test_nan_descends_right() {
        let model = ForestModel::new(1, vec![stump()]).unwrap();
        assert_eq!(model.predict(&record(&[f64::NAN])), 1);
    }

    #[test]
    fn test_forest_averages_tree_distributions() {
        let trees = vec![leaf_only(vec![1.0, 3.0]), leaf_only(vec![1.0, 1.0])];
        let model = ForestModel::new(1, trees).unwrap();

        // Mean of [0.25, 0.75] and [0.5, 0.5].
        assert_eq!(
            model.predict_proba(&record(&[0.0])),
            Some(vec![0.375, 0.625])
        );
        assert_eq!(model.predict(&record(&[0.0])), 1);
    }

    #[test]
    fn test_empty_forest_rejected() {
        assert_eq!(
            ForestModel::new(1, vec![]),
            Err(ArtifactError::EmptyForest)
        );
        assert_eq!(
            ForestModel::new(0, vec![stump()]),
            Err(ArtifactError::ZeroFeatures)
        );
    }

    #[test]
    fn test_invalid_trees_rejected() {
        // Feature index beyond the declared width.
        let err = ForestModel::new(1, vec![DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 3,
                    threshold: 0.5,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { distribution: vec![1.0, 1.0] },
                TreeNode::Leaf { distribution: vec![1.0, 1.0] },
            ],
        }])
        .err()
        .unwrap();
        assert!(matches!(err, ArtifactError::InvalidTree { tree: 0, .. }));

        // A child that points backward could loop forever.
        let err = ForestModel::new(1, vec![DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.5,
                    left: 0,
                    right: 1,
                },
                TreeNode::Leaf { distribution: vec![1.0, 1.0] },
            ],
        }])
        .err()
        .unwrap();
        assert!(matches!(err, ArtifactError::InvalidTree { tree: 0, .. }));

        // A child index past the end of the node array.
        let err = ForestModel::new(1, vec![DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.5,
                    left: 1,
                    right: 9,
                },
                TreeNode::Leaf { distribution: vec![1.0, 1.0] },
            ],
        }])
        .err()
        .unwrap();
        assert!(matches!(err, ArtifactError::InvalidTree { tree: 0, .. }));

        // Leaves that carry no usable mass.
        let err = ForestModel::new(1, vec![leaf_only(vec![])]).err().unwrap();
        assert!(matches!(err, ArtifactError::InvalidTree { tree: 0, .. }));
        let err = ForestModel::new(1, vec![leaf_only(vec![0.0, 0.0])])
            .err()
            .unwrap();
        assert!(matches!(err, ArtifactError::InvalidTree { tree: 0, .. }));
    }

    #[test]
    fn test_ragged_class_widths_rejected() {
        // Within one tree.
        let tree = DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.5,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { distribution: vec![1.0, 1.0] },
                TreeNode::Leaf { distribution: vec![1.0, 1.0, 1.0] },
            ],
        };
        let err = ForestModel::new(1, vec![tree]).err().unwrap();
        assert!(matches!(err, ArtifactError::InvalidTree { tree: 0, .. }));

        // Across trees.
        let trees = vec![leaf_only(vec![1.0, 1.0]), leaf_only(vec![1.0, 1.0, 1.0])];
        let err = ForestModel::new(1, trees).err().unwrap();
        assert!(matches!(err, ArtifactError::InvalidTree { tree: 1, .. }));
    }

    #[test]
    fn test_multiclass_argmax() {
        let model = ForestModel::new(1, vec![leaf_only(vec![1.0, 5.0, 4.0])]).unwrap();
        assert_eq!(model.predict(&record(&[0.0])), 1);
        assert_eq!(
            model.predict_proba(&record(&[0.0])),
            Some(vec![0.1, 0.5, 0.4])
        );
    }

    #[test]
    fn test_argmax_first_wins_tie() {
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[0.1, 0.6, 0.3]), 1);
    }
}
