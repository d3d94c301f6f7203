//! # riskX Model
//!
//! Model artifacts for the riskX inference service: the on-disk artifact
//! format, the concrete [`Classifier`](riskx_core::Classifier)
//! implementations, and the loading routine.

pub mod artifact;
pub mod forest;
pub mod loader;
pub mod logistic;
pub mod margin;

pub use artifact::{ArtifactError, ArtifactMetadata, ModelArtifact, ModelSpec};
pub use forest::{DecisionTree, ForestModel, TreeNode};
pub use loader::{load_model, LoadedModel, ModelError};
pub use logistic::LogisticModel;
pub use margin::MarginModel;
