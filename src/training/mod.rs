//! Model training module
//!
//! Provides the classifier side of the scoring pipeline:
//! - Seeded shuffled train/test split
//! - CART decision trees with per-split feature sampling
//! - Random Forest ensembles of those trees
//! - A `Classifier` trait the evaluation stage consumes

mod config;
mod models;
pub mod decision_tree;
pub mod random_forest;
pub mod split;

pub use config::ForestConfig;
pub use decision_tree::{Criterion, DecisionTree, TreeNode};
pub use models::{positive_class_scores, Classifier};
pub use random_forest::{MaxFeatures, RandomForest};
pub use split::{shuffle_split_indices, train_test_split, TrainTestSplit};
