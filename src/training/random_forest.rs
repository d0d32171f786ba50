//! Random Forest implementation

use super::decision_tree::{argmax_classes, encode_labels, sorted_classes, Criterion, DecisionTree};
use crate::error::{Result, ScoringError};
use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Random Forest classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    /// Individual trees
    trees: Vec<DecisionTree>,
    /// Number of trees
    pub n_estimators: usize,
    /// Maximum depth per tree
    pub max_depth: Option<usize>,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Candidate features per split (sqrt by default)
    pub max_features: MaxFeatures,
    /// Bootstrap sampling
    pub bootstrap: bool,
    /// Impurity criterion
    pub criterion: Criterion,
    /// Random state
    pub random_state: Option<u64>,
    /// Feature importances
    feature_importances: Option<Array1<f64>>,
    /// Number of features
    n_features: usize,
    /// Sorted class labels
    classes: Vec<f64>,
}

/// Strategy for max features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MaxFeatures {
    /// Square root of n_features
    Sqrt,
    /// Log2 of n_features
    Log2,
    /// Fraction of n_features
    Fraction(f64),
    /// Fixed number
    Fixed(usize),
    /// All features
    All,
}

impl MaxFeatures {
    /// Resolve to a feature count, at least one
    pub fn resolve(&self, n_features: usize) -> usize {
        let n = n_features as f64;
        match *self {
            MaxFeatures::Sqrt => n.sqrt().floor() as usize,
            MaxFeatures::Log2 => n.log2().floor() as usize,
            MaxFeatures::Fraction(f) => (n * f).floor() as usize,
            MaxFeatures::Fixed(k) => k.min(n_features),
            MaxFeatures::All => n_features,
        }
        .max(1)
    }
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new(100)
    }
}

impl RandomForest {
    /// Create a new forest
    pub fn new(n_estimators: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_estimators,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::Sqrt,
            bootstrap: true,
            criterion: Criterion::Gini,
            random_state: None,
            feature_importances: None,
            n_features: 0,
            classes: Vec::new(),
        }
    }

    /// Set maximum depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set minimum samples to split
    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples;
        self
    }

    /// Set minimum samples in leaf
    pub fn with_min_samples_leaf(mut self, min_samples: usize) -> Self {
        self.min_samples_leaf = min_samples;
        self
    }

    /// Set max features strategy
    pub fn with_max_features(mut self, max_features: MaxFeatures) -> Self {
        self.max_features = max_features;
        self
    }

    /// Enable or disable bootstrap sampling
    pub fn with_bootstrap(mut self, bootstrap: bool) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    /// Set criterion
    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Set random state
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Fit the forest to training data.
    ///
    /// Tree `i` draws its bootstrap sample and its split features from a
    /// ChaCha8 stream seeded with `random_state + i`, so a fit is fully
    /// determined by the seed and the row order.
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        let n_samples = x.nrows();

        if n_samples != y.len() {
            return Err(ScoringError::ShapeError {
                expected: format!("y length = {}", n_samples),
                actual: format!("y length = {}", y.len()),
            });
        }
        if n_samples == 0 {
            return Err(ScoringError::ValidationError(
                "cannot fit a forest on zero samples".to_string(),
            ));
        }
        if self.n_estimators == 0 {
            return Err(ScoringError::ValidationError(
                "n_estimators must be at least 1".to_string(),
            ));
        }

        self.n_features = x.ncols();
        self.classes = sorted_classes(y);
        let labels = encode_labels(y, &self.classes);
        let max_features = self.max_features.resolve(self.n_features);
        let base_seed = self.random_state.unwrap_or(42);

        let mut trees = Vec::with_capacity(self.n_estimators);
        for tree_idx in 0..self.n_estimators {
            let mut rng = ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(tree_idx as u64));

            let sample_indices: Vec<usize> = if self.bootstrap {
                (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
            } else {
                (0..n_samples).collect()
            };

            let mut tree = DecisionTree::new()
                .with_min_samples_split(self.min_samples_split)
                .with_min_samples_leaf(self.min_samples_leaf)
                .with_max_features(max_features)
                .with_criterion(self.criterion);
            if let Some(d) = self.max_depth {
                tree = tree.with_max_depth(d);
            }

            tree.fit_samples(x, &labels, &self.classes, &sample_indices, &mut rng)?;
            trees.push(tree);
        }

        self.trees = trees;
        self.compute_feature_importances();

        Ok(self)
    }

    /// Mean of the per-tree importances, skipping single-leaf trees.
    /// All zeros when no tree ever split.
    fn compute_feature_importances(&mut self) {
        let mut total_importances = vec![0.0; self.n_features];
        let mut n_split_trees = 0usize;

        for tree in self.trees.iter().filter(|t| t.node_count() > 1) {
            if let Some(imp) = tree.feature_importances() {
                for (total, &val) in total_importances.iter_mut().zip(imp.iter()) {
                    *total += val;
                }
                n_split_trees += 1;
            }
        }

        if n_split_trees > 0 {
            for imp in &mut total_importances {
                *imp /= n_split_trees as f64;
            }
            let total: f64 = total_importances.iter().sum();
            if total > 0.0 {
                for imp in &mut total_importances {
                    *imp /= total;
                }
            }
        }

        self.feature_importances = Some(Array1::from_vec(total_importances));
    }

    /// Predict class probabilities: the mean of the trees' leaf distributions
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if self.trees.is_empty() {
            return Err(ScoringError::ModelNotFitted);
        }

        let mut proba = Array2::zeros((x.nrows(), self.classes.len()));
        for tree in &self.trees {
            proba += &tree.predict_proba(x)?;
        }
        proba /= self.trees.len() as f64;

        Ok(proba)
    }

    /// Make predictions
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let proba = self.predict_proba(x)?;
        Ok(argmax_classes(&proba, &self.classes))
    }

    /// Get feature importances
    pub fn feature_importances(&self) -> Option<&Array1<f64>> {
        self.feature_importances.as_ref()
    }

    /// Sorted class labels seen during fit
    pub fn classes(&self) -> &[f64] {
        &self.classes
    }

    /// Get number of trees
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}
