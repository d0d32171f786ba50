//! Decision tree classifier

use crate::error::{Result, ScoringError};
use ndarray::{Array1, Array2, ArrayView1};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Decision tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Leaf node holding the class distribution of its training samples
    Leaf {
        distribution: Vec<f64>,
        n_samples: usize,
    },
    /// Internal node with split
    Split {
        feature_idx: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
        n_samples: usize,
        impurity: f64,
    },
}

/// Impurity criterion
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Criterion {
    /// Gini impurity
    Gini,
    /// Shannon entropy (log base 2)
    Entropy,
}

impl Criterion {
    fn impurity(&self, counts: &[usize], n: usize) -> f64 {
        if n == 0 {
            return 0.0;
        }
        let n = n as f64;
        match self {
            Criterion::Gini => {
                1.0 - counts
                    .iter()
                    .map(|&c| (c as f64 / n).powi(2))
                    .sum::<f64>()
            }
            Criterion::Entropy => -counts
                .iter()
                .filter(|&&c| c > 0)
                .map(|&c| {
                    let p = c as f64 / n;
                    p * p.log2()
                })
                .sum::<f64>(),
        }
    }
}

/// Decision tree classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Tree root
    root: Option<TreeNode>,
    /// Maximum depth
    pub max_depth: Option<usize>,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Candidate features drawn per split (all when `None`)
    pub max_features: Option<usize>,
    /// Impurity criterion
    pub criterion: Criterion,
    /// Seed for the feature draws when fitted on its own
    pub random_state: Option<u64>,
    /// Number of features
    n_features: usize,
    /// Sorted class labels
    classes: Vec<f64>,
    /// Feature importances
    feature_importances: Option<Array1<f64>>,
    /// Number of nodes, leaves included
    node_count: usize,
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTree {
    /// Create a new classifier tree
    pub fn new() -> Self {
        Self {
            root: None,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            criterion: Criterion::Gini,
            random_state: None,
            n_features: 0,
            classes: Vec::new(),
            feature_importances: None,
            node_count: 0,
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

    /// Set the number of candidate features per split
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
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

    /// Fit the tree to training data
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        if x.nrows() != y.len() {
            return Err(ScoringError::ShapeError {
                expected: format!("y length = {}", x.nrows()),
                actual: format!("y length = {}", y.len()),
            });
        }

        let classes = sorted_classes(y);
        let labels = encode_labels(y, &classes);
        let samples: Vec<usize> = (0..x.nrows()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(self.random_state.unwrap_or(0));

        self.fit_samples(x, &labels, &classes, &samples, &mut rng)?;
        Ok(self)
    }

    /// Fit on a (possibly repeated) subset of rows.
    ///
    /// `labels` holds class indices into `classes` for every row of `x`;
    /// `samples` lists the rows to train on, duplicates counting as weight.
    pub(crate) fn fit_samples(
        &mut self,
        x: &Array2<f64>,
        labels: &[usize],
        classes: &[f64],
        samples: &[usize],
        rng: &mut ChaCha8Rng,
    ) -> Result<()> {
        if samples.is_empty() {
            return Err(ScoringError::ValidationError(
                "cannot fit a tree on zero samples".to_string(),
            ));
        }

        let n_features = x.ncols();
        let max_features = self
            .max_features
            .unwrap_or(n_features)
            .clamp(1, n_features.max(1));

        let mut builder = TreeBuilder {
            x,
            labels,
            n_classes: classes.len(),
            criterion: self.criterion,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split.max(2),
            min_samples_leaf: self.min_samples_leaf.max(1),
            max_features,
            rng,
            importances: vec![0.0; n_features],
            node_count: 0,
        };

        let root = builder.build(samples.to_vec(), 0);

        let mut importances = builder.importances;
        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            for imp in &mut importances {
                *imp /= total;
            }
        }

        self.node_count = builder.node_count;
        self.root = Some(root);
        self.n_features = n_features;
        self.classes = classes.to_vec();
        self.feature_importances = Some(Array1::from_vec(importances));
        Ok(())
    }

    /// Predict class probabilities, one column per entry of [`classes`](Self::classes)
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let root = self.root.as_ref().ok_or(ScoringError::ModelNotFitted)?;
        self.check_width(x)?;

        let mut proba = Array2::zeros((x.nrows(), self.classes.len()));
        for (i, row) in x.rows().into_iter().enumerate() {
            let distribution = leaf_distribution(root, row);
            for (j, &p) in distribution.iter().enumerate() {
                proba[[i, j]] = p;
            }
        }
        Ok(proba)
    }

    /// Make predictions
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let proba = self.predict_proba(x)?;
        Ok(argmax_classes(&proba, &self.classes))
    }

    fn check_width(&self, x: &Array2<f64>) -> Result<()> {
        if x.ncols() != self.n_features {
            return Err(ScoringError::ShapeError {
                expected: format!("{} features", self.n_features),
                actual: format!("{} features", x.ncols()),
            });
        }
        Ok(())
    }

    /// Get feature importances
    pub fn feature_importances(&self) -> Option<&Array1<f64>> {
        self.feature_importances.as_ref()
    }

    /// Sorted class labels seen during fit
    pub fn classes(&self) -> &[f64] {
        &self.classes
    }

    /// Number of nodes, leaves included
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Get tree depth
    pub fn get_depth(&self) -> usize {
        fn depth(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 1,
                TreeNode::Split { left, right, .. } => 1 + depth(left).max(depth(right)),
            }
        }
        self.root.as_ref().map_or(0, depth)
    }

    /// Get number of leaves
    pub fn get_n_leaves(&self) -> usize {
        fn leaves(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 1,
                TreeNode::Split { left, right, .. } => leaves(left) + leaves(right),
            }
        }
        self.root.as_ref().map_or(0, leaves)
    }
}

fn leaf_distribution<'t>(mut node: &'t TreeNode, sample: ArrayView1<f64>) -> &'t [f64] {
    loop {
        match node {
            TreeNode::Leaf { distribution, .. } => return distribution,
            TreeNode::Split { feature_idx, threshold, left, right, .. } => {
                node = if sample[*feature_idx] <= *threshold { left } else { right };
            }
        }
    }
}

/// Sorted distinct labels
pub(crate) fn sorted_classes(y: &Array1<f64>) -> Vec<f64> {
    let mut classes: Vec<f64> = y.iter().copied().collect();
    classes.sort_by(|a, b| a.total_cmp(b));
    classes.dedup();
    classes
}

/// Map each label to its index in `classes`
pub(crate) fn encode_labels(y: &Array1<f64>, classes: &[f64]) -> Vec<usize> {
    y.iter()
        .map(|v| {
            classes
                .binary_search_by(|c| c.total_cmp(v))
                .unwrap_or(0)
        })
        .collect()
}

/// Class with the highest probability per row; ties go to the lowest class
pub(crate) fn argmax_classes(proba: &Array2<f64>, classes: &[f64]) -> Array1<f64> {
    proba
        .rows()
        .into_iter()
        .map(|row| {
            let mut best = 0;
            for (j, &p) in row.iter().enumerate() {
                if p > row[best] {
                    best = j;
                }
            }
            classes.get(best).copied().unwrap_or(0.0)
        })
        .collect()
}

struct SplitCandidate {
    feature_idx: usize,
    threshold: f64,
    gain: f64,
}

/// Recursive tree construction state
struct TreeBuilder<'a> {
    x: &'a Array2<f64>,
    labels: &'a [usize],
    n_classes: usize,
    criterion: Criterion,
    max_depth: Option<usize>,
    min_samples_split: usize,
    min_samples_leaf: usize,
    max_features: usize,
    rng: &'a mut ChaCha8Rng,
    importances: Vec<f64>,
    node_count: usize,
}

impl TreeBuilder<'_> {
    fn class_counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &i in indices {
            counts[self.labels[i]] += 1;
        }
        counts
    }

    fn leaf(counts: &[usize], n_samples: usize) -> TreeNode {
        let distribution = counts
            .iter()
            .map(|&c| c as f64 / n_samples as f64)
            .collect();
        TreeNode::Leaf { distribution, n_samples }
    }

    fn build(&mut self, indices: Vec<usize>, depth: usize) -> TreeNode {
        self.node_count += 1;

        let n_samples = indices.len();
        let counts = self.class_counts(&indices);
        let impurity = self.criterion.impurity(&counts, n_samples);

        let should_stop = n_samples < self.min_samples_split
            || n_samples < 2 * self.min_samples_leaf
            || self.max_depth.map_or(false, |d| depth >= d)
            || impurity <= f64::EPSILON;

        if should_stop {
            return Self::leaf(&counts, n_samples);
        }

        let Some(split) = self.find_best_split(&indices, impurity) else {
            return Self::leaf(&counts, n_samples);
        };

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| self.x[[i, split.feature_idx]] <= split.threshold);

        let left_impurity = self
            .criterion
            .impurity(&self.class_counts(&left_indices), left_indices.len());
        let right_impurity = self
            .criterion
            .impurity(&self.class_counts(&right_indices), right_indices.len());

        self.importances[split.feature_idx] += n_samples as f64 * impurity
            - left_indices.len() as f64 * left_impurity
            - right_indices.len() as f64 * right_impurity;

        let left = Box::new(self.build(left_indices, depth + 1));
        let right = Box::new(self.build(right_indices, depth + 1));

        TreeNode::Split {
            feature_idx: split.feature_idx,
            threshold: split.threshold,
            left,
            right,
            n_samples,
            impurity,
        }
    }

    /// Scan a random draw of features, keeping going past `max_features`
    /// only while no valid split has been found. Constant features do not
    /// count towards the draw.
    fn find_best_split(&mut self, indices: &[usize], parent_impurity: f64) -> Option<SplitCandidate> {
        let n = indices.len();
        let mut features: Vec<usize> = (0..self.x.ncols()).collect();
        features.shuffle(&mut *self.rng);

        let total_counts = self.class_counts(indices);
        let mut best: Option<SplitCandidate> = None;
        let mut visited = 0usize;
        let mut column: Vec<(f64, usize)> = Vec::with_capacity(n);

        for feature_idx in features {
            if visited >= self.max_features && best.is_some() {
                break;
            }

            column.clear();
            column.extend(indices.iter().map(|&i| (self.x[[i, feature_idx]], self.labels[i])));
            column.sort_by(|a, b| a.0.total_cmp(&b.0));

            if column[0].0 >= column[n - 1].0 {
                continue;
            }
            visited += 1;

            let mut left_counts = vec![0usize; self.n_classes];
            let mut right_counts = total_counts.clone();

            for pos in 0..n - 1 {
                let (value, label) = column[pos];
                left_counts[label] += 1;
                right_counts[label] -= 1;

                let next_value = column[pos + 1].0;
                if next_value <= value {
                    continue;
                }

                let n_left = pos + 1;
                let n_right = n - n_left;
                if n_left < self.min_samples_leaf || n_right < self.min_samples_leaf {
                    continue;
                }

                let weighted = (n_left as f64 * self.criterion.impurity(&left_counts, n_left)
                    + n_right as f64 * self.criterion.impurity(&right_counts, n_right))
                    / n as f64;
                let gain = parent_impurity - weighted;

                if best.as_ref().map_or(true, |b| gain > b.gain) {
                    let mut threshold = value + (next_value - value) / 2.0;
                    if threshold >= next_value || !threshold.is_finite() {
                        threshold = value;
                    }
                    best = Some(SplitCandidate { feature_idx, threshold, gain });
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_classifier_simple() {
        let x = array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
        let y = array![0.0, 0.0, 1.0, 1.0];

        let mut tree = DecisionTree::new();
        tree.fit(&x, &y).unwrap();

        let predictions = tree.predict(&x).unwrap();
        assert_eq!(predictions, y);
    }

    #[test]
    fn test_max_depth() {
        let x = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]];
        let y = array![0.0, 1.0, 0.0, 1.0];

        let mut tree = DecisionTree::new().with_max_depth(2);
        tree.fit(&x, &y).unwrap();

        assert!(tree.get_depth() <= 3);
        assert!(tree.get_n_leaves() >= 2);
    }

    #[test]
    fn test_feature_importances() {
        let x = array![[1.0, 0.0], [2.0, 0.0], [3.0, 0.0], [4.0, 0.0]];
        let y = array![0.0, 0.0, 1.0, 1.0];

        let mut tree = DecisionTree::new();
        tree.fit(&x, &y).unwrap();

        let importances = tree.feature_importances().unwrap();
        assert!((importances[0] - 1.0).abs() < 1e-12);
        assert_eq!(importances[1], 0.0);
    }

    #[test]
    fn test_predict_proba_rows_sum_to_one() {
        let x = array![[0.0], [0.0], [1.0], [1.0], [1.0]];
        let y = array![0.0, 1.0, 1.0, 1.0, 0.0];

        let mut tree = DecisionTree::new();
        tree.fit(&x, &y).unwrap();

        let proba = tree.predict_proba(&x).unwrap();
        assert_eq!(proba.ncols(), 2);
        for row in proba.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-12);
        }
        // duplicate points cannot be separated, so the leaf keeps the mix
        assert!((proba[[0, 0]] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_class_is_one_leaf() {
        let x = array![[1.0, 5.0], [2.0, 4.0], [3.0, 3.0]];
        let y = array![0.0, 0.0, 0.0];

        let mut tree = DecisionTree::new();
        tree.fit(&x, &y).unwrap();

        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.classes(), &[0.0]);
        assert!(tree.feature_importances().unwrap().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_predict_before_fit() {
        let tree = DecisionTree::new();
        let err = tree.predict(&array![[1.0]]).unwrap_err();
        assert!(matches!(err, ScoringError::ModelNotFitted));
    }

    #[test]
    fn test_criterion_impurity() {
        assert!((Criterion::Gini.impurity(&[2, 2], 4) - 0.5).abs() < 1e-12);
        assert!((Criterion::Entropy.impurity(&[2, 2], 4) - 1.0).abs() < 1e-12);
        assert_eq!(Criterion::Gini.impurity(&[4, 0], 4), 0.0);
    }
}
