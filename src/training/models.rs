//! Classifier trait shared by the tree models

use super::decision_tree::DecisionTree;
use super::random_forest::RandomForest;
use crate::error::Result;
use ndarray::{Array1, Array2};

/// A fitted or fittable classifier over an `f64` feature matrix.
///
/// Labels are carried as `f64` class values; `predict_proba` returns one
/// column per entry of `classes`, in the same order.
pub trait Classifier {
    /// Fit the model to training data
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()>;

    /// Make predictions
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;

    /// Class probabilities per row
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>>;

    /// Sorted class labels seen during fit
    fn classes(&self) -> &[f64];

    /// Get feature importances (if available)
    fn feature_importances(&self) -> Option<Array1<f64>> {
        None
    }
}

impl Classifier for DecisionTree {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        DecisionTree::fit(self, x, y).map(|_| ())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        DecisionTree::predict(self, x)
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        DecisionTree::predict_proba(self, x)
    }

    fn classes(&self) -> &[f64] {
        DecisionTree::classes(self)
    }

    fn feature_importances(&self) -> Option<Array1<f64>> {
        DecisionTree::feature_importances(self).cloned()
    }
}

impl Classifier for RandomForest {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        RandomForest::fit(self, x, y).map(|_| ())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        RandomForest::predict(self, x)
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        RandomForest::predict_proba(self, x)
    }

    fn classes(&self) -> &[f64] {
        RandomForest::classes(self)
    }

    fn feature_importances(&self) -> Option<Array1<f64>> {
        RandomForest::feature_importances(self).cloned()
    }
}

/// Probability of `positive_class` per row, or `None` when the model never
/// saw that class.
pub fn positive_class_scores(
    model: &dyn Classifier,
    x: &Array2<f64>,
    positive_class: f64,
) -> Result<Option<Array1<f64>>> {
    let Some(col) = model.classes().iter().position(|&c| c == positive_class) else {
        return Ok(None);
    };
    let proba = model.predict_proba(x)?;
    Ok(Some(proba.column(col).to_owned()))
}
