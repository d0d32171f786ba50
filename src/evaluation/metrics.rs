//! Scalar classification metrics

use super::confusion::ConfusionMatrix;
use super::roc::roc_auc_score;
use crate::error::Result;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Headline metrics for the positive class.
///
/// `roc_auc` is NaN when the test labels hold a single class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    /// Fraction of exact matches
    pub accuracy: f64,
    /// tp / (tp + fp)
    pub precision: f64,
    /// tp / (tp + fn)
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1_score: f64,
    /// Area under the ROC curve of the positive-class scores
    pub roc_auc: f64,
    /// Number of evaluated rows
    pub n_samples: usize,
}

impl ClassificationMetrics {
    /// Compute classification metrics
    pub fn compute(
        y_true: &Array1<f64>,
        y_pred: &Array1<f64>,
        scores: &Array1<f64>,
        positive_class: f64,
    ) -> Result<Self> {
        let confusion = ConfusionMatrix::compute(y_true, y_pred)?;
        let roc_auc = roc_auc_score(y_true, scores, positive_class)?;
        Ok(Self::from_confusion(&confusion, positive_class, roc_auc))
    }

    /// Derive the label metrics from an existing confusion matrix
    pub fn from_confusion(confusion: &ConfusionMatrix, positive_class: f64, roc_auc: f64) -> Self {
        let (tp, fp, _, fn_) = confusion.binary_counts(positive_class);

        let accuracy = safe_ratio(confusion.correct(), confusion.total()).unwrap_or(0.0);

        let precision = safe_ratio(tp, tp + fp).unwrap_or_else(|| {
            warn!("Precision is ill-defined: no predicted positive samples. Setting to 0.0");
            0.0
        });
        let recall = safe_ratio(tp, tp + fn_).unwrap_or_else(|| {
            warn!("Recall is ill-defined: no true positive samples. Setting to 0.0");
            0.0
        });

        Self {
            accuracy,
            precision,
            recall,
            f1_score: f1(precision, recall),
            roc_auc,
            n_samples: confusion.total(),
        }
    }
}

/// `num / den`, or `None` when the denominator is zero
pub(crate) fn safe_ratio(num: usize, den: usize) -> Option<f64> {
    (den > 0).then(|| num as f64 / den as f64)
}

pub(crate) fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}
