//! Confusion matrix

use crate::error::{Result, ScoringError};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Counts of (true label, predicted label) pairs.
///
/// Rows are true labels and columns predicted labels, both in the sorted
/// order of `labels`, which is the union of values seen in either input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    labels: Vec<f64>,
    counts: Array2<usize>,
}

impl ConfusionMatrix {
    /// Tally predictions against ground truth
    pub fn compute(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(ScoringError::ValidationError(format!(
                "y_true and y_pred lengths differ ({} vs {})",
                y_true.len(),
                y_pred.len()
            )));
        }

        let mut labels: Vec<f64> = y_true.iter().chain(y_pred.iter()).copied().collect();
        labels.sort_by(|a, b| a.total_cmp(b));
        labels.dedup();

        let position = |v: &f64| labels.binary_search_by(|l| l.total_cmp(v)).unwrap_or(0);

        let mut counts = Array2::zeros((labels.len(), labels.len()));
        for (t, p) in y_true.iter().zip(y_pred.iter()) {
            counts[[position(t), position(p)]] += 1;
        }

        Ok(Self { labels, counts })
    }

    /// Sorted labels indexing both axes
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Raw count matrix
    pub fn counts(&self) -> &Array2<usize> {
        &self.counts
    }

    /// Count for one (true, predicted) pair; zero for unknown labels
    pub fn get(&self, true_label: f64, predicted_label: f64) -> usize {
        match (self.index_of(true_label), self.index_of(predicted_label)) {
            (Some(i), Some(j)) => self.counts[[i, j]],
            _ => 0,
        }
    }

    /// Rows whose true label is `label`
    pub fn support(&self, label: f64) -> usize {
        self.index_of(label)
            .map_or(0, |i| self.counts.row(i).sum())
    }

    /// Rows predicted as `label`
    pub fn predicted(&self, label: f64) -> usize {
        self.index_of(label)
            .map_or(0, |j| self.counts.column(j).sum())
    }

    /// Total number of rows tallied
    pub fn total(&self) -> usize {
        self.counts.sum()
    }

    /// Rows on the diagonal
    pub fn correct(&self) -> usize {
        self.counts.diag().sum()
    }

    /// (tp, fp, tn, fn) treating `positive` as the positive class
    pub fn binary_counts(&self, positive: f64) -> (usize, usize, usize, usize) {
        let tp = self.get(positive, positive);
        let fp = self.predicted(positive) - tp;
        let fn_ = self.support(positive) - tp;
        let tn = self.total() - tp - fp - fn_;
        (tp, fp, tn, fn_)
    }

    fn index_of(&self, label: f64) -> Option<usize> {
        self.labels.binary_search_by(|l| l.total_cmp(&label)).ok()
    }
}
