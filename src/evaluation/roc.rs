//! ROC curve and area under it

use crate::error::{Result, ScoringError};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Receiver operating characteristic points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocCurve {
    /// False positive rate per threshold
    pub fpr: Vec<f64>,
    /// True positive rate per threshold
    pub tpr: Vec<f64>,
    /// Decreasing score thresholds; the first is `+inf`
    pub thresholds: Vec<f64>,
}

impl RocCurve {
    /// Number of points on the curve
    pub fn len(&self) -> usize {
        self.fpr.len()
    }

    /// Whether the curve has no points
    pub fn is_empty(&self) -> bool {
        self.fpr.is_empty()
    }

    /// Area under the curve by the trapezoidal rule
    pub fn auc(&self) -> f64 {
        auc(&self.fpr, &self.tpr)
    }
}

/// Compute the ROC curve of `scores` against `y_true`.
///
/// Scores are swept from high to low, one point per distinct score. Points
/// lying on a straight segment between their neighbours are dropped. The
/// curve always starts at (0, 0) with an infinite threshold. When either
/// class is absent its rate is undefined and comes out as NaN.
pub fn roc_curve(y_true: &Array1<f64>, scores: &Array1<f64>, positive_class: f64) -> Result<RocCurve> {
    if y_true.len() != scores.len() {
        return Err(ScoringError::ValidationError(format!(
            "y_true and scores lengths differ ({} vs {})",
            y_true.len(),
            scores.len()
        )));
    }
    if y_true.is_empty() {
        return Err(ScoringError::ValidationError(
            "cannot compute a ROC curve on zero samples".to_string(),
        ));
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    // cumulative counts at the last index of every distinct score
    let mut tps = Vec::new();
    let mut fps = Vec::new();
    let mut thresholds = Vec::new();
    let (mut tp, mut fp) = (0.0, 0.0);
    for (pos, &i) in order.iter().enumerate() {
        if y_true[i] == positive_class {
            tp += 1.0;
        } else {
            fp += 1.0;
        }
        let last_of_run = order
            .get(pos + 1)
            .map_or(true, |&next| scores[next] != scores[i]);
        if last_of_run {
            tps.push(tp);
            fps.push(fp);
            thresholds.push(scores[i]);
        }
    }

    let keep = corner_points(&fps, &tps);
    let mut fps: Vec<f64> = keep.iter().map(|&k| fps[k]).collect();
    let mut tps: Vec<f64> = keep.iter().map(|&k| tps[k]).collect();
    let mut thresholds: Vec<f64> = keep.iter().map(|&k| thresholds[k]).collect();

    fps.insert(0, 0.0);
    tps.insert(0, 0.0);
    thresholds.insert(0, f64::INFINITY);

    let n_neg = fps[fps.len() - 1];
    let n_pos = tps[tps.len() - 1];

    let fpr = if n_neg > 0.0 {
        fps.iter().map(|f| f / n_neg).collect()
    } else {
        warn!("No negative samples in y_true, false positive value should be meaningless");
        vec![f64::NAN; fps.len()]
    };
    let tpr = if n_pos > 0.0 {
        tps.iter().map(|t| t / n_pos).collect()
    } else {
        warn!("No positive samples in y_true, true positive value should be meaningless");
        vec![f64::NAN; tps.len()]
    };

    Ok(RocCurve { fpr, tpr, thresholds })
}

/// Indices of points where the curve changes direction, plus both ends
fn corner_points(fps: &[f64], tps: &[f64]) -> Vec<usize> {
    let n = fps.len();
    if n <= 2 {
        return (0..n).collect();
    }
    let mut keep = vec![0];
    for k in 1..n - 1 {
        let fps_bend = fps[k + 1] - 2.0 * fps[k] + fps[k - 1];
        let tps_bend = tps[k + 1] - 2.0 * tps[k] + tps[k - 1];
        if fps_bend != 0.0 || tps_bend != 0.0 {
            keep.push(k);
        }
    }
    keep.push(n - 1);
    keep
}

/// Trapezoidal area under a curve with monotonic `x`
pub fn auc(x: &[f64], y: &[f64]) -> f64 {
    let area: f64 = x
        .windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum();
    if x.len() >= 2 && x[x.len() - 1] < x[0] {
        -area
    } else {
        area
    }
}

/// ROC-AUC, or NaN when `y_true` holds a single class
pub fn roc_auc_score(y_true: &Array1<f64>, scores: &Array1<f64>, positive_class: f64) -> Result<f64> {
    let n_pos = y_true.iter().filter(|&&v| v == positive_class).count();
    if n_pos == 0 || n_pos == y_true.len() {
        warn!(
            "Only one class present in y_true. ROC AUC score is not defined in that case."
        );
        return Ok(f64::NAN);
    }
    Ok(roc_curve(y_true, scores, positive_class)?.auc())
}
