//! Model evaluation module
//!
//! Scores predictions on the held-out rows:
//! - Accuracy, precision, recall, F1 and ROC-AUC for the positive class
//! - Per-class classification report
//! - Confusion matrix and ROC curve, which also back the charts

mod confusion;
mod metrics;
mod report;
mod roc;

pub use confusion::ConfusionMatrix;
pub use metrics::ClassificationMetrics;
pub use report::{ClassificationReport, ReportRow};
pub use roc::{auc, roc_auc_score, roc_curve, RocCurve};

use crate::error::Result;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Everything computed from one set of test predictions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub metrics: ClassificationMetrics,
    pub report: ClassificationReport,
    pub confusion: ConfusionMatrix,
    pub roc: RocCurve,
}

/// Evaluate hard predictions and positive-class scores against `y_true`
pub fn evaluate(
    y_true: &Array1<f64>,
    y_pred: &Array1<f64>,
    scores: &Array1<f64>,
    positive_class: f64,
) -> Result<Evaluation> {
    let confusion = ConfusionMatrix::compute(y_true, y_pred)?;
    let roc = roc_curve(y_true, scores, positive_class)?;
    let roc_auc = roc_auc_score(y_true, scores, positive_class)?;

    Ok(Evaluation {
        metrics: ClassificationMetrics::from_confusion(&confusion, positive_class, roc_auc),
        report: ClassificationReport::from_confusion(&confusion),
        confusion,
        roc,
    })
}
