//! Per-class text report

use super::confusion::ConfusionMatrix;
use super::metrics::{f1, safe_ratio};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Precision, recall, F1 and support for one row of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

/// Per-class breakdown plus accuracy and the macro and weighted averages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub classes: Vec<ReportRow>,
    pub accuracy: f64,
    pub macro_avg: ReportRow,
    pub weighted_avg: ReportRow,
    /// Decimal places used when rendering
    pub digits: usize,
}

impl ClassificationReport {
    /// Build the report over every label in the confusion matrix
    pub fn from_confusion(confusion: &ConfusionMatrix) -> Self {
        let mut ill_precision = false;
        let mut ill_recall = false;

        let classes: Vec<ReportRow> = confusion
            .labels()
            .iter()
            .map(|&label| {
                let tp = confusion.get(label, label);
                let support = confusion.support(label);
                let precision = safe_ratio(tp, confusion.predicted(label)).unwrap_or_else(|| {
                    ill_precision = true;
                    0.0
                });
                let recall = safe_ratio(tp, support).unwrap_or_else(|| {
                    ill_recall = true;
                    0.0
                });
                ReportRow {
                    label: label.to_string(),
                    precision,
                    recall,
                    f1_score: f1(precision, recall),
                    support,
                }
            })
            .collect();

        if ill_precision {
            warn!("Precision is ill-defined and being set to 0.0 in labels with no predicted samples");
        }
        if ill_recall {
            warn!("Recall is ill-defined and being set to 0.0 in labels with no true samples");
        }

        let total = confusion.total();
        let n = classes.len().max(1) as f64;
        let mean = |f: fn(&ReportRow) -> f64| classes.iter().map(f).sum::<f64>() / n;
        let weighted = |f: fn(&ReportRow) -> f64| {
            if total == 0 {
                return 0.0;
            }
            classes
                .iter()
                .map(|r| f(r) * r.support as f64)
                .sum::<f64>()
                / total as f64
        };

        let macro_avg = ReportRow {
            label: "macro avg".to_string(),
            precision: mean(|r| r.precision),
            recall: mean(|r| r.recall),
            f1_score: mean(|r| r.f1_score),
            support: total,
        };
        let weighted_avg = ReportRow {
            label: "weighted avg".to_string(),
            precision: weighted(|r| r.precision),
            recall: weighted(|r| r.recall),
            f1_score: weighted(|r| r.f1_score),
            support: total,
        };

        Self {
            accuracy: safe_ratio(confusion.correct(), total).unwrap_or(0.0),
            classes,
            macro_avg,
            weighted_avg,
            digits: 2,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|r| r.label.len())
            .max()
            .unwrap_or(0)
            .max("weighted avg".len())
            .max(self.digits);
        let d = self.digits;

        let row = |f: &mut fmt::Formatter<'_>, r: &ReportRow| {
            writeln!(
                f,
                "{:>width$}  {:>9.d$} {:>9.d$} {:>9.d$} {:>9}",
                r.label, r.precision, r.recall, r.f1_score, r.support
            )
        };

        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for r in &self.classes {
            row(f, r)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9.d$} {:>9}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        row(f, &self.macro_avg)?;
        row(f, &self.weighted_avg)
    }
}
