//! Run reporting
//!
//! The pipeline narrates itself through a [`ReportSink`]: one
//! [`StageEvent`] per completed stage, then the chart data for the
//! confusion matrix, the ROC curve and the feature importances.
//! [`TerminalReporter`] draws all of it on a terminal; [`RecordingSink`]
//! keeps it in memory.

mod terminal;

pub use terminal::{
    render_confusion_matrix, render_feature_importance, render_roc_curve, TerminalReporter,
};

use crate::error::Result;
use crate::evaluation::{ClassificationMetrics, ClassificationReport, ConfusionMatrix, RocCurve};
use crate::preprocessing::EncodedColumn;
use ndarray::Array1;
use polars::prelude::DataFrame;
use std::time::Duration;

/// Progress notifications, in pipeline order
#[derive(Debug, Clone)]
pub enum StageEvent {
    /// Raw table read from disk
    Loaded {
        rows: usize,
        columns: Vec<String>,
        preview: DataFrame,
        elapsed: Duration,
    },
    /// Rows with any missing value removed
    Cleaned {
        rows: usize,
        columns: usize,
        dropped: usize,
    },
    /// String columns replaced by integer codes
    Encoded { columns: Vec<EncodedColumn> },
    /// Column names after trimming, lowercasing and underscoring
    HeadersNormalized { columns: Vec<String> },
    /// Feature matrix standardized
    Scaled { rows: usize, features: usize },
    /// Shuffled train/test partition
    Split {
        train: (usize, usize),
        test: (usize, usize),
    },
    /// Forest fitted; `degenerate` when the training labels held one class
    Trained {
        n_trees: usize,
        degenerate: bool,
        elapsed: Duration,
    },
    /// Test-set metrics and per-class report
    Evaluated {
        metrics: ClassificationMetrics,
        report: ClassificationReport,
    },
}

/// Bars for the importance chart, or the reason there are none
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureImportanceChart {
    /// (feature, importance) sorted by descending importance
    Ranked(Vec<(String, f64)>),
    /// Nothing to draw
    Empty { warning: String },
}

impl FeatureImportanceChart {
    pub const EMPTY_WARNING: &'static str = "No feature importance assigned by the model.";

    /// Pair importances with feature names; all-zero or missing
    /// importances give an empty chart.
    pub fn from_importances(names: &[String], importances: Option<&Array1<f64>>) -> Self {
        let Some(importances) = importances else {
            return Self::empty();
        };
        if importances.iter().all(|&v| v == 0.0) {
            return Self::empty();
        }

        let mut ranked: Vec<(String, f64)> = names
            .iter()
            .cloned()
            .zip(importances.iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        Self::Ranked(ranked)
    }

    fn empty() -> Self {
        Self::Empty {
            warning: Self::EMPTY_WARNING.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

/// Receiver for everything a run reports
pub trait ReportSink {
    /// A stage finished
    fn stage(&mut self, event: &StageEvent) -> Result<()>;

    /// Confusion matrix heatmap
    fn confusion_matrix(&mut self, matrix: &ConfusionMatrix) -> Result<()>;

    /// ROC curve against the chance diagonal
    fn roc_curve(&mut self, curve: &RocCurve, auc: f64) -> Result<()>;

    /// Feature importance bar chart
    fn feature_importance(&mut self, chart: &FeatureImportanceChart) -> Result<()>;
}

/// Sink that keeps every report in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<StageEvent>,
    pub confusion: Option<ConfusionMatrix>,
    pub roc: Option<(RocCurve, f64)>,
    pub importance: Option<FeatureImportanceChart>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any recorded event satisfies `pred`
    pub fn saw(&self, pred: impl Fn(&StageEvent) -> bool) -> bool {
        self.events.iter().any(pred)
    }

    /// Whether any chart was received
    pub fn has_charts(&self) -> bool {
        self.confusion.is_some() || self.roc.is_some() || self.importance.is_some()
    }
}

impl ReportSink for RecordingSink {
    fn stage(&mut self, event: &StageEvent) -> Result<()> {
        self.events.push(event.clone());
        Ok(())
    }

    fn confusion_matrix(&mut self, matrix: &ConfusionMatrix) -> Result<()> {
        self.confusion = Some(matrix.clone());
        Ok(())
    }

    fn roc_curve(&mut self, curve: &RocCurve, auc: f64) -> Result<()> {
        self.roc = Some((curve.clone(), auc));
        Ok(())
    }

    fn feature_importance(&mut self, chart: &FeatureImportanceChart) -> Result<()> {
        self.importance = Some(chart.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn names() -> Vec<String> {
        vec!["age".to_string(), "income".to_string(), "term".to_string()]
    }

    #[test]
    fn test_importances_ranked_descending() {
        let chart = FeatureImportanceChart::from_importances(&names(), Some(&array![0.2, 0.5, 0.3]));
        assert_eq!(
            chart,
            FeatureImportanceChart::Ranked(vec![
                ("income".to_string(), 0.5),
                ("term".to_string(), 0.3),
                ("age".to_string(), 0.2),
            ])
        );
    }

    #[test]
    fn test_zero_importances_give_empty_chart() {
        let chart = FeatureImportanceChart::from_importances(&names(), Some(&array![0.0, 0.0, 0.0]));
        assert!(chart.is_empty());
        assert_eq!(
            chart,
            FeatureImportanceChart::Empty {
                warning: "No feature importance assigned by the model.".to_string()
            }
        );
        assert!(FeatureImportanceChart::from_importances(&names(), None).is_empty());
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::new();
        sink.stage(&StageEvent::Scaled { rows: 3, features: 2 }).unwrap();

        assert!(sink.saw(|e| matches!(e, StageEvent::Scaled { features: 2, .. })));
        assert!(!sink.saw(|e| matches!(e, StageEvent::Split { .. })));
        assert!(!sink.has_charts());
    }
}
