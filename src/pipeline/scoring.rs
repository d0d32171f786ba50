//! The end-to-end scoring run

use super::config::PipelineConfig;
use crate::error::{Result, ScoringError};
use crate::evaluation::{evaluate, Evaluation};
use crate::preprocessing::{
    drop_missing, encode_categorical_columns, normalize_column_name, normalize_headers,
    StandardScaler,
};
use crate::report::{FeatureImportanceChart, ReportSink, StageEvent};
use crate::training::{positive_class_scores, train_test_split, Classifier, RandomForest};
use crate::utils::{column_to_vec, columns_to_array2, DataLoader};
use ndarray::{Array1, Array2};
use polars::prelude::DataFrame;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Label value treated as the positive (default) class
pub const POSITIVE_CLASS: f64 = 1.0;

/// Test-set outputs of the fitted model
#[derive(Debug, Clone)]
pub struct Predictions {
    /// Predicted class per test row
    pub labels: Array1<f64>,
    /// Positive-class probability per test row
    pub scores: Array1<f64>,
    /// Scores are all zero because the model saw a single class
    pub degenerate: bool,
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub rows_loaded: usize,
    pub rows_clean: usize,
    pub feature_names: Vec<String>,
    pub n_train: usize,
    pub n_test: usize,
    pub predictions: Predictions,
    pub evaluation: Evaluation,
    pub feature_importances: Option<Array1<f64>>,
}

/// Feature matrix and labels cut from the cleaned table
#[derive(Debug, Clone)]
pub struct TargetSelection {
    pub feature_names: Vec<String>,
    pub x: Array2<f64>,
    pub y: Array1<f64>,
}

/// Single-pass loan default scoring.
///
/// Each call to [`run`](Self::run) owns its dataset and model from load to
/// report; nothing is kept between runs.
///
/// The scaler is fitted on the full feature matrix before the split, so
/// test rows contribute to the scaling statistics. Reported metrics carry
/// that leakage.
pub struct ScoringPipeline {
    config: PipelineConfig,
    loader: DataLoader,
}

impl ScoringPipeline {
    /// Create a pipeline from a validated configuration
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let loader = DataLoader::new().with_infer_schema_length(config.infer_schema_length);
        Ok(Self { config, loader })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the configured CSV and score it
    pub fn run(&self, sink: &mut dyn ReportSink) -> Result<PipelineOutcome> {
        let start = Instant::now();
        let df = self.loader.load_csv(&self.config.data_path)?;
        info!(
            path = %self.config.data_path.display(),
            rows = df.height(),
            cols = df.width(),
            "loaded dataset"
        );
        self.process(df, start.elapsed(), sink)
    }

    /// Score an in-memory table as if it had just been loaded
    pub fn run_frame(&self, df: DataFrame, sink: &mut dyn ReportSink) -> Result<PipelineOutcome> {
        self.process(df, Duration::ZERO, sink)
    }

    fn process(
        &self,
        df: DataFrame,
        load_elapsed: Duration,
        sink: &mut dyn ReportSink,
    ) -> Result<PipelineOutcome> {
        let rows_loaded = df.height();
        sink.stage(&StageEvent::Loaded {
            rows: rows_loaded,
            columns: column_names(&df),
            preview: df.head(Some(self.config.preview_rows)),
            elapsed: load_elapsed,
        })?;

        // Cleaning
        let mut df = drop_missing(&df)?;
        let rows_clean = df.height();
        info!(rows = rows_clean, dropped = rows_loaded - rows_clean, "dropped incomplete rows");
        sink.stage(&StageEvent::Cleaned {
            rows: rows_clean,
            columns: df.width(),
            dropped: rows_loaded - rows_clean,
        })?;
        if rows_clean == 0 {
            return Err(ScoringError::DataError(
                "no complete rows left after dropping missing values".to_string(),
            ));
        }

        // Encoding and headers
        let encoded = encode_categorical_columns(&mut df)?;
        sink.stage(&StageEvent::Encoded { columns: encoded })?;

        let columns = normalize_headers(&mut df)?;
        sink.stage(&StageEvent::HeadersNormalized { columns })?;

        let selection = select_target(&df, &self.config.target_column)?;

        // Scaling
        let mut scaler = StandardScaler::new();
        let x = scaler.fit_transform(&selection.x)?;
        sink.stage(&StageEvent::Scaled {
            rows: x.nrows(),
            features: x.ncols(),
        })?;

        // Split
        let split = train_test_split(
            &x,
            &selection.y,
            self.config.test_size,
            self.config.random_state,
        )?;
        info!(train = split.n_train(), test = split.n_test(), "split dataset");
        sink.stage(&StageEvent::Split {
            train: split.x_train.dim(),
            test: split.x_test.dim(),
        })?;

        // Training
        let start = Instant::now();
        let mut forest: RandomForest = self.config.forest.build(self.config.random_state);
        forest.fit(&split.x_train, &split.y_train)?;
        let elapsed = start.elapsed();
        let degenerate = forest.classes().len() < 2;
        info!(n_trees = forest.n_trees(), elapsed = ?elapsed, "trained random forest");
        sink.stage(&StageEvent::Trained {
            n_trees: forest.n_trees(),
            degenerate,
            elapsed,
        })?;

        // Evaluation
        let predictions = predict(&forest, &split.x_test)?;
        let evaluation = evaluate(
            &split.y_test,
            &predictions.labels,
            &predictions.scores,
            POSITIVE_CLASS,
        )?;
        info!(
            accuracy = evaluation.metrics.accuracy,
            roc_auc = evaluation.metrics.roc_auc,
            "evaluated on test set"
        );
        sink.stage(&StageEvent::Evaluated {
            metrics: evaluation.metrics.clone(),
            report: evaluation.report.clone(),
        })?;

        // Charts
        let feature_importances = Classifier::feature_importances(&forest);
        if self.config.render_charts {
            sink.confusion_matrix(&evaluation.confusion)?;
            sink.roc_curve(&evaluation.roc, evaluation.metrics.roc_auc)?;

            let chart = FeatureImportanceChart::from_importances(
                &selection.feature_names,
                feature_importances.as_ref(),
            );
            if chart.is_empty() {
                warn!("{}", FeatureImportanceChart::EMPTY_WARNING);
            }
            sink.feature_importance(&chart)?;
        }

        Ok(PipelineOutcome {
            rows_loaded,
            rows_clean,
            feature_names: selection.feature_names,
            n_train: split.n_train(),
            n_test: split.n_test(),
            predictions,
            evaluation,
            feature_importances,
        })
    }
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect()
}

/// Split a normalized table into the target column and every other column.
///
/// Fails with [`ScoringError::SchemaError`] when no column matches `target`.
pub fn select_target(df: &DataFrame, target: &str) -> Result<TargetSelection> {
    let target = normalize_column_name(target);
    let names = column_names(df);

    if !names.iter().any(|n| *n == target) {
        return Err(ScoringError::SchemaError {
            column: target,
            available: names,
        });
    }

    let feature_names: Vec<String> = names.into_iter().filter(|n| *n != target).collect();
    if feature_names.is_empty() {
        return Err(ScoringError::DataError(
            "dataset has no feature columns besides the target".to_string(),
        ));
    }
    debug!(target = %target, features = feature_names.len(), "selected target column");

    Ok(TargetSelection {
        x: columns_to_array2(df, &feature_names)?,
        y: Array1::from_vec(column_to_vec(df, &target)?),
        feature_names,
    })
}

/// Hard labels and positive-class scores for `x`.
///
/// A model that saw a single class yields an all-zero score vector instead
/// of failing.
pub fn predict(model: &dyn Classifier, x: &Array2<f64>) -> Result<Predictions> {
    let labels = model.predict(x)?;

    if model.classes().len() < 2 {
        warn!(
            classes = ?model.classes(),
            "training labels hold a single class; positive-class scores set to zero"
        );
        return Ok(Predictions {
            labels,
            scores: Array1::zeros(x.nrows()),
            degenerate: true,
        });
    }

    let scores = match positive_class_scores(model, x, POSITIVE_CLASS)? {
        Some(scores) => scores,
        None => {
            warn!(
                classes = ?model.classes(),
                "positive class never seen in training; scores set to zero"
            );
            Array1::zeros(x.nrows())
        }
    };

    Ok(Predictions {
        labels,
        scores,
        degenerate: false,
    })
}
