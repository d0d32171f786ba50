//! Credit Scoring - Loan default classification pipeline
//!
//! This crate scores a loan table in one pass:
//! - Loads a CSV and drops every row with a missing value
//! - Label-encodes string columns and normalizes headers
//! - Standardizes the features and makes a seeded 80/20 split
//! - Fits a random forest and evaluates it on the held-out rows
//! - Reports metrics, a classification report and three terminal charts
//!
//! # Modules
//!
//! ## Core
//! - [`preprocessing`] - Missing-value removal, label encoding, scaling
//! - [`training`] - Train/test split, decision trees, random forest
//! - [`evaluation`] - Metrics, classification report, confusion matrix, ROC
//!
//! ## Orchestration
//! - [`pipeline`] - The end-to-end scoring run and its configuration
//! - [`report`] - Stage events, chart data and terminal rendering
//! - [`cli`] - Command-line interface
//!
//! ## Utilities
//! - [`utils`] - CSV loading and DataFrame to ndarray conversion
//!
//! The scaler is fitted on the whole feature matrix before the split, so
//! test rows leak into the scaling statistics.

// Core error handling
pub mod error;

// Core ML modules
pub mod preprocessing;
pub mod training;
pub mod evaluation;

// Orchestration
pub mod pipeline;
pub mod report;

// Utilities
pub mod utils;

// Services
pub mod cli;

pub use error::{Result, ScoringError};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{Result, ScoringError};

    // Preprocessing
    pub use crate::preprocessing::{drop_missing, encode_categorical_columns, normalize_headers, StandardScaler};

    // Training
    pub use crate::training::{train_test_split, Classifier, DecisionTree, ForestConfig, MaxFeatures, RandomForest};

    // Evaluation
    pub use crate::evaluation::{evaluate, ClassificationMetrics, ClassificationReport, ConfusionMatrix, Evaluation, RocCurve};

    // Pipeline
    pub use crate::pipeline::{PipelineConfig, PipelineOutcome, ScoringPipeline};

    // Reporting
    pub use crate::report::{FeatureImportanceChart, RecordingSink, ReportSink, StageEvent, TerminalReporter};
}
