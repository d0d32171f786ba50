//! Pipeline configuration

use crate::error::{Result, ScoringError};
use crate::training::ForestConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for one scoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// CSV file to score
    pub data_path: PathBuf,

    /// Rows scanned to infer CSV column types, `None` scans the whole file
    pub infer_schema_length: Option<usize>,

    /// Label column, matched after header normalization
    pub target_column: String,

    /// Fraction of rows held out for evaluation
    pub test_size: f64,

    /// Seed for the split and the forest
    pub random_state: u64,

    /// Forest hyperparameters
    pub forest: ForestConfig,

    /// Rows shown in the post-load preview
    pub preview_rows: usize,

    /// Whether to draw the three charts
    pub render_charts: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("/content/Loan_Default.csv"),
            infer_schema_length: None,
            target_column: "status".to_string(),
            test_size: 0.2,
            random_state: 42,
            forest: ForestConfig::default(),
            preview_rows: 5,
            render_charts: true,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON configuration; missing keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder method to set the input file
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Builder method to bound CSV type inference to the first `rows` rows
    pub fn with_infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = rows;
        self
    }

    /// Builder method to set the label column
    pub fn with_target_column(mut self, column: impl Into<String>) -> Self {
        self.target_column = column.into();
        self
    }

    /// Builder method to set the held-out fraction
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    /// Builder method to set the seed
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    /// Builder method to set forest hyperparameters
    pub fn with_forest(mut self, forest: ForestConfig) -> Self {
        self.forest = forest;
        self
    }

    /// Builder method to set the preview length
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    /// Builder method to toggle chart rendering
    pub fn with_render_charts(mut self, render: bool) -> Self {
        self.render_charts = render;
        self
    }

    /// Reject out-of-range settings
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(ScoringError::ConfigError(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        if self.infer_schema_length == Some(0) {
            return Err(ScoringError::ConfigError(
                "infer_schema_length must be at least 1 when set".to_string(),
            ));
        }
        if self.target_column.trim().is_empty() {
            return Err(ScoringError::ConfigError(
                "target_column must not be empty".to_string(),
            ));
        }
        self.forest.validate()
    }
}
