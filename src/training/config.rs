//! Forest training configuration

use super::decision_tree::Criterion;
use super::random_forest::{MaxFeatures, RandomForest};
use crate::error::{Result, ScoringError};
use serde::{Deserialize, Serialize};

/// Hyperparameters of the random forest classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Number of trees
    pub n_estimators: usize,

    /// Maximum tree depth; unlimited when `None`
    pub max_depth: Option<usize>,

    /// Minimum samples required to split a node
    pub min_samples_split: usize,

    /// Minimum samples required in a leaf
    pub min_samples_leaf: usize,

    /// Candidate features drawn per split
    pub max_features: MaxFeatures,

    /// Whether each tree trains on a bootstrap sample
    pub bootstrap: bool,

    /// Impurity criterion
    pub criterion: Criterion,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::Sqrt,
            bootstrap: true,
            criterion: Criterion::Gini,
        }
    }
}

impl ForestConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the number of trees
    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    /// Builder method to cap tree depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Builder method to set the feature draw per split
    pub fn with_max_features(mut self, max_features: MaxFeatures) -> Self {
        self.max_features = max_features;
        self
    }

    /// Reject settings no forest can train with
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(ScoringError::ConfigError(
                "n_estimators must be at least 1".to_string(),
            ));
        }
        if self.min_samples_split < 2 {
            return Err(ScoringError::ConfigError(
                "min_samples_split must be at least 2".to_string(),
            ));
        }
        if self.min_samples_leaf < 1 {
            return Err(ScoringError::ConfigError(
                "min_samples_leaf must be at least 1".to_string(),
            ));
        }
        if let MaxFeatures::Fraction(f) = self.max_features {
            if !(f > 0.0 && f <= 1.0) {
                return Err(ScoringError::ConfigError(format!(
                    "max_features fraction must be in (0, 1], got {}",
                    f
                )));
            }
        }
        Ok(())
    }

    /// Build an unfitted forest seeded with `random_state`
    pub fn build(&self, random_state: u64) -> RandomForest {
        let mut forest = RandomForest::new(self.n_estimators)
            .with_min_samples_split(self.min_samples_split)
            .with_min_samples_leaf(self.min_samples_leaf)
            .with_max_features(self.max_features)
            .with_bootstrap(self.bootstrap)
            .with_criterion(self.criterion)
            .with_random_state(random_state);
        if let Some(depth) = self.max_depth {
            forest = forest.with_max_depth(depth);
        }
        forest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ForestConfig::default();
        assert_eq!(config.n_estimators, 100);
        assert_eq!(config.max_features, MaxFeatures::Sqrt);
        assert!(config.bootstrap);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ForestConfig::new()
            .with_n_estimators(10)
            .with_max_depth(4)
            .with_max_features(MaxFeatures::All);

        let forest = config.build(7);
        assert_eq!(forest.n_estimators, 10);
        assert_eq!(forest.max_depth, Some(4));
        assert_eq!(forest.random_state, Some(7));
    }

    #[test]
    fn test_invalid_settings() {
        assert!(ForestConfig::new().with_n_estimators(0).validate().is_err());
        assert!(ForestConfig::new()
            .with_max_features(MaxFeatures::Fraction(1.5))
            .validate()
            .is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ForestConfig = serde_json::from_str(r#"{"n_estimators": 25}"#).unwrap();
        assert_eq!(config.n_estimators, 25);
        assert_eq!(config.min_samples_split, 2);
    }
}
