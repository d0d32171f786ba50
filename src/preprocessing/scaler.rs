//! Feature standardization

use crate::error::{Result, ScoringError};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Standard scaling (z-score normalization): (x - mean) / std
///
/// Uses the population standard deviation. Columns with zero variance keep
/// a unit scale, so they come out as all zeros.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Option<Array1<f64>>,
    scale: Option<Array1<f64>>,
}

impl StandardScaler {
    /// Create a new, unfitted scaler
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute per-column mean and scale
    pub fn fit(&mut self, x: &Array2<f64>) -> Result<&mut Self> {
        let mean = x.mean_axis(Axis(0)).ok_or_else(|| {
            ScoringError::ValidationError("cannot fit a scaler on zero rows".to_string())
        })?;
        let std = x.std_axis(Axis(0), 0.0);

        self.scale = Some(std.mapv(|s| if s.abs() < 10.0 * f64::EPSILON { 1.0 } else { s }));
        self.mean = Some(mean);
        Ok(self)
    }

    /// Apply the fitted parameters
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let (mean, scale) = match (&self.mean, &self.scale) {
            (Some(m), Some(s)) => (m, s),
            _ => return Err(ScoringError::ModelNotFitted),
        };

        if x.ncols() != mean.len() {
            return Err(ScoringError::ShapeError {
                expected: format!("{} columns", mean.len()),
                actual: format!("{} columns", x.ncols()),
            });
        }

        let mut scaled = x - mean;
        scaled /= scale;
        Ok(scaled)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Fitted column means
    pub fn mean(&self) -> Option<&Array1<f64>> {
        self.mean.as_ref()
    }

    /// Fitted column scales
    pub fn scale(&self) -> Option<&Array1<f64>> {
        self.scale.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_standard_scaler() {
        let x = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0], [5.0, 50.0]];

        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&x).unwrap();

        for col in scaled.axis_iter(Axis(1)) {
            assert!(col.mean().unwrap().abs() < 1e-10);
            assert!((col.std(0.0) - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_constant_column_becomes_zero() {
        let x = array![[7.0, 1.0], [7.0, 2.0], [7.0, 3.0]];

        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&x).unwrap();

        assert_eq!(scaler.scale().unwrap()[0], 1.0);
        assert!(scaled.column(0).iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_transform_requires_fit() {
        let scaler = StandardScaler::new();
        let err = scaler.transform(&array![[1.0]]).unwrap_err();
        assert!(matches!(err, ScoringError::ModelNotFitted));
    }

    #[test]
    fn test_transform_checks_width() {
        let mut scaler = StandardScaler::new();
        scaler.fit(&array![[1.0, 2.0], [3.0, 4.0]]).unwrap();

        let err = scaler.transform(&array![[1.0]]).unwrap_err();
        assert!(matches!(err, ScoringError::ShapeError { .. }));
    }
}
