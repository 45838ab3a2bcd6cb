use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::{check_width, Regressor};
use crate::error::Result;

/// Ordinary linear regression: `y = x · coefficients + intercept`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Creates a new `LinearRegression`.
    ///
    /// # Arguments
    /// * `coefficients` - One weight per feature, in schema order.
    /// * `intercept` - The bias term.
    ///
    /// # Returns
    /// A new `LinearRegression` instance.
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }
}

impl Regressor for LinearRegression {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        check_width(&x, self.n_features())?;
        let w = ArrayView1::from(self.coefficients.as_slice());
        Ok(x.dot(&w) + self.intercept)
    }
}
