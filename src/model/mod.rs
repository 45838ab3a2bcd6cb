mod forest;
mod linear;
mod tree;

use ndarray::{Array1, ArrayView2};
use serde::{Deserialize, Serialize};

pub use forest::RandomForest;
pub use linear::LinearRegression;
pub use tree::{DecisionTree, Tree};

use crate::error::{MlErr, Result};

/// A fitted regression model.
///
/// Implementors are read-only after construction and shared between every HTTP worker.
pub trait Regressor: Send + Sync {
    /// Returns the number of columns the model was fitted on.
    fn n_features(&self) -> usize;

    /// Predicts one value per row of `x`.
    ///
    /// # Arguments
    /// * `x` - A `(n_samples, n_features)` matrix, columns in schema order.
    ///
    /// # Returns
    /// An array of `n_samples` predictions or an error if `x` has the wrong width.
    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>>;
}

/// Checks `x` against the width a model was fitted on.
pub(crate) fn check_width(x: &ArrayView2<f64>, expected: usize) -> Result<()> {
    if x.ncols() != expected {
        return Err(MlErr::InputWidth {
            got: x.ncols(),
            expected,
        });
    }
    Ok(())
}

/// Rejects NaN and infinite entries, which no fitted model can split or weigh.
pub fn check_finite(x: &ArrayView2<f64>, what: &'static str) -> Result<()> {
    if x.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(MlErr::NonFinite { what })
    }
}

/// The on-disk model artifact, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearRegression),
    Tree(DecisionTree),
    Forest(RandomForest),
}

impl ModelArtifact {
    /// Checks the artifact's structure so that a broken file fails at startup, not per request.
    pub fn validate(&self) -> Result<()> {
        match self {
            ModelArtifact::Linear(_) => Ok(()),
            ModelArtifact::Tree(t) => t.validate(),
            ModelArtifact::Forest(f) => f.validate(),
        }
    }
}

impl Regressor for ModelArtifact {
    fn n_features(&self) -> usize {
        match self {
            ModelArtifact::Linear(m) => m.n_features(),
            ModelArtifact::Tree(m) => m.n_features(),
            ModelArtifact::Forest(m) => m.n_features(),
        }
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        match self {
            ModelArtifact::Linear(m) => m.predict(x),
            ModelArtifact::Tree(m) => m.predict(x),
            ModelArtifact::Forest(m) => m.predict(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn deserializes_every_kind() {
        let linear: ModelArtifact =
            serde_json::from_str(r#"{"kind": "linear", "coefficients": [1.0, 2.0], "intercept": 0.5}"#)
                .unwrap();
        assert!(matches!(linear, ModelArtifact::Linear(_)));
        assert_eq!(linear.n_features(), 2);

        let tree: ModelArtifact = serde_json::from_str(
            r#"{
                "kind": "tree",
                "n_features": 1,
                "tree": {
                    "children_left": [1, -1, -1],
                    "children_right": [2, -1, -1],
                    "feature": [0, -2, -2],
                    "threshold": [0.5, -2.0, -2.0],
                    "value": [0.0, 10.0, 20.0]
                }
            }"#,
        )
        .unwrap();
        assert!(matches!(tree, ModelArtifact::Tree(_)));
        tree.validate().unwrap();

        let forest: ModelArtifact =
            serde_json::from_str(r#"{"kind": "forest", "n_features": 3, "trees": []}"#).unwrap();
        assert!(matches!(forest.validate(), Err(MlErr::EmptyForest)));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let res = serde_json::from_str::<ModelArtifact>(r#"{"kind": "svm", "support": []}"#);
        assert!(res.is_err());
    }

    #[test]
    fn dispatches_predictions() {
        let model = ModelArtifact::Linear(LinearRegression::new(vec![1.0, -1.0], 3.0));
        let y = model.predict(array![[4.0, 1.0], [0.0, 0.0]].view()).unwrap();
        assert_eq!(y, array![6.0, 3.0]);
    }
}
