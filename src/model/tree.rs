use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::{check_width, Regressor};
use crate::error::{MlErr, Result};

/// Child index marking a leaf.
const LEAF: i64 = -1;

/// A fitted CART regression tree in flat layout: node `i` is described by the `i`-th entry of
/// every array, and node `0` is the root.
///
/// A sample at an internal node goes left when `x[feature[i]] <= threshold[i]`. Leaves have
/// both children set to `-1` and predict `value[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<f64>,
}

impl Tree {
    pub fn new(
        children_left: Vec<i64>,
        children_right: Vec<i64>,
        feature: Vec<i64>,
        threshold: Vec<f64>,
        value: Vec<f64>,
    ) -> Self {
        Self {
            children_left,
            children_right,
            feature,
            threshold,
            value,
        }
    }

    /// Returns a tree made of a single leaf.
    pub fn leaf(value: f64) -> Self {
        Self::new(vec![LEAF], vec![LEAF], vec![-2], vec![-2.0], vec![value])
    }

    fn len(&self) -> usize {
        self.children_left.len()
    }

    /// Checks that the node arrays describe a well-formed tree over `n_features` columns.
    ///
    /// Children must come after their parent, which also rules out cycles.
    ///
    /// # Arguments
    /// * `id` - Position of this tree inside its model, used in error messages.
    /// * `n_features` - Width of the input this tree will see.
    pub fn validate(&self, id: usize, n_features: usize) -> Result<()> {
        let invalid = |reason: String| MlErr::InvalidTree { tree: id, reason };

        let len = self.len();
        if len == 0 {
            return Err(invalid("no nodes".into()));
        }

        let lens = [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ];
        if lens.iter().any(|&l| l != len) {
            return Err(invalid(format!(
                "node arrays differ in length ({len} left children, others {lens:?})"
            )));
        }

        for i in 0..len {
            let (left, right) = (self.children_left[i], self.children_right[i]);
            if left == LEAF && right == LEAF {
                continue;
            }
            if left == LEAF || right == LEAF {
                return Err(invalid(format!("node {i} has a single child")));
            }

            for child in [left, right] {
                if child <= i as i64 || child >= len as i64 {
                    return Err(invalid(format!(
                        "node {i} points to child {child} outside {}..{len}",
                        i + 1
                    )));
                }
            }

            let feature = self.feature[i];
            if feature < 0 || feature >= n_features as i64 {
                return Err(invalid(format!(
                    "node {i} splits on feature {feature}, expected 0..{n_features}"
                )));
            }
        }

        Ok(())
    }

    /// Walks the tree from the root down to a leaf for a single sample.
    pub fn predict_row(&self, row: ArrayView1<f64>) -> Result<f64> {
        let broken = |node: usize| MlErr::Traversal { node };

        let mut node = 0;
        // Children always come after their parent, so a valid walk takes at most len steps.
        for _ in 0..self.len() {
            let (Some(&left), Some(&right)) =
                (self.children_left.get(node), self.children_right.get(node))
            else {
                return Err(broken(node));
            };

            if left == LEAF {
                return self.value.get(node).copied().ok_or_else(|| broken(node));
            }

            let x = self
                .feature
                .get(node)
                .and_then(|&f| usize::try_from(f).ok())
                .and_then(|f| row.get(f))
                .ok_or_else(|| broken(node))?;
            let threshold = self.threshold.get(node).ok_or_else(|| broken(node))?;

            let next = if x <= threshold { left } else { right };
            node = usize::try_from(next).map_err(|_| broken(node))?;
        }

        Err(broken(node))
    }
}

/// A single regression tree over `n_features` columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    n_features: usize,
    tree: Tree,
}

impl DecisionTree {
    pub fn new(n_features: usize, tree: Tree) -> Self {
        Self { n_features, tree }
    }

    pub fn validate(&self) -> Result<()> {
        self.tree.validate(0, self.n_features)
    }
}

impl Regressor for DecisionTree {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        check_width(&x, self.n_features)?;
        x.outer_iter()
            .map(|row| self.tree.predict_row(row))
            .collect::<Result<Vec<_>>>()
            .map(Array1::from_vec)
    }
}
