use ndarray::{Array1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::{check_width, Regressor, Tree};
use crate::error::{MlErr, Result};

/// Random forest regression: the prediction is the mean of every tree's prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    trees: Vec<Tree>,
}

impl RandomForest {
    /// Creates a new `RandomForest`.
    ///
    /// # Arguments
    /// * `n_features` - Width of the input the trees were fitted on.
    /// * `trees` - The estimators of the ensemble.
    ///
    /// # Returns
    /// A new `RandomForest` instance.
    pub fn new(n_features: usize, trees: Vec<Tree>) -> Self {
        Self { n_features, trees }
    }

    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(MlErr::EmptyForest);
        }
        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(i, tree)| tree.validate(i, self.n_features))
    }
}

impl Regressor for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        check_width(&x, self.n_features)?;
        if self.trees.is_empty() {
            return Err(MlErr::EmptyForest);
        }

        let n = self.trees.len() as f64;
        let mut y = Vec::with_capacity(x.nrows());
        for row in x.outer_iter() {
            let mut sum = 0.0;
            for tree in &self.trees {
                sum += tree.predict_row(row)?;
            }
            y.push(sum / n);
        }

        Ok(Array1::from_vec(y))
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn split_on(feature: i64, threshold: f64, low: f64, high: f64) -> Tree {
        Tree::new(
            vec![1, -1, -1],
            vec![2, -1, -1],
            vec![feature, -2, -2],
            vec![threshold, -2.0, -2.0],
            vec![0.0, low, high],
        )
    }

    #[test]
    fn averages_the_trees() {
        let forest = RandomForest::new(
            2,
            vec![split_on(0, 10.0, 100.0, 50.0), split_on(1, 0.0, 20.0, 40.0)],
        );
        forest.validate().unwrap();

        let y = forest.predict(array![[10.5, 20.0], [1.0, -1.0]].view()).unwrap();
        assert_eq!(y, array![45.0, 60.0]);
    }

    #[test]
    fn is_deterministic() {
        let forest = RandomForest::new(1, vec![split_on(0, 0.5, 1.0, 2.0), Tree::leaf(4.0)]);
        let x = array![[0.7]];
        let first = forest.predict(x.view()).unwrap();
        let second = forest.predict(x.view()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn reports_which_tree_is_broken() {
        let forest = RandomForest::new(1, vec![Tree::leaf(1.0), split_on(3, 0.0, 0.0, 0.0)]);
        let err = forest.validate().unwrap_err();
        assert!(matches!(err, MlErr::InvalidTree { tree: 1, .. }));
    }

    #[test]
    fn empty_forest_cannot_predict() {
        let forest = RandomForest::new(1, Vec::new());
        assert!(matches!(
            forest.predict(array![[1.0]].view()),
            Err(MlErr::EmptyForest)
        ));
    }
}
