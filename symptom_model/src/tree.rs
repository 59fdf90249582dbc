//! Single decision tree implementation of the `SymptomClassifier` trait.
//!
//! This file wraps a `linfa_trees::DecisionTree` fitted on the full training
//! set, and holds the shared fitting helper the random forest reuses for each
//! of its members.

use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2};

use crate::errors::Result;
use crate::models::ModelKind;
use crate::SymptomClassifier;

pub(crate) fn fit_tree(
    records: Array2<f64>,
    targets: Array1<usize>,
    max_depth: Option<usize>,
) -> Result<DecisionTree<f64, usize>> {
    let dataset = Dataset::new(records, targets);
    let tree: std::result::Result<DecisionTree<f64, usize>, linfa::error::Error> =
        DecisionTree::params()
            .split_quality(SplitQuality::Gini)
            .max_depth(max_depth)
            .fit(&dataset);
    Ok(tree?)
}

pub struct SingleTree {
    tree: DecisionTree<f64, usize>,
}

impl SingleTree {
    pub fn fit(records: &Array2<f64>, targets: &Array1<usize>, max_depth: Option<usize>) -> Result<Self> {
        let tree = fit_tree(records.clone(), targets.clone(), max_depth)?;
        Ok(Self { tree })
    }
}

impl SymptomClassifier for SingleTree {
    fn kind(&self) -> ModelKind {
        ModelKind::DecisionTree
    }

    fn predict(&self, records: &Array2<f64>) -> Array1<usize> {
        self.tree.predict(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn single_tree_fits_separable_rows() {
        let records = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]];
        let targets = array![0usize, 1, 2, 0];
        let model = SingleTree::fit(&records, &targets, None).unwrap();
        assert_eq!(model.predict(&records).to_vec(), vec![0, 1, 2, 0]);
        assert_eq!(model.kind(), ModelKind::DecisionTree);
    }
}
