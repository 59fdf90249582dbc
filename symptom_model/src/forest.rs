//! Random forest implementation of the `SymptomClassifier` trait.
//!
//! This file contains the bagged ensemble used by default: every member is a
//! `linfa_trees::DecisionTree` fitted on a bootstrap resample of the training
//! rows, and predictions are decided by majority vote across members.

use linfa::prelude::*;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::errors::{ClassifierError, Result};
use crate::models::{ModelKind, ModelParams};
use crate::tree::fit_tree;
use crate::SymptomClassifier;

pub struct RandomForest {
    trees: Vec<DecisionTree<f64, usize>>,
    n_classes: usize,
}

impl RandomForest {
    /// Fits `params.n_trees` members. Resampling draws from `StdRng` seeded
    /// with `params.seed`, so identical inputs always yield an identical forest.
    pub fn fit(
        records: &Array2<f64>,
        targets: &Array1<usize>,
        n_classes: usize,
        params: &ModelParams,
    ) -> Result<Self> {
        params.validate()?;
        let ModelParams {
            n_trees,
            max_depth,
            seed,
            ..
        } = *params;
        let n_rows = records.nrows();
        if n_rows == 0 {
            return Err(ClassifierError::EmptyDataset);
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut trees = Vec::with_capacity(n_trees);
        let mut sample = vec![0usize; n_rows];

        for _ in 0..n_trees {
            for slot in sample.iter_mut() {
                *slot = rng.gen_range(0..n_rows);
            }
            let tree = fit_tree(
                records.select(Axis(0), &sample),
                targets.select(Axis(0), &sample),
                max_depth,
            )?;
            trees.push(tree);
        }
        debug!(n_trees, n_rows, n_classes, "fitted random forest");

        Ok(Self { trees, n_classes })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl SymptomClassifier for RandomForest {
    fn kind(&self) -> ModelKind {
        ModelKind::RandomForest
    }

    fn predict(&self, records: &Array2<f64>) -> Array1<usize> {
        let mut votes = Array2::<usize>::zeros((records.nrows(), self.n_classes));
        for tree in &self.trees {
            let predicted: Array1<usize> = tree.predict(records);
            for (row, &class) in predicted.iter().enumerate() {
                if class < self.n_classes {
                    votes[[row, class]] += 1;
                }
            }
        }

        // Strict comparison keeps the lowest class id on ties.
        votes
            .outer_iter()
            .map(|row| {
                let mut best = 0;
                for (class, &count) in row.iter().enumerate() {
                    if count > row[best] {
                        best = class;
                    }
                }
                best
            })
            .collect()
    }
}
