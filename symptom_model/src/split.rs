//! Held-out evaluation helpers.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dataset::TrainingSet;
use crate::errors::{ClassifierError, Result};
use crate::FittedModel;

/// Shuffles row indices with a seeded RNG and returns `(train, test)`, where
/// the test partition holds `n * test_ratio` rows rounded, and at least one
/// row whenever the ratio is positive.
pub fn train_test_split(
    set: &TrainingSet,
    test_ratio: f64,
    seed: u64,
) -> Result<(TrainingSet, TrainingSet)> {
    if !(0.0..1.0).contains(&test_ratio) {
        return Err(ClassifierError::InvalidParams(format!(
            "test ratio must be in [0, 1), got {}",
            test_ratio
        )));
    }
    let n = set.n_rows();
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));

    let n_test = if test_ratio > 0.0 {
        ((n as f64) * test_ratio).round().max(1.0) as usize
    } else {
        0
    };
    // Keep at least one training row.
    let (test, train) = indices.split_at(n_test.min(n.saturating_sub(1)));
    Ok((set.subset(train), set.subset(test)))
}

/// Fraction of rows in `set` whose label the model predicts correctly.
/// Returns `None` for an empty set.
pub fn evaluate(model: &FittedModel, set: &TrainingSet) -> Option<f64> {
    if set.n_rows() == 0 {
        return None;
    }
    let predicted = model.predict_encoded(&set.records);
    let correct = predicted
        .iter()
        .zip(set.targets.iter())
        .filter(|(p, t)| p == t)
        .count();
    Some(correct as f64 / set.n_rows() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::read_training_set;
    use crate::models::FeatureSchema;

    fn set() -> TrainingSet {
        let mut csv = String::from("symptom1,symptom2,symptom3,disease\n");
        for i in 0..10 {
            csv.push_str(&format!("{},0,1,D{}\n", i, i % 2));
        }
        read_training_set(csv.as_bytes(), &FeatureSchema::default()).unwrap()
    }

    #[test]
    fn split_sizes_follow_ratio() {
        let (train, test) = train_test_split(&set(), 0.25, 3).unwrap();
        assert_eq!(test.n_rows(), 3);
        assert_eq!(train.n_rows(), 7);
        assert_eq!(train.labels, test.labels);
    }

    #[test]
    fn split_is_deterministic_for_a_seed() {
        let (a, _) = train_test_split(&set(), 0.3, 11).unwrap();
        let (b, _) = train_test_split(&set(), 0.3, 11).unwrap();
        assert_eq!(a.records, b.records);
    }

    #[test]
    fn ratio_out_of_range_is_rejected() {
        assert!(train_test_split(&set(), 1.0, 0).is_err());
        assert!(train_test_split(&set(), -0.1, 0).is_err());
    }
}
