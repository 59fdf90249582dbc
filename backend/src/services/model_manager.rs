//! Builds and owns the fitted disease classifier.
//!
//! This module loads the dataset named in the configuration, optionally scores
//! a throwaway model on a held-out split, fits the served model on every row,
//! and hands back the shared read-only handle the request handlers use.

use std::sync::Arc;
use std::time::Instant;

use symptom_model::{
    evaluate, load_training_set, train, train_test_split, ClassifierError, FittedModel,
    TrainingSet,
};
use tracing::{info, warn};

use crate::config::Config;

pub struct ModelManager;

impl ModelManager {
    /// Runs synchronously; any error is fatal to startup.
    pub fn initialize(config: &Config) -> Result<Arc<FittedModel>, ClassifierError> {
        let started = Instant::now();
        let set = load_training_set(&config.dataset_path, &config.schema)?;
        info!(
            path = %config.dataset_path.display(),
            rows = set.n_rows(),
            classes = set.labels.len(),
            features = ?feature_kinds(&set),
            "loaded dataset"
        );

        if config.holdout_ratio > 0.0 {
            Self::report_holdout(&set, config)?;
        }

        let model = train(&set, &config.model)?;
        info!(
            kind = %model.kind(),
            rows = model.n_training_rows(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "model fitted on full dataset"
        );
        Ok(Arc::new(model))
    }

    fn report_holdout(set: &TrainingSet, config: &Config) -> Result<(), ClassifierError> {
        let (train_set, test_set) = train_test_split(set, config.holdout_ratio, config.model.seed)?;
        if train_set.n_rows() == 0 || test_set.n_rows() == 0 {
            warn!(rows = set.n_rows(), "dataset too small for held-out evaluation");
            return Ok(());
        }
        let model = train(&train_set, &config.model)?;
        if let Some(accuracy) = evaluate(&model, &test_set) {
            info!(
                train_rows = train_set.n_rows(),
                test_rows = test_set.n_rows(),
                accuracy,
                "held-out evaluation"
            );
        }
        Ok(())
    }
}

fn feature_kinds(set: &TrainingSet) -> Vec<String> {
    set.schema
        .features
        .iter()
        .zip(&set.encoders)
        .map(|(name, enc)| format!("{}:{}", name, enc.kind_name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn dataset() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut csv = String::from("symptom1,symptom2,symptom3,disease\n");
        for _ in 0..5 {
            csv.push_str("1,0,0,Flu\n0,1,0,Cold\n");
        }
        file.write_all(csv.as_bytes()).unwrap();
        file
    }

    #[test]
    fn initializes_with_holdout_enabled() {
        let file = dataset();
        let config = Config {
            dataset_path: file.path().to_path_buf(),
            ..Config::default()
        };
        let model = ModelManager::initialize(&config).unwrap();
        assert_eq!(model.n_training_rows(), 10);
        assert_eq!(model.classes(), &["Cold", "Flu"]);
    }

    #[test]
    fn missing_dataset_is_fatal() {
        let config = Config {
            dataset_path: "/nonexistent/disease_symptom_dataset.csv".into(),
            ..Config::default()
        };
        assert!(matches!(
            ModelManager::initialize(&config),
            Err(ClassifierError::Io(_))
        ));
    }
}
