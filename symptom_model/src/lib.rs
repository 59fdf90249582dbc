//! Core `symptom_model` crate for training and querying the disease classifier.
//!
//! This crate defines the `SymptomClassifier` trait, which outlines the predict
//! operation every classifier offers over encoded symptom rows, provides the
//! concrete implementations (random forest, single decision tree), and wraps
//! the fitted classifier together with its feature schema and encoders in
//! [`FittedModel`], the handle the backend serves predictions from.

pub mod dataset;
pub mod encoding;
pub mod errors;
pub mod forest;
pub mod models;
pub mod split;
pub mod tree;

pub use dataset::{load_training_set, read_training_set, TrainingSet};
pub use encoding::{ColumnEncoder, LabelEncoder};
pub use errors::{ClassifierError, Result};
pub use forest::RandomForest;
pub use models::{FeatureSchema, ModelKind, ModelParams, SymptomValue};
pub use split::{evaluate, train_test_split};
pub use tree::SingleTree;

use ndarray::{Array1, Array2};

/// A fitted classifier over encoded feature rows.
///
/// Implementations are read concurrently from every request handler once
/// training is done, hence the `Send + Sync` bound.
pub trait SymptomClassifier: Send + Sync {
    fn kind(&self) -> ModelKind;

    /// One class id per row of `records`.
    fn predict(&self, records: &Array2<f64>) -> Array1<usize>;
}

/// The trained model plus the schema and encoders it was trained with.
pub struct FittedModel {
    schema: FeatureSchema,
    encoders: Vec<ColumnEncoder>,
    labels: LabelEncoder,
    classifier: Box<dyn SymptomClassifier>,
    n_training_rows: usize,
}

impl std::fmt::Debug for FittedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FittedModel")
            .field("kind", &self.classifier.kind())
            .field("schema", &self.schema)
            .field("classes", &self.labels.len())
            .field("n_training_rows", &self.n_training_rows)
            .finish()
    }
}

/// Fits the classifier selected by `params` over every row of `set`.
pub fn train(set: &TrainingSet, params: &ModelParams) -> Result<FittedModel> {
    params.validate()?;
    if set.n_rows() == 0 {
        return Err(ClassifierError::EmptyDataset);
    }

    let classifier: Box<dyn SymptomClassifier> = match params.kind {
        ModelKind::RandomForest => Box::new(RandomForest::fit(
            &set.records,
            &set.targets,
            set.labels.len(),
            params,
        )?),
        ModelKind::DecisionTree => Box::new(SingleTree::fit(
            &set.records,
            &set.targets,
            params.max_depth,
        )?),
    };

    Ok(FittedModel {
        schema: set.schema.clone(),
        encoders: set.encoders.clone(),
        labels: set.labels.clone(),
        classifier,
        n_training_rows: set.n_rows(),
    })
}

impl FittedModel {
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn encoders(&self) -> &[ColumnEncoder] {
        &self.encoders
    }

    pub fn classes(&self) -> &[String] {
        self.labels.classes()
    }

    pub fn kind(&self) -> ModelKind {
        self.classifier.kind()
    }

    pub fn n_training_rows(&self) -> usize {
        self.n_training_rows
    }

    /// Validates `symptoms` against the schema and encodes them as one row.
    pub fn encode(&self, symptoms: &[SymptomValue]) -> Result<Array2<f64>> {
        if symptoms.len() != self.schema.arity() {
            return Err(ClassifierError::Arity {
                expected: self.schema.arity(),
                actual: symptoms.len(),
            });
        }
        let mut row = Array2::<f64>::zeros((1, symptoms.len()));
        for (col, ((value, encoder), name)) in symptoms
            .iter()
            .zip(&self.encoders)
            .zip(&self.schema.features)
            .enumerate()
        {
            row[[0, col]] = encoder.encode_value(name, value)?;
        }
        Ok(row)
    }

    pub fn predict_encoded(&self, records: &Array2<f64>) -> Array1<usize> {
        self.classifier.predict(records)
    }

    /// Predicts the disease label for one ordered list of symptom values.
    pub fn predict(&self, symptoms: &[SymptomValue]) -> Result<String> {
        let row = self.encode(symptoms)?;
        let class = self
            .predict_encoded(&row)
            .get(0)
            .copied()
            .ok_or(ClassifierError::EmptyPrediction)?;
        self.labels
            .decode(class)
            .map(str::to_string)
            .ok_or(ClassifierError::EmptyPrediction)
    }
}
