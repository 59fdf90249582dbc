//! Custom error types specific to the `symptom_model` crate.
//!
//! This module defines errors that can occur while reading the dataset, fitting a
//! classifier, or encoding a prediction request, providing a unified error
//! handling mechanism for everything the model layer does.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(String),

    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("dataset contains no rows")]
    EmptyDataset,

    #[error("training failed: {0}")]
    Training(#[from] linfa::error::Error),

    #[error("invalid model parameters: {0}")]
    InvalidParams(String),

    #[error("expected {expected} symptom values, got {actual}")]
    Arity { expected: usize, actual: usize },

    #[error("symptom '{column}' expects a {expected} value")]
    TypeMismatch {
        column: String,
        expected: &'static str,
    },

    #[error("unknown value '{value}' for symptom '{column}'")]
    UnknownCategory { column: String, value: String },

    #[error("classifier produced no prediction")]
    EmptyPrediction,
}

impl ClassifierError {
    /// Short machine-readable tag, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifierError::Io(_) => "io",
            ClassifierError::Csv(_) => "csv",
            ClassifierError::MissingColumn(_) => "missing_column",
            ClassifierError::MalformedRow { .. } => "malformed_row",
            ClassifierError::EmptyDataset => "empty_dataset",
            ClassifierError::Training(_) => "training",
            ClassifierError::InvalidParams(_) => "invalid_params",
            ClassifierError::Arity { .. } => "arity",
            ClassifierError::TypeMismatch { .. } => "type_mismatch",
            ClassifierError::UnknownCategory { .. } => "unknown_category",
            ClassifierError::EmptyPrediction => "empty_prediction",
        }
    }
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
