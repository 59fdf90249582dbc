//! Generic data models for the `symptom_model` crate.
//!
//! These models define the feature schema shared by the dataset loader and the
//! request validator, the symptom values a caller submits, and the parameters
//! that select and tune a classifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ClassifierError;

pub const DEFAULT_FEATURE_COLUMNS: [&str; 3] = ["symptom1", "symptom2", "symptom3"];
pub const DEFAULT_LABEL_COLUMN: &str = "disease";

/// Ordered feature column names plus the label column.
///
/// The loader selects columns by these names and the request validator checks
/// arity and per-position types against the same list, so a single value of
/// this type fixes the input layout for the lifetime of a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub features: Vec<String>,
    pub label: String,
}

impl FeatureSchema {
    pub fn new<I, S>(features: I, label: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            features: features.into_iter().map(Into::into).collect(),
            label: label.into(),
        }
    }

    pub fn arity(&self) -> usize {
        self.features.len()
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::new(DEFAULT_FEATURE_COLUMNS, DEFAULT_LABEL_COLUMN)
    }
}

/// A single submitted symptom value.
///
/// Numeric columns accept numbers, booleans (as 0/1) and numeric strings;
/// categorical columns accept only strings naming a known category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymptomValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for SymptomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymptomValue::Flag(b) => write!(f, "{}", b),
            SymptomValue::Number(n) => write!(f, "{}", n),
            SymptomValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    RandomForest,
    DecisionTree,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::RandomForest => f.write_str("random_forest"),
            ModelKind::DecisionTree => f.write_str("decision_tree"),
        }
    }
}

impl FromStr for ModelKind {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random_forest" | "forest" => Ok(ModelKind::RandomForest),
            "decision_tree" | "tree" => Ok(ModelKind::DecisionTree),
            other => Err(ClassifierError::InvalidParams(format!(
                "unknown model kind '{}'",
                other
            ))),
        }
    }
}

/// Hyperparameters for [`crate::train`]. Defaults mirror a stock random forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    pub kind: ModelKind,
    pub n_trees: usize,
    pub max_depth: Option<usize>,
    pub seed: u64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            kind: ModelKind::RandomForest,
            n_trees: 100,
            max_depth: None,
            seed: 42,
        }
    }
}

impl ModelParams {
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.kind == ModelKind::RandomForest && self.n_trees == 0 {
            return Err(ClassifierError::InvalidParams(
                "a random forest needs at least one tree".to_string(),
            ));
        }
        if self.max_depth == Some(0) {
            return Err(ClassifierError::InvalidParams(
                "max_depth must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symptom_values_deserialize_untagged() {
        let values: Vec<SymptomValue> =
            serde_json::from_str(r#"[1, 0.5, true, "fever"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                SymptomValue::Number(1.0),
                SymptomValue::Number(0.5),
                SymptomValue::Flag(true),
                SymptomValue::Text("fever".to_string()),
            ]
        );
    }

    #[test]
    fn model_kind_parses_aliases() {
        assert_eq!("forest".parse::<ModelKind>().unwrap(), ModelKind::RandomForest);
        assert_eq!(" Decision_Tree ".parse::<ModelKind>().unwrap(), ModelKind::DecisionTree);
        assert!("svm".parse::<ModelKind>().is_err());
    }

    #[test]
    fn zero_trees_is_rejected() {
        let params = ModelParams {
            n_trees: 0,
            ..ModelParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ClassifierError::InvalidParams(_))
        ));
    }
}
