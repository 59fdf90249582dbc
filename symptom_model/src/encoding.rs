//! Conversion between raw dataset cells / request values and the `f64` matrix
//! the trees are fitted on.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::errors::ClassifierError;
use crate::models::SymptomValue;

/// How a single feature column is turned into a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnEncoder {
    Numeric,
    /// Sorted distinct values; a value's index is its ordinal code.
    Categorical { categories: Vec<String> },
}

impl ColumnEncoder {
    /// Infers the encoder from every cell of a column. A column is numeric only
    /// if all of its cells parse as `f64`. Non-finite cells such as `NaN` still
    /// make the column numeric; [`encode_cell`](Self::encode_cell) rejects them.
    pub fn infer<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        if cells.clone().into_iter().all(|c| c.parse::<f64>().is_ok()) {
            return ColumnEncoder::Numeric;
        }
        let categories: BTreeSet<&str> = cells.into_iter().collect();
        ColumnEncoder::Categorical {
            categories: categories.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ColumnEncoder::Numeric => "numeric",
            ColumnEncoder::Categorical { .. } => "categorical",
        }
    }

    /// Encodes a dataset cell. `None` for a non-finite number or a category
    /// the encoder was not inferred from.
    pub fn encode_cell(&self, cell: &str) -> Option<f64> {
        match self {
            ColumnEncoder::Numeric => cell.parse::<f64>().ok().filter(|n| n.is_finite()),
            ColumnEncoder::Categorical { categories } => categories
                .binary_search_by(|c| c.as_str().cmp(cell))
                .ok()
                .map(|i| i as f64),
        }
    }

    pub fn encode_value(&self, column: &str, value: &SymptomValue) -> Result<f64, ClassifierError> {
        let mismatch = || ClassifierError::TypeMismatch {
            column: column.to_string(),
            expected: self.kind_name(),
        };
        match (self, value) {
            (ColumnEncoder::Numeric, SymptomValue::Number(n)) if n.is_finite() => Ok(*n),
            (ColumnEncoder::Numeric, SymptomValue::Flag(b)) => Ok(if *b { 1.0 } else { 0.0 }),
            (ColumnEncoder::Numeric, SymptomValue::Text(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(mismatch),
            (ColumnEncoder::Numeric, SymptomValue::Number(_)) => Err(mismatch()),
            (ColumnEncoder::Categorical { .. }, SymptomValue::Text(s)) => {
                self.encode_cell(s.trim()).ok_or_else(|| ClassifierError::UnknownCategory {
                    column: column.to_string(),
                    value: s.clone(),
                })
            }
            (ColumnEncoder::Categorical { .. }, _) => Err(mismatch()),
        }
    }
}

/// Maps disease labels to contiguous class ids, sorted like the labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: BTreeSet<&str> = labels.into_iter().collect();
        Self {
            classes: classes.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn encode(&self, label: &str) -> Option<usize> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .ok()
    }

    pub fn decode(&self, class: usize) -> Option<&str> {
        self.classes.get(class).map(String::as_str)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_numeric_only_when_every_cell_parses() {
        assert_eq!(ColumnEncoder::infer(["0", "1", "0.5"]), ColumnEncoder::Numeric);
        assert_eq!(
            ColumnEncoder::infer(["fever", "1", "cough", "fever"]),
            ColumnEncoder::Categorical {
                categories: vec!["1".into(), "cough".into(), "fever".into()]
            }
        );
    }

    #[test]
    fn non_finite_cells_stay_numeric_but_do_not_encode() {
        let enc = ColumnEncoder::infer(["1", "NaN", "inf", "1e400"]);
        assert_eq!(enc, ColumnEncoder::Numeric);
        assert_eq!(enc.encode_cell("1"), Some(1.0));
        assert_eq!(enc.encode_cell("NaN"), None);
        assert_eq!(enc.encode_cell("-infinity"), None);
        assert_eq!(enc.encode_cell("1e400"), None);
    }

    #[test]
    fn categorical_rejects_unknown_and_non_text_values() {
        let enc = ColumnEncoder::infer(["cough", "fever"]);
        assert_eq!(
            enc.encode_value("symptom1", &SymptomValue::Text("fever".into())).unwrap(),
            1.0
        );
        assert!(matches!(
            enc.encode_value("symptom1", &SymptomValue::Text("rash".into())),
            Err(ClassifierError::UnknownCategory { .. })
        ));
        assert!(matches!(
            enc.encode_value("symptom1", &SymptomValue::Number(1.0)),
            Err(ClassifierError::TypeMismatch { expected: "categorical", .. })
        ));
    }

    #[test]
    fn numeric_accepts_flags_and_numeric_strings() {
        let enc = ColumnEncoder::Numeric;
        assert_eq!(enc.encode_value("s", &SymptomValue::Flag(true)).unwrap(), 1.0);
        assert_eq!(enc.encode_value("s", &SymptomValue::Text(" 2.5 ".into())).unwrap(), 2.5);
        assert!(enc.encode_value("s", &SymptomValue::Text("high".into())).is_err());
    }

    #[test]
    fn label_encoder_round_trips_sorted_classes() {
        let labels = LabelEncoder::fit(["Flu", "Cold", "Flu", "Allergy"]);
        assert_eq!(labels.classes(), &["Allergy", "Cold", "Flu"]);
        assert_eq!(labels.encode("Flu"), Some(2));
        assert_eq!(labels.decode(0), Some("Allergy"));
        assert_eq!(labels.decode(3), None);
    }
}
