//! Reading the symptom dataset from CSV into an encoded training set.
//!
//! The whole file is read once, the schema's columns are located by header
//! name, each feature column gets an encoder inferred from its cells, and the
//! labels are mapped to class ids. Any problem is reported as an error; nothing
//! is skipped or defaulted.

use ndarray::{Array1, Array2, Axis};
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::encoding::{ColumnEncoder, LabelEncoder};
use crate::errors::{ClassifierError, Result};
use crate::models::FeatureSchema;

/// Encoded feature matrix and targets, plus everything needed to encode new
/// rows the same way.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    pub schema: FeatureSchema,
    pub encoders: Vec<ColumnEncoder>,
    pub labels: LabelEncoder,
    pub records: Array2<f64>,
    pub targets: Array1<usize>,
}

impl TrainingSet {
    pub fn n_rows(&self) -> usize {
        self.records.nrows()
    }

    /// Rows at `indices`, sharing this set's encoders.
    pub fn subset(&self, indices: &[usize]) -> TrainingSet {
        TrainingSet {
            schema: self.schema.clone(),
            encoders: self.encoders.clone(),
            labels: self.labels.clone(),
            records: self.records.select(Axis(0), indices),
            targets: self.targets.select(Axis(0), indices),
        }
    }
}

pub fn load_training_set(path: impl AsRef<Path>, schema: &FeatureSchema) -> Result<TrainingSet> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    debug!(path = %path.display(), "reading dataset");
    read_training_set(file, schema)
}

pub fn read_training_set<R: Read>(reader: R, schema: &FeatureSchema) -> Result<TrainingSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ClassifierError::MissingColumn(name.to_string()))
    };
    let feature_idx = schema
        .features
        .iter()
        .map(|f| position(f.as_str()))
        .collect::<Result<Vec<_>>>()?;
    let label_idx = position(schema.label.as_str())?;

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); feature_idx.len()];
    let mut raw_labels: Vec<String> = Vec::new();
    let mut lines: Vec<u64> = Vec::new();

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let cell = |idx: usize, name: &str| -> Result<String> {
            match record.get(idx) {
                Some(v) if !v.is_empty() => Ok(v.to_string()),
                _ => Err(ClassifierError::MalformedRow {
                    line,
                    reason: format!("empty value in column '{}'", name),
                }),
            }
        };
        for (col, (&idx, name)) in feature_idx.iter().zip(&schema.features).enumerate() {
            columns[col].push(cell(idx, name.as_str())?);
        }
        raw_labels.push(cell(label_idx, schema.label.as_str())?);
        lines.push(line);
    }

    if raw_labels.is_empty() {
        return Err(ClassifierError::EmptyDataset);
    }

    let encoders: Vec<ColumnEncoder> = columns
        .iter()
        .map(|cells| ColumnEncoder::infer(cells.iter().map(String::as_str)))
        .collect();
    let labels = LabelEncoder::fit(raw_labels.iter().map(String::as_str));

    let n_rows = raw_labels.len();
    let mut records = Array2::<f64>::zeros((n_rows, encoders.len()));
    for (col, (encoder, cells)) in encoders.iter().zip(&columns).enumerate() {
        for (row, cell) in cells.iter().enumerate() {
            records[[row, col]] = encoder.encode_cell(cell).ok_or_else(|| {
                ClassifierError::MalformedRow {
                    line: lines[row],
                    reason: format!(
                        "non-finite value '{}' in column '{}'",
                        cell, schema.features[col]
                    ),
                }
            })?;
        }
    }
    let targets = raw_labels
        .iter()
        .zip(&lines)
        .map(|(l, &line)| {
            labels.encode(l).ok_or_else(|| ClassifierError::MalformedRow {
                line,
                reason: format!("cannot encode label '{}'", l),
            })
        })
        .collect::<Result<Array1<usize>>>()?;

    Ok(TrainingSet {
        schema: schema.clone(),
        encoders,
        labels,
        records,
        targets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(csv: &str) -> Result<TrainingSet> {
        read_training_set(csv.as_bytes(), &FeatureSchema::default())
    }

    #[test]
    fn selects_schema_columns_in_order() {
        let set = read(
            "id,symptom3,disease,symptom1,symptom2\n\
             1,0,Flu,1,1\n\
             2,1,Cold,0,1\n",
        )
        .unwrap();
        assert_eq!(set.n_rows(), 2);
        assert_eq!(set.records.row(0).to_vec(), vec![1.0, 1.0, 0.0]);
        assert_eq!(set.records.row(1).to_vec(), vec![0.0, 1.0, 1.0]);
        assert_eq!(set.labels.classes(), &["Cold", "Flu"]);
        assert_eq!(set.targets.to_vec(), vec![1, 0]);
    }

    #[test]
    fn categorical_columns_use_ordinal_codes() {
        let set = read(
            "symptom1,symptom2,symptom3,disease\n\
             fever, cough ,fatigue,Flu\n\
             sneezing,cough,headache,Cold\n",
        )
        .unwrap();
        assert!(matches!(set.encoders[0], ColumnEncoder::Categorical { .. }));
        // fever < sneezing
        assert_eq!(set.records[[0, 0]], 0.0);
        assert_eq!(set.records[[1, 0]], 1.0);
        assert_eq!(set.records[[0, 1]], set.records[[1, 1]]);
    }

    #[test]
    fn missing_label_column_is_fatal() {
        let err = read("symptom1,symptom2,symptom3\n1,0,0\n").unwrap_err();
        assert!(matches!(err, ClassifierError::MissingColumn(ref c) if c == "disease"));
    }

    #[test]
    fn empty_cell_reports_line() {
        let err = read(
            "symptom1,symptom2,symptom3,disease\n\
             1,0,0,Flu\n\
             1,,0,Flu\n",
        )
        .unwrap_err();
        assert!(matches!(err, ClassifierError::MalformedRow { line: 3, .. }));
    }

    #[test]
    fn non_finite_cells_fail_to_load() {
        for bad in ["NaN", "inf", "-infinity", "1e400"] {
            let csv = format!(
                "symptom1,symptom2,symptom3,disease\n\
                 1,0,0,Flu\n\
                 {},1,0,Cold\n",
                bad
            );
            let err = read(&csv).unwrap_err();
            assert!(
                matches!(err, ClassifierError::MalformedRow { line: 3, ref reason } if reason.contains("symptom1")),
                "{} loaded as {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn encoding_errors_keep_the_reader_line() {
        let err = read(
            "symptom1,symptom2,symptom3,disease\n\
             \n\
             1,0,0,Flu\n\
             \n\
             0,NaN,1,Cold\n",
        )
        .unwrap_err();
        assert!(matches!(err, ClassifierError::MalformedRow { line: 5, .. }));
    }

    #[test]
    fn ragged_row_is_a_csv_error() {
        let err = read("symptom1,symptom2,symptom3,disease\n1,0,0\n").unwrap_err();
        assert!(matches!(err, ClassifierError::Csv(_)));
    }

    #[test]
    fn header_only_file_is_empty() {
        let err = read("symptom1,symptom2,symptom3,disease\n").unwrap_err();
        assert!(matches!(err, ClassifierError::EmptyDataset));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_training_set("/nonexistent/dataset.csv", &FeatureSchema::default())
            .unwrap_err();
        assert!(matches!(err, ClassifierError::Io(_)));
    }
}
