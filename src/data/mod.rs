// Data layer: the bundled dataset and CSV parsing for user-supplied ones.

pub mod iris;

use crate::domain::model::Dataset;
use crate::utils::error::{LearnError, Result};

/// Datasets compiled into the binary, addressable by name from config.
pub const BUNDLED_DATASETS: [&str; 1] = ["iris"];

/// Parses a labeled CSV: numeric feature columns and a trailing string label
/// column, with a header row naming them.
///
/// Label names are interned in first-seen order, which fixes the class index
/// each one gets.
pub fn parse_labeled_csv(name: &str, bytes: &[u8]) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.len() < 2 {
        return Err(LearnError::DataError {
            message: format!(
                "Dataset '{}' needs at least one feature column and a label column",
                name
            ),
        });
    }
    let n_cols = headers.len() - 1;
    let feature_names: Vec<String> = headers.iter().take(n_cols).map(String::from).collect();

    let mut features = Vec::new();
    let mut targets = Vec::new();
    let mut class_names: Vec<String> = Vec::new();

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != headers.len() {
            return Err(LearnError::DataError {
                message: format!(
                    "Row {} has {} fields, expected {}",
                    row + 1,
                    record.len(),
                    headers.len()
                ),
            });
        }

        for (col, field) in record.iter().take(n_cols).enumerate() {
            let value: f32 = field.parse().map_err(|_| LearnError::DataError {
                message: format!(
                    "Row {}, column '{}': '{}' is not a number",
                    row + 1,
                    feature_names[col],
                    field
                ),
            })?;
            features.push(value);
        }

        let label = &record[n_cols];
        let target = match class_names.iter().position(|c| c == label) {
            Some(idx) => idx,
            None => {
                class_names.push(label.to_string());
                class_names.len() - 1
            }
        };
        targets.push(target);
    }

    let n_rows = targets.len();
    if n_rows == 0 {
        return Err(LearnError::DataError {
            message: format!("Dataset '{}' has no data rows", name),
        });
    }

    Dataset::new(
        name.to_string(),
        features,
        n_rows,
        n_cols,
        targets,
        feature_names,
        class_names,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "x,y,label\n1.0,2.0,cat\n3.0,4.0,dog\n5.0,6.0,cat\n";

    #[test]
    fn test_parse_labeled_csv() {
        let data = parse_labeled_csv("pets", GOOD.as_bytes()).unwrap();
        assert_eq!(data.shape(), (3, 2));
        assert_eq!(data.feature_names, vec!["x", "y"]);
        assert_eq!(data.class_names, vec!["cat", "dog"]);
        assert_eq!(data.targets(), &[0, 1, 0]);
        assert_eq!(data.row(1), &[3.0, 4.0]);
    }

    #[test]
    fn test_labels_interned_in_first_seen_order() {
        let csv = "x,label\n1.0,zebra\n2.0,ant\n3.0,zebra\n";
        let data = parse_labeled_csv("zoo", csv.as_bytes()).unwrap();
        assert_eq!(data.class_names, vec!["zebra", "ant"]);
        assert_eq!(data.targets(), &[0, 1, 0]);
    }

    #[test]
    fn test_non_numeric_feature_is_an_error() {
        let csv = "x,y,label\n1.0,oops,cat\n";
        let result = parse_labeled_csv("bad", csv.as_bytes());
        assert!(matches!(result, Err(LearnError::DataError { .. })));
    }

    #[test]
    fn test_empty_file_is_an_error() {
        assert!(parse_labeled_csv("empty", b"").is_err());
        assert!(parse_labeled_csv("header-only", b"x,label\n").is_err());
    }

    #[test]
    fn test_label_only_header_is_an_error() {
        let result = parse_labeled_csv("thin", b"label\ncat\n");
        assert!(matches!(result, Err(LearnError::DataError { .. })));
    }
}
