//! The classic Iris table, compiled into the binary.

use crate::domain::model::Dataset;
use crate::utils::error::{LearnError, Result};

const IRIS_CSV: &str = include_str!("../../data/iris.csv");

pub const FEATURE_NAMES: [&str; 4] = [
    "sepal_length",
    "sepal_width",
    "petal_length",
    "petal_width",
];

pub const CLASS_NAMES: [&str; 3] = ["setosa", "versicolor", "virginica"];

/// Loads the bundled Iris dataset: 150 samples, 4 features, 3 species.
///
/// Species map to fixed class indices in [`CLASS_NAMES`] order regardless of
/// row order; an unknown species in the bundled file is an error.
pub fn load_iris() -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(IRIS_CSV.as_bytes());

    let mut features = Vec::with_capacity(150 * 4);
    let mut targets = Vec::with_capacity(150);

    for (row, record) in reader.records().enumerate() {
        let record = record?;

        for field in record.iter().take(FEATURE_NAMES.len()) {
            let value: f32 = field.parse().map_err(|_| LearnError::DataError {
                message: format!("Iris row {}: '{}' is not a number", row + 1, field),
            })?;
            features.push(value);
        }

        let species = &record[FEATURE_NAMES.len()];
        let target = CLASS_NAMES
            .iter()
            .position(|c| c == &species)
            .ok_or_else(|| LearnError::DataError {
                message: format!("Iris row {}: unknown species '{}'", row + 1, species),
            })?;
        targets.push(target);
    }

    let n_rows = targets.len();
    Dataset::new(
        "iris".to_string(),
        features,
        n_rows,
        FEATURE_NAMES.len(),
        targets,
        FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        CLASS_NAMES.iter().map(|s| s.to_string()).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iris_shape() {
        let data = load_iris().unwrap();
        assert_eq!(data.shape(), (150, 4));
        assert_eq!(data.n_classes(), 3);
        assert_eq!(data.feature_names, FEATURE_NAMES.to_vec());
        assert_eq!(data.class_names, CLASS_NAMES.to_vec());
    }

    #[test]
    fn test_iris_is_balanced() {
        let data = load_iris().unwrap();
        let mut counts = [0usize; 3];
        for &t in data.targets() {
            counts[t] += 1;
        }
        assert_eq!(counts, [50, 50, 50]);
    }

    #[test]
    fn test_iris_first_row() {
        let data = load_iris().unwrap();
        assert_eq!(data.row(0), &[5.1, 3.5, 1.4, 0.2]);
        assert_eq!(data.targets()[0], 0);
    }

    #[test]
    fn test_iris_values_are_plausible() {
        let data = load_iris().unwrap();
        for i in 0..data.n_rows() {
            for &v in data.row(i) {
                assert!(v > 0.0 && v < 10.0);
            }
        }
    }
}
