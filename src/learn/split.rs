//! Train/test partitioning.

use crate::domain::model::Dataset;
use crate::utils::error::{LearnError, Result};
use crate::utils::validation::validate_unit_fraction;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Splits a dataset into disjoint train and test partitions.
///
/// The test partition gets `round(n * test_size)` rows, clamped so neither
/// side is empty. The same seed always produces the same split.
pub fn train_test_split(
    data: &Dataset,
    test_size: f32,
    seed: u64,
) -> Result<(Dataset, Dataset)> {
    validate_unit_fraction("test_size", test_size)?;

    let n_samples = data.n_rows();
    if n_samples < 2 {
        return Err(LearnError::ValidationError {
            message: format!("Need at least 2 samples to split, got {}", n_samples),
        });
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n_samples as f32 * test_size).round() as usize).clamp(1, n_samples - 1);
    let n_train = n_samples - n_test;

    let train = data.select(&indices[..n_train])?;
    let test = data.select(&indices[n_train..])?;
    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn numbered_dataset(n: usize) -> Dataset {
        // One feature equal to the row index so rows stay identifiable after shuffling.
        let features: Vec<f32> = (0..n).map(|i| i as f32).collect();
        let targets: Vec<usize> = (0..n).map(|i| i % 2).collect();
        Dataset::new(
            "numbered".to_string(),
            features,
            n,
            1,
            targets,
            vec!["index".to_string()],
            vec!["even".to_string(), "odd".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_split_shapes() {
        let data = numbered_dataset(20);
        let (train, test) = train_test_split(&data, 0.25, 42).unwrap();

        assert_eq!(train.n_rows(), 15);
        assert_eq!(test.n_rows(), 5);
        assert_eq!(train.n_cols(), 1);
        assert_eq!(test.n_cols(), 1);
    }

    #[test]
    fn test_split_is_disjoint_and_covers_everything() {
        let data = numbered_dataset(30);
        let (train, test) = train_test_split(&data, 0.3, 7).unwrap();

        let mut seen: HashSet<i64> = HashSet::new();
        for i in 0..train.n_rows() {
            seen.insert(train.row(i)[0] as i64);
        }
        for i in 0..test.n_rows() {
            assert!(
                seen.insert(test.row(i)[0] as i64),
                "row appears in both partitions"
            );
        }
        assert_eq!(seen.len(), 30);
    }

    #[test]
    fn test_same_seed_reproduces_the_split() {
        let data = numbered_dataset(30);
        let (train1, test1) = train_test_split(&data, 0.2, 42).unwrap();
        let (train2, test2) = train_test_split(&data, 0.2, 42).unwrap();

        for i in 0..train1.n_rows() {
            assert_eq!(train1.row(i), train2.row(i));
        }
        for i in 0..test1.n_rows() {
            assert_eq!(test1.row(i), test2.row(i));
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let data = numbered_dataset(30);
        let (_, test1) = train_test_split(&data, 0.2, 1).unwrap();
        let (_, test2) = train_test_split(&data, 0.2, 2).unwrap();

        let rows1: Vec<i64> = (0..test1.n_rows()).map(|i| test1.row(i)[0] as i64).collect();
        let rows2: Vec<i64> = (0..test2.n_rows()).map(|i| test2.row(i)[0] as i64).collect();
        assert_ne!(rows1, rows2);
    }

    #[test]
    fn test_tiny_test_size_still_holds_out_one_row() {
        let data = numbered_dataset(10);
        let (train, test) = train_test_split(&data, 0.01, 42).unwrap();

        assert_eq!(test.n_rows(), 1);
        assert_eq!(train.n_rows(), 9);
    }

    #[test]
    fn test_invalid_test_size_is_rejected() {
        let data = numbered_dataset(10);
        assert!(train_test_split(&data, 0.0, 42).is_err());
        assert!(train_test_split(&data, 1.0, 42).is_err());
        assert!(train_test_split(&data, f32::NAN, 42).is_err());
    }

    #[test]
    fn test_single_row_cannot_be_split() {
        let data = numbered_dataset(1);
        assert!(train_test_split(&data, 0.5, 42).is_err());
    }
}
