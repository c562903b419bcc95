//! Classification metrics.

use crate::utils::error::{LearnError, Result};

/// Fraction of predictions matching the true labels.
pub fn accuracy(pred: &[usize], truth: &[usize]) -> Result<f32> {
    if pred.len() != truth.len() {
        return Err(LearnError::ValidationError {
            message: format!(
                "Prediction count {} does not match label count {}",
                pred.len(),
                truth.len()
            ),
        });
    }
    if truth.is_empty() {
        return Err(LearnError::ValidationError {
            message: "Cannot score an empty prediction set".to_string(),
        });
    }

    let correct = pred
        .iter()
        .zip(truth.iter())
        .filter(|(p, t)| p == t)
        .count();
    Ok(correct as f32 / truth.len() as f32)
}

/// Confusion matrix with rows = true class, cols = predicted class.
pub fn confusion_matrix(
    pred: &[usize],
    truth: &[usize],
    n_classes: usize,
) -> Result<Vec<Vec<usize>>> {
    if pred.len() != truth.len() {
        return Err(LearnError::ValidationError {
            message: format!(
                "Prediction count {} does not match label count {}",
                pred.len(),
                truth.len()
            ),
        });
    }

    let mut matrix = vec![vec![0usize; n_classes]; n_classes];
    for (&p, &t) in pred.iter().zip(truth.iter()) {
        if p >= n_classes || t >= n_classes {
            return Err(LearnError::ValidationError {
                message: format!(
                    "Label out of range: pred {}, truth {}, {} classes",
                    p, t, n_classes
                ),
            });
        }
        matrix[t][p] += 1;
    }
    Ok(matrix)
}

/// recall_c = TP_c / (TP_c + FN_c); a class with no true samples scores 0.0.
pub fn per_class_recall(confusion: &[Vec<usize>]) -> Vec<f32> {
    confusion
        .iter()
        .enumerate()
        .map(|(c, row)| {
            let support: usize = row.iter().sum();
            if support == 0 {
                0.0
            } else {
                row[c] as f32 / support as f32
            }
        })
        .collect()
}

/// precision_c = TP_c / (TP_c + FP_c); a class never predicted scores 0.0.
pub fn per_class_precision(confusion: &[Vec<usize>]) -> Vec<f32> {
    let n_classes = confusion.len();
    (0..n_classes)
        .map(|c| {
            let predicted: usize = confusion.iter().map(|row| row[c]).sum();
            if predicted == 0 {
                0.0
            } else {
                confusion[c][c] as f32 / predicted as f32
            }
        })
        .collect()
}
