use crate::utils::error::{LearnError, Result};
use serde::{Deserialize, Serialize};

/// A labeled tabular dataset: a row-major feature matrix plus one class
/// target per row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    features: Vec<f32>,
    n_rows: usize,
    n_cols: usize,
    targets: Vec<usize>,
    pub feature_names: Vec<String>,
    pub class_names: Vec<String>,
}

impl Dataset {
    pub fn new(
        name: String,
        features: Vec<f32>,
        n_rows: usize,
        n_cols: usize,
        targets: Vec<usize>,
        feature_names: Vec<String>,
        class_names: Vec<String>,
    ) -> Result<Self> {
        if n_rows == 0 || n_cols == 0 {
            return Err(LearnError::DataError {
                message: format!("Dataset '{}' is empty", name),
            });
        }
        if features.len() != n_rows * n_cols {
            return Err(LearnError::DataError {
                message: format!(
                    "Feature buffer has {} values, expected {} ({} rows x {} columns)",
                    features.len(),
                    n_rows * n_cols,
                    n_rows,
                    n_cols
                ),
            });
        }
        if targets.len() != n_rows {
            return Err(LearnError::DataError {
                message: format!(
                    "Target count {} does not match row count {}",
                    targets.len(),
                    n_rows
                ),
            });
        }
        if feature_names.len() != n_cols {
            return Err(LearnError::DataError {
                message: format!(
                    "Got {} feature names for {} columns",
                    feature_names.len(),
                    n_cols
                ),
            });
        }
        if let Some(&bad) = targets.iter().find(|&&t| t >= class_names.len()) {
            return Err(LearnError::DataError {
                message: format!(
                    "Target {} is out of range for {} classes",
                    bad,
                    class_names.len()
                ),
            });
        }

        Ok(Self {
            name,
            features,
            n_rows,
            n_cols,
            targets,
            feature_names,
            class_names,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn n_classes(&self) -> usize {
        self.class_names.len()
    }

    pub fn row(&self, i: usize) -> &[f32] {
        &self.features[i * self.n_cols..(i + 1) * self.n_cols]
    }

    /// Copies out one feature column.
    pub fn feature_column(&self, j: usize) -> Vec<f32> {
        (0..self.n_rows).map(|i| self.row(i)[j]).collect()
    }

    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    pub fn class_name(&self, target: usize) -> &str {
        &self.class_names[target]
    }

    /// Builds a new dataset from a subset of rows, in the given order.
    pub fn select(&self, indices: &[usize]) -> Result<Self> {
        if indices.is_empty() {
            return Err(LearnError::DataError {
                message: "Cannot select an empty row subset".to_string(),
            });
        }
        let mut features = Vec::with_capacity(indices.len() * self.n_cols);
        let mut targets = Vec::with_capacity(indices.len());
        for &i in indices {
            if i >= self.n_rows {
                return Err(LearnError::DataError {
                    message: format!("Row index {} out of range ({} rows)", i, self.n_rows),
                });
            }
            features.extend_from_slice(self.row(i));
            targets.push(self.targets[i]);
        }
        Self::new(
            self.name.clone(),
            features,
            indices.len(),
            self.n_cols,
            targets,
            self.feature_names.clone(),
            self.class_names.clone(),
        )
    }
}

/// Descriptive statistics for one feature column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub name: String,
    pub count: usize,
    pub mean: f32,
    pub std: f32,
    pub min: f32,
    pub q1: f32,
    pub median: f32,
    pub q3: f32,
    pub max: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCount {
    pub label: String,
    pub count: usize,
}

/// Numerical exploration of a dataset, the step that comes before any model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdaReport {
    pub n_samples: usize,
    pub n_features: usize,
    pub summaries: Vec<FeatureSummary>,
    pub class_counts: Vec<ClassCount>,
}

impl EdaReport {
    /// Renders the per-feature summary table as CSV, one row per feature.
    pub fn to_csv(&self) -> String {
        let mut lines = vec!["feature,count,mean,std,min,q1,median,q3,max".to_string()];
        for s in &self.summaries {
            lines.push(format!(
                "{},{},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
                s.name, s.count, s.mean, s.std, s.min, s.q1, s.median, s.q3, s.max
            ));
        }
        lines.join("\n")
    }
}

/// One scored model: accuracy plus the shape of the fitted tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub accuracy: f32,
    /// rows = true class, cols = predicted class
    pub confusion: Vec<Vec<usize>>,
    pub per_class_recall: Vec<f32>,
    pub tree_depth: usize,
    pub n_leaves: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitSummary {
    pub test_size: f32,
    pub seed: u64,
    pub n_train: usize,
    pub n_test: usize,
}

/// One held-out test row: what the model said versus the truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRow {
    pub row: usize,
    pub truth: String,
    pub predicted: String,
    pub hit: bool,
}

/// Both evaluations of the same model family on the same data.
///
/// `resubstitution` scores a tree on the rows it was trained on and is
/// systematically optimistic; `holdout` is the honest number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalOutcome {
    pub resubstitution: Evaluation,
    pub holdout: Evaluation,
    pub split: SplitSummary,
    pub predictions: Vec<PredictionRow>,
}

impl EvalOutcome {
    /// How many accuracy points the train==test evaluation overstates.
    pub fn optimism_gap(&self) -> f32 {
        self.resubstitution.accuracy - self.holdout.accuracy
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub dataset: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub eda: EdaReport,
    pub outcome: EvalOutcome,
}

impl ExperimentReport {
    /// Renders the held-out predictions as TSV, one row per test sample.
    pub fn predictions_tsv(&self) -> String {
        let mut lines = vec!["row\ttruth\tpredicted\thit".to_string()];
        for p in &self.outcome.predictions {
            lines.push(format!("{}\t{}\t{}\t{}", p.row, p.truth, p.predicted, p.hit));
        }
        lines.join("\n")
    }
}
