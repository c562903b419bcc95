//! CART decision tree classifier using Gini impurity.

use crate::domain::model::Dataset;
use crate::utils::error::{LearnError, Result};

/// A node in a fitted tree: either a binary split on one feature or a leaf
/// predicting a class.
#[derive(Debug, Clone)]
pub enum TreeNode {
    Split {
        feature_idx: usize,
        threshold: f32,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        class: usize,
        n_samples: usize,
    },
}

impl TreeNode {
    /// Depth in edges: a lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }
}

/// Decision tree classifier.
///
/// Splits greedily on the threshold that minimizes weighted Gini impurity;
/// samples with `value <= threshold` go left. Fitting the same data twice
/// produces the same tree.
#[derive(Debug, Clone)]
pub struct DecisionTreeClassifier {
    tree: Option<TreeNode>,
    max_depth: Option<usize>,
    min_samples_leaf: usize,
    n_features: Option<usize>,
}

impl DecisionTreeClassifier {
    pub fn new() -> Self {
        Self {
            tree: None,
            max_depth: None,
            min_samples_leaf: 1,
            n_features: None,
        }
    }

    /// Limits tree depth; the root split counts as depth 1.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Rejects splits that would leave fewer than `min_samples` rows in a child.
    pub fn with_min_samples_leaf(mut self, min_samples: usize) -> Self {
        self.min_samples_leaf = min_samples.max(1);
        self
    }

    pub fn fit(&mut self, data: &Dataset) -> Result<()> {
        self.n_features = Some(data.n_cols());
        self.tree = Some(build_tree(
            data,
            0,
            self.max_depth,
            self.min_samples_leaf,
        )?);
        Ok(())
    }

    pub fn predict(&self, data: &Dataset) -> Result<Vec<usize>> {
        (0..data.n_rows())
            .map(|i| self.predict_row(data.row(i)))
            .collect()
    }

    pub fn predict_row(&self, row: &[f32]) -> Result<usize> {
        let Some(tree) = &self.tree else {
            return Err(LearnError::ModelError {
                message: "predict called before fit".to_string(),
            });
        };
        if let Some(expected) = self.n_features {
            if row.len() != expected {
                return Err(LearnError::ModelError {
                    message: format!(
                        "Model was trained with {} features but input has {}",
                        expected,
                        row.len()
                    ),
                });
            }
        }

        let mut node = tree;
        loop {
            match node {
                TreeNode::Leaf { class, .. } => return Ok(*class),
                TreeNode::Split {
                    feature_idx,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature_idx] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Accuracy of this tree on a labeled dataset.
    pub fn score(&self, data: &Dataset) -> Result<f32> {
        let predictions = self.predict(data)?;
        super::metrics::accuracy(&predictions, data.targets())
    }

    pub fn depth(&self) -> usize {
        self.tree.as_ref().map_or(0, TreeNode::depth)
    }

    pub fn n_leaves(&self) -> usize {
        self.tree.as_ref().map_or(0, TreeNode::n_leaves)
    }
}

impl Default for DecisionTreeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Gini = 1 - Σ(p_i²)
fn gini_impurity(labels: &[usize], n_classes: usize) -> f32 {
    if labels.is_empty() {
        return 0.0;
    }

    let mut counts = vec![0usize; n_classes];
    for &label in labels {
        counts[label] += 1;
    }

    let n = labels.len() as f32;
    let mut gini = 1.0;
    for count in counts {
        let p = count as f32 / n;
        gini -= p * p;
    }
    gini
}

/// Most frequent label; ties go to the lowest label.
fn majority_class(labels: &[usize], n_classes: usize) -> usize {
    let mut counts = vec![0usize; n_classes];
    for &label in labels {
        counts[label] += 1;
    }
    let mut best = 0;
    for (label, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = label;
        }
    }
    best
}

/// Finds the (feature, threshold) pair with the lowest weighted Gini.
///
/// Candidate thresholds are the sorted distinct values of each feature; a
/// threshold that leaves a side empty or smaller than `min_samples_leaf` is
/// skipped. Returns None when no split improves on the parent impurity.
fn find_best_split(data: &Dataset, min_samples_leaf: usize) -> Option<(usize, f32)> {
    let n_classes = data.n_classes();
    let targets = data.targets();
    let parent_gini = gini_impurity(targets, n_classes);

    let mut best: Option<(usize, f32, f32)> = None;

    for feature_idx in 0..data.n_cols() {
        let column = data.feature_column(feature_idx);

        let mut thresholds = column.clone();
        thresholds.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        thresholds.dedup();

        for &threshold in &thresholds {
            let mut left = Vec::new();
            let mut right = Vec::new();
            for (row, &label) in targets.iter().enumerate() {
                if column[row] <= threshold {
                    left.push(label);
                } else {
                    right.push(label);
                }
            }

            if left.len() < min_samples_leaf || right.len() < min_samples_leaf {
                continue;
            }

            let n_left = left.len() as f32;
            let n_right = right.len() as f32;
            let n_total = n_left + n_right;
            let weighted = (n_left / n_total) * gini_impurity(&left, n_classes)
                + (n_right / n_total) * gini_impurity(&right, n_classes);

            if parent_gini - weighted <= 1e-7 {
                continue;
            }

            match best {
                Some((_, _, best_gini)) if weighted >= best_gini => {}
                _ => best = Some((feature_idx, threshold, weighted)),
            }
        }
    }

    best.map(|(feature_idx, threshold, _)| (feature_idx, threshold))
}

fn build_tree(
    data: &Dataset,
    depth: usize,
    max_depth: Option<usize>,
    min_samples_leaf: usize,
) -> Result<TreeNode> {
    let targets = data.targets();
    let n_samples = targets.len();
    let n_classes = data.n_classes();

    let is_pure = targets.iter().all(|&t| t == targets[0]);
    let depth_exhausted = max_depth.is_some_and(|d| depth >= d);

    if is_pure || depth_exhausted || n_samples < 2 {
        return Ok(TreeNode::Leaf {
            class: majority_class(targets, n_classes),
            n_samples,
        });
    }

    let Some((feature_idx, threshold)) = find_best_split(data, min_samples_leaf) else {
        return Ok(TreeNode::Leaf {
            class: majority_class(targets, n_classes),
            n_samples,
        });
    };

    let column = data.feature_column(feature_idx);
    let mut left_indices = Vec::new();
    let mut right_indices = Vec::new();
    for row in 0..n_samples {
        if column[row] <= threshold {
            left_indices.push(row);
        } else {
            right_indices.push(row);
        }
    }

    let left_data = data.select(&left_indices)?;
    let right_data = data.select(&right_indices)?;

    let left = build_tree(&left_data, depth + 1, max_depth, min_samples_leaf)?;
    let right = build_tree(&right_data, depth + 1, max_depth, min_samples_leaf)?;

    Ok(TreeNode::Split {
        feature_idx,
        threshold,
        left: Box::new(left),
        right: Box::new(right),
    })
}
