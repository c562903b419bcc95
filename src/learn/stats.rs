//! Descriptive statistics for numerical exploration of a dataset.

use crate::domain::model::{ClassCount, Dataset, EdaReport, FeatureSummary};

/// Per-feature five-number summaries plus mean/std, and the class balance.
pub fn describe(data: &Dataset) -> EdaReport {
    let summaries = (0..data.n_cols())
        .map(|j| summarize_feature(&data.feature_names[j], &data.feature_column(j)))
        .collect();

    EdaReport {
        n_samples: data.n_rows(),
        n_features: data.n_cols(),
        summaries,
        class_counts: class_distribution(data),
    }
}

/// Sample counts per class, in class-index order.
pub fn class_distribution(data: &Dataset) -> Vec<ClassCount> {
    let mut counts = vec![0usize; data.n_classes()];
    for &t in data.targets() {
        counts[t] += 1;
    }
    data.class_names
        .iter()
        .zip(counts)
        .map(|(label, count)| ClassCount {
            label: label.clone(),
            count,
        })
        .collect()
}

fn summarize_feature(name: &str, values: &[f32]) -> FeatureSummary {
    let n = values.len();
    let mean = values.iter().sum::<f32>() / n as f32;

    // Sample standard deviation (n-1); a constant or single-value column gets 0.
    let std = if n > 1 {
        let sum_sq: f32 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        (sum_sq / (n - 1) as f32).sqrt()
    } else {
        0.0
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    FeatureSummary {
        name: name.to_string(),
        count: n,
        mean,
        std,
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[n - 1],
    }
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn quantile(sorted: &[f32], q: f32) -> f32 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f32;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f32;
        sorted[lo] + frac * (sorted[hi] - sorted[lo])
    }
}
