use crate::core::{
    ConfigProvider, Dataset, EdaReport, EvalOutcome, Evaluation, Experiment, ExperimentReport,
    PredictionRow, SplitSummary, Storage,
};
use crate::data::{self, iris};
use crate::learn::metrics::{accuracy, confusion_matrix, per_class_recall};
use crate::learn::split::train_test_split;
use crate::learn::stats;
use crate::learn::tree::DecisionTreeClassifier;
use crate::utils::error::{LearnError, Result};
use reqwest::Client;
use std::io::Write;
use std::path::Path;
use zip::write::{FileOptions, ZipWriter};

/// The production experiment: one tree family, scored the wrong way and the
/// right way on the same dataset.
pub struct HoldoutExperiment<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> HoldoutExperiment<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    fn new_tree(&self) -> DecisionTreeClassifier {
        let mut tree =
            DecisionTreeClassifier::new().with_min_samples_leaf(self.config.min_samples_leaf());
        if let Some(depth) = self.config.max_depth() {
            tree = tree.with_max_depth(depth);
        }
        tree
    }

    async fn fetch_remote(&self, url: &str) -> Result<Dataset> {
        tracing::debug!("Fetching dataset from: {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;

        let name = url::Url::parse(url)
            .ok()
            .and_then(|u| {
                u.path_segments()
                    .and_then(|mut segments| segments.next_back().map(String::from))
            })
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches(".csv").to_string())
            .unwrap_or_else(|| "remote".to_string());

        data::parse_labeled_csv(&name, &body)
    }

    async fn read_local(&self, path: &str) -> Result<Dataset> {
        tracing::debug!("Reading dataset file: {}", path);
        let bytes = self.storage.read_file(path).await?;

        let name = Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("local");
        data::parse_labeled_csv(name, &bytes)
    }
}

fn evaluate_predictions(
    predictions: &[usize],
    truth: &[usize],
    n_classes: usize,
    tree: &DecisionTreeClassifier,
) -> Result<Evaluation> {
    let confusion = confusion_matrix(predictions, truth, n_classes)?;
    Ok(Evaluation {
        accuracy: accuracy(predictions, truth)?,
        per_class_recall: per_class_recall(&confusion),
        confusion,
        tree_depth: tree.depth(),
        n_leaves: tree.n_leaves(),
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Experiment for HoldoutExperiment<S, C> {
    async fn load(&self) -> Result<Dataset> {
        if let Some(url) = self.config.dataset_url() {
            return self.fetch_remote(url).await;
        }
        if let Some(path) = self.config.dataset_path() {
            return self.read_local(path).await;
        }

        match self.config.dataset() {
            "iris" => iris::load_iris(),
            other => Err(LearnError::ConfigError {
                message: format!(
                    "Unknown bundled dataset '{}'. Available: {}",
                    other,
                    data::BUNDLED_DATASETS.join(", ")
                ),
            }),
        }
    }

    async fn explore(&self, data: &Dataset) -> Result<EdaReport> {
        let report = stats::describe(data);
        for s in &report.summaries {
            tracing::debug!(
                "{}: mean {:.2}, std {:.2}, range [{:.2}, {:.2}]",
                s.name,
                s.mean,
                s.std,
                s.min,
                s.max
            );
        }
        Ok(report)
    }

    async fn evaluate(&self, data: &Dataset) -> Result<EvalOutcome> {
        // The wrong way first: fit on everything, score on the same rows.
        let mut full_tree = self.new_tree();
        full_tree.fit(data)?;
        let full_predictions = full_tree.predict(data)?;
        let resubstitution =
            evaluate_predictions(&full_predictions, data.targets(), data.n_classes(), &full_tree)?;

        // The right way: fit on the training partition, score on held-out rows.
        let test_size = self.config.test_size();
        let seed = self.config.seed();
        let (train, test) = train_test_split(data, test_size, seed)?;
        tracing::debug!(
            "Split {} samples into {} train / {} test (seed {})",
            data.n_rows(),
            train.n_rows(),
            test.n_rows(),
            seed
        );

        let mut tree = self.new_tree();
        tree.fit(&train)?;
        let holdout_predictions = tree.predict(&test)?;
        let holdout =
            evaluate_predictions(&holdout_predictions, test.targets(), test.n_classes(), &tree)?;

        let predictions = holdout_predictions
            .iter()
            .zip(test.targets())
            .enumerate()
            .map(|(row, (&predicted, &truth))| PredictionRow {
                row,
                truth: test.class_name(truth).to_string(),
                predicted: test.class_name(predicted).to_string(),
                hit: predicted == truth,
            })
            .collect();

        Ok(EvalOutcome {
            resubstitution,
            holdout,
            split: SplitSummary {
                test_size,
                seed,
                n_train: train.n_rows(),
                n_test: test.n_rows(),
            },
            predictions,
        })
    }

    async fn publish(&self, report: ExperimentReport) -> Result<String> {
        let output_path = format!("{}/experiment_output.zip", self.config.output_path());

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("report.json", FileOptions::default())?;
            let json_data = serde_json::to_string_pretty(&report)?;
            zip.write_all(json_data.as_bytes())?;

            zip.start_file::<_, ()>("eda.csv", FileOptions::default())?;
            zip.write_all(report.eda.to_csv().as_bytes())?;

            if !report.outcome.predictions.is_empty() {
                zip.start_file::<_, ()>("predictions.tsv", FileOptions::default())?;
                zip.write_all(report.predictions_tsv().as_bytes())?;
            }

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing report bundle ({} bytes) to storage", zip_data.len());
        self.storage
            .write_file("experiment_output.zip", &zip_data)
            .await?;

        Ok(output_path)
    }
}
