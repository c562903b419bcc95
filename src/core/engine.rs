use crate::core::{Experiment, ExperimentReport};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct ExperimentEngine<E: Experiment> {
    experiment: E,
    monitor: SystemMonitor,
}

impl<E: Experiment> ExperimentEngine<E> {
    pub fn new(experiment: E) -> Self {
        Self {
            experiment,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(experiment: E, monitor_enabled: bool) -> Self {
        Self {
            experiment,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Runs the four stages in order and returns the published report path.
    pub async fn run(&self) -> Result<String> {
        println!("Starting experiment...");

        // Load
        println!("Loading dataset...");
        let data = self.experiment.load().await?;
        let (n_rows, n_cols) = data.shape();
        println!(
            "Loaded '{}': {} samples, {} features, {} classes",
            data.name,
            n_rows,
            n_cols,
            data.n_classes()
        );
        self.monitor.sample("load");

        // Explore
        println!("Exploring data...");
        let eda = self.experiment.explore(&data).await?;
        println!("Summarized {} features", eda.summaries.len());
        self.monitor.sample("explore");

        // Evaluate
        println!("Evaluating classifier...");
        let outcome = self.experiment.evaluate(&data).await?;
        println!(
            "Resubstitution accuracy: {:.1}% (scored on the training data)",
            outcome.resubstitution.accuracy * 100.0
        );
        println!(
            "Holdout accuracy: {:.1}% on {} held-out samples",
            outcome.holdout.accuracy * 100.0,
            outcome.split.n_test
        );
        let gap = outcome.optimism_gap();
        if gap > 0.0 {
            tracing::warn!(
                "Scoring on the training data overstated accuracy by {:.1} points",
                gap * 100.0
            );
        }
        self.monitor.sample("evaluate");

        // Publish
        println!("Publishing report...");
        let report = ExperimentReport {
            dataset: data.name.clone(),
            generated_at: chrono::Utc::now(),
            eda,
            outcome,
        };
        let output_path = self.experiment.publish(report).await?;
        println!("Report saved to: {}", output_path);
        self.monitor.sample("publish");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
