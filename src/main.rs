use clap::Parser;
use small_learn::utils::{logger, validation::Validate};
use small_learn::{CliConfig, ExperimentEngine, HoldoutExperiment, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting small-learn CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let experiment = HoldoutExperiment::new(storage, config);

    let engine = ExperimentEngine::new_with_monitoring(experiment, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Experiment completed successfully!");
            tracing::info!("📁 Report saved to: {}", output_path);
            println!("✅ Experiment completed successfully!");
            println!("📁 Report saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Experiment failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                small_learn::utils::error::ErrorSeverity::Low => 0,
                small_learn::utils::error::ErrorSeverity::Medium => 2,
                small_learn::utils::error::ErrorSeverity::High => 1,
                small_learn::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
