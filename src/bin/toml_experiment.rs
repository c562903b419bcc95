use clap::Parser;
use small_learn::config::toml_config::TomlConfig;
use small_learn::core::ConfigProvider;
use small_learn::utils::{logger, validation::Validate};
use small_learn::{ExperimentEngine, HoldoutExperiment, LocalStorage};

#[derive(Parser)]
#[command(name = "toml-experiment")]
#[command(about = "Run a classification experiment described by a TOML file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "experiment.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - show what would be run without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based experiment tool");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config);
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path().to_string());
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Experiment: {}", config.experiment.name);
    if let Some(description) = &config.experiment.description {
        println!("  Description: {}", description);
    }

    if let Some(url) = config.dataset_url() {
        println!("  Source: {}", url);
    } else if let Some(path) = config.dataset_path() {
        println!("  Source: {}", path);
    } else {
        println!("  Source: bundled '{}'", config.dataset());
    }

    println!("  Output: {}", config.output_path());
    println!("  Test size: {}", config.test_size());
    println!("  Seed: {}", config.seed());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Data Source Analysis:");
    if let Some(url) = config.dataset_url() {
        println!("  Remote CSV: {}", url);
    } else if let Some(path) = config.dataset_path() {
        println!("  Local CSV: {}", path);
    } else {
        println!("  Bundled dataset: {}", config.dataset());
    }

    println!();
    println!("⚙️ Model Configuration:");
    match config.max_depth() {
        Some(depth) => println!("  Max depth: {}", depth),
        None => println!("  Max depth: unlimited"),
    }
    println!("  Min samples per leaf: {}", config.min_samples_leaf());

    println!();
    println!("✂️ Split Configuration:");
    println!(
        "  Test fraction: {} (seed {})",
        config.test_size(),
        config.seed()
    );
    println!("  Both a resubstitution and a holdout evaluation will be reported");

    println!();
    println!("💾 Output Configuration:");
    println!("  Path: {}", config.output_path());
    println!("  Bundle: experiment_output.zip (report.json, eda.csv, predictions.tsv)");

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
