pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    self, validate_path, validate_positive_number, validate_unit_fraction, validate_url,
};
#[cfg(feature = "cli")]
use crate::utils::error::{LearnError, Result};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "small-learn")]
#[command(about = "A small tool for training and honestly evaluating a classifier")]
pub struct CliConfig {
    /// Bundled dataset to load when no path or URL is given
    #[arg(long, default_value = "iris")]
    pub dataset: String,

    /// Load the dataset from a local CSV file instead
    #[arg(long)]
    pub dataset_path: Option<String>,

    /// Load the dataset from an HTTP(S) CSV URL instead
    #[arg(long)]
    pub dataset_url: Option<String>,

    /// Fraction of rows held out for testing
    #[arg(long, default_value = "0.25")]
    pub test_size: f32,

    /// Seed for the train/test shuffle
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Maximum tree depth (unlimited when omitted)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Minimum samples per leaf
    #[arg(long, default_value = "1")]
    pub min_samples_leaf: usize,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn dataset(&self) -> &str {
        &self.dataset
    }

    fn dataset_path(&self) -> Option<&str> {
        self.dataset_path.as_deref()
    }

    fn dataset_url(&self) -> Option<&str> {
        self.dataset_url.as_deref()
    }

    fn test_size(&self) -> f32 {
        self.test_size
    }

    fn seed(&self) -> u64 {
        self.seed
    }

    fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    fn min_samples_leaf(&self) -> usize {
        self.min_samples_leaf
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

#[cfg(feature = "cli")]
impl validation::Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.dataset_path.is_some() && self.dataset_url.is_some() {
            return Err(LearnError::ConfigError {
                message: "--dataset-path and --dataset-url are mutually exclusive".to_string(),
            });
        }

        if let Some(path) = &self.dataset_path {
            validate_path("dataset_path", path)?;
        } else if let Some(url) = &self.dataset_url {
            validate_url("dataset_url", url)?;
        } else {
            validation::validate_known_dataset(
                "dataset",
                &self.dataset,
                &crate::data::BUNDLED_DATASETS,
            )?;
        }

        validate_unit_fraction("test_size", self.test_size)?;
        validate_positive_number("min_samples_leaf", self.min_samples_leaf, 1)?;
        validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;

    fn base_config() -> CliConfig {
        CliConfig {
            dataset: "iris".to_string(),
            dataset_path: None,
            dataset_url: None,
            test_size: 0.25,
            seed: 42,
            max_depth: None,
            min_samples_leaf: 1,
            output_path: "./output".to_string(),
            verbose: false,
            monitor: false,
        }
    }

    #[test]
    fn test_default_config_validates() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_unknown_bundled_dataset_is_rejected() {
        let mut config = base_config();
        config.dataset = "wine".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_path_and_url_are_mutually_exclusive() {
        let mut config = base_config();
        config.dataset_path = Some("data.csv".to_string());
        config.dataset_url = Some("https://example.com/data.csv".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dataset_path_skips_bundled_name_check() {
        let mut config = base_config();
        config.dataset = "anything".to_string();
        config.dataset_path = Some("data.csv".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_test_size_is_rejected() {
        let mut config = base_config();
        config.test_size = 1.5;
        assert!(config.validate().is_err());
    }
}
