use crate::core::ConfigProvider;
use crate::utils::error::{LearnError, Result};
use crate::utils::validation::{
    validate_known_dataset, validate_path, validate_positive_number, validate_unit_fraction,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub experiment: ExperimentSection,
    pub source: SourceSection,
    #[serde(default)]
    pub model: ModelSection,
    #[serde(default)]
    pub split: SplitSection,
    pub report: ReportSection,
    pub monitoring: Option<MonitoringSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentSection {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    /// Bundled dataset name; ignored when `path` or `url` is set.
    pub dataset: Option<String>,
    pub path: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSection {
    pub max_depth: Option<usize>,
    pub min_samples_leaf: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitSection {
    pub test_size: Option<f32>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringSection {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TomlConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().is_some_and(|m| m.enabled)
    }
}

impl ConfigProvider for TomlConfig {
    fn dataset(&self) -> &str {
        self.source.dataset.as_deref().unwrap_or("iris")
    }

    fn dataset_path(&self) -> Option<&str> {
        self.source.path.as_deref()
    }

    fn dataset_url(&self) -> Option<&str> {
        self.source.url.as_deref()
    }

    fn test_size(&self) -> f32 {
        self.split.test_size.unwrap_or(0.25)
    }

    fn seed(&self) -> u64 {
        self.split.seed.unwrap_or(42)
    }

    fn max_depth(&self) -> Option<usize> {
        self.model.max_depth
    }

    fn min_samples_leaf(&self) -> usize {
        self.model.min_samples_leaf.unwrap_or(1)
    }

    fn output_path(&self) -> &str {
        &self.report.output_path
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if self.experiment.name.trim().is_empty() {
            return Err(LearnError::MissingConfigError {
                field: "experiment.name".to_string(),
            });
        }

        if self.source.path.is_some() && self.source.url.is_some() {
            return Err(LearnError::ConfigError {
                message: "source.path and source.url are mutually exclusive".to_string(),
            });
        }

        if let Some(path) = &self.source.path {
            validate_path("source.path", path)?;
        } else if let Some(url) = &self.source.url {
            validate_url("source.url", url)?;
        } else {
            validate_known_dataset("source.dataset", self.dataset(), &crate::data::BUNDLED_DATASETS)?;
        }

        validate_unit_fraction("split.test_size", self.test_size())?;
        validate_positive_number("model.min_samples_leaf", self.min_samples_leaf(), 1)?;
        validate_path("report.output_path", self.output_path())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[experiment]
name = "iris-holdout"
description = "Holdout evaluation on the bundled iris dataset"
version = "1.0"

[source]
dataset = "iris"

[model]
max_depth = 4

[split]
test_size = 0.2
seed = 7

[report]
output_path = "./output"

[monitoring]
enabled = true
"#;

    #[test]
    fn test_parse_full_config() {
        let config: TomlConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.experiment.name, "iris-holdout");
        assert_eq!(config.dataset(), "iris");
        assert_eq!(config.max_depth(), Some(4));
        assert!((config.test_size() - 0.2).abs() < 1e-6);
        assert_eq!(config.seed(), 7);
        assert!(config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_apply_when_sections_omitted() {
        let minimal = r#"
[experiment]
name = "defaults"

[source]
dataset = "iris"

[report]
output_path = "./output"
"#;
        let config: TomlConfig = toml::from_str(minimal).unwrap();
        assert!((config.test_size() - 0.25).abs() < 1e-6);
        assert_eq!(config.seed(), 42);
        assert_eq!(config.max_depth(), None);
        assert_eq!(config.min_samples_leaf(), 1);
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_split_is_rejected() {
        let mut config: TomlConfig = toml::from_str(SAMPLE).unwrap();
        config.split.test_size = Some(2.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_path_and_url_together_are_rejected() {
        let mut config: TomlConfig = toml::from_str(SAMPLE).unwrap();
        config.source.path = Some("data.csv".to_string());
        config.source.url = Some("https://example.com/data.csv".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_experiment_name_is_rejected() {
        let mut config: TomlConfig = toml::from_str(SAMPLE).unwrap();
        config.experiment.name = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
