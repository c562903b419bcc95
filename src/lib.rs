pub mod config;
pub mod core;
pub mod data;
pub mod domain;
pub mod learn;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::core::{engine::ExperimentEngine, experiment::HoldoutExperiment};
pub use utils::error::{LearnError, Result};
