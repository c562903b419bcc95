pub mod engine;
pub mod experiment;

pub use crate::domain::model::{
    Dataset, EdaReport, EvalOutcome, Evaluation, ExperimentReport, PredictionRow, SplitSummary,
};
pub use crate::domain::ports::{ConfigProvider, Experiment, Storage};
pub use crate::utils::error::Result;
