use crate::domain::model::{Dataset, EdaReport, EvalOutcome, ExperimentReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn dataset(&self) -> &str;
    fn dataset_path(&self) -> Option<&str>;
    fn dataset_url(&self) -> Option<&str>;
    fn test_size(&self) -> f32;
    fn seed(&self) -> u64;
    fn max_depth(&self) -> Option<usize>;
    fn min_samples_leaf(&self) -> usize;
    fn output_path(&self) -> &str;
}

#[async_trait]
pub trait Experiment: Send + Sync {
    async fn load(&self) -> Result<Dataset>;
    async fn explore(&self, data: &Dataset) -> Result<EdaReport>;
    async fn evaluate(&self, data: &Dataset) -> Result<EvalOutcome>;
    async fn publish(&self, report: ExperimentReport) -> Result<String>;
}
