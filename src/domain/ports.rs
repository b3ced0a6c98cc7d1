use crate::domain::model::CityAnalysis;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn dataset_path(&self) -> &str;
    fn dataset_url(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn top_cities(&self) -> usize;
    fn min_population(&self) -> u64;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Ensure the dataset exists locally, returning its path.
    async fn extract(&self) -> Result<PathBuf>;
    /// Parse and analyze the dataset.
    async fn transform(&self, dataset: PathBuf) -> Result<CityAnalysis>;
    /// Render charts and write the summary artifact, returning the output path.
    async fn load(&self, analysis: CityAnalysis) -> Result<String>;
}
