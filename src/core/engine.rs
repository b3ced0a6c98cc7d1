use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// Runs the extract/transform/load stages in order with progress logging.
pub struct AnalysisEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> AnalysisEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("locating dataset...");
        let dataset = self.pipeline.extract().await?;
        tracing::info!("dataset ready: {}", dataset.display());

        tracing::info!("parsing and analyzing...");
        let analysis = self.pipeline.transform(dataset).await?;
        tracing::info!(
            "analyzed {} cities ({} rows skipped), {} on the frontier",
            analysis.summary.total_cities,
            analysis.report.malformed + analysis.report.out_of_range,
            analysis.frontier.len()
        );

        tracing::info!("rendering charts...");
        let output_path = self.pipeline.load(analysis).await?;
        tracing::info!("output saved to: {}", output_path);

        Ok(output_path)
    }
}
