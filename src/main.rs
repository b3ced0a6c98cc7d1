use clap::Parser;
use geolight::config::chart::{ChartConfig, ChartStyle};
use geolight::utils::{logger, validation::Validate};
use geolight::{AnalysisEngine, CityPipeline, CliConfig, LocalStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    logger::init_cli_logger(config.verbose);

    tracing::info!("starting geolight");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("configuration validation failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }

    let chart_style = match &config.chart_config {
        Some(path) => ChartStyle::from(&ChartConfig::from_file(std::path::Path::new(path))?),
        None => ChartStyle::default(),
    };

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = CityPipeline::new(storage, config).with_chart_style(chart_style);
    let engine = AnalysisEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("Charts and summary written to {}", output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("analysis failed: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
