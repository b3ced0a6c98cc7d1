pub mod chart;
pub mod cli;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

/// Default download location of the GeoNames cities dataset.
pub const GEONAMES_CITIES_URL: &str = "https://download.geonames.org/export/dump/cities1000.zip";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "geolight")]
#[command(about = "City population analytics and charts")]
pub struct CliConfig {
    /// Path to the cities dataset (GeoNames tab-delimited format)
    #[arg(long, default_value = "cities1000.txt")]
    pub dataset: String,

    /// Download URL used when the dataset file is missing
    #[arg(long, default_value = GEONAMES_CITIES_URL)]
    pub dataset_url: String,

    /// Never download; fail when the dataset file is missing
    #[arg(long)]
    pub no_download: bool,

    /// Directory for generated charts and the summary artifact
    #[arg(long, default_value = "./charts")]
    pub output_path: String,

    /// How many of the largest northern cities to chart
    #[arg(long, default_value = "20")]
    pub top_cities: usize,

    /// Ignore cities below this population
    #[arg(long, default_value = "1")]
    pub min_population: u64,

    /// Optional TOML file with chart styling overrides
    #[arg(long)]
    pub chart_config: Option<String>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn dataset_path(&self) -> &str {
        &self.dataset
    }

    fn dataset_url(&self) -> Option<&str> {
        if self.no_download {
            None
        } else {
            Some(&self.dataset_url)
        }
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn top_cities(&self) -> usize {
        self.top_cities
    }

    fn min_population(&self) -> u64 {
        self.min_population
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("dataset", &self.dataset)?;
        validation::validate_path("output_path", &self.output_path)?;
        if !self.no_download {
            validation::validate_url("dataset_url", &self.dataset_url)?;
        }
        validation::validate_positive_number("top_cities", self.top_cities, 1)?;
        if let Some(path) = &self.chart_config {
            validation::validate_path("chart_config", path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            dataset: "cities1000.txt".to_string(),
            dataset_url: GEONAMES_CITIES_URL.to_string(),
            no_download: false,
            output_path: "./charts".to_string(),
            top_cities: 20,
            min_population: 1,
            chart_config: None,
            verbose: false,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_invalid_url_rejected_unless_download_disabled() {
        let mut config = base_config();
        config.dataset_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.no_download = true;
        assert!(config.validate().is_ok());
        assert!(config.dataset_url().is_none());
    }

    #[test]
    fn test_zero_top_cities_rejected() {
        let mut config = base_config();
        config.top_cities = 0;
        assert!(config.validate().is_err());
    }
}
