pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod viz;

pub use config::{chart::ChartStyle, cli::LocalStorage, CliConfig};
pub use core::{engine::AnalysisEngine, pipeline::CityPipeline};
pub use utils::error::{GeoError, Result};
