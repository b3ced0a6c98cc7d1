pub mod analysis;
pub mod animation;
pub mod daylight;
pub mod engine;
pub mod loader;
pub mod pareto;
pub mod pipeline;

pub use crate::domain::model::{AnalysisSummary, CityAnalysis, CityRecord, LoadReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
