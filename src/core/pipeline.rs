//! The city analytics pipeline: ensure the dataset is on disk (downloading
//! the GeoNames archive when allowed), parse and analyze it, then render the
//! charts and the summary artifact.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Mutex;

use reqwest::Client;

use crate::config::chart::ChartStyle;
use crate::core::{analysis, loader};
use crate::domain::model::{CityAnalysis, CityRecord};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::cache::DatasetCache;
use crate::utils::error::{GeoError, Result};
use crate::viz::{
    self, render_bar_chart, render_distribution, Bar, BarChartSpec, DistributionSpec,
    ReferenceLine,
};

pub const TOP_CITIES_CHART: &str = "top_cities.png";
pub const FRONTIER_CHART: &str = "pareto_frontier.png";
pub const LATITUDE_CHART: &str = "latitude_population.png";
pub const LONGITUDE_CHART: &str = "longitude_population.png";
pub const SUMMARY_FILE: &str = "summary.json";

pub struct CityPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
    cache: Mutex<DatasetCache>,
    chart_style: ChartStyle,
}

impl<S: Storage, C: ConfigProvider> CityPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
            cache: Mutex::new(DatasetCache::new()),
            chart_style: ChartStyle::default(),
        }
    }

    pub fn with_chart_style(mut self, chart_style: ChartStyle) -> Self {
        self.chart_style = chart_style;
        self
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CityPipeline<S, C> {
    async fn extract(&self) -> Result<PathBuf> {
        let path = PathBuf::from(self.config.dataset_path());
        if path.exists() {
            tracing::debug!("using local dataset: {}", path.display());
            return Ok(path);
        }

        let url = self.config.dataset_url().ok_or_else(|| {
            GeoError::MissingConfigError {
                field: format!("dataset (no file at {} and downloads disabled)", path.display()),
            }
        })?;

        tracing::info!("dataset not found locally, downloading {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;

        let data = if url.ends_with(".zip") {
            unpack_zip(&body)?
        } else {
            body.to_vec()
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&path, &data)?;
        tracing::info!("dataset cached at {} ({} bytes)", path.display(), data.len());
        Ok(path)
    }

    async fn transform(&self, dataset: PathBuf) -> Result<CityAnalysis> {
        let (cities, report) = {
            let mut cache = self.cache.lock().map_err(|_| GeoError::ProcessingError {
                message: "dataset cache lock poisoned".to_string(),
            })?;
            loader::load_cities_cached(&dataset, &mut cache)?
        };

        if report.malformed + report.out_of_range > 0 {
            tracing::warn!(
                "skipped {} malformed and {} out-of-range rows out of {}",
                report.malformed,
                report.out_of_range,
                report.rows_read
            );
        }

        let min_population = self.config.min_population();
        let frontier = analysis::northern_frontier_indices(&cities, min_population);
        let summary = analysis::summarize(&cities, &frontier, min_population);

        Ok(CityAnalysis {
            dataset,
            cities,
            frontier,
            report,
            summary,
        })
    }

    async fn load(&self, result: CityAnalysis) -> Result<String> {
        let output_dir = PathBuf::from(self.config.output_path());
        std::fs::create_dir_all(&output_dir)?;
        let min_population = self.config.min_population();

        let top = analysis::top_northern_by_population(
            &result.cities,
            min_population,
            self.config.top_cities(),
        );
        render_bar_chart(
            &output_dir.join(TOP_CITIES_CHART),
            &BarChartSpec {
                title: "Northern Cities: Population vs Distance from North Pole".to_string(),
                x_desc: "Cities (ordered by distance from North Pole)".to_string(),
                y_desc: "Population".to_string(),
                bars: city_bars(&top),
                log_scale: false,
                color: viz::style::TOP_CITIES_COLOR,
            },
            &self.chart_style,
        )?;

        let mut frontier_cities: Vec<&CityRecord> =
            result.frontier.iter().map(|&i| &result.cities[i]).collect();
        frontier_cities.sort_by(|a, b| b.latitude.total_cmp(&a.latitude));
        render_bar_chart(
            &output_dir.join(FRONTIER_CHART),
            &BarChartSpec {
                title: "Largest-Northernmost Cities: Pareto Frontier".to_string(),
                x_desc: "Cities (ordered by distance from North Pole)".to_string(),
                y_desc: "Population (log scale)".to_string(),
                bars: city_bars(&frontier_cities),
                log_scale: true,
                color: viz::style::FRONTIER_COLOR,
            },
            &self.chart_style,
        )?;

        render_distribution(
            &output_dir.join(LATITUDE_CHART),
            &DistributionSpec {
                title: "Global Population Distribution by Latitude".to_string(),
                x_desc: "Latitude (degrees north/south)".to_string(),
                y_desc: "Total population".to_string(),
                x_min: -90.0,
                x_max: 90.0,
                bins: analysis::population_by_latitude_degree(&result.cities, min_population),
                references: latitude_references(),
                color: viz::style::LATITUDE_COLOR,
            },
            &self.chart_style,
        )?;

        render_distribution(
            &output_dir.join(LONGITUDE_CHART),
            &DistributionSpec {
                title: "Global Population Distribution by Longitude".to_string(),
                x_desc: "Longitude (degrees east/west)".to_string(),
                y_desc: "Total population".to_string(),
                x_min: -180.0,
                x_max: 180.0,
                bins: analysis::population_by_longitude_degree(&result.cities, min_population),
                references: vec![ReferenceLine {
                    position: 0.0,
                    label: "Prime Meridian".to_string(),
                }],
                color: viz::style::LONGITUDE_COLOR,
            },
            &self.chart_style,
        )?;

        let json = serde_json::to_vec_pretty(&result.summary)?;
        self.storage.write_file(SUMMARY_FILE, &json).await?;

        Ok(output_dir.display().to_string())
    }
}

fn city_bars(cities: &[&CityRecord]) -> Vec<Bar> {
    cities
        .iter()
        .map(|city| Bar {
            label: format!(
                "{} ({:.0} mi)",
                city.label(),
                analysis::miles_from_north_pole(city.latitude)
            ),
            value: city.population as f64,
        })
        .collect()
}

fn latitude_references() -> Vec<ReferenceLine> {
    [
        (0.0, "Equator"),
        (analysis::TROPIC_DEG, "Tropic of Cancer"),
        (-analysis::TROPIC_DEG, "Tropic of Capricorn"),
        (analysis::POLAR_CIRCLE_DEG, "Arctic Circle"),
        (-analysis::POLAR_CIRCLE_DEG, "Antarctic Circle"),
    ]
    .into_iter()
    .map(|(position, label)| ReferenceLine {
        position,
        label: label.to_string(),
    })
    .collect()
}

fn unpack_zip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))?;
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.name().ends_with(".txt") {
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            return Ok(data);
        }
    }
    Err(GeoError::ProcessingError {
        message: "archive contains no .txt dataset member".to_string(),
    })
}
