use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// One row of the cities dataset, reduced to the columns the analyses use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub geoname_id: u64,
    pub name: String,
    pub ascii_name: String,
    pub country_code: String,
    pub population: u64,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityRecord {
    /// Display label, e.g. "Oslo, NO". Falls back to the plain name when the
    /// record came from a source without country codes.
    pub fn label(&self) -> String {
        let name = if self.ascii_name.is_empty() {
            &self.name
        } else {
            &self.ascii_name
        };
        if self.country_code.is_empty() {
            name.clone()
        } else {
            format!("{}, {}", name, self.country_code)
        }
    }
}

/// A bare (population, latitude) point judged by the frontier filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrontierPoint {
    pub population: u64,
    pub latitude: f64,
}

/// Row accounting from one dataset parse.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub malformed: usize,
    pub out_of_range: usize,
}

/// Summary entry for a single city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityDigest {
    pub label: String,
    pub population: u64,
    pub latitude: f64,
    pub miles_from_north_pole: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HemisphereSplit {
    pub northern: u64,
    pub southern: u64,
}

/// Population totals per climate band (tropics at ±23.5°, polar circles at ±66.5°).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ClimateZones {
    pub tropical: u64,
    pub northern_temperate: u64,
    pub southern_temperate: u64,
    pub arctic: u64,
    pub antarctic: u64,
}

/// The serializable digest written as `summary.json` and echoed to the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_cities: usize,
    pub total_population: u64,
    pub northernmost: Option<CityDigest>,
    pub southernmost: Option<CityDigest>,
    pub largest: Option<CityDigest>,
    pub hemispheres: HemisphereSplit,
    pub climate_zones: ClimateZones,
    pub frontier: Vec<CityDigest>,
}

/// Everything the load stage needs to produce charts and the summary artifact.
#[derive(Debug, Clone)]
pub struct CityAnalysis {
    pub dataset: PathBuf,
    pub cities: Arc<Vec<CityRecord>>,
    /// Indices into `cities` of the population-vs-latitude frontier members
    /// (northern hemisphere, population floor applied), in input order.
    pub frontier: Vec<usize>,
    pub report: LoadReport,
    pub summary: AnalysisSummary,
}
