//! Derived columns and aggregations over the city dataset: distance from the
//! pole, top-N selections, per-degree population bins, hemisphere and climate
//! zone totals, and the combined run summary.

use std::collections::BTreeMap;

use crate::core::pareto;
use crate::domain::model::{
    AnalysisSummary, CityDigest, CityRecord, ClimateZones, HemisphereSplit,
};

/// Earth's circumference in miles, for the distance-from-pole column.
pub const EARTH_CIRCUMFERENCE_MILES: f64 = 24_901.0;
/// Climate band edges in degrees latitude.
pub const TROPIC_DEG: f64 = 23.5;
pub const POLAR_CIRCLE_DEG: f64 = 66.5;

pub fn miles_from_north_pole(latitude: f64) -> f64 {
    (90.0 - latitude) * (EARTH_CIRCUMFERENCE_MILES / 360.0)
}

pub fn digest(city: &CityRecord) -> CityDigest {
    CityDigest {
        label: city.label(),
        population: city.population,
        latitude: city.latitude,
        miles_from_north_pole: miles_from_north_pole(city.latitude),
    }
}

fn populated<'a>(
    cities: &'a [CityRecord],
    min_population: u64,
) -> impl Iterator<Item = &'a CityRecord> {
    let floor = min_population.max(1);
    cities.iter().filter(move |c| c.population >= floor)
}

/// Northern-hemisphere cities above the population floor, ordered by
/// distance from the North Pole (closest first), capped at the `n` largest.
pub fn top_northern_by_population(
    cities: &[CityRecord],
    min_population: u64,
    n: usize,
) -> Vec<&CityRecord> {
    let mut northern: Vec<&CityRecord> = populated(cities, min_population)
        .filter(|c| c.latitude > 0.0)
        .collect();
    northern.sort_by(|a, b| b.population.cmp(&a.population));
    northern.truncate(n);
    northern.sort_by(|a, b| b.latitude.total_cmp(&a.latitude));
    northern
}

/// Frontier indices into `cities` over the northern, population-filtered
/// subset: the cities no other city beats in both size and northern latitude.
pub fn northern_frontier_indices(cities: &[CityRecord], min_population: u64) -> Vec<usize> {
    let floor = min_population.max(1);
    let subset: Vec<(usize, &CityRecord)> = cities
        .iter()
        .enumerate()
        .filter(|(_, c)| c.latitude > 0.0 && c.population >= floor)
        .collect();
    let refs: Vec<&CityRecord> = subset.iter().map(|&(_, c)| c).collect();
    pareto::frontier_indices(&refs)
        .into_iter()
        .map(|pos| subset[pos].0)
        .collect()
}

/// Total population per whole degree, empty bins omitted. The bin value is
/// the lower edge: latitude 59.91 lands in bin 59, -0.5 in bin -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeBin {
    pub degree: i32,
    pub population: u64,
}

pub fn population_by_latitude_degree(
    cities: &[CityRecord],
    min_population: u64,
) -> Vec<DegreeBin> {
    bin_by_degree(
        populated(cities, min_population).map(|c| (c.latitude, c.population)),
        -90,
        89,
    )
}

pub fn population_by_longitude_degree(
    cities: &[CityRecord],
    min_population: u64,
) -> Vec<DegreeBin> {
    bin_by_degree(
        populated(cities, min_population).map(|c| (c.longitude, c.population)),
        -180,
        179,
    )
}

fn bin_by_degree(
    values: impl Iterator<Item = (f64, u64)>,
    min_degree: i32,
    max_degree: i32,
) -> Vec<DegreeBin> {
    let mut bins: BTreeMap<i32, u64> = BTreeMap::new();
    for (coordinate, population) in values {
        let degree = (coordinate.floor() as i32).clamp(min_degree, max_degree);
        *bins.entry(degree).or_insert(0) += population;
    }
    bins.into_iter()
        .map(|(degree, population)| DegreeBin { degree, population })
        .collect()
}

pub fn hemisphere_split(cities: &[CityRecord], min_population: u64) -> HemisphereSplit {
    let mut split = HemisphereSplit::default();
    for city in populated(cities, min_population) {
        if city.latitude >= 0.0 {
            split.northern += city.population;
        } else {
            split.southern += city.population;
        }
    }
    split
}

pub fn climate_zones(cities: &[CityRecord], min_population: u64) -> ClimateZones {
    let mut zones = ClimateZones::default();
    for city in populated(cities, min_population) {
        let lat = city.latitude;
        if lat >= POLAR_CIRCLE_DEG {
            zones.arctic += city.population;
        } else if lat <= -POLAR_CIRCLE_DEG {
            zones.antarctic += city.population;
        } else if lat.abs() <= TROPIC_DEG {
            zones.tropical += city.population;
        } else if lat > 0.0 {
            zones.northern_temperate += city.population;
        } else {
            zones.southern_temperate += city.population;
        }
    }
    zones
}

/// The combined digest written as `summary.json`. `frontier` holds indices
/// into `cities`, as produced by [`northern_frontier_indices`].
pub fn summarize(
    cities: &[CityRecord],
    frontier: &[usize],
    min_population: u64,
) -> AnalysisSummary {
    let kept: Vec<&CityRecord> = populated(cities, min_population).collect();

    let northernmost = kept
        .iter()
        .max_by(|a, b| a.latitude.total_cmp(&b.latitude))
        .map(|c| digest(c));
    let southernmost = kept
        .iter()
        .min_by(|a, b| a.latitude.total_cmp(&b.latitude))
        .map(|c| digest(c));
    let largest = kept.iter().max_by_key(|c| c.population).map(|c| digest(c));

    let mut frontier_digests: Vec<CityDigest> =
        frontier.iter().map(|&i| digest(&cities[i])).collect();
    frontier_digests.sort_by(|a, b| b.latitude.total_cmp(&a.latitude));

    AnalysisSummary {
        total_cities: kept.len(),
        total_population: kept.iter().map(|c| c.population).sum(),
        northernmost,
        southernmost,
        largest,
        hemispheres: hemisphere_split(cities, min_population),
        climate_zones: climate_zones(cities, min_population),
        frontier: frontier_digests,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn city(name: &str, population: u64, latitude: f64, longitude: f64) -> CityRecord {
        CityRecord {
            geoname_id: 0,
            name: name.to_string(),
            ascii_name: name.to_string(),
            country_code: "XX".to_string(),
            population,
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_miles_from_north_pole() {
        assert_relative_eq!(miles_from_north_pole(90.0), 0.0);
        assert_relative_eq!(
            miles_from_north_pole(0.0),
            EARTH_CIRCUMFERENCE_MILES / 4.0,
            epsilon = 1e-9
        );
        assert!(miles_from_north_pole(60.0) < miles_from_north_pole(59.0));
    }

    #[test]
    fn test_top_northern_filters_and_orders() {
        let cities = vec![
            city("Equatorville", 5_000_000, -1.0, 0.0),
            city("Bigtown", 3_000_000, 40.0, 0.0),
            city("Northville", 500_000, 65.0, 0.0),
            city("Midtown", 1_000_000, 50.0, 0.0),
            city("Ghost", 0, 70.0, 0.0),
        ];
        let top = top_northern_by_population(&cities, 1, 2);
        // Southern and zero-population cities excluded, two largest kept,
        // returned northernmost first.
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Midtown");
        assert_eq!(top[1].name, "Bigtown");
    }

    #[test]
    fn test_frontier_indices_map_back_to_input() {
        let cities = vec![
            city("South", 9_000_000, -30.0, 0.0),
            city("Big", 2_000_000, 10.0, 0.0),
            city("North", 500_000, 70.0, 0.0),
            city("Mid", 1_000_000, 60.0, 0.0),
            city("Shadowed", 400_000, 60.0, 0.0),
        ];
        let frontier = northern_frontier_indices(&cities, 1);
        // Southern city ignored; Shadowed loses to Mid on both axes.
        assert_eq!(frontier, vec![1, 2, 3]);
    }

    #[test]
    fn test_latitude_binning() {
        let cities = vec![
            city("A", 100, 59.91, 10.75),
            city("B", 50, 59.05, 11.0),
            city("C", 25, -0.5, 0.0),
            city("D", 10, 90.0, 0.0),
        ];
        let bins = population_by_latitude_degree(&cities, 1);
        assert_eq!(
            bins,
            vec![
                DegreeBin {
                    degree: -1,
                    population: 25
                },
                DegreeBin {
                    degree: 59,
                    population: 150
                },
                // The 90.0 edge folds into the last bin.
                DegreeBin {
                    degree: 89,
                    population: 10
                },
            ]
        );
    }

    #[test]
    fn test_longitude_binning_clamps_edges() {
        let cities = vec![
            city("A", 7, -180.0, -180.0),
            city("B", 3, 0.0, 180.0),
        ];
        let bins = population_by_longitude_degree(&cities, 1);
        assert_eq!(
            bins,
            vec![
                DegreeBin {
                    degree: -180,
                    population: 7
                },
                DegreeBin {
                    degree: 179,
                    population: 3
                },
            ]
        );
    }

    #[test]
    fn test_hemisphere_and_climate_totals() {
        let cities = vec![
            city("Tropic", 10, 5.0, 0.0),
            city("NorthTemp", 20, 45.0, 0.0),
            city("SouthTemp", 30, -45.0, 0.0),
            city("Arctic", 5, 68.0, 0.0),
            city("Antarctic", 1, -70.0, 0.0),
        ];
        let split = hemisphere_split(&cities, 1);
        assert_eq!(split.northern, 35);
        assert_eq!(split.southern, 31);

        let zones = climate_zones(&cities, 1);
        assert_eq!(zones.tropical, 10);
        assert_eq!(zones.northern_temperate, 20);
        assert_eq!(zones.southern_temperate, 30);
        assert_eq!(zones.arctic, 5);
        assert_eq!(zones.antarctic, 1);
    }

    #[test]
    fn test_summarize() {
        let cities = vec![
            city("Big", 2_000_000, 10.0, 20.0),
            city("North", 500_000, 70.0, 10.0),
            city("South", 100_000, -30.0, 0.0),
            city("Empty", 0, 80.0, 0.0),
        ];
        let frontier = northern_frontier_indices(&cities, 1);
        let summary = summarize(&cities, &frontier, 1);

        assert_eq!(summary.total_cities, 3);
        assert_eq!(summary.total_population, 2_600_000);
        assert_eq!(summary.northernmost.as_ref().unwrap().label, "North, XX");
        assert_eq!(summary.southernmost.as_ref().unwrap().label, "South, XX");
        assert_eq!(summary.largest.as_ref().unwrap().population, 2_000_000);
        // Frontier digests come back northernmost first.
        assert_eq!(summary.frontier.len(), 2);
        assert_eq!(summary.frontier[0].label, "North, XX");
        assert_eq!(summary.frontier[1].label, "Big, XX");
    }

    #[test]
    fn test_empty_dataset_summarizes_to_zeroes() {
        let summary = summarize(&[], &[], 1);
        assert_eq!(summary.total_cities, 0);
        assert!(summary.northernmost.is_none());
        assert!(summary.frontier.is_empty());
    }
}
