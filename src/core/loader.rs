//! Dataset parsing: GeoNames tab-delimited rows (19 columns, no header) or a
//! simple comma-delimited fallback (name, population, latitude, longitude).
//! Malformed rows are skipped with a warning and counted, never fatal.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use csv::ReaderBuilder;

use crate::domain::model::{CityRecord, LoadReport};
use crate::utils::cache::DatasetCache;
use crate::utils::error::Result;

// GeoNames cities1000 column layout.
const COL_GEONAMEID: usize = 0;
const COL_NAME: usize = 1;
const COL_ASCIINAME: usize = 2;
const COL_LATITUDE: usize = 4;
const COL_LONGITUDE: usize = 5;
const COL_COUNTRY: usize = 8;
const COL_POPULATION: usize = 14;
const GEONAMES_MIN_COLUMNS: usize = 15;

// Comma fallback column layout.
const CSV_NAME: usize = 0;
const CSV_POPULATION: usize = 1;
const CSV_LATITUDE: usize = 2;
const CSV_LONGITUDE: usize = 3;
const CSV_MIN_COLUMNS: usize = 4;

/// Load and parse a dataset file, sniffing the delimiter from the first line.
pub fn load_cities(path: &Path) -> Result<(Vec<CityRecord>, LoadReport)> {
    let text = std::fs::read_to_string(path)?;
    let delimiter = sniff_delimiter(&text);
    parse_cities(text.as_bytes(), delimiter)
}

/// Cached variant of [`load_cities`]; parses only when the cache has no fresh
/// entry for the file.
pub fn load_cities_cached(
    path: &Path,
    cache: &mut DatasetCache,
) -> Result<(Arc<Vec<CityRecord>>, LoadReport)> {
    if let Some((cities, report)) = cache.fetch(path) {
        tracing::debug!("dataset cache hit: {}", path.display());
        return Ok((cities, report));
    }

    let (cities, report) = load_cities(path)?;
    let cities = Arc::new(cities);
    cache.store(path, Arc::clone(&cities), report);
    Ok((cities, report))
}

fn sniff_delimiter(text: &str) -> u8 {
    match text.lines().next() {
        Some(line) if line.contains('\t') => b'\t',
        _ => b',',
    }
}

/// Parse delimited rows into city records. Rows that fail to parse or carry
/// out-of-range coordinates are skipped and tallied in the report.
pub fn parse_cities<R: Read>(reader: R, delimiter: u8) -> Result<(Vec<CityRecord>, LoadReport)> {
    // GeoNames rows are unquoted; disabling quote handling keeps names
    // containing quote characters intact.
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .quoting(delimiter != b'\t')
        .from_reader(reader);

    let mut cities = Vec::new();
    let mut report = LoadReport::default();

    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        report.rows_read += 1;

        let parsed = if delimiter == b'\t' {
            parse_geonames_row(&record)
        } else {
            parse_csv_row(&record)
        };

        match parsed {
            RowOutcome::City(city) => {
                report.rows_kept += 1;
                cities.push(city);
            }
            RowOutcome::Malformed(reason) => {
                report.malformed += 1;
                tracing::warn!("skipping malformed row {}: {}", row + 1, reason);
            }
            RowOutcome::OutOfRange(reason) => {
                report.out_of_range += 1;
                tracing::warn!("skipping out-of-range row {}: {}", row + 1, reason);
            }
        }
    }

    Ok((cities, report))
}

enum RowOutcome {
    City(CityRecord),
    Malformed(String),
    OutOfRange(String),
}

fn parse_geonames_row(record: &csv::StringRecord) -> RowOutcome {
    if record.len() < GEONAMES_MIN_COLUMNS {
        return RowOutcome::Malformed(format!(
            "expected at least {} columns, found {}",
            GEONAMES_MIN_COLUMNS,
            record.len()
        ));
    }

    let geoname_id = match record[COL_GEONAMEID].trim().parse::<u64>() {
        Ok(id) => id,
        Err(_) => {
            return RowOutcome::Malformed(format!(
                "geonameid is not an integer: {:?}",
                &record[COL_GEONAMEID]
            ))
        }
    };

    build_city(
        geoname_id,
        &record[COL_NAME],
        &record[COL_ASCIINAME],
        &record[COL_COUNTRY],
        &record[COL_POPULATION],
        &record[COL_LATITUDE],
        &record[COL_LONGITUDE],
    )
}

fn parse_csv_row(record: &csv::StringRecord) -> RowOutcome {
    if record.len() < CSV_MIN_COLUMNS {
        return RowOutcome::Malformed(format!(
            "expected at least {} columns, found {}",
            CSV_MIN_COLUMNS,
            record.len()
        ));
    }

    build_city(
        0,
        &record[CSV_NAME],
        &record[CSV_NAME],
        "",
        &record[CSV_POPULATION],
        &record[CSV_LATITUDE],
        &record[CSV_LONGITUDE],
    )
}

fn build_city(
    geoname_id: u64,
    name: &str,
    ascii_name: &str,
    country_code: &str,
    population: &str,
    latitude: &str,
    longitude: &str,
) -> RowOutcome {
    let population = match population.trim().parse::<i64>() {
        Ok(p) if p < 0 => {
            return RowOutcome::Malformed(format!("negative population: {}", p));
        }
        Ok(p) => p as u64,
        Err(_) => {
            return RowOutcome::Malformed(format!("population is not numeric: {:?}", population));
        }
    };

    let latitude = match latitude.trim().parse::<f64>() {
        Ok(lat) => lat,
        Err(_) => {
            return RowOutcome::Malformed(format!("latitude is not numeric: {:?}", latitude));
        }
    };
    let longitude = match longitude.trim().parse::<f64>() {
        Ok(lon) => lon,
        Err(_) => {
            return RowOutcome::Malformed(format!("longitude is not numeric: {:?}", longitude));
        }
    };

    if !(-90.0..=90.0).contains(&latitude) {
        return RowOutcome::OutOfRange(format!("latitude {} outside [-90, 90]", latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return RowOutcome::OutOfRange(format!("longitude {} outside [-180, 180]", longitude));
    }

    RowOutcome::City(CityRecord {
        geoname_id,
        name: name.to_string(),
        ascii_name: ascii_name.to_string(),
        country_code: country_code.to_string(),
        population,
        latitude,
        longitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A GeoNames-shaped row with the analysis columns filled in.
    fn geonames_row(id: u64, name: &str, lat: f64, lon: f64, country: &str, pop: &str) -> String {
        format!(
            "{id}\t{name}\t{name}\t\t{lat}\t{lon}\tP\tPPL\t{country}\t\t\t\t\t\t{pop}\t\t42\tEurope/Oslo\t2024-01-01",
        )
    }

    #[test]
    fn test_parse_geonames_rows() {
        let data = [
            geonames_row(3143244, "Oslo", 59.91273, 10.74609, "NO", "580000"),
            geonames_row(2147714, "Sydney", -33.86785, 151.20732, "AU", "4627345"),
        ]
        .join("\n");

        let (cities, report) = parse_cities(data.as_bytes(), b'\t').unwrap();
        assert_eq!(report.rows_read, 2);
        assert_eq!(report.rows_kept, 2);
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].geoname_id, 3143244);
        assert_eq!(cities[0].label(), "Oslo, NO");
        assert_eq!(cities[1].population, 4_627_345);
        assert!(cities[1].latitude < 0.0);
    }

    #[test]
    fn test_malformed_rows_skipped_not_fatal() {
        let data = [
            geonames_row(1, "Good", 10.0, 20.0, "XX", "1000"),
            "too\tshort".to_string(),
            geonames_row(2, "BadPop", 10.0, 20.0, "XX", "not-a-number"),
            geonames_row(3, "NegPop", 10.0, 20.0, "XX", "-5"),
            geonames_row(4, "AlsoGood", 11.0, 21.0, "XX", "2000"),
        ]
        .join("\n");

        let (cities, report) = parse_cities(data.as_bytes(), b'\t').unwrap();
        assert_eq!(report.rows_read, 5);
        assert_eq!(report.rows_kept, 2);
        assert_eq!(report.malformed, 3);
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].name, "Good");
        assert_eq!(cities[1].name, "AlsoGood");
    }

    #[test]
    fn test_out_of_range_coordinates_skipped() {
        let data = [
            geonames_row(1, "TooNorth", 91.0, 0.0, "XX", "1000"),
            geonames_row(2, "TooEast", 10.0, 181.0, "XX", "1000"),
            geonames_row(3, "Edge", 90.0, 180.0, "XX", "1000"),
        ]
        .join("\n");

        let (cities, report) = parse_cities(data.as_bytes(), b'\t').unwrap();
        assert_eq!(report.out_of_range, 2);
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "Edge");
    }

    #[test]
    fn test_csv_fallback_with_header() {
        let data = "name,population,latitude,longitude\n\
                    Oslo,580000,59.91,10.75\n\
                    Quito,1600000,-0.23,-78.52\n";

        let (cities, report) = parse_cities(data.as_bytes(), b',').unwrap();
        // The header row fails numeric parsing and is skipped like any
        // malformed row.
        assert_eq!(report.malformed, 1);
        assert_eq!(report.rows_kept, 2);
        assert_eq!(cities[0].label(), "Oslo");
        assert_eq!(cities[0].country_code, "");
    }

    #[test]
    fn test_empty_input() {
        let (cities, report) = parse_cities("".as_bytes(), b'\t').unwrap();
        assert!(cities.is_empty());
        assert_eq!(report.rows_read, 0);
    }

    #[test]
    fn test_load_cities_sniffs_tab() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            geonames_row(1, "Oslo", 59.91, 10.75, "NO", "580000").as_bytes(),
        )
        .unwrap();

        let (cities, report) = load_cities(file.path()).unwrap();
        assert_eq!(report.rows_kept, 1);
        assert_eq!(cities[0].name, "Oslo");
    }

    #[test]
    fn test_load_cities_cached_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            geonames_row(1, "Oslo", 59.91, 10.75, "NO", "580000").as_bytes(),
        )
        .unwrap();

        let mut cache = DatasetCache::new();
        let (first, _) = load_cities_cached(file.path(), &mut cache).unwrap();
        let (second, report) = load_cities_cached(file.path(), &mut cache).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(report.rows_kept, 1);
        assert_eq!(cache.len(), 1);
    }
}
