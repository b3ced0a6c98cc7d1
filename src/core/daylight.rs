//! Daylight duration from the closed-form sunrise equation.
//!
//! The declination formula is kept in degree form and converted explicitly
//! (`.to_radians()`), so no term ever mixes implicit units:
//!
//! ```text
//! declination = 23.45 * sin(radians(360 * (284 + day) / 365))
//! cos_h       = -tan(lat) * tan(declination)
//! hours       = 2 * acos(cos_h) / 15        (15 deg of hour angle = 1 hour)
//! ```
//!
//! Only the trigonometric result is clamped (polar day/night); inputs outside
//! their geographic domain are rejected, never clamped.

use chrono::{Datelike, NaiveDate};

use crate::utils::error::{GeoError, Result};

/// Earth's axial tilt in degrees, the amplitude of the declination cycle.
pub const AXIAL_TILT_DEG: f64 = 23.45;
/// Latitude of the polar circles in degrees.
pub const POLAR_CIRCLE_DEG: f64 = 66.5;
/// Largest valid day-of-year (leap years).
pub const MAX_DAY_OF_YEAR: u32 = 366;

const DEGREES_PER_HOUR: f64 = 15.0;
const YEAR_DAYS: f64 = 365.0;

fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) || latitude.is_nan() {
        return Err(GeoError::DomainError {
            field: "latitude",
            value: latitude.to_string(),
            reason: "latitude must be within [-90, 90] degrees".to_string(),
        });
    }
    Ok(())
}

fn check_day_of_year(day_of_year: u32) -> Result<()> {
    if !(1..=MAX_DAY_OF_YEAR).contains(&day_of_year) {
        return Err(GeoError::DomainError {
            field: "day_of_year",
            value: day_of_year.to_string(),
            reason: format!("day of year must be within [1, {}]", MAX_DAY_OF_YEAR),
        });
    }
    Ok(())
}

/// Solar declination in degrees for a day of year (1-based).
/// Peaks near +23.45 around day 172 and -23.45 around day 355.
pub fn solar_declination(day_of_year: u32) -> Result<f64> {
    check_day_of_year(day_of_year)?;
    let phase = (360.0 * (284.0 + day_of_year as f64) / YEAR_DAYS).to_radians();
    Ok(AXIAL_TILT_DEG * phase.sin())
}

/// Sunrise hour angle in degrees for a latitude and declination, both in
/// degrees. Saturates at 0 (sun never rises) and 180 (sun never sets).
/// Callers are expected to have validated the latitude.
pub fn hour_angle_deg(latitude: f64, declination: f64) -> f64 {
    let cos_h = -latitude.to_radians().tan() * declination.to_radians().tan();
    if cos_h >= 1.0 {
        0.0
    } else if cos_h <= -1.0 {
        180.0
    } else {
        cos_h.acos().to_degrees()
    }
}

/// Daylight duration in hours for a latitude (degrees, north positive) and a
/// 1-based day of year. Returns exactly 0.0 during polar night and exactly
/// 24.0 during polar day.
pub fn daylight_hours(latitude: f64, day_of_year: u32) -> Result<f64> {
    check_latitude(latitude)?;
    let declination = solar_declination(day_of_year)?;
    Ok(2.0 * hour_angle_deg(latitude, declination) / DEGREES_PER_HOUR)
}

/// Daylight hours sampled over a latitude band for one day.
pub fn latitude_profile(
    day_of_year: u32,
    lat_min: f64,
    lat_max: f64,
    step: f64,
) -> Result<Vec<(f64, f64)>> {
    check_latitude(lat_min)?;
    check_latitude(lat_max)?;
    if lat_min > lat_max {
        return Err(GeoError::DomainError {
            field: "latitude_range",
            value: format!("{}..{}", lat_min, lat_max),
            reason: "range start must not exceed range end".to_string(),
        });
    }
    if !(step > 0.0) {
        return Err(GeoError::DomainError {
            field: "latitude_step",
            value: step.to_string(),
            reason: "step must be positive".to_string(),
        });
    }

    let declination = solar_declination(day_of_year)?;
    let samples = ((lat_max - lat_min) / step).round() as usize;
    let mut profile = Vec::with_capacity(samples + 1);
    for i in 0..=samples {
        let lat = (lat_min + i as f64 * step).min(lat_max);
        profile.push((lat, 2.0 * hour_angle_deg(lat, declination) / DEGREES_PER_HOUR));
    }
    Ok(profile)
}

/// Daylight hours at one latitude for every day of a 365-day year.
pub fn year_series(latitude: f64) -> Result<Vec<(u32, f64)>> {
    check_latitude(latitude)?;
    (1..=365)
        .map(|day| daylight_hours(latitude, day).map(|h| (day, h)))
        .collect()
}

/// One cell of the latitude x day-of-year grid. `day` and `latitude` are the
/// lower edge of the cell; `hours` is sampled at the latitude midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub day: u32,
    pub latitude: f64,
    pub hours: f64,
}

/// Daylight over the whole year and the full latitude range, for heatmaps.
/// Daylight does not depend on longitude, so one row per latitude suffices.
#[derive(Debug, Clone)]
pub struct SeasonGrid {
    pub lat_step: f64,
    pub day_step: u32,
    pub cells: Vec<GridCell>,
}

pub fn season_grid(lat_step: f64, day_step: u32) -> Result<SeasonGrid> {
    if !(lat_step > 0.0) || lat_step > 90.0 {
        return Err(GeoError::DomainError {
            field: "lat_step",
            value: lat_step.to_string(),
            reason: "latitude step must be in (0, 90]".to_string(),
        });
    }
    if day_step == 0 || day_step > 365 {
        return Err(GeoError::DomainError {
            field: "day_step",
            value: day_step.to_string(),
            reason: "day step must be in [1, 365]".to_string(),
        });
    }

    let mut cells = Vec::new();
    let mut day = 1u32;
    while day <= 365 {
        let declination = solar_declination(day)?;
        let mut lat = -90.0f64;
        while lat < 90.0 {
            let mid = (lat + lat_step / 2.0).min(90.0);
            cells.push(GridCell {
                day,
                latitude: lat,
                hours: 2.0 * hour_angle_deg(mid, declination) / DEGREES_PER_HOUR,
            });
            lat += lat_step;
        }
        day += day_step;
    }
    Ok(SeasonGrid {
        lat_step,
        day_step,
        cells,
    })
}

/// 1-based day of year for a calendar date.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Calendar date for a 1-based day of year, e.g. for chart titles.
pub fn date_of_day(year: i32, day_of_year: u32) -> Result<NaiveDate> {
    NaiveDate::from_yo_opt(year, day_of_year).ok_or_else(|| GeoError::DomainError {
        field: "day_of_year",
        value: day_of_year.to_string(),
        reason: format!("not a valid day of year {}", year),
    })
}
