//! Latitude x day-of-year heatmap of daylight hours.

use std::path::Path;

use plotters::prelude::*;

use crate::config::chart::ChartStyle;
use crate::core::daylight::SeasonGrid;
use crate::utils::error::{GeoError, Result};

pub fn render_season_heatmap(
    path: &Path,
    grid: &SeasonGrid,
    title: &str,
    style: &ChartStyle,
) -> Result<()> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(GeoError::render)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (style.font.as_str(), 28))
        .margin(16)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(1.0..366.0, -90.0..90.0)
        .map_err(GeoError::render)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Day of year")
        .y_desc("Latitude (degrees)")
        .axis_desc_style((style.font.as_str(), 16))
        .label_style((style.font.as_str(), 12))
        .draw()
        .map_err(GeoError::render)?;

    chart
        .draw_series(grid.cells.iter().map(|cell| {
            let x0 = cell.day as f64;
            let x1 = ((cell.day + grid.day_step) as f64).min(366.0);
            let y0 = cell.latitude;
            let y1 = (cell.latitude + grid.lat_step).min(90.0);
            Rectangle::new([(x0, y0), (x1, y1)], daylight_color(cell.hours).filled())
        }))
        .map_err(GeoError::render)?;

    root.present().map_err(GeoError::render)?;
    Ok(())
}

/// Dark navy (polar night) through teal to bright yellow, with saturated
/// polar day called out in red, mirroring the color story of the original
/// dashboard.
pub fn daylight_color(hours: f64) -> RGBColor {
    const NIGHT: (u8, u8, u8) = (22, 26, 84);
    const MIDDAY: (u8, u8, u8) = (38, 166, 154);
    const FULL: (u8, u8, u8) = (255, 235, 59);
    const POLAR_DAY: (u8, u8, u8) = (229, 57, 53);

    let hours = hours.clamp(0.0, 24.0);
    if hours >= 24.0 - 1e-9 {
        let (r, g, b) = POLAR_DAY;
        return RGBColor(r, g, b);
    }

    let (from, to, t) = if hours < 12.0 {
        (NIGHT, MIDDAY, hours / 12.0)
    } else {
        (MIDDAY, FULL, (hours - 12.0) / 12.0)
    };
    RGBColor(
        lerp(from.0, to.0, t),
        lerp(from.1, to.1, t),
        lerp(from.2, to.2, t),
    )
}

fn lerp(from: u8, to: u8, t: f64) -> u8 {
    (from as f64 + (to as f64 - from as f64) * t).round() as u8
}
