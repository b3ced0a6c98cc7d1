//! Line charts: daylight latitude profiles, year series, and multi-latitude
//! comparisons.

use std::path::Path;

use plotters::prelude::*;

use crate::config::chart::ChartStyle;
use crate::utils::error::{GeoError, Result};
use crate::viz::style::SERIES_COLORS;

#[derive(Debug, Clone)]
pub struct LineData {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct LineChartSpec {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub series: Vec<LineData>,
}

pub fn render_line_chart(path: &Path, spec: &LineChartSpec, style: &ChartStyle) -> Result<()> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(GeoError::render)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, (style.font.as_str(), 28))
        .margin(16)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(spec.x_min..spec.x_max, spec.y_min..spec.y_max)
        .map_err(GeoError::render)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_desc.as_str())
        .y_desc(spec.y_desc.as_str())
        .axis_desc_style((style.font.as_str(), 16))
        .label_style((style.font.as_str(), 12))
        .draw()
        .map_err(GeoError::render)?;

    for (i, series) in spec.series.iter().enumerate() {
        let color = SERIES_COLORS[i % SERIES_COLORS.len()];
        chart
            .draw_series(LineSeries::new(
                series.points.iter().copied(),
                color.stroke_width(2),
            ))
            .map_err(GeoError::render)?
            .label(series.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
    }

    if spec.series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .label_font((style.font.as_str(), 13))
            .draw()
            .map_err(GeoError::render)?;
    }

    root.present().map_err(GeoError::render)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::png_magic_ok;

    #[test]
    fn test_render_single_series() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.png");
        let spec = LineChartSpec {
            title: "Daylight by latitude".to_string(),
            x_desc: "Latitude (degrees)".to_string(),
            y_desc: "Daylight (hours)".to_string(),
            x_min: -90.0,
            x_max: 90.0,
            y_min: 0.0,
            y_max: 24.0,
            series: vec![LineData {
                label: "Jun 21".to_string(),
                points: (-90..=90).map(|lat| (lat as f64, 12.0)).collect(),
            }],
        };
        render_line_chart(&path, &spec, &ChartStyle::default()).unwrap();
        assert!(png_magic_ok(&path));
    }

    #[test]
    fn test_render_comparison_with_legend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compare.png");
        let series = (0..4)
            .map(|i| LineData {
                label: format!("{} deg", i * 20),
                points: (1..=365)
                    .map(|day| (day as f64, 12.0 + (i as f64) * (day as f64 / 365.0)))
                    .collect(),
            })
            .collect();
        let spec = LineChartSpec {
            title: "Comparison".to_string(),
            x_desc: "Day of year".to_string(),
            y_desc: "Daylight (hours)".to_string(),
            x_min: 1.0,
            x_max: 365.0,
            y_min: 0.0,
            y_max: 24.0,
            series,
        };
        render_line_chart(&path, &spec, &ChartStyle::default()).unwrap();
        assert!(png_magic_ok(&path));
    }
}
