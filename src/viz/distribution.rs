//! Per-degree population distribution charts over latitude or longitude.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::config::chart::ChartStyle;
use crate::core::analysis::DegreeBin;
use crate::utils::error::{GeoError, Result};
use crate::viz::style::{format_population, REFERENCE_COLOR};

/// A labeled vertical marker, e.g. the equator or a polar circle.
#[derive(Debug, Clone)]
pub struct ReferenceLine {
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct DistributionSpec {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub x_min: f64,
    pub x_max: f64,
    pub bins: Vec<DegreeBin>,
    pub references: Vec<ReferenceLine>,
    pub color: RGBColor,
}

pub fn render_distribution(path: &Path, spec: &DistributionSpec, style: &ChartStyle) -> Result<()> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(GeoError::render)?;

    let y_max = spec
        .bins
        .iter()
        .map(|b| b.population as f64)
        .fold(0.0, f64::max)
        .max(1.0)
        * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, (style.font.as_str(), 28))
        .margin(16)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(spec.x_min..spec.x_max, 0.0..y_max)
        .map_err(GeoError::render)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_label_formatter(&|v| format_population(*v))
        .x_desc(spec.x_desc.as_str())
        .y_desc(spec.y_desc.as_str())
        .axis_desc_style((style.font.as_str(), 16))
        .label_style((style.font.as_str(), 12))
        .draw()
        .map_err(GeoError::render)?;

    chart
        .draw_series(spec.bins.iter().map(|bin| {
            let x0 = bin.degree as f64 + 0.1;
            let x1 = bin.degree as f64 + 0.9;
            Rectangle::new([(x0, 0.0), (x1, bin.population as f64)], spec.color.filled())
        }))
        .map_err(GeoError::render)?;

    if style.reference_lines {
        let label_style = (style.font.as_str(), 12)
            .into_font()
            .color(&REFERENCE_COLOR)
            .pos(Pos::new(HPos::Left, VPos::Top));

        for reference in &spec.references {
            chart
                .draw_series(LineSeries::new(
                    vec![(reference.position, 0.0), (reference.position, y_max)],
                    REFERENCE_COLOR.mix(0.5).stroke_width(1),
                ))
                .map_err(GeoError::render)?;
            chart
                .draw_series(std::iter::once(Text::new(
                    reference.label.clone(),
                    (reference.position + 1.0, y_max * 0.95),
                    label_style.clone(),
                )))
                .map_err(GeoError::render)?;
        }
    }

    root.present().map_err(GeoError::render)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::png_magic_ok;

    #[test]
    fn test_render_distribution_with_references() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latitude.png");
        let spec = DistributionSpec {
            title: "Population by latitude".to_string(),
            x_desc: "Latitude (degrees)".to_string(),
            y_desc: "Total population".to_string(),
            x_min: -90.0,
            x_max: 90.0,
            bins: vec![
                DegreeBin {
                    degree: 0,
                    population: 90_000_000,
                },
                DegreeBin {
                    degree: 40,
                    population: 160_000_000,
                },
                DegreeBin {
                    degree: -33,
                    population: 15_000_000,
                },
            ],
            references: vec![
                ReferenceLine {
                    position: 0.0,
                    label: "Equator".to_string(),
                },
                ReferenceLine {
                    position: 66.5,
                    label: "Arctic Circle".to_string(),
                },
            ],
            color: RGBColor(32, 178, 170),
        };
        render_distribution(&path, &spec, &ChartStyle::default()).unwrap();
        assert!(png_magic_ok(&path));
    }

    #[test]
    fn test_render_empty_distribution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let spec = DistributionSpec {
            title: "Empty".to_string(),
            x_desc: String::new(),
            y_desc: String::new(),
            x_min: -90.0,
            x_max: 90.0,
            bins: vec![],
            references: vec![],
            color: RGBColor(0, 0, 0),
        };
        render_distribution(&path, &spec, &ChartStyle::default()).unwrap();
        assert!(png_magic_ok(&path));
    }
}
