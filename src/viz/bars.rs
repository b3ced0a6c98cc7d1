//! Labeled bar charts: top cities by population and the Pareto frontier.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::config::chart::ChartStyle;
use crate::utils::error::{GeoError, Result};
use crate::viz::style::format_population;

#[derive(Debug, Clone)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct BarChartSpec {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub bars: Vec<Bar>,
    /// Log-scale y axis; values below the axis floor are lifted onto it.
    pub log_scale: bool,
    pub color: RGBColor,
}

pub fn render_bar_chart(path: &Path, spec: &BarChartSpec, style: &ChartStyle) -> Result<()> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(GeoError::render)?;

    if spec.bars.is_empty() {
        // Nothing to plot; leave a blank canvas rather than a degenerate axis.
        root.present().map_err(GeoError::render)?;
        return Ok(());
    }

    if spec.log_scale {
        draw_log_bars(&root, spec, style)?;
    } else {
        draw_linear_bars(&root, spec, style)?;
    }

    root.present().map_err(GeoError::render)?;
    Ok(())
}

fn draw_linear_bars(
    root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    spec: &BarChartSpec,
    style: &ChartStyle,
) -> Result<()> {
    let n = spec.bars.len();
    let y_max = peak_value(&spec.bars) * 1.15;

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, (style.font.as_str(), 28))
        .margin(16)
        .x_label_area_size(150)
        .y_label_area_size(90)
        .build_cartesian_2d((0..n).into_segmented(), 0.0..y_max)
        .map_err(GeoError::render)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n.max(1))
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) => spec
                .bars
                .get(*i)
                .map(|b| b.label.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_label_style(
            (style.font.as_str(), 12)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_label_formatter(&|v| format_population(*v))
        .x_desc(spec.x_desc.as_str())
        .y_desc(spec.y_desc.as_str())
        .axis_desc_style((style.font.as_str(), 16))
        .label_style((style.font.as_str(), 12))
        .draw()
        .map_err(GeoError::render)?;

    chart
        .draw_series(spec.bars.iter().enumerate().map(|(i, bar)| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), bar.value),
                ],
                spec.color.mix(0.7).filled(),
            )
        }))
        .map_err(GeoError::render)?;

    let value_style = value_label_style(style);
    chart
        .draw_series(spec.bars.iter().enumerate().map(|(i, bar)| {
            Text::new(
                format_population(bar.value),
                (SegmentValue::CenterOf(i), bar.value + y_max * 0.01),
                value_style.clone(),
            )
        }))
        .map_err(GeoError::render)?;

    Ok(())
}

fn draw_log_bars(
    root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    spec: &BarChartSpec,
    style: &ChartStyle,
) -> Result<()> {
    let n = spec.bars.len();
    // Keep the smallest bar visible above the log-axis floor.
    let y_base = spec
        .bars
        .iter()
        .map(|b| b.value.max(1.0))
        .fold(f64::INFINITY, f64::min)
        .min(1_000.0)
        / 2.0;
    let y_max = peak_value(&spec.bars) * 2.0;

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, (style.font.as_str(), 28))
        .margin(16)
        .x_label_area_size(150)
        .y_label_area_size(90)
        .build_cartesian_2d((0..n).into_segmented(), (y_base..y_max).log_scale())
        .map_err(GeoError::render)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n.max(1))
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) => spec
                .bars
                .get(*i)
                .map(|b| b.label.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_label_style(
            (style.font.as_str(), 12)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_label_formatter(&|v| format_population(*v))
        .x_desc(spec.x_desc.as_str())
        .y_desc(spec.y_desc.as_str())
        .axis_desc_style((style.font.as_str(), 16))
        .label_style((style.font.as_str(), 12))
        .draw()
        .map_err(GeoError::render)?;

    chart
        .draw_series(spec.bars.iter().enumerate().map(|(i, bar)| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(i), y_base),
                    (SegmentValue::Exact(i + 1), bar.value.max(y_base)),
                ],
                spec.color.mix(0.7).filled(),
            )
        }))
        .map_err(GeoError::render)?;

    let value_style = value_label_style(style);
    chart
        .draw_series(spec.bars.iter().enumerate().map(|(i, bar)| {
            Text::new(
                format_population(bar.value),
                (SegmentValue::CenterOf(i), bar.value.max(y_base) * 1.1),
                value_style.clone(),
            )
        }))
        .map_err(GeoError::render)?;

    Ok(())
}

fn value_label_style(style: &ChartStyle) -> TextStyle<'_> {
    (style.font.as_str(), 13)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom))
}

fn peak_value(bars: &[Bar]) -> f64 {
    bars.iter().map(|b| b.value).fold(0.0, f64::max).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::png_magic_ok;

    fn spec(log_scale: bool) -> BarChartSpec {
        BarChartSpec {
            title: "Test bars".to_string(),
            x_desc: "Cities".to_string(),
            y_desc: "Population".to_string(),
            bars: vec![
                Bar {
                    label: "Oslo, NO (2094 mi)".to_string(),
                    value: 580_000.0,
                },
                Bar {
                    label: "Reykjavik, IS (1784 mi)".to_string(),
                    value: 118_000.0,
                },
                Bar {
                    label: "Murmansk, RU (1445 mi)".to_string(),
                    value: 295_000.0,
                },
            ],
            log_scale,
            color: RGBColor(70, 130, 180),
        }
    }

    #[test]
    fn test_render_linear_bar_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.png");
        render_bar_chart(&path, &spec(false), &ChartStyle::default()).unwrap();
        assert!(png_magic_ok(&path));
    }

    #[test]
    fn test_render_log_bar_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars_log.png");
        render_bar_chart(&path, &spec(true), &ChartStyle::default()).unwrap();
        assert!(png_magic_ok(&path));
    }

    #[test]
    fn test_render_empty_chart_still_produces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let spec = BarChartSpec {
            title: "Empty".to_string(),
            x_desc: String::new(),
            y_desc: String::new(),
            bars: vec![],
            log_scale: false,
            color: RGBColor(0, 0, 0),
        };
        render_bar_chart(&path, &spec, &ChartStyle::default()).unwrap();
        assert!(png_magic_ok(&path));
    }
}
