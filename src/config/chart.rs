use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::error::Result;
use crate::utils::validation::{validate_range, Validate};

/// Optional TOML chart-styling file. All sections and fields may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartConfig {
    pub canvas: Option<CanvasConfig>,
    pub reference_lines: Option<bool>,
    pub font: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl ChartConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: ChartConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for ChartConfig {
    fn validate(&self) -> Result<()> {
        if let Some(canvas) = &self.canvas {
            validate_range("canvas.width", canvas.width, 320, 8192)?;
            validate_range("canvas.height", canvas.height, 240, 8192)?;
        }
        Ok(())
    }
}

/// Resolved style the renderers consume: config overrides applied on top of
/// the defaults.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub reference_lines: bool,
    pub font: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 960,
            reference_lines: true,
            font: "sans-serif".to_string(),
        }
    }
}

impl From<&ChartConfig> for ChartStyle {
    fn from(config: &ChartConfig) -> Self {
        let defaults = ChartStyle::default();
        Self {
            width: config.canvas.as_ref().map_or(defaults.width, |c| c.width),
            height: config.canvas.as_ref().map_or(defaults.height, |c| c.height),
            reference_lines: config.reference_lines.unwrap_or(defaults.reference_lines),
            font: config.font.clone().unwrap_or(defaults.font),
        }
    }
}
