use plotters::style::RGBColor;

/// Chart palette. Bar colors follow the originals the analyses were tuned
/// against; line colors are a high-contrast cycle for comparison plots.
pub const TOP_CITIES_COLOR: RGBColor = RGBColor(70, 130, 180);
pub const FRONTIER_COLOR: RGBColor = RGBColor(0, 100, 0);
pub const LATITUDE_COLOR: RGBColor = RGBColor(32, 178, 170);
pub const LONGITUDE_COLOR: RGBColor = RGBColor(255, 127, 80);
pub const REFERENCE_COLOR: RGBColor = RGBColor(211, 47, 47);

pub const SERIES_COLORS: &[RGBColor] = &[
    RGBColor(30, 136, 229),  // blue
    RGBColor(67, 160, 71),   // green
    RGBColor(251, 140, 0),   // orange
    RGBColor(142, 36, 170),  // purple
    RGBColor(0, 172, 193),   // cyan
    RGBColor(216, 27, 96),   // pink
    RGBColor(109, 76, 65),   // brown
    RGBColor(84, 110, 122),  // slate
];

/// Compact population tick labels: 1.2B, 34M, 120K.
pub fn format_population(value: f64) -> String {
    if value >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if value >= 1e7 {
        format!("{:.0}M", value / 1e6)
    } else if value >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.0}K", value / 1e3)
    } else {
        format!("{:.0}", value)
    }
}
