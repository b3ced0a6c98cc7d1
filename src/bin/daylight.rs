use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use geolight::config::chart::{ChartConfig, ChartStyle};
use geolight::core::animation::Animator;
use geolight::core::daylight;
use geolight::utils::logger;
use geolight::viz::{render_line_chart, render_season_heatmap, LineChartSpec, LineData};

/// Non-leap reference year used to turn a day-of-year into a printable date.
const REFERENCE_YEAR: i32 = 2024;

#[derive(Debug, Parser)]
#[command(name = "daylight")]
#[command(about = "Daylight duration charts from the sunrise equation")]
struct DaylightCli {
    #[command(subcommand)]
    command: Command,

    /// Optional TOML file with chart styling overrides
    #[arg(long, global = true)]
    chart_config: Option<String>,

    /// Enable verbose output
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print daylight hours for one latitude and day of year
    Hours {
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,
        #[arg(long)]
        day: u32,
    },
    /// Daylight-vs-latitude profile chart for one day
    Profile {
        #[arg(long)]
        day: u32,
        #[arg(long, default_value = "-90", allow_hyphen_values = true)]
        lat_min: f64,
        #[arg(long, default_value = "90", allow_hyphen_values = true)]
        lat_max: f64,
        #[arg(long, default_value = "daylight_profile.png")]
        output: PathBuf,
    },
    /// Daylight over the year at one latitude
    Year {
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,
        #[arg(long, default_value = "daylight_year.png")]
        output: PathBuf,
    },
    /// Compare the yearly cycle across several latitudes
    Compare {
        #[arg(
            long,
            value_delimiter = ',',
            default_value = "0,23.5,45,60,75",
            allow_hyphen_values = true
        )]
        latitudes: Vec<f64>,
        #[arg(long, default_value = "daylight_compare.png")]
        output: PathBuf,
    },
    /// Latitude x day heatmap over the full year
    Heatmap {
        #[arg(long, default_value = "2")]
        lat_step: f64,
        #[arg(long, default_value = "2")]
        day_step: u32,
        #[arg(long, default_value = "daylight_heatmap.png")]
        output: PathBuf,
    },
    /// Render one profile frame per animation tick through the year
    Animate {
        #[arg(long, default_value = "1")]
        start_day: u32,
        #[arg(long, default_value = "7")]
        step: u32,
        #[arg(long, default_value = "52")]
        frames: u32,
        /// Step backwards through the year
        #[arg(long)]
        reverse: bool,
        #[arg(long, default_value = "frames")]
        output_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = DaylightCli::parse();
    logger::init_cli_logger(cli.verbose);

    let style = match &cli.chart_config {
        Some(path) => ChartStyle::from(&ChartConfig::from_file(Path::new(path))?),
        None => ChartStyle::default(),
    };

    match cli.command {
        Command::Hours { latitude, day } => {
            let hours = daylight::daylight_hours(latitude, day)?;
            let date = daylight::date_of_day(REFERENCE_YEAR, day)?;
            println!(
                "{} (day {}) at {:.1}°: {:.2} hours of daylight",
                date.format("%B %d"),
                day,
                latitude,
                hours
            );
        }
        Command::Profile {
            day,
            lat_min,
            lat_max,
            output,
        } => {
            render_profile(day, lat_min, lat_max, &output, &style)?;
            println!("Profile chart written to {}", output.display());
        }
        Command::Year { latitude, output } => {
            let series = year_line(latitude)?;
            render_line_chart(
                &output,
                &LineChartSpec {
                    title: format!("Daylight Duration Over the Year at {:.1}°", latitude),
                    x_desc: "Day of year".to_string(),
                    y_desc: "Daylight (hours)".to_string(),
                    x_min: 1.0,
                    x_max: 365.0,
                    y_min: 0.0,
                    y_max: 24.5,
                    series: vec![series],
                },
                &style,
            )?;
            println!("Year chart written to {}", output.display());
        }
        Command::Compare { latitudes, output } => {
            let series = latitudes
                .iter()
                .map(|&lat| year_line(lat))
                .collect::<geolight::Result<Vec<_>>>()?;
            render_line_chart(
                &output,
                &LineChartSpec {
                    title: "Daylight Duration Comparison".to_string(),
                    x_desc: "Day of year".to_string(),
                    y_desc: "Daylight (hours)".to_string(),
                    x_min: 1.0,
                    x_max: 365.0,
                    y_min: 0.0,
                    y_max: 24.5,
                    series,
                },
                &style,
            )?;
            println!("Comparison chart written to {}", output.display());
        }
        Command::Heatmap {
            lat_step,
            day_step,
            output,
        } => {
            let grid = daylight::season_grid(lat_step, day_step)?;
            render_season_heatmap(
                &output,
                &grid,
                "Daylight Hours by Latitude and Season",
                &style,
            )?;
            println!("Heatmap written to {}", output.display());
        }
        Command::Animate {
            start_day,
            step,
            frames,
            reverse,
            output_dir,
        } => {
            std::fs::create_dir_all(&output_dir)?;
            let mut animator = Animator::new(start_day, step)?;
            if reverse {
                animator.play_reverse();
            } else {
                animator.play_forward();
            }

            for frame in 0..frames {
                let day = animator.day();
                let path = output_dir.join(format!("frame_{:03}.png", frame));
                render_profile(day, -90.0, 90.0, &path, &style)?;
                tracing::debug!("frame {} -> day {}", frame, day);
                animator.tick();
            }
            println!(
                "{} frames written to {} (step {} days, {})",
                frames,
                output_dir.display(),
                step,
                if reverse { "reverse" } else { "forward" }
            );
        }
    }

    Ok(())
}

fn render_profile(
    day: u32,
    lat_min: f64,
    lat_max: f64,
    output: &Path,
    style: &ChartStyle,
) -> geolight::Result<()> {
    let date = daylight::date_of_day(REFERENCE_YEAR, day)?;
    let points = daylight::latitude_profile(day, lat_min, lat_max, 1.0)?;
    render_line_chart(
        output,
        &LineChartSpec {
            title: format!("Daylight by Latitude on {}", date.format("%B %d")),
            x_desc: "Latitude (degrees)".to_string(),
            y_desc: "Daylight (hours)".to_string(),
            x_min: lat_min,
            x_max: lat_max,
            y_min: 0.0,
            y_max: 24.5,
            series: vec![LineData {
                label: date.format("%B %d").to_string(),
                points,
            }],
        },
        style,
    )
}

fn year_line(latitude: f64) -> geolight::Result<LineData> {
    let points = daylight::year_series(latitude)?
        .into_iter()
        .map(|(day, hours)| (day as f64, hours))
        .collect();
    Ok(LineData {
        label: format!("{:.1}°", latitude),
        points,
    })
}
