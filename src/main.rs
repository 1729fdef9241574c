//! skycast CLI
//!
//! Renders a weather dashboard from saved OpenWeatherMap responses.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use skycast::{
    BackgroundTheme, Dashboard, SkycastConfig, ThemeFamily, WeatherCondition, logging,
    openweather,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Weather dashboard from OpenWeatherMap data
#[derive(Parser)]
#[command(name = "skycast")]
#[command(author, version, about = "Weather dashboard from OpenWeatherMap data", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dashboard from a forecast response
    Dashboard {
        /// `/data/2.5/forecast` response body
        #[arg(short, long)]
        forecast: PathBuf,

        /// `/data/2.5/weather` response body
        #[arg(long)]
        current: Option<PathBuf>,

        /// Print the dashboard as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Classify a single condition code
    Classify {
        /// OpenWeatherMap condition code
        code: u32,

        /// Use the night variant
        #[arg(long)]
        night: bool,
    },

    /// List locations from a geocoding response
    Search {
        /// `/geo/1.0/direct` response body
        #[arg(short, long)]
        results: PathBuf,
    },
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = SkycastConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose);
    debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Dashboard {
            forecast,
            current,
            json,
        } => {
            let payload = openweather::parse_forecast(&read(&forecast)?)
                .with_context(|| format!("Invalid forecast data in {}", forecast.display()))?;

            let current = match current {
                Some(path) => Some(
                    openweather::parse_current(&read(&path)?)
                        .with_context(|| format!("Invalid current weather in {}", path.display()))?,
                ),
                None => None,
            };

            let aggregator = config.aggregator(Some(&payload.location))?;
            info!(
                location = %payload.location.display_name(),
                boundary = ?aggregator.day_boundary(),
                "Building dashboard"
            );

            let dashboard = Dashboard::build(
                payload.location,
                current.map(|c| c.current),
                &payload.samples,
                &aggregator,
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                println!("{}", dashboard.render_text(config.render_options()));
            }
        }
        Commands::Classify { code, night } => {
            let condition = WeatherCondition::classify(code, !night);
            let theme = BackgroundTheme {
                family: ThemeFamily::of(condition),
                is_night: night,
            };
            println!("Condition: {condition}");
            println!("Text:      {}", condition.text());
            println!("Icon:      {}", condition.icon());
            println!("Theme:     {theme}");
        }
        Commands::Search { results } => {
            let locations = openweather::parse_locations(&read(&results)?)?;
            if locations.is_empty() {
                println!("No locations found");
            }
            for location in locations {
                println!(
                    "{:<30} {}",
                    location.display_name(),
                    location.format_coordinates()
                );
            }
        }
    }

    Ok(())
}
