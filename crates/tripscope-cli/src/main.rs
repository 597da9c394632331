mod explore;
mod render;

use std::process::ExitCode;

use clap::{ArgGroup, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tripscope_core::{AppConfig, GeoPoint};

use crate::explore::Location;

#[derive(Debug, Parser)]
#[command(name = "tripscope")]
#[command(about = "Weather, sights and country facts for a location")]
struct Cli {
    /// Print the report as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Weather, nearby places and country facts for a city or coordinate
    #[command(group(ArgGroup::new("location").required(true).args(["city", "lat"])))]
    Explore {
        /// City name, optionally with a country code (e.g. "Paris,FR")
        #[arg(long)]
        city: Option<String>,
        /// Latitude in decimal degrees
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude in decimal degrees
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
        /// Place search radius in meters (defaults to TRIPSCOPE_PLACES_RADIUS_M)
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Points of interest around a coordinate
    Places {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Search radius in meters (defaults to TRIPSCOPE_PLACES_RADIUS_M)
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Country facts by ISO code
    Country {
        /// ISO 3166-1 alpha-2 or alpha-3 code (e.g. DE, FRA)
        code: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = tripscope_core::load_app_config()?;
    init_tracing(&config)?;

    let json = cli.json;
    match cli.command {
        Commands::Explore {
            city,
            lat,
            lon,
            radius,
        } => {
            let location = match (city, lat, lon) {
                (Some(city), _, _) => Location::City(city),
                (None, Some(lat), Some(lon)) => Location::Coordinates(GeoPoint::new(lat, lon)),
                _ => anyhow::bail!("either --city or both --lat and --lon are required"),
            };
            let radius = radius.unwrap_or(config.places_radius_m);
            let report = explore::run_explore(&config, location, radius).await?;
            emit(json, &report, render::render_explore)?;
        }
        Commands::Places { lat, lon, radius } => {
            let radius = radius.unwrap_or(config.places_radius_m);
            let search = explore::run_places(&config, GeoPoint::new(lat, lon), radius).await?;
            emit(json, &search, render::render_places)?;
        }
        Commands::Country { code } => {
            let profile = explore::run_country(&config, &code).await?;
            emit(json, &profile, render::render_country)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only the report.
fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn emit<T: serde::Serialize>(json: bool, value: &T, text: fn(&T) -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text(value));
    }
    Ok(())
}
