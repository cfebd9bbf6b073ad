use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use skycast_core::{
    Config, Coordinate, LocationProvider, LocationResolver, PinnedLocationProvider,
    UnsupportedLocationProvider, WeatherPipeline, provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weatherapi.com API key.
    Configure,

    /// Fetch and display current conditions and the forecast.
    Show {
        /// Number of forecast days to request.
        #[arg(long)]
        days: Option<u8>,

        /// Pin the location to a latitude instead of resolving one.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Pin the location to a longitude instead of resolving one.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { days, lat, lon } => show(days, lat, lon).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("weatherapi.com API key:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(days: Option<u8>, lat: Option<f64>, lon: Option<f64>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    if let (Some(latitude), Some(longitude)) = (lat, lon) {
        config.location = Some(Coordinate { latitude, longitude });
    }
    if let Some(days) = days {
        config.forecast_days = days;
    }

    let provider = provider_from_config(&config)?;

    // Without a pinned coordinate this host has no location platform to
    // ask, so the resolver answers with the configured fallback.
    let location: Arc<dyn LocationProvider> = match config.location {
        Some(coordinate) => Arc::new(PinnedLocationProvider::new(coordinate)),
        None => Arc::new(UnsupportedLocationProvider),
    };
    let resolver = LocationResolver::new(location, config.fallback_location);

    let pipeline = WeatherPipeline::new(resolver, provider, config.forecast_days);

    loop {
        println!("Loading weather...");

        match pipeline.refresh().await {
            Ok(view) => {
                render::print(&view);
                return Ok(());
            }
            Err(err) => {
                let message = err.user_message();
                eprintln!("{message}");

                let retry = inquire::Confirm::new("Retry?")
                    .with_default(true)
                    .prompt()
                    .unwrap_or(false);
                if !retry {
                    anyhow::bail!("{message}");
                }
            }
        }
    }
}
