use anyhow::Context;
use clap::{Parser, Subcommand};
use skycast_core::{Config, IpLookupSource, OpenWeatherClient};

use crate::app::App;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather lookup for your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and an optional default city.
    Configure,

    /// Look up the weather once and print the report.
    Show {
        /// City name. Defaults to the configured city.
        city: Option<String>,

        /// Latitude, paired with --lon.
        #[arg(long, requires = "lon", conflicts_with_all = ["city", "here"])]
        lat: Option<f64>,

        /// Longitude, paired with --lat.
        #[arg(long, requires = "lat")]
        lon: Option<f64>,

        /// Use the device's approximate location instead of a city.
        #[arg(long, conflicts_with = "city")]
        here: bool,
    },

    /// Prompt loop: look up city after city until you quit.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                city,
                lat,
                lon,
                here,
            } => show(city, lat.zip(lon), here).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Text::new("OpenWeatherMap API key:")
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let default_city = inquire::Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;
    config.set_default_city(default_city.trim().to_string());

    config.save()?;
    println!("Saved {}", Config::config_file_path()?.display());

    Ok(())
}

fn build_app(config: &Config) -> anyhow::Result<App> {
    let api_key = config.resolve_api_key()?;
    let provider = OpenWeatherClient::new(api_key);
    let location = IpLookupSource::new();

    Ok(App::new(Box::new(provider), Box::new(location)))
}

async fn show(city: Option<String>, coords: Option<(f64, f64)>, here: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut app = build_app(&config)?;

    if here {
        app.lookup_here().await;
    } else if let Some((lat, lon)) = coords {
        app.lookup_coordinates(lat, lon).await;
    } else {
        let city = city.unwrap_or_else(|| config.default_city().to_string());
        app.lookup_city(&city).await;
    }

    if !app.succeeded() {
        std::process::exit(1);
    }

    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut app = build_app(&config)?;

    // Same as the startup behavior of the original display: load the
    // default city before asking for anything.
    app.lookup_city(config.default_city()).await;

    loop {
        app.tick();

        let input = inquire::Text::new("City ('@here' for your location, 'q' to quit):")
            .prompt()
            .context("Failed to read input")?;

        match input.trim() {
            "q" | "quit" => break,
            "@here" => app.lookup_here().await,
            city => app.lookup_city(city).await,
        }
    }

    Ok(())
}
