use std::{io::Write, time::Duration};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select, Text};
use weather_core::{
    AudioSink, Clock, Config, ForecastQuery, Geolocator, ProxyClient,
    geolocation::{FixedLocation, IpGeolocator, Location},
};

use crate::{audio, dashboard::Dashboard};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the proxy URL, default city and audio player.
    Configure,

    /// Show current conditions and the five-day forecast once.
    Show {
        /// City to look up; defaults to the configured city, then your location.
        city: Option<String>,

        #[command(flatten)]
        coords: CoordArgs,
    },

    /// Interactive dashboard: search, current location and ambient sounds.
    Dashboard {
        /// City to start with instead of your current location.
        city: Option<String>,
    },

    /// Live clock, ticking every second until Ctrl-C.
    Clock {
        /// Show the local time of this city instead of the system zone.
        #[arg(long, conflicts_with = "offset")]
        city: Option<String>,

        /// Shift from UTC in seconds.
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<i32>,
    },
}

#[derive(Debug, clap::Args)]
pub struct CoordArgs {
    /// Latitude; requires --lon.
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude; requires --lat.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

/// How the first forecast of a session is chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum Initial {
    Query(ForecastQuery),
    CurrentLocation,
}

/// Explicit coordinates, then an explicit city, then the configured city,
/// then the user's location.
pub fn initial_query(city: Option<String>, coords: &CoordArgs, config: &Config) -> Initial {
    if let (Some(lat), Some(lon)) = (coords.lat, coords.lon) {
        return Initial::Query(ForecastQuery::coordinates(lat, lon));
    }
    city.or_else(|| config.default_city.clone())
        .filter(|c| !c.trim().is_empty())
        .map(|c| Initial::Query(ForecastQuery::City(c)))
        .unwrap_or(Initial::CurrentLocation)
}

pub async fn load(dashboard: &mut Dashboard, client: &ProxyClient, query: ForecastQuery) {
    let result = client.fetch_forecast(&query).await;
    dashboard.show_forecast(&query, result);
}

/// Locate the user and load their forecast; a location failure leaves the
/// current forecast in place.
pub async fn load_current_location(
    dashboard: &mut Dashboard,
    client: &ProxyClient,
    locator: &dyn Geolocator,
) {
    match locator.locate().await {
        Ok(location) => {
            let query = ForecastQuery::coordinates(location.latitude, location.longitude);
            load(dashboard, client, query).await;
        }
        Err(e) => dashboard.show_location_error(&e),
    }
}

async fn load_initial(
    dashboard: &mut Dashboard,
    client: &ProxyClient,
    locator: &dyn Geolocator,
    initial: Initial,
) {
    match initial {
        Initial::Query(query) => load(dashboard, client, query).await,
        Initial::CurrentLocation => load_current_location(dashboard, client, locator).await,
    }
}

fn default_locator() -> anyhow::Result<Box<dyn Geolocator>> {
    Ok(Box::new(
        IpGeolocator::new().context("Failed to set up geolocation")?,
    ))
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, coords } => {
                let config = Config::load()?;
                let client = ProxyClient::new(&config.proxy_url);
                let locator: Box<dyn Geolocator> = match (coords.lat, coords.lon) {
                    (Some(latitude), Some(longitude)) => Box::new(FixedLocation(Location {
                        latitude,
                        longitude,
                        place: None,
                    })),
                    _ => default_locator()?,
                };

                let mut dashboard = Dashboard::new();
                let initial = initial_query(city, &coords, &config);
                load_initial(&mut dashboard, &client, locator.as_ref(), initial).await;

                print!("{}", dashboard.render(Utc::now()));
                Ok(())
            }
            Command::Dashboard { city } => {
                let config = Config::load()?;
                let client = ProxyClient::new(&config.proxy_url);
                let locator = default_locator()?;
                let mut sink = audio::sink_from_config(&config);

                let mut dashboard = Dashboard::new();
                let initial = initial_query(city, &CoordArgs { lat: None, lon: None }, &config);
                load_initial(&mut dashboard, &client, locator.as_ref(), initial).await;

                let result = interactive(&mut dashboard, &client, locator.as_ref(), sink.as_mut()).await;

                // Never leave a player running behind us.
                dashboard.stop_sound(sink.as_mut())?;
                result
            }
            Command::Clock { city, offset } => {
                let clock = match (city, offset) {
                    (Some(city), _) => {
                        let config = Config::load()?;
                        let client = ProxyClient::new(&config.proxy_url);
                        let forecast = client
                            .fetch_forecast(&ForecastQuery::City(city))
                            .await
                            .context("Could not look up the city's time zone")?;
                        Clock::from_offset_seconds(forecast.city.timezone)
                    }
                    (None, offset) => Clock::from_offset_seconds(offset),
                };
                run_clock(clock).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    config.proxy_url = Text::new("Forecast proxy URL:")
        .with_default(&config.proxy_url)
        .prompt()?;

    let city = Text::new("Default city (empty to use your location):")
        .with_default(config.default_city.as_deref().unwrap_or(""))
        .prompt()?;
    config.default_city = Some(city.trim().to_string()).filter(|c| !c.is_empty());

    let player = Text::new("Audio player command (empty to disable sounds):")
        .with_default(config.audio_player.as_deref().unwrap_or(""))
        .with_help_message("The sound file path is appended, e.g. `mpv --no-video --loop=inf`")
        .prompt()?;
    config.audio_player = Some(player.trim().to_string()).filter(|p| !p.is_empty());

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Search,
    CurrentLocation,
    Sound,
    Quit,
}

impl std::fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MenuChoice::Search => "Search city",
            MenuChoice::CurrentLocation => "Current location",
            MenuChoice::Sound => "Play / stop a sound",
            MenuChoice::Quit => "Quit",
        })
    }
}

async fn interactive(
    dashboard: &mut Dashboard,
    client: &ProxyClient,
    locator: &dyn Geolocator,
    sink: &mut dyn AudioSink,
) -> anyhow::Result<()> {
    let choices = vec![
        MenuChoice::Search,
        MenuChoice::CurrentLocation,
        MenuChoice::Sound,
        MenuChoice::Quit,
    ];

    loop {
        println!();
        print!("{}", dashboard.render(Utc::now()));

        let choice = match Select::new("What next?", choices.clone()).prompt() {
            Ok(choice) => choice,
            // Esc or Ctrl-C at the menu leaves the dashboard.
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                MenuChoice::Quit
            }
            Err(e) => return Err(e.into()),
        };

        match choice {
            MenuChoice::Search => {
                let city = Text::new("City:").prompt()?;
                match ForecastQuery::from_params(Some(&city), None, None) {
                    Ok(query) => load(dashboard, client, query).await,
                    Err(e) => println!("{e}"),
                }
            }
            MenuChoice::CurrentLocation => load_current_location(dashboard, client, locator).await,
            MenuChoice::Sound => {
                let triggers = dashboard.sound_triggers(Utc::now().date_naive());
                if triggers.is_empty() {
                    println!("Nothing on screen has a sound.");
                    continue;
                }
                let labels: Vec<String> = triggers.iter().map(|t| t.label.clone()).collect();
                let picked = Select::new("Sound:", labels).raw_prompt()?;
                if let Err(e) = dashboard.toggle_sound(triggers[picked.index].clip, &mut *sink) {
                    println!("Could not play sound: {e:#}");
                }
            }
            MenuChoice::Quit => return Ok(()),
        }
    }
}

async fn run_clock(clock: Clock) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut stdout = std::io::stdout();
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                write!(stdout, "\r{} ({})", clock.now(), clock.zone_label())?;
                stdout.flush()?;
            }
            _ = &mut shutdown => {
                writeln!(stdout)?;
                return Ok(());
            }
        }
    }
}
