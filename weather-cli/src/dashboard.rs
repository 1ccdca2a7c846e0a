//! Dashboard view state and its text rendering.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, Utc};
use weather_core::{
    AudioSink, ClientError, Clock, Condition, ForecastQuery, ForecastResponse, GeolocationError,
    MapView, PlaybackSlot, Sample, SoundClip, upcoming_days,
};

pub const FETCH_FAILED: &str = "Could not fetch weather data";
pub const LOCATION_FAILED: &str = "Failed to get your location";

/// Everything the dashboard shows. Failed actions only set `error`; the last
/// good forecast and map stay on screen.
#[derive(Debug, Default)]
pub struct Dashboard {
    forecast: Option<ForecastResponse>,
    map: MapView,
    error: Option<String>,
    playback: PlaybackSlot,
}

/// A clickable sound trigger: a forecast row whose condition has a clip.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundTrigger {
    pub label: String,
    pub clip: SoundClip,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forecast(&self) -> Option<&ForecastResponse> {
        self.forecast.as_ref()
    }

    pub fn map(&self) -> &MapView {
        &self.map
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn playback(&self) -> PlaybackSlot {
        self.playback
    }

    pub fn clock(&self) -> Clock {
        Clock::from_offset_seconds(self.forecast.as_ref().and_then(|f| f.city.timezone))
    }

    /// Apply the outcome of a forecast request made for `query`.
    pub fn show_forecast(
        &mut self,
        query: &ForecastQuery,
        result: Result<ForecastResponse, ClientError>,
    ) {
        match result {
            Ok(forecast) => {
                self.map = match query {
                    ForecastQuery::Coordinates { lat, lon } => {
                        match (lat.parse::<f64>(), lon.parse::<f64>()) {
                            (Ok(lat), Ok(lon)) => MapView::centered(lat, lon),
                            _ => MapView::centered(forecast.city.coord.lat, forecast.city.coord.lon),
                        }
                    }
                    ForecastQuery::City(_) => {
                        MapView::centered(forecast.city.coord.lat, forecast.city.coord.lon)
                    }
                };
                self.forecast = Some(forecast);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(%query, "forecast request failed: {e}");
                self.error = Some(format!("{FETCH_FAILED} ({e})"));
            }
        }
    }

    pub fn show_location_error(&mut self, err: &GeolocationError) {
        tracing::warn!("geolocation failed: {err}");
        self.error = Some(LOCATION_FAILED.to_string());
    }

    /// Press `clip`'s trigger. If the sink fails, the slot reflects what is
    /// actually audible rather than what was asked for.
    pub fn toggle_sound(
        &mut self,
        clip: SoundClip,
        sink: &mut dyn AudioSink,
    ) -> anyhow::Result<()> {
        self.playback.toggle_on(clip, sink)
    }

    pub fn stop_sound(&mut self, sink: &mut dyn AudioSink) -> anyhow::Result<()> {
        self.playback.stop_on(sink)
    }

    /// Current conditions plus the five-day strip, relative to `today`.
    fn rows(&self, today: NaiveDate) -> Vec<(String, &Sample)> {
        let Some(forecast) = &self.forecast else {
            return Vec::new();
        };
        let mut rows = Vec::new();
        if let Some(current) = forecast.current() {
            rows.push(("Now".to_string(), current));
        }
        rows.extend(
            upcoming_days(&forecast.list, today)
                .into_iter()
                .map(|day| (day.label(), day.sample)),
        );
        rows
    }

    pub fn sound_triggers(&self, today: NaiveDate) -> Vec<SoundTrigger> {
        self.rows(today)
            .into_iter()
            .filter_map(|(label, sample)| {
                let condition = Condition::from_keyword(sample.condition());
                condition.sound().map(|clip| SoundTrigger {
                    label: format!("{label}: {} ({clip})", sample.description()),
                    clip,
                })
            })
            .collect()
    }

    pub fn render(&self, now: DateTime<Utc>) -> String {
        let today = now.date_naive();
        let clock = self.clock();
        let mut out = String::new();

        match self.forecast() {
            Some(forecast) => {
                let place = match &forecast.city.country {
                    Some(country) => format!("{}, {}", forecast.city.name, country),
                    None => forecast.city.name.clone(),
                };
                let _ = writeln!(out, "{place}    {} ({})", clock.format_at(now), clock.zone_label());

                if let Some(current) = forecast.current() {
                    render_current(&mut out, current, self.playback());
                }

                let days = upcoming_days(&forecast.list, today);
                if !days.is_empty() {
                    let _ = writeln!(out);
                    let _ = writeln!(out, "Forecast");
                    for day in days {
                        let condition = Condition::from_keyword(day.sample.condition());
                        let _ = writeln!(
                            out,
                            "  {:<12} {:>6.1}°C  {:<20} {}",
                            day.label(),
                            day.sample.main.temp,
                            day.sample.description(),
                            condition.icon_path(),
                        );
                    }
                }
            }
            None => {
                let _ = writeln!(out, "No forecast loaded    {}", clock.format_at(now));
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Map: {}", self.map().browse_url());
        let _ = writeln!(out, "Tile: {}", self.map().center_tile_url());

        if let Some(clip) = self.playback().playing() {
            let _ = writeln!(out, "Playing: {clip}");
        }

        if let Some(error) = self.error() {
            let _ = writeln!(out);
            let _ = writeln!(out, "! {error}");
        }

        out
    }
}

fn render_current(out: &mut String, current: &Sample, playback: PlaybackSlot) {
    let condition = Condition::from_keyword(current.condition());
    let sound = match condition.sound() {
        Some(clip) if playback.playing() == Some(clip) => format!("  [playing {clip}]"),
        Some(clip) => format!("  [{clip}]"),
        None => String::new(),
    };

    let _ = writeln!(out, "  {:.1}°C", current.main.temp);
    let _ = writeln!(
        out,
        "  {}  {}{sound}",
        current.description(),
        condition.icon_path()
    );

    let visibility = current
        .visibility_km()
        .map(|km| format!("{km} km"))
        .unwrap_or_else(|| "n/a".to_string());
    let _ = writeln!(
        out,
        "  Wind {} m/s | Humidity {}% | Pressure {} hPa | Visibility {} | Cloud cover {}%",
        current.wind.speed,
        current.main.humidity,
        current.main.pressure,
        visibility,
        current.clouds.all,
    );
}
