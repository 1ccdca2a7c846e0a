use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// What the dashboard asks the proxy for.
///
/// Coordinates keep the caller's text so the proxy can forward them untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastQuery {
    City(String),
    Coordinates { lat: String, lon: String },
}

impl ForecastQuery {
    pub fn city(name: impl Into<String>) -> Self {
        ForecastQuery::City(name.into())
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        ForecastQuery::Coordinates {
            lat: latitude.to_string(),
            lon: longitude.to_string(),
        }
    }

    /// Build a query from raw request parameters.
    ///
    /// A full `lat`/`lon` pair takes precedence over `city`; blank values count
    /// as absent.
    pub fn from_params(
        city: Option<&str>,
        lat: Option<&str>,
        lon: Option<&str>,
    ) -> Result<Self, QueryError> {
        fn present(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|s| !s.is_empty())
        }

        match (present(lat), present(lon), present(city)) {
            (Some(lat), Some(lon), _) => Ok(ForecastQuery::Coordinates {
                lat: lat.to_string(),
                lon: lon.to_string(),
            }),
            (_, _, Some(city)) => Ok(ForecastQuery::City(city.to_string())),
            _ => Err(QueryError::MissingLocation),
        }
    }

    /// Query-string pairs as the proxy expects them (`city` or `lat`+`lon`).
    pub fn proxy_params(&self) -> Vec<(&'static str, &str)> {
        match self {
            ForecastQuery::City(city) => vec![("city", city.as_str())],
            ForecastQuery::Coordinates { lat, lon } => {
                vec![("lat", lat.as_str()), ("lon", lon.as_str())]
            }
        }
    }
}

impl std::fmt::Display for ForecastQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForecastQuery::City(city) => write!(f, "{city}"),
            ForecastQuery::Coordinates { lat, lon } => write!(f, "{lat}, {lon}"),
        }
    }
}

/// Typed view of the upstream 5-day / 3-hour forecast payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub city: City,
    #[serde(default)]
    pub list: Vec<Sample>,
}

impl ForecastResponse {
    /// The earliest sample stands in for current conditions.
    pub fn current(&self) -> Option<&Sample> {
        self.list.first()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    pub coord: Coord,
    /// Shift from UTC in seconds.
    #[serde(default)]
    pub timezone: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// One timestamped forecast point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// Unix timestamp, seconds.
    pub dt: i64,
    #[serde(default)]
    pub dt_txt: Option<String>,
    pub main: SampleMain,
    #[serde(default)]
    pub weather: Vec<SampleWeather>,
    #[serde(default)]
    pub wind: SampleWind,
    /// Metres.
    #[serde(default)]
    pub visibility: Option<u32>,
    #[serde(default)]
    pub clouds: SampleClouds,
}

impl Sample {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.dt, 0)
    }

    /// Calendar day of the sample in UTC.
    pub fn date(&self) -> Option<NaiveDate> {
        self.time().map(|t| t.date_naive())
    }

    /// Condition category, e.g. "Clouds" or "Rain".
    pub fn condition(&self) -> &str {
        self.weather.first().map(|w| w.main.as_str()).unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.weather
            .first()
            .map(|w| w.description.as_str())
            .unwrap_or("Unknown")
    }

    pub fn visibility_km(&self) -> Option<f64> {
        self.visibility.map(|m| f64::from(m) / 1000.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleMain {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: u8,
    #[serde(default)]
    pub pressure: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleWeather {
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleWind {
    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleClouds {
    #[serde(default)]
    pub all: u8,
}
