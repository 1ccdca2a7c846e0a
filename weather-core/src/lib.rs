//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - The forecast query and the typed forecast payload
//! - Abstraction over upstream forecast providers (used by `weather-proxy`)
//! - The dashboard's client of the proxy, geolocation and configuration
//! - View logic: the five-day strip, condition icons and sounds,
//!   single-slot playback, the clock and the map
//!
//! It is used by `weather-proxy` and `weather-cli`.

pub mod client;
pub mod clock;
pub mod condition;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geolocation;
pub mod map;
pub mod model;
pub mod playback;
pub mod provider;

pub use client::ProxyClient;
pub use clock::Clock;
pub use condition::{Condition, SoundClip};
pub use config::Config;
pub use error::{ClientError, GeolocationError, QueryError, UpstreamError};
pub use forecast::{DayBucket, daily_buckets, upcoming_days};
pub use geolocation::{Geolocator, Location};
pub use map::MapView;
pub use model::{ForecastQuery, ForecastResponse, Sample};
pub use playback::{AudioSink, PlaybackEffect, PlaybackSlot};
pub use provider::{ForecastProvider, OpenWeatherProvider, UpstreamBody};
