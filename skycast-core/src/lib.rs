//! Core library for the `skycast` weather display.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Location resolution with a permission-aware fallback
//! - The weatherapi.com client and wire models
//! - Forecast normalization and the display view-model
//! - The fetch-cycle pipeline publishing Loading/Content/Error states
//!
//! It is used by `skycast-cli`, but can also be reused by other front
//! ends.

pub mod config;
pub mod error;
pub mod forecast;
pub mod location;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod view;

pub use config::Config;
pub use error::{FetchError, LocationError, NetworkError};
pub use forecast::hourly_timeline;
pub use location::{
    FixHandle, FixRequest, LocationProvider, LocationResolver, PermissionStatus,
    PinnedLocationProvider, UnsupportedLocationProvider, fix_channel,
};
pub use model::{Coordinate, CurrentConditions, ForecastDay, HourSample, WeatherSnapshot};
pub use pipeline::WeatherPipeline;
pub use provider::{WeatherProvider, provider_from_config};
pub use view::{DailyEntry, HourlyEntry, ViewState, WeatherViewModel};
