//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over weather providers (live OpenWeather and offline demo data)
//! - Shared domain models (requests, observations, forecasts)
//! - Typed errors for everything that can go wrong while acquiring data
//!
//! Nothing in here prints; rendering belongs to the binary.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::{Config, Credentials};
pub use error::{ConfigError, WeatherError};
pub use model::{DataSource, Forecast, ForecastDay, Mode, Observation, RequestSpec, Units};
pub use provider::{WeatherProvider, provider_from_config};
