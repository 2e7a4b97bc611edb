use crate::{
    Config, Credentials,
    error::WeatherError,
    model::{Forecast, Observation, Units},
    provider::{demo::DemoProvider, openweather::OpenWeatherProvider},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod demo;
pub mod openweather;

/// Source of normalized weather records. Implementations never print.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, city: &str, units: Units) -> Result<Observation, WeatherError>;

    async fn fetch_forecast(&self, city: &str, units: Units) -> Result<Forecast, WeatherError>;
}

/// Construct the provider matching the resolved credentials.
pub fn provider_from_config(
    config: &Config,
    credentials: &Credentials,
) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let boxed: Box<dyn WeatherProvider> = if credentials.is_demo() {
        log::info!("no API key configured, using demo data");
        Box::new(DemoProvider::new())
    } else {
        log::debug!("using OpenWeather provider at {}", config.base_url());
        Box::new(OpenWeatherProvider::new(
            credentials.api_key().to_owned(),
            config.base_url(),
            config.timeout(),
        )?)
    };

    Ok(boxed)
}
