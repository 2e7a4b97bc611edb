use std::{ffi::OsString, path::PathBuf};
use thiserror::Error;
use weather_core::{
    Config, ConfigError, Forecast, Mode, Observation, RequestSpec, WeatherError, WeatherProvider,
    config::API_KEY_ENV, provider_from_config,
};

use crate::cli::{self, ArgsError};

/// Anything that ends a run without a report.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Args(#[from] ArgsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Weather(#[from] WeatherError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Current(Observation),
    Forecast(Forecast),
}

/// Process-level inputs that don't come from argv.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub config_path: Option<PathBuf>,
    pub env_api_key: Option<String>,
}

impl RunContext {
    pub fn from_env() -> Self {
        let config_path = Config::config_file_path()
            .inspect_err(|err| log::warn!("{err}; continuing without a config file"))
            .ok();

        Self { config_path, env_api_key: std::env::var(API_KEY_ENV).ok() }
    }
}

/// One full pass: arguments, config, provider, fetch.
pub async fn run<I, T>(args: I, ctx: &RunContext) -> Result<Report, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let invocation = cli::parse_args(args)?;

    let config = match &ctx.config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::default(),
    };

    let request = invocation.resolve(&config)?;
    let credentials = config.credentials(ctx.env_api_key.clone());
    let provider = provider_from_config(&config, &credentials)?;

    Ok(fetch(provider.as_ref(), &request).await?)
}

pub async fn fetch(
    provider: &dyn WeatherProvider,
    request: &RequestSpec,
) -> Result<Report, WeatherError> {
    log::info!("fetching {:?} weather for {} in {}", request.mode, request.city(), request.units);

    match request.mode {
        Mode::Current => provider.fetch_current(request.city(), request.units).await.map(Report::Current),
        Mode::Forecast => {
            provider.fetch_forecast(request.city(), request.units).await.map(Report::Forecast)
        }
    }
}
