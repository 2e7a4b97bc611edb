use std::path::PathBuf;
use thiserror::Error;

/// Failures while acquiring weather data.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("the weather provider rejected the API key")]
    Unauthorized,

    #[error("city '{city}' was not found")]
    CityNotFound { city: String },

    #[error("too many requests to the weather provider")]
    RateLimited,

    #[error("weather provider returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("could not reach the weather provider: {0}")]
    Connectivity(#[source] reqwest::Error),

    #[error("weather provider sent a response that could not be decoded: {0}")]
    InvalidResponse(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Failures while loading the local configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not determine platform config directory")]
    NoConfigDir,
}
