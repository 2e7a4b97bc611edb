use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::{collections::HashSet, fmt, time::Duration};

use crate::{
    error::WeatherError,
    model::{DataSource, FORECAST_DAYS, Forecast, ForecastDay, Observation, Units},
};

use super::WeatherProvider;

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(timeout).build().map_err(WeatherError::Client)?;

        Ok(Self { api_key, base_url: base_url.trim_end_matches('/').to_string(), http })
    }

    /// Single GET against `/data/2.5/{endpoint}`; returns the body of a 2xx response.
    async fn get(&self, endpoint: &str, city: &str, units: Units) -> Result<String, WeatherError> {
        let url = format!("{}/data/2.5/{endpoint}", self.base_url);
        log::debug!("GET {url} (q={city}, units={})", units.api_param());

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", units.api_param()),
            ])
            .send()
            .await
            .map_err(WeatherError::Connectivity)?;

        let status = res.status();
        let body = res.text().await.map_err(WeatherError::Connectivity)?;
        log::debug!("OpenWeather {endpoint} responded with {status}");

        if !status.is_success() {
            return Err(classify_status(status.as_u16(), &body, city));
        }

        Ok(body)
    }
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_current(&self, city: &str, units: Units) -> Result<Observation, WeatherError> {
        let body = self.get("weather", city, units).await?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::InvalidResponse(format!("current weather: {e}")))?;

        Ok(Observation {
            location_name: parsed.name,
            country_code: parsed.sys.and_then(|s| s.country),
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            condition: condition(&parsed.weather),
            humidity_pct: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
            units,
            source: DataSource::Live,
        })
    }

    async fn fetch_forecast(&self, city: &str, units: Units) -> Result<Forecast, WeatherError> {
        let body = self.get("forecast", city, units).await?;

        let parsed: OwForecastResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::InvalidResponse(format!("forecast: {e}")))?;

        if parsed.list.is_empty() {
            return Err(WeatherError::InvalidResponse("forecast contained no entries".into()));
        }

        let offset = parsed
            .city
            .timezone
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());

        let location = match parsed.city.country.as_deref() {
            Some(cc) if !cc.is_empty() => format!("{}, {}", parsed.city.name, cc),
            _ => parsed.city.name.clone(),
        };

        Ok(Forecast {
            location,
            units,
            source: DataSource::Live,
            days: group_by_date(&parsed.list, offset),
        })
    }
}

/// Keep the first entry seen for each local calendar date, up to [`FORECAST_DAYS`] dates.
fn group_by_date(entries: &[OwForecastEntry], offset: FixedOffset) -> Vec<ForecastDay> {
    let mut seen = HashSet::new();
    let mut days: Vec<(NaiveDate, &OwForecastEntry)> = Vec::with_capacity(FORECAST_DAYS);

    for entry in entries {
        let Some(date) = local_date(entry.dt, offset) else {
            log::warn!("skipping forecast entry with out-of-range timestamp {}", entry.dt);
            continue;
        };

        if !seen.insert(date) {
            continue;
        }

        days.push((date, entry));
        if days.len() == FORECAST_DAYS {
            break;
        }
    }

    days.sort_by_key(|(date, _)| *date);

    days.into_iter()
        .map(|(date, entry)| ForecastDay {
            date: date.format("%Y-%m-%d").to_string(),
            temperature: entry.main.temp,
            feels_like: entry.main.feels_like,
            condition: condition(&entry.weather),
            humidity_pct: entry.main.humidity,
            wind_speed: entry.wind.speed,
        })
        .collect()
}

fn local_date(ts: i64, offset: FixedOffset) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.with_timezone(&offset).date_naive())
}

/// Map a non-2xx status onto the error taxonomy.
fn classify_status(status: u16, body: &str, city: &str) -> WeatherError {
    match status {
        401 => WeatherError::Unauthorized,
        404 => WeatherError::CityNotFound { city: city.to_string() },
        429 => WeatherError::RateLimited,
        _ => WeatherError::Upstream { status, message: error_message(body) },
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<OwErrorBody>(body) {
        Ok(OwErrorBody { message: Some(message) }) if !message.is_empty() => message,
        _ if body.trim().is_empty() => "no details provided".to_string(),
        _ => truncate_body(body.trim()),
    }
}

fn condition(weather: &[OwWeather]) -> String {
    weather.first().map(|w| w.description.clone()).unwrap_or_else(|| "Unknown".to_string())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: Option<OwSys>,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    country: Option<String>,
    /// Shift in seconds from UTC.
    timezone: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}
