//! Offline data used when no API key is configured.

use async_trait::async_trait;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    error::WeatherError,
    model::{DataSource, FORECAST_DAYS, Forecast, ForecastDay, Observation, Units},
};

use super::WeatherProvider;

/// Conditions cycled through, one per forecast day.
pub const CONDITION_ROTATION: [&str; 5] = ["Sunny", "Partly cloudy", "Cloudy", "Light rain", "Clear"];

pub const HUMIDITY_RANGE: std::ops::RangeInclusive<u8> = 60..=80;
const TEMPERATURE_JITTER: std::ops::RangeInclusive<i32> = -3..=3;

#[derive(Debug, Clone, Default)]
pub struct DemoProvider {
    seed: Option<u64>,
}

impl DemoProvider {
    /// Forecast jitter seeded from OS entropy.
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Reproducible forecast jitter.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[async_trait]
impl WeatherProvider for DemoProvider {
    async fn fetch_current(&self, city: &str, units: Units) -> Result<Observation, WeatherError> {
        Ok(current(city, units))
    }

    async fn fetch_forecast(&self, city: &str, units: Units) -> Result<Forecast, WeatherError> {
        Ok(forecast(city, units, &mut self.rng()))
    }
}

/// Fixed current conditions for `units`.
pub fn current(city: &str, units: Units) -> Observation {
    let (temperature, feels_like, wind_speed) = match units {
        Units::Celsius => (22.0, 24.0, 3.6),
        Units::Fahrenheit => (72.0, 75.0, 8.0),
    };

    Observation {
        location_name: city.to_string(),
        country_code: None,
        temperature,
        feels_like,
        condition: "Partly cloudy".to_string(),
        humidity_pct: 65.0,
        wind_speed,
        units,
        source: DataSource::Demo,
    }
}

/// Five placeholder days around a base temperature. Dates are labels only.
pub fn forecast<R: Rng>(city: &str, units: Units, rng: &mut R) -> Forecast {
    let (base, wind_speed) = match units {
        Units::Celsius => (20, 3.6),
        Units::Fahrenheit => (68, 8.0),
    };

    let days = (0..FORECAST_DAYS)
        .map(|i| {
            let temperature = f64::from(base + rng.gen_range(TEMPERATURE_JITTER));
            ForecastDay {
                date: format!("Day {}", i + 1),
                temperature,
                feels_like: temperature,
                condition: CONDITION_ROTATION[i % CONDITION_ROTATION.len()].to_string(),
                humidity_pct: f64::from(rng.gen_range(HUMIDITY_RANGE)),
                wind_speed,
            }
        })
        .collect();

    Forecast { location: city.to_string(), units, source: DataSource::Demo, days }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_is_fixed_per_unit_system() {
        let c = current("London", Units::Celsius);
        assert_eq!((c.temperature, c.feels_like, c.wind_speed), (22.0, 24.0, 3.6));
        assert_eq!(c.wind_unit_label(), "m/s");

        let f = current("London", Units::Fahrenheit);
        assert_eq!((f.temperature, f.feels_like, f.wind_speed), (72.0, 75.0, 8.0));
        assert_eq!(f.wind_unit_label(), "mph");

        assert_eq!(current("London", Units::Celsius), c);
    }

    #[test]
    fn forecast_has_five_days_in_bounds() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let fc = forecast("Lima", Units::Celsius, &mut rng);

            assert_eq!(fc.days.len(), FORECAST_DAYS);
            assert_eq!(fc.location, "Lima");
            for (i, day) in fc.days.iter().enumerate() {
                assert!((60.0..=80.0).contains(&day.humidity_pct), "humidity {}", day.humidity_pct);
                assert_eq!(day.humidity_pct.fract(), 0.0);
                assert_eq!(day.condition, CONDITION_ROTATION[i]);
                assert!((17.0..=23.0).contains(&day.temperature));
                assert_eq!(day.date, format!("Day {}", i + 1));
            }
        }
    }

    #[test]
    fn forecast_uses_fahrenheit_base() {
        let mut rng = StdRng::seed_from_u64(7);
        let fc = forecast("Austin", Units::Fahrenheit, &mut rng);

        assert!(fc.days.iter().all(|d| (65.0..=71.0).contains(&d.temperature)));
        assert_eq!(fc.units, Units::Fahrenheit);
    }

    #[tokio::test]
    async fn seeded_provider_is_reproducible() {
        let provider = DemoProvider::with_seed(42);
        let a = provider.fetch_forecast("Rome", Units::Celsius).await.unwrap();
        let b = provider.fetch_forecast("Rome", Units::Celsius).await.unwrap();

        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn forecast_header_keeps_raw_city() {
        let provider = DemoProvider::new();
        let fc = provider.fetch_forecast("new york", Units::Celsius).await.unwrap();

        assert_eq!(fc.location, "new york");
        assert_eq!(fc.source, DataSource::Demo);
    }
}
