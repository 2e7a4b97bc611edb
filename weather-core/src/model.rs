use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Maximum number of days a forecast carries.
pub const FORECAST_DAYS: usize = 5;

/// Paired temperature scale and wind-speed unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Celsius,
    Fahrenheit,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Celsius => "celsius",
            Units::Fahrenheit => "fahrenheit",
        }
    }

    /// Value of the `units` query parameter sent upstream.
    pub fn api_param(&self) -> &'static str {
        match self {
            Units::Celsius => "metric",
            Units::Fahrenheit => "imperial",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Celsius => "°C",
            Units::Fahrenheit => "°F",
        }
    }

    pub fn wind_label(&self) -> &'static str {
        match self {
            Units::Celsius => "m/s",
            Units::Fahrenheit => "mph",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a units token is not one of `celsius|fahrenheit|c|f`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown unit system '{0}'; expected celsius, fahrenheit, c or f")]
pub struct UnknownUnits(pub String);

impl FromStr for Units {
    type Err = UnknownUnits;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "celsius" | "c" => Ok(Units::Celsius),
            "fahrenheit" | "f" => Ok(Units::Fahrenheit),
            _ => Err(UnknownUnits(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Current,
    Forecast,
}

/// A validated request for weather data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    city: String,
    pub units: Units,
    pub mode: Mode,
}

impl RequestSpec {
    /// Returns `None` when `city` is empty or whitespace-only.
    pub fn new(city: &str, units: Units, mode: Mode) -> Option<Self> {
        let city = city.trim();
        if city.is_empty() {
            return None;
        }

        Some(Self { city: city.to_string(), units, mode })
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    Live,
    Demo,
}

/// Current conditions for one location, at provider precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub location_name: String,
    pub country_code: Option<String>,
    pub temperature: f64,
    pub feels_like: f64,
    pub condition: String,
    pub humidity_pct: f64,
    pub wind_speed: f64,
    pub units: Units,
    pub source: DataSource,
}

impl Observation {
    /// "Name, CC", or just the name when the country is unknown.
    pub fn location(&self) -> String {
        match self.country_code.as_deref() {
            Some(cc) if !cc.is_empty() => format!("{}, {}", self.location_name, cc),
            _ => self.location_name.clone(),
        }
    }

    pub fn wind_unit_label(&self) -> &'static str {
        self.units.wind_label()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub condition: String,
    pub humidity_pct: f64,
    pub wind_speed: f64,
}

/// One entry per calendar date, ascending, at most [`FORECAST_DAYS`] long.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub location: String,
    pub units: Units,
    pub source: DataSource,
    pub days: Vec<ForecastDay>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_parse_any_case_and_abbreviation() {
        for token in ["celsius", "CELSIUS", "Celsius", "c", "C", " c "] {
            assert_eq!(token.parse::<Units>(), Ok(Units::Celsius), "token {token:?}");
        }
        for token in ["fahrenheit", "Fahrenheit", "FAHRENHEIT", "f", "F"] {
            assert_eq!(token.parse::<Units>(), Ok(Units::Fahrenheit), "token {token:?}");
        }
    }

    #[test]
    fn units_reject_unknown_tokens() {
        for token in ["kelvin", "", "cel", "metric"] {
            let err = token.parse::<Units>().unwrap_err();
            assert_eq!(err, UnknownUnits(token.to_string()));
        }
    }

    #[test]
    fn units_as_str_roundtrip() {
        for units in [Units::Celsius, Units::Fahrenheit] {
            assert_eq!(units.as_str().parse::<Units>(), Ok(units));
        }
    }

    #[test]
    fn units_select_upstream_param_and_labels() {
        assert_eq!(Units::Celsius.api_param(), "metric");
        assert_eq!(Units::Fahrenheit.api_param(), "imperial");
        assert_eq!(Units::Celsius.wind_label(), "m/s");
        assert_eq!(Units::Fahrenheit.wind_label(), "mph");
        assert_eq!(Units::Celsius.temperature_symbol(), "°C");
        assert_eq!(Units::Fahrenheit.temperature_symbol(), "°F");
    }

    #[test]
    fn request_spec_trims_city() {
        let req = RequestSpec::new("  London ", Units::Celsius, Mode::Current).unwrap();
        assert_eq!(req.city(), "London");
    }

    #[test]
    fn request_spec_rejects_blank_city() {
        for city in ["", " ", "\t\n", "   "] {
            assert!(RequestSpec::new(city, Units::Celsius, Mode::Current).is_none());
        }
    }

    #[test]
    fn observation_location_joins_country() {
        let mut obs = Observation {
            location_name: "London".into(),
            country_code: Some("GB".into()),
            temperature: 10.0,
            feels_like: 9.0,
            condition: "rain".into(),
            humidity_pct: 80.0,
            wind_speed: 4.1,
            units: Units::Celsius,
            source: DataSource::Live,
        };
        assert_eq!(obs.location(), "London, GB");

        obs.country_code = None;
        assert_eq!(obs.location(), "London");
    }
}
