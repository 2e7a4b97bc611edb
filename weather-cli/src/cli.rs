use clap::{
    CommandFactory, Parser,
    error::{ContextKind, ContextValue, ErrorKind},
};
use std::ffi::OsString;
use thiserror::Error;
use weather_core::{Config, Mode, RequestSpec, Units};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Current weather and 5-day forecasts for a city",
    after_help = "Example: weather London --units fahrenheit --forecast"
)]
pub struct Cli {
    /// City name, e.g. "London" or "New York". Unquoted words are joined with spaces.
    pub city: Vec<String>,

    /// Unit system: celsius, fahrenheit, c or f.
    #[arg(short, long, value_name = "UNITS")]
    pub units: Option<String>,

    /// Show a 5-day forecast instead of current conditions.
    #[arg(short, long)]
    pub forecast: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("{}", reason.as_deref().unwrap_or("no city given"))]
    Usage { reason: Option<String> },

    #[error("help requested")]
    HelpRequested,

    #[error("version requested")]
    VersionRequested,

    #[error("city name must not be empty")]
    EmptyCity,

    #[error("--units requires a value")]
    InvalidUnitsArgument,

    #[error("invalid units '{0}'")]
    InvalidUnitsValue(String),
}

/// Command-line arguments after validation, before config defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    city: Option<String>,
    units: Option<Units>,
    mode: Mode,
}

impl Invocation {
    /// Fill in whatever the command line left out from `config`.
    pub fn resolve(self, config: &Config) -> Result<RequestSpec, ArgsError> {
        let units = self.units.unwrap_or_else(|| config.default_units());

        let city = match self.city.as_deref() {
            Some(city) => city,
            None => config.default_city().ok_or_else(|| ArgsError::Usage {
                reason: Some("no city given and no defaultCity configured".to_string()),
            })?,
        };

        RequestSpec::new(city, units, self.mode).ok_or(ArgsError::EmptyCity)
    }
}

impl Cli {
    /// Parse the tokens following the program name.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        if args.is_empty() {
            return Err(ArgsError::Usage { reason: None });
        }

        if requests_help(&args) {
            return Err(ArgsError::HelpRequested);
        }

        let argv = std::iter::once(OsString::from("weather")).chain(args);
        Self::try_parse_from(argv).map_err(classify_clap_error)
    }

    pub fn validate(self) -> Result<Invocation, ArgsError> {
        let city = if self.city.is_empty() {
            None
        } else {
            let joined = self.city.join(" ");
            if joined.trim().is_empty() {
                return Err(ArgsError::EmptyCity);
            }
            Some(joined.trim().to_string())
        };

        let units = self
            .units
            .map(|raw| raw.parse::<Units>().map_err(|_| ArgsError::InvalidUnitsValue(raw)))
            .transpose()?;

        let mode = if self.forecast { Mode::Forecast } else { Mode::Current };

        Ok(Invocation { city, units, mode })
    }

    pub fn usage() -> String {
        Self::command().render_help().to_string()
    }

    pub fn version() -> String {
        Self::command().render_version()
    }
}

/// Parse and validate in one step. Pure: never prints, never exits.
pub fn parse_args<I, T>(args: I) -> Result<Invocation, ArgsError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    Cli::try_parse_args(args)?.validate()
}

/// A help flag anywhere before `--` wins over every other token.
fn requests_help(args: &[OsString]) -> bool {
    args.iter()
        .map(OsString::as_os_str)
        .take_while(|arg| *arg != "--")
        .any(|arg| arg == "-h" || arg == "--help")
}

fn classify_clap_error(err: clap::Error) -> ArgsError {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            ArgsError::HelpRequested
        }
        ErrorKind::DisplayVersion => ArgsError::VersionRequested,
        ErrorKind::InvalidValue if names_units_flag(&err) => ArgsError::InvalidUnitsArgument,
        _ => ArgsError::Usage { reason: Some(first_line(&err)) },
    }
}

fn names_units_flag(err: &clap::Error) -> bool {
    matches!(
        err.get(ContextKind::InvalidArg),
        Some(ContextValue::String(arg)) if arg.starts_with("--units")
    )
}

fn first_line(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}
