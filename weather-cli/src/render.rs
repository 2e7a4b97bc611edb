//! Human-friendly output. Pure formatting: callers decide where lines go.

use weather_core::{
    ConfigError, DataSource, Forecast, Observation, WeatherError, config::API_KEY_ENV,
};

use crate::{
    app::{AppError, Report, RunContext},
    cli::{ArgsError, Cli},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Text for a run that ended without a report, plus the process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub lines: Vec<String>,
    pub stream: Stream,
    pub exit_code: u8,
}

impl Rendered {
    fn stdout(lines: Vec<String>) -> Self {
        Self { lines, stream: Stream::Stdout, exit_code: 0 }
    }

    fn stderr(lines: Vec<String>) -> Self {
        Self { lines, stream: Stream::Stderr, exit_code: 1 }
    }

    pub fn emit(&self) {
        for line in &self.lines {
            match self.stream {
                Stream::Stdout => println!("{line}"),
                Stream::Stderr => eprintln!("{line}"),
            }
        }
    }
}

pub fn render_report(report: &Report) -> Vec<String> {
    match report {
        Report::Current(obs) => render_current(obs),
        Report::Forecast(forecast) => render_forecast(forecast),
    }
}

pub fn render_current(obs: &Observation) -> Vec<String> {
    let symbol = obs.units.temperature_symbol();

    let mut lines = vec![
        format!("Weather in {}", obs.location()),
        format!("Temperature: {}{symbol}", whole(obs.temperature)),
        format!("Feels like:  {}{symbol}", whole(obs.feels_like)),
        format!("Condition:   {}", obs.condition),
        format!("Humidity:    {}%", whole(obs.humidity_pct)),
        format!("Wind:        {} {}", obs.wind_speed, obs.wind_unit_label()),
    ];

    if obs.source == DataSource::Demo {
        lines.extend(demo_note());
    }

    lines
}

pub fn render_forecast(forecast: &Forecast) -> Vec<String> {
    let symbol = forecast.units.temperature_symbol();
    let mut lines = vec![format!("{}-day forecast for {}", forecast.days.len(), forecast.location)];

    for day in &forecast.days {
        lines.push(String::new());
        lines.push(day.date.clone());
        lines.push(format!("  Temperature: {}{symbol}", whole(day.temperature)));
        lines.push(format!("  Condition:   {}", day.condition));
        lines.push(format!("  Humidity:    {}%", whole(day.humidity_pct)));
    }

    if forecast.source == DataSource::Demo {
        lines.extend(demo_note());
    }

    lines
}

pub fn render_error(err: &AppError, ctx: &RunContext) -> Rendered {
    match err {
        AppError::Args(err) => render_args_error(err),
        AppError::Config(err) => render_config_error(err),
        AppError::Weather(err) => render_weather_error(err, ctx),
    }
}

fn render_args_error(err: &ArgsError) -> Rendered {
    match err {
        ArgsError::HelpRequested => Rendered::stdout(text_lines(&Cli::usage())),
        ArgsError::VersionRequested => Rendered::stdout(text_lines(&Cli::version())),
        ArgsError::Usage { reason } => {
            let mut lines = Vec::new();
            if let Some(reason) = reason {
                lines.push(format!("Error: {reason}"));
                lines.push(String::new());
            }
            lines.extend(text_lines(&Cli::usage()));
            Rendered::stderr(lines)
        }
        ArgsError::EmptyCity => Rendered::stderr(vec![
            "Error: city name cannot be empty.".to_string(),
            "Example: weather London".to_string(),
        ]),
        ArgsError::InvalidUnitsArgument => Rendered::stderr(vec![
            "Error: --units requires a value: celsius, fahrenheit, c or f.".to_string(),
        ]),
        ArgsError::InvalidUnitsValue(value) => Rendered::stderr(vec![format!(
            "Error: invalid units '{value}'. Use celsius, fahrenheit, c or f."
        )]),
    }
}

fn render_config_error(err: &ConfigError) -> Rendered {
    Rendered::stderr(vec![
        format!("Error: {err}"),
        "Fix the file or remove it to fall back to demo data.".to_string(),
    ])
}

fn render_weather_error(err: &WeatherError, ctx: &RunContext) -> Rendered {
    let lines = match err {
        WeatherError::Unauthorized => vec![
            "Error: the weather provider rejected your API key.".to_string(),
            format!(
                "Check \"apiKey\" in {} (or the {API_KEY_ENV} environment variable).",
                config_location(ctx)
            ),
        ],
        WeatherError::CityNotFound { city } => vec![
            format!("Error: city '{city}' not found."),
            "Check the spelling and try again.".to_string(),
        ],
        WeatherError::RateLimited => vec![
            "Error: too many requests to the weather provider.".to_string(),
            "Please wait a minute and try again later.".to_string(),
        ],
        WeatherError::Upstream { status, message } => {
            vec![format!("Error: weather provider returned HTTP {status}: {message}")]
        }
        WeatherError::InvalidResponse(detail) => {
            vec![format!("Error: unexpected response from the weather provider ({detail}).")]
        }
        WeatherError::Connectivity(source) => vec![
            format!("Error: could not reach the weather provider ({source})."),
            "Check your internet connection and try again.".to_string(),
        ],
        WeatherError::Client(source) => {
            vec![format!("Error: failed to set up the HTTP client ({source}).")]
        }
    };

    Rendered::stderr(lines)
}

fn config_location(ctx: &RunContext) -> String {
    ctx.config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "your config file".to_string())
}

fn demo_note() -> [String; 2] {
    [
        String::new(),
        format!("(demo data: set \"apiKey\" in your config file or {API_KEY_ENV} for live weather)"),
    ]
}

/// Integer for display; the stored value keeps provider precision.
fn whole(value: f64) -> i64 {
    value.round() as i64
}

fn text_lines(text: &str) -> Vec<String> {
    text.trim_end().lines().map(str::to_string).collect()
}
