use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, path::PathBuf, time::Duration};

use crate::{error::ConfigError, model::Units};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "WEATHER_CONFIG";

/// Environment variable that overrides `apiKey` from the config file.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration stored on disk.
///
/// Example JSON:
/// ```json
/// { "apiKey": "...", "defaultUnits": "celsius", "defaultCity": "London" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub api_key: Option<String>,
    pub default_units: Option<String>,
    pub default_city: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from `path`, or an empty default if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no config file at {}, using built-in defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;

        let cfg: Config = serde_json::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;

        log::debug!("loaded config from {}", path.display());
        Ok(cfg)
    }

    /// Path to the config file: `$WEATHER_CONFIG`, else the platform config dir.
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or(ConfigError::NoConfigDir)?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Units used when the command line doesn't name any.
    pub fn default_units(&self) -> Units {
        let Some(raw) = self.default_units.as_deref() else {
            return Units::default();
        };

        raw.parse().unwrap_or_else(|err| {
            log::warn!("ignoring defaultUnits from config: {err}");
            Units::default()
        })
    }

    pub fn default_city(&self) -> Option<&str> {
        self.default_city.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.filter(|s| *s > 0).unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Resolve the credential, preferring `env_api_key` over the file's `apiKey`.
    pub fn credentials(&self, env_api_key: Option<String>) -> Credentials {
        let key = env_api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone());

        match key {
            Some(key) => Credentials::new(key),
            None => Credentials::demo(),
        }
    }
}

/// API credential for the upstream provider. Loaded once, never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    pub const DEMO_API_KEY: &'static str = "demo";
    /// Placeholder shipped in sample configs.
    pub const PLACEHOLDER_API_KEY: &'static str = "YOUR_API_KEY_HERE";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into().trim().to_string() }
    }

    pub fn demo() -> Self {
        Self::new(Self::DEMO_API_KEY)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// True when no real key is available and data must be synthesized.
    pub fn is_demo(&self) -> bool {
        self.api_key.is_empty()
            || self.api_key == Self::DEMO_API_KEY
            || self.api_key == Self::PLACEHOLDER_API_KEY
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.is_demo() { self.api_key.as_str() } else { "<redacted>" };
        f.debug_struct("Credentials").field("api_key", &shown).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.json")).unwrap();

        assert_eq!(cfg, Config::default());
        assert!(cfg.credentials(None).is_demo());
        assert_eq!(cfg.default_units(), Units::Celsius);
        assert_eq!(cfg.default_city(), None);
    }

    #[test]
    fn parses_recognized_keys_and_ignores_others() {
        let file = write_config(
            r#"{
                "apiKey": "abc123",
                "defaultUnits": "F",
                "defaultCity": " Paris ",
                "theme": "dark"
            }"#,
        );

        let cfg = Config::load_from(file.path()).unwrap();

        assert_eq!(cfg.api_key.as_deref(), Some("abc123"));
        assert_eq!(cfg.default_units(), Units::Fahrenheit);
        assert_eq!(cfg.default_city(), Some("Paris"));
        assert!(!cfg.credentials(None).is_demo());
    }

    #[test]
    fn null_default_city_is_accepted() {
        let file = write_config(r#"{ "apiKey": "demo", "defaultCity": null }"#);
        let cfg = Config::load_from(file.path()).unwrap();

        assert_eq!(cfg.default_city(), None);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let file = write_config("{ apiKey: nope");
        let err = Config::load_from(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("failed to parse config file"));
    }

    #[test]
    fn invalid_default_units_fall_back_to_celsius() {
        let cfg = Config { default_units: Some("kelvin".into()), ..Config::default() };
        assert_eq!(cfg.default_units(), Units::Celsius);
    }

    #[test]
    fn placeholder_and_empty_keys_mean_demo() {
        for key in ["demo", "YOUR_API_KEY_HERE", "", "   "] {
            let cfg = Config { api_key: Some(key.into()), ..Config::default() };
            assert!(cfg.credentials(None).is_demo(), "key {key:?}");
        }
    }

    #[test]
    fn env_key_overrides_config_key() {
        let cfg = Config { api_key: Some("demo".into()), ..Config::default() };

        let creds = cfg.credentials(Some("live-key".into()));
        assert_eq!(creds.api_key(), "live-key");
        assert!(!creds.is_demo());

        let creds = cfg.credentials(Some("  ".into()));
        assert!(creds.is_demo());
    }

    #[test]
    fn debug_output_redacts_real_keys() {
        let shown = format!("{:?}", Credentials::new("secret-key"));
        assert!(!shown.contains("secret-key"));
        assert!(shown.contains("redacted"));
    }

    #[test]
    fn base_url_and_timeout_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let cfg = Config {
            base_url: Some("http://127.0.0.1:8080/".into()),
            timeout_secs: Some(3),
            ..Config::default()
        };
        assert_eq!(cfg.base_url(), "http://127.0.0.1:8080");
        assert_eq!(cfg.timeout(), Duration::from_secs(3));
    }
}
