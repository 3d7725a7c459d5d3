//! Application configuration.
//!
//! Settings are read from environment variables prefixed with
//! `CAREER_FINDER`, using `__` to separate nested values, after loading a
//! `.env` file if one is present.
//!
//! - `CAREER_FINDER__SCORING__ENDPOINT=http://host:5000/api/predict`
//! - `CAREER_FINDER__SCORING__REQUEST_TIMEOUT_SECS=30`
//! - `CAREER_FINDER__LOG__LEVEL=career_finder=debug`

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

pub const ENV_PREFIX: &str = "CAREER_FINDER";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/predict";
/// Connection check route served next to the predict route.
pub const HEALTH_PATH: &str = "/api/test";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Scoring endpoint is not a valid http(s) URL: {0}")]
    InvalidEndpoint(String),

    #[error("Request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,
}

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Where and how to reach the scoring service.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Predict route receiving the answers.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Connection check route; derived from `endpoint` when unset.
    #[serde(default)]
    pub health_endpoint: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Pause before the fallback recommendation is returned.
    #[serde(default = "default_fallback_delay")]
    pub fallback_delay_ms: u64,
}

/// Operator log output.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `career_finder=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_fallback_delay() -> u64 {
    1500
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("career-finder.log")
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            health_endpoint: None,
            request_timeout_secs: default_request_timeout(),
            fallback_delay_ms: default_fallback_delay(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

impl AppConfig {
    /// Loads and validates configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed or fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_environment(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
    }

    pub fn from_environment(source: config::Environment) -> Result<Self, ConfigError> {
        let config: AppConfig = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.scoring.validate()
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_http_url(&self.endpoint)?;
        if let Some(ref health) = self.health_endpoint {
            validate_http_url(health)?;
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }

    /// The explicit health endpoint, or [`HEALTH_PATH`] on the predict
    /// endpoint's origin.
    pub fn health_url(&self) -> String {
        if let Some(ref health) = self.health_endpoint {
            return health.clone();
        }
        Url::parse(&self.endpoint)
            .and_then(|url| url.join(HEALTH_PATH))
            .map(|url| url.to_string())
            .unwrap_or_else(|_| format!("{}{}", self.endpoint.trim_end_matches('/'), HEALTH_PATH))
    }
}

fn validate_http_url(raw: &str) -> Result<(), ValidationError> {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(ValidationError::InvalidEndpoint(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = AppConfig::from_environment(environment(&[])).unwrap();

        assert_eq!(config.scoring.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.scoring.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.scoring.fallback_delay(), Duration::from_millis(1500));
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.file, PathBuf::from("career-finder.log"));
    }

    #[test]
    fn test_nested_variables_override_defaults() {
        let config = AppConfig::from_environment(environment(&[
            ("CAREER_FINDER__SCORING__ENDPOINT", "https://scoring.internal/api/predict"),
            ("CAREER_FINDER__SCORING__REQUEST_TIMEOUT_SECS", "5"),
            ("CAREER_FINDER__SCORING__FALLBACK_DELAY_MS", "0"),
            ("CAREER_FINDER__LOG__LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.scoring.endpoint, "https://scoring.internal/api/predict");
        assert_eq!(config.scoring.request_timeout_secs, 5);
        assert_eq!(config.scoring.fallback_delay_ms, 0);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let result = AppConfig::from_environment(environment(&[(
            "CAREER_FINDER__SCORING__ENDPOINT",
            "localhost:5000/api/predict",
        )]));

        assert!(matches!(
            result,
            Err(ConfigError::Validation(ValidationError::InvalidEndpoint(_)))
        ));
    }

    #[test]
    fn test_timeout_bounds() {
        let mut scoring = ScoringConfig::default();
        scoring.request_timeout_secs = 0;
        assert_eq!(scoring.validate(), Err(ValidationError::InvalidTimeout));

        scoring.request_timeout_secs = 301;
        assert_eq!(scoring.validate(), Err(ValidationError::InvalidTimeout));

        scoring.request_timeout_secs = 300;
        assert!(scoring.validate().is_ok());
    }

    #[test]
    fn test_health_url_derived_from_endpoint() {
        let scoring = ScoringConfig::default();
        assert_eq!(scoring.health_url(), "http://localhost:5000/api/test");

        let scoring = ScoringConfig {
            health_endpoint: Some("http://other:8080/ping".to_string()),
            ..ScoringConfig::default()
        };
        assert_eq!(scoring.health_url(), "http://other:8080/ping");
    }
}
