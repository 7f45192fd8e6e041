use std::{env, str::FromStr, time::Duration};

use crate::error::ConfigError;

/// Public dataset the provider script reads when nothing else is configured.
pub const DEFAULT_DATASET_URL: &str = "https://data.medicare.gov/resource/ikq5-jt9b.json";

/// AppConfig
///
/// Immutable runtime configuration shared by the navigator and the binaries.
/// Loaded once at startup and cloned into `NavigatorState`.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    // Runtime environment marker. Selects the log format and which variables are mandatory.
    pub env: Env,
    // How long the splash panel fades out when an authenticated-only panel replaces it.
    pub splash_fade: Duration,
    // Upper bound on redirect hops followed inside a single navigation.
    pub max_redirects: usize,
    // Endpoint of the provider dataset (JSON array of records).
    pub dataset_url: String,
    // Value sent as the `$limit` query parameter.
    pub dataset_limit: u32,
}

/// Env
///
/// Local runs get pretty logs and dataset defaults; production requires every
/// external endpoint to be set explicitly and logs JSON.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Test-friendly values that need no environment.
    fn default() -> Self {
        Self {
            env: Env::Local,
            splash_fade: Duration::from_millis(1000),
            max_redirects: 8,
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            dataset_limit: 10_000,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Errors
    /// `ConfigError::Missing` when `DATASET_URL` is absent in production, and
    /// `ConfigError::Invalid` when a numeric variable does not parse.
    pub fn load() -> Result<Self, ConfigError> {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let defaults = Self::default();

        let dataset_url = match (env, env::var("DATASET_URL")) {
            (_, Ok(url)) => url,
            (Env::Production, Err(_)) => return Err(ConfigError::Missing("DATASET_URL")),
            (Env::Local, Err(_)) => defaults.dataset_url,
        };

        let splash_fade = parse_var::<u64>("SPLASH_FADE_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.splash_fade);

        Ok(Self {
            env,
            splash_fade,
            max_redirects: parse_var("NAV_MAX_REDIRECTS")?.unwrap_or(defaults.max_redirects),
            dataset_url,
            dataset_limit: parse_var("DATASET_LIMIT")?.unwrap_or(defaults.dataset_limit),
        })
    }
}

/// Reads and parses an optional variable. Unset means `None`; set but
/// unparsable is an error rather than a silent fallback.
fn parse_var<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
        Err(_) => Ok(None),
    }
}
