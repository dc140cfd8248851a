//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `VITRINE_STORE_PATH` - Store file (default: `.vitrine/local-storage.json`)
//! - `VITRINE_PAGE_PATH` - Page manifest JSON (default: built-in demo page)
//! - `VITRINE_AUTOPLAY_MS` - Carousel autoplay interval (default: 4500)
//! - `VITRINE_TRANSITION_MS` - Carousel transition duration (default: 600)
//! - `VITRINE_SWIPE_THRESHOLD_PX` - Minimum swipe distance (default: 40)
//! - `VITRINE_ACCEPT_LEGACY_PASSWORDS` - Accept base64-stored passwords at
//!   login and upgrade them (default: false)
//! - `VITRINE_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::carousel::CarouselConfig;

const DEFAULT_STORE_PATH: &str = ".vitrine/local-storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// File backing the key-value store
    pub store_path: PathBuf,
    /// Page manifest; `None` uses the built-in demo page
    pub page_path: Option<PathBuf>,
    /// Carousel timings
    pub carousel: CarouselConfig,
    /// Accept and upgrade legacy base64 passwords at login
    pub accept_legacy_passwords: bool,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            page_path: None,
            carousel: CarouselConfig::default(),
            accept_legacy_passwords: false,
            log_format: LogFormat::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set to a value
    /// that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);
        let defaults = CarouselConfig::default();

        let carousel = CarouselConfig {
            autoplay_interval: env
                .parse::<u64>("VITRINE_AUTOPLAY_MS")?
                .map_or(defaults.autoplay_interval, Duration::from_millis),
            transition: env
                .parse::<u64>("VITRINE_TRANSITION_MS")?
                .map_or(defaults.transition, Duration::from_millis),
            swipe_threshold_px: env
                .parse::<f64>("VITRINE_SWIPE_THRESHOLD_PX")?
                .unwrap_or(defaults.swipe_threshold_px),
        };
        if carousel.autoplay_interval.is_zero() {
            return Err(ConfigError::InvalidEnvVar(
                "VITRINE_AUTOPLAY_MS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        if !carousel.swipe_threshold_px.is_finite() || carousel.swipe_threshold_px < 0.0 {
            return Err(ConfigError::InvalidEnvVar(
                "VITRINE_SWIPE_THRESHOLD_PX".to_string(),
                "must be a non-negative number".to_string(),
            ));
        }

        Ok(Self {
            store_path: env
                .optional("VITRINE_STORE_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_STORE_PATH), PathBuf::from),
            page_path: env.optional("VITRINE_PAGE_PATH").map(PathBuf::from),
            carousel,
            accept_legacy_passwords: env
                .flag("VITRINE_ACCEPT_LEGACY_PASSWORDS")?
                .unwrap_or(false),
            log_format: env.parse("VITRINE_LOG_FORMAT")?.unwrap_or_default(),
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable; blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Parse an optional variable.
    fn parse<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: ToString,
    {
        self.optional(key)
            .map(|raw| {
                raw.parse::<T>()
                    .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
            })
            .transpose()
    }

    /// Parse an optional boolean flag (`true/false`, `1/0`, `yes/no`).
    fn flag(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        self.optional(key)
            .map(|raw| match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                other => Err(ConfigError::InvalidEnvVar(
                    key.to_string(),
                    format!("expected a boolean, got `{other}`"),
                )),
            })
            .transpose()
    }
}
