//! Configuration management for the sunshine finder
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SunshineError;
use crate::finder::MAX_BEST_LOCATIONS;
use crate::models::Coordinate;
use crate::sampling::{
    DEFAULT_MIN_POINTS_PER_RING, DEFAULT_POINTS_PER_RING, DEFAULT_RING_RADII_KM, SamplingPattern,
};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SunshineConfig {
    /// Weather API configuration
    pub weather: WeatherConfig,
    /// Current position lookup
    pub location: LocationConfig,
    /// Sampling and ranking settings
    pub search: SearchConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Locationforecast endpoint
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u32,
    /// Identifying User-Agent, required by api.met.no
    pub user_agent: String,
    /// Upper bound on weather requests in flight
    pub max_concurrent_requests: usize,
}

/// Current position lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Program printing "<lat> <lon>"
    pub command: String,
    /// Arguments passed to the program
    pub args: Vec<String>,
    /// Use this coordinate instead of running the command
    pub fixed: Option<Coordinate>,
}

/// Sampling and ranking settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Radius used when none is given
    pub default_radius_km: f64,
    /// Requested point density per ring
    pub points_per_ring: usize,
    /// Number of best locations to report
    pub top_n: usize,
    /// Ring radii in km, ascending
    pub ring_radii_km: Vec<f64>,
    /// Lower bound for points on one ring
    pub min_points_per_ring: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.met.no/weatherapi/locationforecast/2.0/compact".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_user_agent() -> String {
    format!(
        "sunshine-finder/{} github.com/sunshine-finder",
        env!("CARGO_PKG_VERSION")
    )
}

fn default_max_concurrent_requests() -> usize {
    8
}

fn default_location_command() -> String {
    "CoreLocationCLI".to_string()
}

fn default_location_args() -> Vec<String> {
    vec![
        "-once".to_string(),
        "-format".to_string(),
        "%latitude %longitude".to_string(),
    ]
}

fn default_search_radius() -> f64 {
    100.0
}

fn default_top_n() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
            user_agent: default_user_agent(),
            max_concurrent_requests: default_max_concurrent_requests(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            command: default_location_command(),
            args: default_location_args(),
            fixed: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_radius_km: default_search_radius(),
            points_per_ring: DEFAULT_POINTS_PER_RING,
            top_n: default_top_n(),
            ring_radii_km: DEFAULT_RING_RADII_KM.to_vec(),
            min_points_per_ring: DEFAULT_MIN_POINTS_PER_RING,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl SearchConfig {
    /// Sampling pattern described by this configuration
    #[must_use]
    pub fn pattern(&self) -> SamplingPattern {
        SamplingPattern::new(self.ring_radii_km.clone(), self.min_points_per_ring)
    }
}

impl SunshineConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // An explicitly requested file must exist; the default one is optional
        match config_path {
            Some(path) => {
                builder = builder.add_source(
                    File::from(path.clone())
                        .required(true)
                        .format(config::FileFormat::Toml),
                );
            }
            None => {
                if let Some(path) = Self::get_config_path().filter(|p| p.exists()) {
                    builder = builder.add_source(
                        File::from(path)
                            .required(false)
                            .format(config::FileFormat::Toml),
                    );
                }
            }
        }

        // Environment overrides, e.g. SUNSHINE_WEATHER__TIMEOUT_SECONDS=5
        builder = builder.add_source(
            Environment::with_prefix("SUNSHINE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SunshineConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sunshine-finder").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.user_agent.is_empty() {
            self.weather.user_agent = default_user_agent();
        }
        if self.location.command.is_empty() {
            self.location.command = default_location_command();
        }
        if self.search.ring_radii_km.is_empty() {
            self.search.ring_radii_km = DEFAULT_RING_RADII_KM.to_vec();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_rings()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if !(1..=120).contains(&self.weather.timeout_seconds) {
            return Err(SunshineError::config(
                "Weather API timeout must be between 1 and 120 seconds",
            )
            .into());
        }

        if !(1..=64).contains(&self.weather.max_concurrent_requests) {
            return Err(SunshineError::config(
                "Concurrent weather requests must be between 1 and 64",
            )
            .into());
        }

        if !(0.0..=500.0).contains(&self.search.default_radius_km) {
            return Err(SunshineError::config("Search radius must be between 0 and 500 km").into());
        }

        if !(1..=MAX_BEST_LOCATIONS).contains(&self.search.top_n) {
            return Err(SunshineError::config(format!(
                "Top results must be between 1 and {MAX_BEST_LOCATIONS}"
            ))
            .into());
        }

        if self.search.min_points_per_ring == 0 {
            return Err(SunshineError::config("Minimum points per ring must be at least 1").into());
        }

        if let Some(fixed) = self.location.fixed {
            if !fixed.is_finite() {
                return Err(SunshineError::config("Fixed location must be finite").into());
            }
        }

        Ok(())
    }

    fn validate_rings(&self) -> Result<()> {
        let radii = &self.search.ring_radii_km;

        if radii.iter().any(|r| !r.is_finite() || *r <= 0.0) {
            return Err(SunshineError::config("Ring radii must be positive").into());
        }

        if radii.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(SunshineError::config("Ring radii must be strictly ascending").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SunshineError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SunshineError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(SunshineError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}
