//! Configuration management for `skycast`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SkycastError;
use crate::aggregator::{
    DEFAULT_DAILY_DAYS, DEFAULT_HOURLY_SAMPLES, DayBoundarySetting, ForecastAggregator,
};
use crate::dashboard::RenderOptions;
use crate::formatters::{TemperatureUnit, WindUnit};
use crate::models::Location;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `skycast`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkycastConfig {
    /// Aggregation settings
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Units for rendered output
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Forecast aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Number of daily summaries to keep
    #[serde(default = "default_daily_days")]
    pub daily_days: usize,
    /// Number of leading samples in the hourly strip
    #[serde(default = "default_hourly_samples")]
    pub hourly_samples: usize,
    /// Where days start: local, utc, location, or an IANA zone name
    #[serde(default = "default_day_boundary")]
    pub day_boundary: String,
}

/// Display unit settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,
    #[serde(default)]
    pub wind_unit: WindUnit,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_daily_days() -> usize {
    DEFAULT_DAILY_DAYS
}

fn default_hourly_samples() -> usize {
    DEFAULT_HOURLY_SAMPLES
}

fn default_day_boundary() -> String {
    "local".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            daily_days: default_daily_days(),
            hourly_samples: default_hourly_samples(),
            day_boundary: default_day_boundary(),
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

impl SkycastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(SkycastError::config(format!(
                        "Config file not found: {}",
                        path.display()
                    ))
                    .into());
                }
                builder = builder.add_source(File::from(path).format(config::FileFormat::Toml));
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

        // Environment overrides, e.g. SKYCAST_FORECAST__DAY_BOUNDARY=utc
        builder = builder.add_source(
            Environment::with_prefix("SKYCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SkycastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skycast").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.forecast.daily_days == 0 {
            self.forecast.daily_days = default_daily_days();
        }
        if self.forecast.hourly_samples == 0 {
            self.forecast.hourly_samples = default_hourly_samples();
        }
        if self.forecast.day_boundary.trim().is_empty() {
            self.forecast.day_boundary = default_day_boundary();
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
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.forecast.daily_days > 16 {
            return Err(SkycastError::config("Daily forecast cannot exceed 16 days").into());
        }

        // The 5-day/3-hour endpoint returns at most 40 samples
        if self.forecast.hourly_samples > 40 {
            return Err(SkycastError::config("Hourly samples cannot exceed 40").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SkycastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SkycastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        self.day_boundary()?;
        Ok(())
    }

    /// Parsed day boundary setting
    pub fn day_boundary(&self) -> Result<DayBoundarySetting> {
        Ok(self.forecast.day_boundary.parse::<DayBoundarySetting>()?)
    }

    /// Aggregator for a forecast at `location`
    pub fn aggregator(&self, location: Option<&Location>) -> Result<ForecastAggregator> {
        let boundary = self.day_boundary()?.resolve(location);
        Ok(ForecastAggregator::new(boundary)
            .with_max_days(self.forecast.daily_days)
            .with_hourly_len(self.forecast.hourly_samples))
    }

    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            temperature_unit: self.display.temperature_unit,
            wind_unit: self.display.wind_unit,
        }
    }
}
