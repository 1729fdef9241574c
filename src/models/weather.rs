//! Weather sample and current-conditions models

use crate::condition::{self, WeatherCondition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One forecast entry at 3-hour resolution
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RawSample {
    /// Forecast time, serialized as epoch seconds
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    /// Temperature in the unit requested from the provider
    pub temperature: f64,
    /// Lowest temperature expected within the interval
    pub temp_min: f64,
    /// Highest temperature expected within the interval
    pub temp_max: f64,
    /// Provider condition code
    pub weather_code: u32,
    /// Provider description, e.g. "light rain"
    pub description: String,
    /// Probability of precipitation in [0, 1]
    pub pop: f64,
}

impl RawSample {
    /// Condition for this sample under the given daylight flag
    #[must_use]
    pub fn condition(&self, is_daytime: bool) -> WeatherCondition {
        WeatherCondition::classify(self.weather_code, is_daytime)
    }
}

/// Observed weather at the queried location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub sunrise: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub sunset: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    pub wind_speed: f64,
    /// Wind direction in degrees (0-360, where 0/360 is North)
    pub wind_direction: f64,
    /// Cloud cover percentage
    pub cloud_cover: u8,
    /// Visibility in meters
    pub visibility: Option<u32>,
    pub weather_code: u32,
    pub description: String,
}

impl CurrentConditions {
    /// Whether the observation falls strictly between sunrise and sunset
    #[must_use]
    pub fn is_daytime(&self) -> bool {
        condition::is_daytime(self.timestamp, self.sunrise, self.sunset)
    }

    /// Condition with the day/night variant resolved from the sun times
    #[must_use]
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::classify(self.weather_code, self.is_daytime())
    }
}
