//! Daily and hourly forecast views

use super::RawSample;
use crate::condition::WeatherCondition;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Temperatures for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTemperature {
    /// Mean of every sample temperature in the day
    pub day: f64,
    pub min: f64,
    pub max: f64,
}

/// One calendar day built from the 3-hour samples that fall on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Timestamp of the first sample of the day
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    /// Calendar date under the day boundary used for bucketing
    pub date: NaiveDate,
    pub temp: DailyTemperature,
    /// Condition code of the first sample of the day
    pub weather_code: u32,
    pub description: String,
    /// Highest precipitation probability across the day
    pub pop: f64,
}

impl DailySummary {
    #[must_use]
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::classify(self.weather_code, true)
    }
}

/// Aggregated forecast handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastView {
    pub daily: Vec<DailySummary>,
    /// Leading raw samples, untouched
    pub hourly: Vec<RawSample>,
}

impl ForecastView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty() && self.hourly.is_empty()
    }
}
