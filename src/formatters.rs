//! Display formatting for temperatures, times and wind

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Epoch values at or above this are treated as milliseconds
const MILLIS_THRESHOLD: i64 = 10_000_000_000;

const CARDINALS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "C", alias = "c")]
    Celsius,
    #[serde(rename = "F", alias = "f")]
    Fahrenheit,
}

impl TemperatureUnit {
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindUnit {
    #[default]
    #[serde(rename = "m/s")]
    MetersPerSecond,
    #[serde(rename = "mph")]
    MilesPerHour,
}

impl fmt::Display for WindUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MetersPerSecond => f.write_str("m/s"),
            Self::MilesPerHour => f.write_str("mph"),
        }
    }
}

/// How much of a timestamp to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStyle {
    /// `3:05 PM`
    Time,
    /// `3 PM`
    Hour,
    /// `Mon`
    Day,
    /// `Mar 5`
    Date,
    /// `Monday, March 5`
    Full,
}

impl TimeStyle {
    const fn pattern(&self) -> &'static str {
        match self {
            Self::Time => "%-I:%M %p",
            Self::Hour => "%-I %p",
            Self::Day => "%a",
            Self::Date => "%b %-d",
            Self::Full => "%A, %B %-d",
        }
    }
}

/// Round half up, matching how the dashboard has always rounded readings
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Format a temperature rounded to whole degrees, e.g. `21°C`
#[must_use]
pub fn format_temperature(temperature: f64, unit: TemperatureUnit) -> String {
    if temperature.is_nan() {
        return "N/A".to_string();
    }
    format!("{}°{}", round_half_up(temperature), unit.symbol())
}

/// Format an epoch timestamp in the given UTC offset.
///
/// Accepts seconds or milliseconds; anything at or above 10^10 is read as
/// milliseconds.
#[must_use]
pub fn format_time(timestamp: i64, style: TimeStyle, offset: FixedOffset) -> String {
    let secs = if timestamp < MILLIS_THRESHOLD {
        timestamp
    } else {
        timestamp / 1_000
    };

    match DateTime::from_timestamp(secs, 0) {
        Some(at) => at.with_timezone(&offset).format(style.pattern()).to_string(),
        None => "N/A".to_string(),
    }
}

/// 16-point compass direction for a bearing in degrees
#[must_use]
pub fn cardinal_direction(degrees: f64) -> &'static str {
    let index = round_half_up(degrees / 22.5).rem_euclid(16);
    CARDINALS[index as usize]
}

/// Format wind speed with direction, e.g. `4 m/s WSW`
#[must_use]
pub fn format_wind(speed: f64, degrees: f64, unit: WindUnit) -> String {
    if speed.is_nan() || degrees.is_nan() {
        return "N/A".to_string();
    }
    format!(
        "{} {unit} {}",
        round_half_up(speed),
        cardinal_direction(degrees)
    )
}

/// Capitalize the first letter of each space-separated word
#[must_use]
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
