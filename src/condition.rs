//! Weather condition classification
//!
//! Maps OpenWeatherMap condition codes onto the closed set of categories the
//! dashboard renders, together with the display text and icon name for each
//! category. See <https://openweathermap.org/weather-conditions> for the code
//! table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Semantic weather category used for display and theming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherCondition {
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    /// Scattered, broken or overcast clouds (802-804)
    Cloudy,
    Rain,
    Drizzle,
    /// Shower rain (520-531) and squalls (771)
    Showers,
    Thunderstorm,
    Snow,
    /// Freezing rain (511) and the sleet group (611-616)
    Sleet,
    Hail,
    Mist,
    Fog,
    /// Volcanic ash (762)
    Smoke,
    Haze,
    Dust,
    Sand,
    Tornado,
}

impl WeatherCondition {
    /// All categories, in declaration order
    pub const ALL: [WeatherCondition; 19] = [
        Self::ClearDay,
        Self::ClearNight,
        Self::PartlyCloudyDay,
        Self::PartlyCloudyNight,
        Self::Cloudy,
        Self::Rain,
        Self::Drizzle,
        Self::Showers,
        Self::Thunderstorm,
        Self::Snow,
        Self::Sleet,
        Self::Hail,
        Self::Mist,
        Self::Fog,
        Self::Smoke,
        Self::Haze,
        Self::Dust,
        Self::Sand,
        Self::Tornado,
    ];

    /// Classify an OpenWeatherMap condition code.
    ///
    /// Rules are checked in a fixed priority order and the first match wins.
    /// Codes outside every known group fall back to clear sky, so the
    /// function is total.
    #[must_use]
    pub fn classify(code: u32, is_daytime: bool) -> Self {
        let clear = if is_daytime {
            Self::ClearDay
        } else {
            Self::ClearNight
        };

        if code == 800 {
            return clear;
        }

        // Clouds
        if code == 801 {
            return if is_daytime {
                Self::PartlyCloudyDay
            } else {
                Self::PartlyCloudyNight
            };
        }
        if (802..=804).contains(&code) {
            return Self::Cloudy;
        }

        if (200..=232).contains(&code) {
            return Self::Thunderstorm;
        }

        if (300..=321).contains(&code) {
            return Self::Drizzle;
        }

        // Rain
        if (500..=504).contains(&code) {
            return Self::Rain;
        }
        if code == 511 {
            return Self::Sleet;
        }
        if (520..=531).contains(&code) {
            return Self::Showers;
        }

        // Snow
        if (600..=602).contains(&code) || (620..=622).contains(&code) {
            return Self::Snow;
        }
        if (611..=616).contains(&code) {
            return Self::Sleet;
        }

        // Atmosphere
        match code {
            701 | 741 => Self::Fog,
            711 | 721 | 731 => Self::Haze,
            751 | 761 => Self::Dust,
            762 => Self::Smoke,
            771 => Self::Showers,
            781 => Self::Tornado,
            _ => {
                debug!(code, "Unknown weather code, falling back to clear sky");
                clear
            }
        }
    }

    /// Human-readable label shown next to the icon
    #[must_use]
    pub const fn text(&self) -> &'static str {
        match self {
            Self::ClearDay => "Clear Sky",
            Self::ClearNight => "Clear Night",
            Self::PartlyCloudyDay => "Partly Cloudy",
            Self::PartlyCloudyNight => "Partly Cloudy Night",
            Self::Cloudy => "Cloudy",
            Self::Rain => "Rain",
            Self::Drizzle => "Drizzle",
            Self::Showers => "Showers",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snow => "Snow",
            Self::Sleet => "Sleet",
            Self::Hail => "Hail",
            Self::Mist | Self::Fog => "Fog",
            Self::Smoke => "Smoke",
            Self::Haze => "Haze",
            Self::Dust | Self::Sand => "Dust",
            Self::Tornado => "Tornado",
        }
    }

    /// Icon name from the Lucide icon set
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::ClearDay => "sun",
            Self::ClearNight => "moon",
            Self::PartlyCloudyDay => "cloud-sun",
            Self::PartlyCloudyNight => "cloud-moon",
            Self::Cloudy => "cloud",
            Self::Rain | Self::Showers => "cloud-rain",
            Self::Drizzle => "cloud-drizzle",
            Self::Thunderstorm => "cloud-lightning",
            Self::Snow | Self::Sleet => "cloud-snow",
            Self::Hail => "cloud-hail",
            Self::Mist | Self::Fog | Self::Smoke | Self::Haze | Self::Dust | Self::Sand => {
                "cloud-fog"
            }
            Self::Tornado => "tornado",
        }
    }

    /// Stable kebab-case identifier, identical to the serialized form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ClearDay => "clear-day",
            Self::ClearNight => "clear-night",
            Self::PartlyCloudyDay => "partly-cloudy-day",
            Self::PartlyCloudyNight => "partly-cloudy-night",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Drizzle => "drizzle",
            Self::Showers => "showers",
            Self::Thunderstorm => "thunderstorm",
            Self::Snow => "snow",
            Self::Sleet => "sleet",
            Self::Hail => "hail",
            Self::Mist => "mist",
            Self::Fog => "fog",
            Self::Smoke => "smoke",
            Self::Haze => "haze",
            Self::Dust => "dust",
            Self::Sand => "sand",
            Self::Tornado => "tornado",
        }
    }

    /// Whether this is one of the explicit night variants
    #[must_use]
    pub const fn is_night_variant(&self) -> bool {
        matches!(self, Self::ClearNight | Self::PartlyCloudyNight)
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Daylight test used for picking day or night variants.
///
/// Both bounds are exclusive: a sample taken exactly at sunrise or sunset
/// counts as night.
#[must_use]
pub fn is_daytime(at: DateTime<Utc>, sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> bool {
    at > sunrise && at < sunset
}
