//! Background themes
//!
//! A theme is a condition family crossed with day or night. The presentation
//! layer maps each key to its own gradient and animation set.

use crate::condition::WeatherCondition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Group of conditions sharing one background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeFamily {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Thunder,
    Snow,
    Fog,
    Dust,
    Tornado,
}

impl ThemeFamily {
    #[must_use]
    pub const fn of(condition: WeatherCondition) -> Self {
        use WeatherCondition as C;
        match condition {
            C::ClearDay | C::ClearNight => Self::Clear,
            C::PartlyCloudyDay | C::PartlyCloudyNight => Self::PartlyCloudy,
            C::Cloudy => Self::Cloudy,
            C::Rain | C::Drizzle | C::Showers => Self::Rain,
            C::Thunderstorm => Self::Thunder,
            C::Snow | C::Sleet | C::Hail => Self::Snow,
            C::Mist | C::Fog | C::Haze | C::Smoke => Self::Fog,
            C::Dust | C::Sand => Self::Dust,
            C::Tornado => Self::Tornado,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::PartlyCloudy => "partly-cloudy",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Thunder => "thunder",
            Self::Snow => "snow",
            Self::Fog => "fog",
            Self::Dust => "dust",
            Self::Tornado => "tornado",
        }
    }
}

/// Background theme for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackgroundTheme {
    pub family: ThemeFamily,
    pub is_night: bool,
}

impl BackgroundTheme {
    /// Pick the theme for a condition.
    ///
    /// When both sun times are known the night flag comes from comparing
    /// `now` against them; otherwise the condition's own night variant
    /// decides.
    #[must_use]
    pub fn select(
        condition: WeatherCondition,
        now: DateTime<Utc>,
        sun_times: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Self {
        let is_night = match sun_times {
            Some((sunrise, sunset)) => now > sunset || now < sunrise,
            None => condition.is_night_variant(),
        };

        Self {
            family: ThemeFamily::of(condition),
            is_night,
        }
    }

    /// Theme identifier, e.g. `rain-night`
    #[must_use]
    pub fn key(&self) -> String {
        let period = if self.is_night { "night" } else { "day" };
        format!("{}-{period}", self.family.as_str())
    }
}

impl fmt::Display for BackgroundTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
