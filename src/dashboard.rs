//! Dashboard assembly
//!
//! Runs parsed provider data through the aggregator and the classifier and
//! produces the view model the presentation layer draws: current block,
//! hourly strip, daily cards and the background theme.

use crate::aggregator::ForecastAggregator;
use crate::condition::WeatherCondition;
use crate::formatters::{
    TemperatureUnit, TimeStyle, WindUnit, capitalize_words, format_temperature, format_time,
    format_wind,
};
use crate::models::{CurrentConditions, DailySummary, Location, RawSample};
use crate::theme::BackgroundTheme;
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Current conditions with their resolved category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentView {
    #[serde(flatten)]
    pub conditions: CurrentConditions,
    pub is_daytime: bool,
    pub condition: WeatherCondition,
    pub text: String,
    pub icon: String,
}

impl From<CurrentConditions> for CurrentView {
    fn from(conditions: CurrentConditions) -> Self {
        let is_daytime = conditions.is_daytime();
        let condition = conditions.condition();
        Self {
            conditions,
            is_daytime,
            condition,
            text: condition.text().to_string(),
            icon: condition.icon().to_string(),
        }
    }
}

/// Entry of the hourly strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    #[serde(flatten)]
    pub sample: RawSample,
    pub condition: WeatherCondition,
    pub text: String,
    pub icon: String,
}

impl From<RawSample> for HourlyEntry {
    fn from(sample: RawSample) -> Self {
        // Forecast icons always use the day variant
        let condition = sample.condition(true);
        Self {
            sample,
            condition,
            text: condition.text().to_string(),
            icon: condition.icon().to_string(),
        }
    }
}

/// One daily forecast card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    #[serde(flatten)]
    pub summary: DailySummary,
    pub condition: WeatherCondition,
    pub text: String,
    pub icon: String,
}

impl From<DailySummary> for DailyEntry {
    fn from(summary: DailySummary) -> Self {
        let condition = summary.condition();
        Self {
            summary,
            condition,
            text: condition.text().to_string(),
            icon: condition.icon().to_string(),
        }
    }
}

/// Everything the dashboard shows for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub location: Location,
    pub current: Option<CurrentView>,
    pub hourly: Vec<HourlyEntry>,
    pub daily: Vec<DailyEntry>,
    pub theme: BackgroundTheme,
    pub theme_key: String,
}

/// Units used by [`Dashboard::render_text`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub temperature_unit: TemperatureUnit,
    pub wind_unit: WindUnit,
}

impl Dashboard {
    /// Build the view model from parsed provider data.
    ///
    /// The theme follows the current observation when there is one, judged
    /// against its own sunrise and sunset. Without current data it falls back
    /// to the first forecast sample.
    #[instrument(skip_all, fields(location = %location.name, samples = samples.len()))]
    pub fn build(
        location: Location,
        current: Option<CurrentConditions>,
        samples: &[RawSample],
        aggregator: &ForecastAggregator,
    ) -> Self {
        let view = aggregator.aggregate(samples);
        let current = current.map(CurrentView::from);

        let theme = match &current {
            Some(now) => BackgroundTheme::select(
                now.condition,
                now.conditions.timestamp,
                Some((now.conditions.sunrise, now.conditions.sunset)),
            ),
            None => {
                let condition = samples
                    .first()
                    .map_or(WeatherCondition::ClearDay, |s| s.condition(true));
                let at = samples.first().map(|s| s.timestamp).unwrap_or_default();
                BackgroundTheme::select(condition, at, None)
            }
        };
        debug!(theme = %theme, "Selected background theme");

        Self {
            location,
            current,
            hourly: view.hourly.into_iter().map(HourlyEntry::from).collect(),
            daily: view.daily.into_iter().map(DailyEntry::from).collect(),
            theme_key: theme.key(),
            theme,
        }
    }

    /// Offset used for clock times; UTC when the provider gave none
    fn display_offset(&self) -> FixedOffset {
        self.location.utc_offset().unwrap_or_else(|| Utc.fix())
    }

    /// Plain-text rendering for terminals
    #[must_use]
    pub fn render_text(&self, options: RenderOptions) -> String {
        let offset = self.display_offset();
        let temp = |value: f64| format_temperature(value, options.temperature_unit);
        let mut lines = Vec::new();

        lines.push(format!(
            "{} ({})",
            self.location.display_name(),
            self.location.format_coordinates()
        ));
        lines.push(format!("Theme: {}", self.theme_key));

        if let Some(now) = &self.current {
            let c = &now.conditions;
            lines.push(String::new());
            lines.push(format_time(c.timestamp.timestamp(), TimeStyle::Full, offset));
            lines.push(format!(
                "Now: {} {} - {} (feels like {})",
                temp(c.temperature),
                now.text,
                capitalize_words(&c.description),
                temp(c.feels_like)
            ));
            lines.push(format!(
                "  Low {} / High {}",
                temp(c.temp_min),
                temp(c.temp_max)
            ));
            lines.push(format!(
                "  Humidity {}%  Pressure {:.0} hPa  Wind {}",
                c.humidity,
                c.pressure,
                format_wind(c.wind_speed, c.wind_direction, options.wind_unit)
            ));
            lines.push(format!(
                "  Sunrise {}  Sunset {}",
                format_time(c.sunrise.timestamp(), TimeStyle::Time, offset),
                format_time(c.sunset.timestamp(), TimeStyle::Time, offset)
            ));
        }

        if !self.hourly.is_empty() {
            lines.push(String::new());
            lines.push("Next hours:".to_string());
            for (index, hour) in self.hourly.iter().enumerate() {
                let label = if index == 0 {
                    "Now".to_string()
                } else {
                    format_time(hour.sample.timestamp.timestamp(), TimeStyle::Hour, offset)
                };
                lines.push(format!(
                    "  {label:<6} {:>5}  {:<14} {:>3.0}%",
                    temp(hour.sample.temperature),
                    hour.text,
                    hour.sample.pop * 100.0
                ));
            }
        }

        if !self.daily.is_empty() {
            lines.push(String::new());
            lines.push(format!("{}-day forecast:", self.daily.len()));
            for (index, day) in self.daily.iter().enumerate() {
                let label = if index == 0 {
                    "Today".to_string()
                } else {
                    format_time(day.summary.timestamp.timestamp(), TimeStyle::Day, offset)
                };
                lines.push(format!(
                    "  {label:<6} {:>5} / {:<5}  {:<14} {:>3.0}%",
                    temp(day.summary.temp.min),
                    temp(day.summary.temp.max),
                    day.text,
                    day.summary.pop * 100.0
                ));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::DayBoundary;
    use chrono::DateTime;

    // 2024-03-01T00:00:00Z
    const START: i64 = 1_709_251_200;

    fn sample(offset_hours: i64, temperature: f64, code: u32) -> RawSample {
        RawSample {
            timestamp: DateTime::from_timestamp(START + offset_hours * 3_600, 0).unwrap(),
            temperature,
            temp_min: temperature,
            temp_max: temperature,
            weather_code: code,
            description: "test".to_string(),
            pop: 0.25,
        }
    }

    fn current(at_hours: i64, code: u32) -> CurrentConditions {
        CurrentConditions {
            timestamp: DateTime::from_timestamp(START + at_hours * 3_600, 0).unwrap(),
            sunrise: DateTime::from_timestamp(START + 6 * 3_600, 0).unwrap(),
            sunset: DateTime::from_timestamp(START + 18 * 3_600, 0).unwrap(),
            temperature: 7.6,
            feels_like: 5.0,
            temp_min: 4.0,
            temp_max: 9.0,
            humidity: 81,
            pressure: 1004.0,
            wind_speed: 5.4,
            wind_direction: 200.0,
            cloud_cover: 10,
            visibility: None,
            weather_code: code,
            description: "few clouds".to_string(),
        }
    }

    fn location() -> Location {
        let mut location =
            Location::with_country(48.1374, 11.5755, "Munich".to_string(), "DE".to_string());
        location.utc_offset_seconds = Some(3_600);
        location
    }

    #[test]
    fn test_build_resolves_current_night_variant() {
        let samples: Vec<_> = (0..16).map(|i| sample(i * 3, 5.0, 801)).collect();
        let aggregator = ForecastAggregator::new(DayBoundary::Utc);

        let dashboard = Dashboard::build(location(), Some(current(22, 801)), &samples, &aggregator);

        let now = dashboard.current.as_ref().unwrap();
        assert!(!now.is_daytime);
        assert_eq!(now.condition, WeatherCondition::PartlyCloudyNight);
        assert_eq!(now.text, "Partly Cloudy Night");
        assert_eq!(dashboard.theme_key, "partly-cloudy-night");

        assert_eq!(dashboard.hourly.len(), 8);
        assert!(dashboard
            .hourly
            .iter()
            .all(|h| h.condition == WeatherCondition::PartlyCloudyDay));
        assert_eq!(dashboard.daily.len(), 2);
    }

    #[test]
    fn test_build_without_current_uses_first_sample() {
        let samples = vec![sample(0, 1.0, 601), sample(3, 0.0, 800)];
        let dashboard = Dashboard::build(
            location(),
            None,
            &samples,
            &ForecastAggregator::new(DayBoundary::Utc),
        );

        assert!(dashboard.current.is_none());
        assert_eq!(dashboard.theme_key, "snow-day");
        assert_eq!(dashboard.daily[0].condition, WeatherCondition::Snow);
    }

    #[test]
    fn test_build_with_no_data_is_empty_and_clear() {
        let dashboard = Dashboard::build(
            location(),
            None,
            &[],
            &ForecastAggregator::new(DayBoundary::Utc),
        );

        assert!(dashboard.hourly.is_empty());
        assert!(dashboard.daily.is_empty());
        assert_eq!(dashboard.theme_key, "clear-day");
    }

    #[test]
    fn test_render_text() {
        let samples: Vec<_> = (0..3).map(|i| sample(i * 3, 5.0 + i as f64, 500)).collect();
        let dashboard = Dashboard::build(
            location(),
            Some(current(12, 800)),
            &samples,
            &ForecastAggregator::new(DayBoundary::Utc),
        );

        let text = dashboard.render_text(RenderOptions::default());

        assert!(text.starts_with("Munich, DE (48.1374, 11.5755)"));
        assert!(text.contains("Theme: clear-day"));
        assert!(text.contains("Now: 8°C Clear Sky - Few Clouds (feels like 5°C)"));
        assert!(text.contains("Wind 5 m/s SSW"));
        assert!(text.contains("Sunrise 7:00 AM  Sunset 7:00 PM"));
        assert!(text.contains("Next hours:"));
        assert!(text.contains("4 AM"));
        assert!(text.contains("1-day forecast:"));
        assert!(text.contains("Today"));
    }

    #[test]
    fn test_dashboard_serializes_flattened_entries() {
        let samples = vec![sample(0, 3.0, 211)];
        let dashboard = Dashboard::build(
            location(),
            None,
            &samples,
            &ForecastAggregator::new(DayBoundary::Utc),
        );

        let json = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(json["hourly"][0]["condition"], "thunderstorm");
        assert_eq!(json["hourly"][0]["weather_code"], 211);
        assert_eq!(json["daily"][0]["temp"]["day"], 3.0);
        assert_eq!(json["theme_key"], "thunder-day");
    }
}
