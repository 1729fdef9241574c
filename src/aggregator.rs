//! Forecast aggregation
//!
//! Reshapes the provider's flat 3-hour sample list into a handful of daily
//! summaries plus a short hourly strip. Day buckets are cut at midnight in
//! a configurable time zone; the default is the consumer's local zone, so
//! callers who want the forecast location's own calendar days must choose
//! [`DayBoundary::Offset`] or [`DayBoundary::Zone`] explicitly.

use crate::models::{DailySummary, DailyTemperature, ForecastView, Location, RawSample};
use crate::{Result, SkycastError};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

/// Number of daily summaries emitted by default
pub const DEFAULT_DAILY_DAYS: usize = 5;

/// Number of leading samples in the hourly strip (about 24 hours)
pub const DEFAULT_HOURLY_SAMPLES: usize = 8;

/// Time zone whose midnight separates one daily bucket from the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBoundary {
    /// Time zone of the machine running the aggregation
    Local,
    Utc,
    /// Fixed shift from UTC, typically the offset reported for the location
    Offset(FixedOffset),
    /// Named IANA zone, DST-aware
    Zone(Tz),
}

impl DayBoundary {
    /// Calendar date of an instant under this boundary
    #[must_use]
    pub fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Local => at.with_timezone(&Local).date_naive(),
            Self::Utc => at.date_naive(),
            Self::Offset(offset) => at.with_timezone(offset).date_naive(),
            Self::Zone(tz) => at.with_timezone(tz).date_naive(),
        }
    }
}

/// Day boundary as written in configuration, before the location is known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayBoundarySetting {
    #[default]
    Local,
    Utc,
    /// Use the UTC offset the provider reports for the forecast location
    Location,
    Zone(Tz),
}

impl DayBoundarySetting {
    /// Turn the setting into a concrete boundary.
    ///
    /// `Location` falls back to `Local` when the location carries no usable
    /// offset.
    #[must_use]
    pub fn resolve(&self, location: Option<&Location>) -> DayBoundary {
        match self {
            Self::Local => DayBoundary::Local,
            Self::Utc => DayBoundary::Utc,
            Self::Zone(tz) => DayBoundary::Zone(*tz),
            Self::Location => match location.and_then(Location::utc_offset) {
                Some(offset) => DayBoundary::Offset(offset),
                None => {
                    debug!("No UTC offset for location, bucketing days in local time");
                    DayBoundary::Local
                }
            },
        }
    }
}

impl FromStr for DayBoundarySetting {
    type Err = SkycastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "utc" => Ok(Self::Utc),
            "location" => Ok(Self::Location),
            _ => s.trim().parse::<Tz>().map(Self::Zone).map_err(|e| {
                SkycastError::config(format!(
                    "Invalid day boundary '{s}'. Must be local, utc, location or an IANA time zone ({e})"
                ))
            }),
        }
    }
}

/// Running state for one calendar day
struct DayBucket {
    timestamp: DateTime<Utc>,
    date: NaiveDate,
    weather_code: u32,
    description: String,
    pop: f64,
    min: f64,
    max: f64,
    temperatures: Vec<f64>,
}

impl DayBucket {
    fn seed(date: NaiveDate, sample: &RawSample) -> Self {
        Self {
            timestamp: sample.timestamp,
            date,
            weather_code: sample.weather_code,
            description: sample.description.clone(),
            pop: sample.pop,
            min: sample.temp_min,
            max: sample.temp_max,
            temperatures: Vec::new(),
        }
    }

    fn fold(&mut self, sample: &RawSample) {
        self.temperatures.push(sample.temperature);
        self.min = self.min.min(sample.temp_min);
        self.max = self.max.max(sample.temp_max);
        self.pop = self.pop.max(sample.pop);
    }

    fn into_summary(self) -> DailySummary {
        // A bucket is only created together with its first fold.
        let mean = self.temperatures.iter().sum::<f64>() / self.temperatures.len() as f64;

        DailySummary {
            timestamp: self.timestamp,
            date: self.date,
            temp: DailyTemperature {
                day: mean,
                min: self.min,
                max: self.max,
            },
            weather_code: self.weather_code,
            description: self.description,
            pop: self.pop,
        }
    }
}

/// Builds daily and hourly views out of raw forecast samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastAggregator {
    day_boundary: DayBoundary,
    max_days: usize,
    hourly_len: usize,
}

impl Default for ForecastAggregator {
    fn default() -> Self {
        Self::new(DayBoundary::Local)
    }
}

impl ForecastAggregator {
    #[must_use]
    pub fn new(day_boundary: DayBoundary) -> Self {
        Self {
            day_boundary,
            max_days: DEFAULT_DAILY_DAYS,
            hourly_len: DEFAULT_HOURLY_SAMPLES,
        }
    }

    #[must_use]
    pub fn with_max_days(mut self, max_days: usize) -> Self {
        self.max_days = max_days;
        self
    }

    #[must_use]
    pub fn with_hourly_len(mut self, hourly_len: usize) -> Self {
        self.hourly_len = hourly_len;
        self
    }

    #[must_use]
    pub fn day_boundary(&self) -> DayBoundary {
        self.day_boundary
    }

    /// Produce both views from one sample sequence
    #[must_use]
    pub fn aggregate(&self, samples: &[RawSample]) -> ForecastView {
        let view = ForecastView {
            daily: self.daily(samples),
            hourly: self.hourly(samples),
        };

        debug!(
            samples = samples.len(),
            days = view.daily.len(),
            hours = view.hourly.len(),
            "Aggregated forecast"
        );

        view
    }

    /// Group samples by calendar date and summarise each day.
    ///
    /// Buckets are emitted in chronological order and truncated to
    /// `max_days`. Every sample lands in exactly one bucket.
    #[must_use]
    pub fn daily(&self, samples: &[RawSample]) -> Vec<DailySummary> {
        let mut buckets: Vec<DayBucket> = Vec::new();
        let mut by_date: HashMap<NaiveDate, usize> = HashMap::new();

        for sample in samples {
            let date = self.day_boundary.date_of(sample.timestamp);
            let slot = *by_date.entry(date).or_insert_with(|| {
                buckets.push(DayBucket::seed(date, sample));
                buckets.len() - 1
            });
            buckets[slot].fold(sample);
        }

        buckets.sort_by_key(|bucket| bucket.date);
        buckets
            .into_iter()
            .take(self.max_days)
            .map(DayBucket::into_summary)
            .collect()
    }

    /// Leading samples for the short-term strip, unchanged and in order
    #[must_use]
    pub fn hourly(&self, samples: &[RawSample]) -> Vec<RawSample> {
        samples.iter().take(self.hourly_len).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DAY: i64 = 86_400;
    const THREE_HOURS: i64 = 3 * 3_600;
    // 2024-03-01T00:00:00Z
    const START: i64 = 1_709_251_200;

    fn sample(timestamp: i64, temperature: f64, code: u32, pop: f64) -> RawSample {
        RawSample {
            timestamp: DateTime::from_timestamp(timestamp, 0).unwrap(),
            temperature,
            temp_min: temperature - 1.0,
            temp_max: temperature + 1.0,
            weather_code: code,
            description: format!("code {code}"),
            pop,
        }
    }

    fn three_hourly(count: usize) -> Vec<RawSample> {
        (0..count)
            .map(|i| {
                let i = i as i64;
                sample(START + i * THREE_HOURS, 10.0 + i as f64, 800, 0.0)
            })
            .collect()
    }

    #[test]
    fn test_empty_input_yields_empty_views() {
        let view = ForecastAggregator::new(DayBoundary::Utc).aggregate(&[]);
        assert!(view.daily.is_empty());
        assert!(view.hourly.is_empty());
        assert!(view.is_empty());
    }

    #[test]
    fn test_single_sample_day() {
        let only = sample(START + 12 * 3_600, 21.5, 801, 0.3);
        let daily = ForecastAggregator::new(DayBoundary::Utc).daily(std::slice::from_ref(&only));

        assert_eq!(daily.len(), 1);
        let day = &daily[0];
        assert_eq!(day.temp.day, 21.5);
        assert_eq!(day.temp.min, only.temp_min);
        assert_eq!(day.temp.max, only.temp_max);
        assert_eq!(day.pop, 0.3);
        assert_eq!(day.timestamp, only.timestamp);
    }

    #[test]
    fn test_day_folds_mean_min_max_and_pop() {
        let samples = vec![
            sample(START, 10.0, 500, 0.2),
            sample(START + THREE_HOURS, 14.0, 800, 0.9),
            sample(START + 2 * THREE_HOURS, 12.0, 801, 0.1),
        ];

        let daily = ForecastAggregator::new(DayBoundary::Utc).daily(&samples);

        assert_eq!(daily.len(), 1);
        let day = &daily[0];
        assert_eq!(day.temp.day, 12.0);
        assert_eq!(day.temp.min, 9.0);
        assert_eq!(day.temp.max, 15.0);
        assert_eq!(day.pop, 0.9);
        // Representative code and description come from the first sample
        assert_eq!(day.weather_code, 500);
        assert_eq!(day.description, "code 500");
    }

    #[test]
    fn test_seven_days_truncate_to_five() {
        let samples: Vec<_> = (0..7)
            .map(|d| sample(START + d * DAY + 3_600, 5.0, 800, 0.0))
            .collect();

        let daily = ForecastAggregator::new(DayBoundary::Utc).daily(&samples);

        assert_eq!(daily.len(), 5);
        let dates: Vec<_> = daily.iter().map(|d| d.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[rstest]
    #[case(20, 8)]
    #[case(8, 8)]
    #[case(3, 3)]
    fn test_hourly_is_leading_prefix(#[case] count: usize, #[case] expected: usize) {
        let samples = three_hourly(count);
        let hourly = ForecastAggregator::new(DayBoundary::Utc).hourly(&samples);

        assert_eq!(hourly.len(), expected);
        assert_eq!(hourly.as_slice(), &samples[..expected]);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let samples = three_hourly(40);
        let aggregator = ForecastAggregator::default();

        assert_eq!(aggregator.aggregate(&samples), aggregator.aggregate(&samples));
    }

    #[test]
    fn test_offset_boundary_moves_late_samples_to_next_day() {
        // 22:30 UTC is already the next day at UTC+2
        let late = sample(START + 22 * 3_600 + 1_800, 8.0, 800, 0.0);
        let samples = vec![sample(START + 3_600, 6.0, 800, 0.0), late];

        let utc_days = ForecastAggregator::new(DayBoundary::Utc).daily(&samples);
        assert_eq!(utc_days.len(), 1);

        let plus_two = FixedOffset::east_opt(2 * 3_600).unwrap();
        let local_days = ForecastAggregator::new(DayBoundary::Offset(plus_two)).daily(&samples);
        assert_eq!(local_days.len(), 2);
        assert_eq!(local_days[1].date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(local_days[1].temp.day, 8.0);
    }

    #[test]
    fn test_out_of_order_samples_share_bucket() {
        let samples = vec![
            sample(START + DAY + 3_600, 3.0, 600, 0.5),
            sample(START + 3_600, 7.0, 800, 0.0),
            sample(START + DAY + 7_200, 5.0, 601, 0.7),
        ];

        let daily = ForecastAggregator::new(DayBoundary::Utc).daily(&samples);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].temp.day, 7.0);
        assert_eq!(daily[1].temp.day, 4.0);
        assert_eq!(daily[1].weather_code, 600);
        assert_eq!(daily[1].pop, 0.7);
    }

    #[test]
    fn test_zone_boundary_follows_named_zone() {
        // 23:00 UTC on 2024-03-01 is 08:00 on 2024-03-02 in Tokyo
        let at = DateTime::from_timestamp(START + 23 * 3_600, 0).unwrap();
        let tokyo = DayBoundary::Zone(chrono_tz::Asia::Tokyo);
        assert_eq!(tokyo.date_of(at), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(DayBoundary::Utc.date_of(at), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[rstest]
    #[case("local", DayBoundarySetting::Local)]
    #[case("UTC", DayBoundarySetting::Utc)]
    #[case(" location ", DayBoundarySetting::Location)]
    #[case("Europe/Berlin", DayBoundarySetting::Zone(chrono_tz::Europe::Berlin))]
    fn test_parse_day_boundary_setting(#[case] input: &str, #[case] expected: DayBoundarySetting) {
        assert_eq!(input.parse::<DayBoundarySetting>().unwrap(), expected);
    }

    #[test]
    fn test_parse_day_boundary_setting_rejects_unknown_zone() {
        let err = "Mars/Olympus".parse::<DayBoundarySetting>().unwrap_err();
        assert!(matches!(err, SkycastError::Config { .. }));
        assert!(err.to_string().contains("Invalid day boundary"));
    }

    #[test]
    fn test_location_setting_resolves_offset() {
        let mut location = Location::new(-33.87, 151.21, "Sydney".to_string());
        assert_eq!(
            DayBoundarySetting::Location.resolve(Some(&location)),
            DayBoundary::Local
        );

        location.utc_offset_seconds = Some(36_000);
        assert_eq!(
            DayBoundarySetting::Location.resolve(Some(&location)),
            DayBoundary::Offset(FixedOffset::east_opt(36_000).unwrap())
        );
        assert_eq!(DayBoundarySetting::Utc.resolve(Some(&location)), DayBoundary::Utc);
    }
}
