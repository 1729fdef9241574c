//! OpenWeatherMap response structures and conversion utilities
//!
//! Covers the three payloads the dashboard consumes: current weather
//! (`/data/2.5/weather`), the 5-day/3-hour forecast (`/data/2.5/forecast`)
//! and direct geocoding (`/geo/1.0/direct`). Fetching is left to the caller;
//! this module only turns response bodies into domain models.

use crate::models::{CurrentConditions, Location, RawSample};
use crate::{Result, SkycastError};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

/// Forecast response from `/data/2.5/forecast`
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastItem>,
    pub city: CityInfo,
}

/// One 3-hour forecast entry
#[derive(Debug, Deserialize)]
pub struct ForecastItem {
    pub dt: i64,
    pub main: MainInfo,
    pub weather: Vec<WeatherInfo>,
    /// Missing on some free-tier responses
    #[serde(default)]
    pub pop: f64,
}

#[derive(Debug, Deserialize)]
pub struct MainInfo {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    pub temp_min: f64,
    pub temp_max: f64,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherInfo {
    pub id: u32,
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct CityInfo {
    pub name: String,
    pub coord: Coord,
    #[serde(default)]
    pub country: Option<String>,
    /// Shift in seconds from UTC
    #[serde(default)]
    pub timezone: Option<i32>,
    #[serde(default)]
    pub sunrise: Option<i64>,
    #[serde(default)]
    pub sunset: Option<i64>,
}

/// Current weather response from `/data/2.5/weather`
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub coord: Coord,
    pub weather: Vec<WeatherInfo>,
    pub main: MainInfo,
    #[serde(default)]
    pub visibility: Option<u32>,
    #[serde(default)]
    pub wind: Option<WindInfo>,
    #[serde(default)]
    pub clouds: Option<CloudsInfo>,
    pub dt: i64,
    pub sys: SysInfo,
    #[serde(default)]
    pub timezone: Option<i32>,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct WindInfo {
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
}

#[derive(Debug, Deserialize)]
pub struct CloudsInfo {
    pub all: u8,
}

#[derive(Debug, Deserialize)]
pub struct SysInfo {
    #[serde(default)]
    pub country: Option<String>,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Entry of a `/geo/1.0/direct` response
#[derive(Debug, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Forecast payload converted to domain models
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPayload {
    pub location: Location,
    pub samples: Vec<RawSample>,
}

/// Current-weather payload converted to domain models
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentPayload {
    pub location: Location,
    pub current: CurrentConditions,
}

fn timestamp(secs: i64, field: &str) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| SkycastError::parse(format!("{field} timestamp {secs} is out of range")))
}

fn primary_weather(weather: &[WeatherInfo], dt: i64) -> Result<&WeatherInfo> {
    weather
        .first()
        .ok_or_else(|| SkycastError::parse(format!("No weather entry for dt={dt}")))
}

impl TryFrom<&ForecastItem> for RawSample {
    type Error = SkycastError;

    fn try_from(item: &ForecastItem) -> Result<Self> {
        let weather = primary_weather(&item.weather, item.dt)?;

        Ok(Self {
            timestamp: timestamp(item.dt, "forecast")?,
            temperature: item.main.temp,
            temp_min: item.main.temp_min,
            temp_max: item.main.temp_max,
            weather_code: weather.id,
            description: weather.description.clone(),
            pop: item.pop,
        })
    }
}

impl From<&CityInfo> for Location {
    fn from(city: &CityInfo) -> Self {
        Self {
            latitude: city.coord.lat,
            longitude: city.coord.lon,
            name: city.name.clone(),
            country: city.country.clone(),
            utc_offset_seconds: city.timezone,
        }
    }
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        Self {
            latitude: result.lat,
            longitude: result.lon,
            name: result.name,
            country: result.country,
            utc_offset_seconds: None,
        }
    }
}

impl TryFrom<&CurrentWeatherResponse> for CurrentPayload {
    type Error = SkycastError;

    fn try_from(response: &CurrentWeatherResponse) -> Result<Self> {
        let weather = primary_weather(&response.weather, response.dt)?;

        let location = Location {
            latitude: response.coord.lat,
            longitude: response.coord.lon,
            name: response.name.clone(),
            country: response.sys.country.clone(),
            utc_offset_seconds: response.timezone,
        };

        let current = CurrentConditions {
            timestamp: timestamp(response.dt, "current")?,
            sunrise: timestamp(response.sys.sunrise, "sunrise")?,
            sunset: timestamp(response.sys.sunset, "sunset")?,
            temperature: response.main.temp,
            feels_like: response.main.feels_like.unwrap_or(response.main.temp),
            temp_min: response.main.temp_min,
            temp_max: response.main.temp_max,
            humidity: response.main.humidity.unwrap_or(0),
            pressure: response.main.pressure.unwrap_or(0.0),
            wind_speed: response.wind.as_ref().map_or(0.0, |w| w.speed),
            wind_direction: response.wind.as_ref().map_or(0.0, |w| w.deg),
            cloud_cover: response.clouds.as_ref().map_or(0, |c| c.all),
            visibility: response.visibility,
            weather_code: weather.id,
            description: weather.description.clone(),
        };

        Ok(Self { location, current })
    }
}

/// Parse a `/data/2.5/forecast` body
pub fn parse_forecast(json: &str) -> Result<ForecastPayload> {
    let response: ForecastResponse = serde_json::from_str(json)?;

    let samples = response
        .list
        .iter()
        .map(RawSample::try_from)
        .collect::<Result<Vec<_>>>()?;

    debug!(
        city = %response.city.name,
        samples = samples.len(),
        "Parsed forecast response"
    );

    Ok(ForecastPayload {
        location: Location::from(&response.city),
        samples,
    })
}

/// Parse a `/data/2.5/weather` body
pub fn parse_current(json: &str) -> Result<CurrentPayload> {
    let response: CurrentWeatherResponse = serde_json::from_str(json)?;
    CurrentPayload::try_from(&response)
}

/// Parse a `/geo/1.0/direct` body into search results
pub fn parse_locations(json: &str) -> Result<Vec<Location>> {
    let results: Vec<GeocodingResult> = serde_json::from_str(json)?;
    Ok(results.into_iter().map(Location::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORECAST: &str = r#"{
        "cod": "200",
        "cnt": 2,
        "list": [
            {
                "dt": 1709251200,
                "main": {"temp": 4.5, "feels_like": 1.2, "temp_min": 3.9, "temp_max": 4.8, "pressure": 1011, "humidity": 80},
                "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10n"}],
                "pop": 0.35,
                "dt_txt": "2024-03-01 00:00:00"
            },
            {
                "dt": 1709262000,
                "main": {"temp": 6.0, "temp_min": 6.0, "temp_max": 6.0},
                "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}]
            }
        ],
        "city": {
            "id": 2950159,
            "name": "Berlin",
            "coord": {"lat": 52.5244, "lon": 13.4105},
            "country": "DE",
            "timezone": 3600,
            "sunrise": 1709273151,
            "sunset": 1709312528
        }
    }"#;

    #[test]
    fn test_parse_forecast() {
        let payload = parse_forecast(FORECAST).unwrap();

        assert_eq!(payload.location.name, "Berlin");
        assert_eq!(payload.location.country.as_deref(), Some("DE"));
        assert_eq!(payload.location.utc_offset_seconds, Some(3600));

        assert_eq!(payload.samples.len(), 2);
        let first = &payload.samples[0];
        assert_eq!(first.timestamp.timestamp(), 1_709_251_200);
        assert_eq!(first.weather_code, 500);
        assert_eq!(first.description, "light rain");
        assert_eq!(first.pop, 0.35);
        // pop defaults to zero when absent
        assert_eq!(payload.samples[1].pop, 0.0);
    }

    #[test]
    fn test_forecast_item_without_weather_is_rejected() {
        let json = r#"{
            "list": [{"dt": 1709251200, "main": {"temp": 1.0, "temp_min": 1.0, "temp_max": 1.0}, "weather": []}],
            "city": {"name": "Nowhere", "coord": {"lat": 0.0, "lon": 0.0}}
        }"#;

        let err = parse_forecast(json).unwrap_err();
        assert!(matches!(err, SkycastError::Parse { .. }));
        assert!(err.to_string().contains("No weather entry"));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let err = parse_forecast("{\"list\": [").unwrap_err();
        assert!(matches!(err, SkycastError::Json { .. }));
    }

    #[test]
    fn test_parse_current() {
        let json = r#"{
            "coord": {"lon": -0.1257, "lat": 51.5085},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "main": {"temp": 14.2, "feels_like": 13.1, "temp_min": 12.9, "temp_max": 15.6, "pressure": 1020, "humidity": 62},
            "visibility": 10000,
            "wind": {"speed": 4.1, "deg": 250},
            "clouds": {"all": 0},
            "dt": 1709290800,
            "sys": {"country": "GB", "sunrise": 1709275260, "sunset": 1709314620},
            "timezone": 0,
            "name": "London"
        }"#;

        let payload = parse_current(json).unwrap();
        assert_eq!(payload.location.display_name(), "London, GB");
        assert_eq!(payload.current.humidity, 62);
        assert_eq!(payload.current.wind_direction, 250.0);
        assert!(payload.current.is_daytime());
        assert_eq!(
            payload.current.condition(),
            crate::WeatherCondition::ClearDay
        );
    }

    #[test]
    fn test_parse_locations() {
        let json = r#"[
            {"name": "Springfield", "lat": 39.80, "lon": -89.64, "country": "US", "state": "Illinois"},
            {"name": "Springfield", "lat": 37.21, "lon": -93.29, "country": "US"}
        ]"#;

        let locations = parse_locations(json).unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[1].latitude, 37.21);
        assert_eq!(locations[0].display_name(), "Springfield, US");
    }
}
